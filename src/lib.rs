//! demeter-proxy는 경로 접두사 기반 라우팅을 지원하는 경량 API 프록시입니다.
//!
//! # 주요 기능
//!
//! - 경로 접두사 기반 라우팅과 경로 재작성
//! - 공유 키 기반 접근 제어
//! - 허용 목록 기반 헤더 전달
//! - 요청/응답 바디 스트리밍 중계
//!
//! # 예제
//!
//! ```
//! use demeter_proxy::routing::{Route, RouteTable, PathRewrite, MatchStrategy};
//!
//! let table = RouteTable::new(
//!     vec![
//!         Route::new("/zerion", "api.zerion.io", PathRewrite::Identity),
//!         Route::new(
//!             "/ibkr",
//!             "ndcdyn.interactivebrokers.com",
//!             PathRewrite::Prepend("/AccountManagement/FlexWebService".into()),
//!         ),
//!     ],
//!     MatchStrategy::DeclarationOrder,
//! );
//!
//! let target = table.resolve("/zerion/v1/wallets").unwrap();
//! assert_eq!(target.upstream, "api.zerion.io");
//! assert_eq!(target.path, "/v1/wallets");
//! ```
//!
//! # 접두사 중복 처리
//!
//! ```
//! use demeter_proxy::routing::{Route, RouteTable, PathRewrite, MatchStrategy};
//!
//! let routes = vec![
//!     Route::new("/api", "general.example.com", PathRewrite::Identity),
//!     Route::new("/api/v2", "v2.example.com", PathRewrite::Identity),
//! ];
//!
//! // 선언 순서 전략: 먼저 선언된 /api가 /api/v2 요청도 가져간다
//! let table = RouteTable::new(routes.clone(), MatchStrategy::DeclarationOrder);
//! assert_eq!(table.resolve("/api/v2/users").unwrap().upstream, "general.example.com");
//!
//! // 최장 접두사 전략: 더 구체적인 /api/v2가 이긴다
//! let table = RouteTable::new(routes, MatchStrategy::LongestPrefix);
//! assert_eq!(table.resolve("/api/v2/users").unwrap().upstream, "v2.example.com");
//! ```

pub mod headers;
pub mod logging;
pub mod middleware;
pub mod proxy;
pub mod routing;
pub mod server;
pub mod settings;
