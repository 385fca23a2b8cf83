//! HTTP 요청/응답을 가로채는 미들웨어 모듈입니다.
//!
//! 요청 측 체인은 등록 순서대로, 응답 측 체인은 역순으로 실행됩니다.
//! CORS preflight 단락과 공유 키 접근 제어가 여기서 처리됩니다.

pub mod chain;
pub mod cors;
pub mod error;
pub mod proxy_key;
pub mod response;
pub mod traits;

use crate::proxy::ProxyBody;

pub type Request = hyper::Request<ProxyBody>;
pub type Response = hyper::Response<ProxyBody>;

pub use chain::MiddlewareChain;
pub use error::MiddlewareError;
pub use response::handle_middleware_error;
pub use traits::Middleware;
