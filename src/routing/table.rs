use serde::Deserialize;
use tracing::{debug, warn};

use crate::routing::{Route, RoutingError};

/// 접두사가 중복될 때 어느 라우트를 선택할지 결정하는 전략입니다.
///
/// 설정 계약의 일부로 명시적으로 고정합니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MatchStrategy {
    /// 선언 순서상 먼저 매칭되는 라우트 선택 (기준 동작)
    #[default]
    DeclarationOrder,
    /// 매칭되는 라우트 중 접두사가 가장 긴 것 선택
    LongestPrefix,
}

/// 라우트 해석 결과입니다.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedTarget {
    pub upstream: String,
    pub path: String,
}

/// 정적 라우트 테이블입니다.
///
/// 프로세스 시작 시 한 번 만들어지고 이후 읽기 전용이므로, 동시 요청
/// 사이에 잠금 없이 공유할 수 있습니다.
#[derive(Debug, Clone)]
pub struct RouteTable {
    routes: Vec<Route>,
    strategy: MatchStrategy,
}

impl RouteTable {
    pub fn new(routes: Vec<Route>, strategy: MatchStrategy) -> Self {
        Self { routes, strategy }
    }

    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    /// 등록된 접두사 목록. 시작 로그와 오류 진단에 사용합니다.
    pub fn prefixes(&self) -> Vec<&str> {
        self.routes.iter().map(|r| r.prefix.as_str()).collect()
    }

    /// 인바운드 경로(쿼리 포함)를 업스트림 호스트와 재작성된 경로로 해석합니다.
    pub fn resolve(&self, target: &str) -> Result<ResolvedTarget, RoutingError> {
        let matched = match self.strategy {
            MatchStrategy::DeclarationOrder => self
                .routes
                .iter()
                .find_map(|route| route.match_target(target).map(|path| (route, path))),
            MatchStrategy::LongestPrefix => self
                .routes
                .iter()
                .filter_map(|route| route.match_target(target).map(|path| (route, path)))
                .max_by_key(|(route, _)| route.prefix.len()),
        };

        match matched {
            Some((route, path)) => {
                debug!(
                    prefix = %route.prefix,
                    upstream = %route.upstream,
                    path = %path,
                    "라우트 매칭"
                );
                Ok(ResolvedTarget {
                    upstream: route.upstream.clone(),
                    path,
                })
            }
            None => {
                warn!(target = %target, available = ?self.prefixes(), "매칭되는 라우트 없음");
                Err(RoutingError::RouteNotFound {
                    target: target.to_string(),
                    available: self.prefixes().iter().map(|s| s.to_string()).collect(),
                })
            }
        }
    }
}
