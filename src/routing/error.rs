use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoutingError {
    RouteNotFound {
        target: String,
        available: Vec<String>,
    },
}

impl fmt::Display for RoutingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RouteNotFound { target, available } => write!(
                f,
                "매칭되는 라우트 없음: {} (등록된 접두사: {:?})",
                target, available
            ),
        }
    }
}

impl std::error::Error for RoutingError {}
