use serde::Deserialize;

use super::SettingsError;
use crate::routing::{MatchStrategy, PathRewrite, Route};

/// 라우트 한 건의 설정입니다.
#[derive(Debug, Clone, Deserialize)]
pub struct RouteSettings {
    /// 인바운드 경로 접두사 (예: "/zerion")
    pub prefix: String,

    /// 업스트림 호스트 이름. HTTPS 443 포트 고정
    pub upstream: String,

    /// 나머지 경로 앞에 붙일 고정 접두사. 생략하면 그대로 전달
    #[serde(default)]
    pub rewrite_prefix: Option<String>,
}

impl RouteSettings {
    pub fn to_route(&self) -> Route {
        let rewrite = match &self.rewrite_prefix {
            Some(prefix) => PathRewrite::Prepend(prefix.clone()),
            None => PathRewrite::Identity,
        };
        Route::new(self.prefix.clone(), self.upstream.clone(), rewrite)
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        if !self.prefix.starts_with('/') {
            return Err(SettingsError::InvalidConfig(format!(
                "접두사는 /로 시작해야 합니다: {}",
                self.prefix
            )));
        }

        if self.upstream.is_empty()
            || self.upstream.contains('/')
            || self.upstream.contains(':')
        {
            return Err(SettingsError::InvalidConfig(format!(
                "업스트림은 스킴과 포트 없는 호스트 이름이어야 합니다: {}",
                self.upstream
            )));
        }

        Ok(())
    }
}

/// 설정 파일이 라우트를 지정하지 않았을 때 쓰는 기본 라우트 테이블입니다.
pub fn default_routes() -> Vec<RouteSettings> {
    vec![
        RouteSettings {
            prefix: "/zerion".to_string(),
            upstream: "api.zerion.io".to_string(),
            rewrite_prefix: None,
        },
        RouteSettings {
            prefix: "/ibkr".to_string(),
            upstream: "ndcdyn.interactivebrokers.com".to_string(),
            rewrite_prefix: Some("/AccountManagement/FlexWebService".to_string()),
        },
    ]
}

/// 라우팅 동작 설정
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RoutingSettings {
    /// 접두사 중복 시 선택 전략
    #[serde(default)]
    pub strategy: MatchStrategy,
}
