//! 프로세스 시작 시 한 번 읽히고 이후 변경되지 않는 설정 모듈입니다.

use std::collections::HashSet;
use std::{env, fs, path::Path};

use serde::Deserialize;

use crate::middleware::cors::CorsConfig;
use crate::routing::RouteTable;

mod error;
mod headers;
mod logging;
mod routes;
mod server;

pub use error::SettingsError;
pub use headers::HeaderSettings;
pub use logging::{LogFormat, LogSettings};
pub use routes::{default_routes, RouteSettings, RoutingSettings};
pub use server::{parse_env_var, ServerSettings};

pub type Result<T> = std::result::Result<T, SettingsError>;

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// 서버 설정
    #[serde(default)]
    pub server: ServerSettings,

    /// 로깅 설정
    #[serde(default)]
    pub logging: LogSettings,

    /// 라우팅 동작 설정
    #[serde(default)]
    pub routing: RoutingSettings,

    /// 헤더 정책 기본값
    #[serde(default)]
    pub headers: HeaderSettings,

    /// CORS 정책
    #[serde(default)]
    pub cors: CorsConfig,

    /// 정적 라우트 테이블. 비어 있으면 기본 라우트를 사용합니다
    #[serde(default)]
    pub routes: Vec<RouteSettings>,
}

impl Settings {
    /// PROXY_CONFIG_FILE이 지정되면 TOML 파일에서, 아니면 환경 변수에서
    /// 로드합니다.
    pub fn load() -> Result<Self> {
        if let Ok(config_path) = env::var("PROXY_CONFIG_FILE") {
            Self::from_toml_file(&config_path)
        } else {
            Self::from_env()
        }
    }

    pub fn from_toml_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path).map_err(|e| SettingsError::FileError {
            path: path.as_ref().to_string_lossy().to_string(),
            error: e,
        })?;

        let mut settings: Self =
            toml::from_str(&content).map_err(|e| SettingsError::ParseError { source: e })?;

        if settings.routes.is_empty() {
            settings.routes = default_routes();
        }

        settings.validate()?;
        Ok(settings)
    }

    pub fn from_env() -> Result<Self> {
        let settings = Self {
            server: ServerSettings::from_env()?,
            logging: LogSettings::from_env()?,
            routing: RoutingSettings::default(),
            headers: HeaderSettings::default(),
            cors: CorsConfig::default(),
            routes: default_routes(),
        };

        settings.validate()?;
        Ok(settings)
    }

    /// 설정 유효성 검증
    pub fn validate(&self) -> Result<()> {
        self.server.validate()?;

        if self.routes.is_empty() {
            return Err(SettingsError::InvalidConfig(
                "라우트가 하나 이상 필요합니다".to_string(),
            ));
        }

        let mut seen = HashSet::new();
        for route in &self.routes {
            route.validate()?;
            if !seen.insert(route.prefix.as_str()) {
                return Err(SettingsError::InvalidConfig(format!(
                    "중복된 접두사: {}",
                    route.prefix
                )));
            }
        }

        Ok(())
    }

    /// 설정으로부터 읽기 전용 라우트 테이블을 만듭니다.
    pub fn build_route_table(&self) -> RouteTable {
        RouteTable::new(
            self.routes.iter().map(RouteSettings::to_route).collect(),
            self.routing.strategy,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routing::MatchStrategy;

    #[test]
    fn test_settings_from_toml() {
        let toml_content = r#"
            [server]
            port = 8080
            proxy_key = "secret"

            [logging]
            format = "json"
            level = "debug"

            [routing]
            strategy = "longest-prefix"

            [headers]
            accept_default = "application/json"

            [[routes]]
            prefix = "/zerion"
            upstream = "api.zerion.io"

            [[routes]]
            prefix = "/ibkr"
            upstream = "ndcdyn.interactivebrokers.com"
            rewrite_prefix = "/AccountManagement/FlexWebService"
        "#;

        let settings: Settings = toml::from_str(toml_content).unwrap();
        assert_eq!(settings.server.port, 8080);
        assert!(settings.server.auth_enabled());
        assert_eq!(settings.routing.strategy, MatchStrategy::LongestPrefix);
        assert_eq!(settings.headers.accept_default, "application/json");
        assert_eq!(settings.routes.len(), 2);
        assert_eq!(settings.routes[1].rewrite_prefix.as_deref(), Some("/AccountManagement/FlexWebService"));
        settings.validate().unwrap();
    }

    #[test]
    fn test_empty_toml_uses_defaults() {
        let settings: Settings = toml::from_str("").unwrap();
        assert_eq!(settings.server.port, 3000);
        assert!(!settings.server.auth_enabled());
        assert_eq!(settings.routing.strategy, MatchStrategy::DeclarationOrder);
        assert!(settings.routes.is_empty());
    }

    #[test]
    fn test_validate_rejects_duplicate_prefix() {
        let toml_content = r#"
            [[routes]]
            prefix = "/zerion"
            upstream = "api.zerion.io"

            [[routes]]
            prefix = "/zerion"
            upstream = "other.example.com"
        "#;

        let settings: Settings = toml::from_str(toml_content).unwrap();
        assert!(settings.validate().is_err(), "중복 접두사는 거부되어야 함");
    }

    #[test]
    fn test_validate_rejects_bad_upstream() {
        let toml_content = r#"
            [[routes]]
            prefix = "/api"
            upstream = "https://api.example.com"
        "#;

        let settings: Settings = toml::from_str(toml_content).unwrap();
        assert!(
            settings.validate().is_err(),
            "스킴이 붙은 업스트림은 거부되어야 함"
        );
    }

    #[test]
    fn test_build_route_table() {
        let settings = Settings {
            server: ServerSettings::default(),
            logging: LogSettings::default(),
            routing: RoutingSettings::default(),
            headers: HeaderSettings::default(),
            cors: CorsConfig::default(),
            routes: default_routes(),
        };

        let table = settings.build_route_table();
        assert_eq!(table.prefixes(), vec!["/zerion", "/ibkr"]);
    }
}
