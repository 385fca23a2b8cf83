use std::env;
use std::time::Duration;

use serde::Deserialize;

use super::SettingsError;

/// 서버 설정
#[derive(Clone, Debug, Deserialize)]
pub struct ServerSettings {
    /// 리스닝 포트 (기본값: 3000)
    #[serde(default = "default_port")]
    pub port: u16,

    /// 공유 접근 키. 없거나 비어 있으면 인증이 비활성화됩니다
    #[serde(default)]
    pub proxy_key: Option<String>,

    /// 업스트림 응답 대기 제한 (초). 0이면 제한 없음 (기본값: 30)
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

fn default_port() -> u16 {
    3000
}

fn default_request_timeout_secs() -> u64 {
    30
}

pub fn parse_env_var<T: std::str::FromStr, F: FnOnce() -> T>(
    name: &str,
    default: F,
) -> Result<T, SettingsError>
where
    T::Err: std::fmt::Display,
{
    match env::var(name) {
        Ok(val) => val.parse().map_err(|e: T::Err| SettingsError::EnvVarInvalid {
            var_name: name.to_string(),
            value: val,
            reason: e.to_string(),
        }),
        Err(env::VarError::NotPresent) => Ok(default()),
        Err(e) => Err(SettingsError::EnvVarInvalid {
            var_name: name.to_string(),
            value: "".to_string(),
            reason: e.to_string(),
        }),
    }
}

impl ServerSettings {
    pub fn from_env() -> Result<Self, SettingsError> {
        let settings = Self {
            port: parse_env_var("PORT", default_port)?,
            proxy_key: env::var("PROXY_KEY").ok(),
            request_timeout_secs: parse_env_var(
                "PROXY_REQUEST_TIMEOUT_SECS",
                default_request_timeout_secs,
            )?,
        };

        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.port == 0 {
            return Err(SettingsError::EnvVarInvalid {
                var_name: "PORT".to_string(),
                value: self.port.to_string(),
                reason: "포트는 0이 될 수 없습니다".to_string(),
            });
        }
        Ok(())
    }

    /// 인증 활성화 여부. 빈 키는 비활성화로 취급합니다.
    pub fn auth_enabled(&self) -> bool {
        self.proxy_key.as_deref().map_or(false, |k| !k.is_empty())
    }

    /// 업스트림 요청 제한 시간. 0으로 설정하면 None을 반환합니다.
    pub fn request_timeout(&self) -> Option<Duration> {
        if self.request_timeout_secs == 0 {
            None
        } else {
            Some(Duration::from_secs(self.request_timeout_secs))
        }
    }
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            port: default_port(),
            proxy_key: None,
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}
