use hyper::header::HeaderValue;
use serde::Deserialize;

use super::SettingsError;
use crate::headers::{ForwardPolicy, DEFAULT_ACCEPT, DEFAULT_USER_AGENT};

/// 헤더 정책 기본값 설정
#[derive(Debug, Clone, Deserialize)]
pub struct HeaderSettings {
    /// Accept 헤더가 없을 때 쓰는 기본값
    #[serde(default = "default_accept")]
    pub accept_default: String,

    /// User-Agent 헤더가 없을 때 쓰는 기본값
    #[serde(default = "default_user_agent")]
    pub user_agent_default: String,
}

fn default_accept() -> String {
    DEFAULT_ACCEPT.to_string()
}

fn default_user_agent() -> String {
    DEFAULT_USER_AGENT.to_string()
}

impl HeaderSettings {
    /// 설정값으로 헤더 전달 정책을 만듭니다.
    pub fn to_policy(&self) -> Result<ForwardPolicy, SettingsError> {
        let accept = HeaderValue::from_str(&self.accept_default).map_err(|e| {
            SettingsError::InvalidConfig(format!(
                "accept_default 값 오류 '{}': {}",
                self.accept_default, e
            ))
        })?;
        let user_agent = HeaderValue::from_str(&self.user_agent_default).map_err(|e| {
            SettingsError::InvalidConfig(format!(
                "user_agent_default 값 오류 '{}': {}",
                self.user_agent_default, e
            ))
        })?;

        Ok(ForwardPolicy::with_defaults(accept, user_agent))
    }
}

impl Default for HeaderSettings {
    fn default() -> Self {
        Self {
            accept_default: default_accept(),
            user_agent_default: default_user_agent(),
        }
    }
}
