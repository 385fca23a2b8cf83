use async_trait::async_trait;
use hyper::header::HeaderName;
use tracing::warn;

use super::config::ProxyKeyConfig;
use crate::middleware::{Middleware, MiddlewareError, Request, Response};

/// 공유 키 접근 제어 미들웨어
///
/// 설정된 키와 요청 헤더 값을 바이트 단위로 정확히 비교합니다. 실패
/// 기록에는 호출자가 제시한 값만 남기고 기대값은 남기지 않습니다.
pub struct ProxyKeyMiddleware {
    config: ProxyKeyConfig,
    header_name: HeaderName,
}

impl ProxyKeyMiddleware {
    pub fn new(config: ProxyKeyConfig) -> Result<Self, MiddlewareError> {
        let header_name = config.header_name.parse::<HeaderName>().map_err(|e| {
            MiddlewareError::Config(format!("키 헤더 이름 오류 '{}': {}", config.header_name, e))
        })?;
        Ok(Self {
            config,
            header_name,
        })
    }

    fn is_exempt(&self, path: &str) -> bool {
        self.config.exempt_paths.iter().any(|p| p == path)
    }
}

#[async_trait]
impl Middleware for ProxyKeyMiddleware {
    fn name(&self) -> &str {
        "proxy-key"
    }

    async fn handle_request(&self, req: Request) -> Result<Request, MiddlewareError> {
        let Some(expected) = self.config.key.as_deref().filter(|k| !k.is_empty()) else {
            // 키가 설정되지 않으면 인증은 비활성 상태다
            return Ok(req);
        };

        if self.is_exempt(req.uri().path()) {
            return Ok(req);
        }

        let authorized = req
            .headers()
            .get(&self.header_name)
            .map(|value| value.as_bytes() == expected.as_bytes())
            .unwrap_or(false);

        if authorized {
            return Ok(req);
        }

        let presented = req
            .headers()
            .get(&self.header_name)
            .map(|value| String::from_utf8_lossy(value.as_bytes()).into_owned());
        warn!(presented = ?presented, "프록시 키 불일치");
        Err(MiddlewareError::Unauthorized { presented })
    }

    async fn handle_response(&self, res: Response) -> Result<Response, MiddlewareError> {
        Ok(res)
    }
}
