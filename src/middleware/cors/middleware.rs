use async_trait::async_trait;
use hyper::header::{self, HeaderValue};
use hyper::{HeaderMap, Method, StatusCode};
use tracing::debug;

use super::config::CorsConfig;
use crate::middleware::{Middleware, MiddlewareError, Request, Response};
use crate::proxy::empty_body;

/// CORS 미들웨어
///
/// OPTIONS preflight 요청은 인증과 라우팅을 거치지 않고 바로 204로
/// 단락 처리하고, 그 외 모든 응답에 CORS 헤더를 주입합니다.
pub struct CorsMiddleware {
    allow_origin: HeaderValue,
    allow_methods: HeaderValue,
    allow_headers: HeaderValue,
}

impl CorsMiddleware {
    pub fn new(config: &CorsConfig) -> Result<Self, MiddlewareError> {
        Ok(Self {
            allow_origin: parse_value(&config.allow_origin)?,
            allow_methods: parse_value(&config.allow_methods.join(", "))?,
            allow_headers: parse_value(&config.allow_headers.join(", "))?,
        })
    }

    /// CORS 헤더 설정. 업스트림이 보낸 값은 덮어씁니다.
    fn set_cors_headers(&self, headers: &mut HeaderMap) {
        headers.insert(
            header::ACCESS_CONTROL_ALLOW_ORIGIN,
            self.allow_origin.clone(),
        );
        headers.insert(
            header::ACCESS_CONTROL_ALLOW_METHODS,
            self.allow_methods.clone(),
        );
        headers.insert(
            header::ACCESS_CONTROL_ALLOW_HEADERS,
            self.allow_headers.clone(),
        );
    }

    /// Preflight 요청에 대한 204 응답을 만듭니다.
    fn preflight_response(&self) -> Result<Response, MiddlewareError> {
        let mut response = hyper::Response::builder()
            .status(StatusCode::NO_CONTENT)
            .body(empty_body())
            .map_err(|e| MiddlewareError::Config(e.to_string()))?;
        self.set_cors_headers(response.headers_mut());
        Ok(response)
    }
}

fn parse_value(value: &str) -> Result<HeaderValue, MiddlewareError> {
    value
        .parse::<HeaderValue>()
        .map_err(|e| MiddlewareError::Config(format!("CORS 헤더 값 오류 '{}': {}", value, e)))
}

#[async_trait]
impl Middleware for CorsMiddleware {
    fn name(&self) -> &str {
        "cors"
    }

    async fn handle_request(&self, req: Request) -> Result<Request, MiddlewareError> {
        if req.method() == Method::OPTIONS {
            debug!(path = %req.uri().path(), "CORS preflight 처리");
            return Err(MiddlewareError::Preflight(self.preflight_response()?));
        }
        Ok(req)
    }

    async fn handle_response(&self, mut res: Response) -> Result<Response, MiddlewareError> {
        self.set_cors_headers(res.headers_mut());
        Ok(res)
    }
}
