use bytes::Bytes;
use hyper::StatusCode;
use tracing::error;

use super::{MiddlewareError, Response};
use crate::proxy::full_body;

/// 미들웨어 오류를 HTTP 응답으로 변환합니다.
pub fn handle_middleware_error(err: MiddlewareError) -> Response {
    match err {
        MiddlewareError::Preflight(res) => res,
        MiddlewareError::Unauthorized { .. } => build(StatusCode::UNAUTHORIZED, "Unauthorized"),
        MiddlewareError::InvalidRequest(msg) => build(StatusCode::BAD_REQUEST, msg),
        MiddlewareError::Config(msg) => {
            error!(error = %msg, "미들웨어 설정 오류");
            build(StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error")
        }
    }
}

fn build(status: StatusCode, body: impl Into<Bytes>) -> Response {
    hyper::Response::builder()
        .status(status)
        .body(full_body(body))
        .unwrap_or_else(|_| hyper::Response::new(full_body("Internal Server Error")))
}
