use tracing::{debug, error, info, span, warn, Level};
use tracing_subscriber::EnvFilter;

use crate::settings::{LogFormat, LogSettings};

/// tracing 구독자를 초기화합니다. RUST_LOG(env-filter 문법)로 세부
/// 조정이 가능합니다.
pub fn init_logging(settings: &LogSettings) {
    let filter = EnvFilter::from_default_env().add_directive(settings.level.into());

    match settings.format {
        LogFormat::Text => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
        LogFormat::Json => {
            tracing_subscriber::fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
    }
}

/// 요청 한 건의 처리 기록입니다.
#[derive(Debug)]
pub struct RequestLog {
    pub request_id: String,
    pub method: String,
    pub path: String,
    pub status_code: u16,
    pub duration_ms: u64,
    pub upstream: Option<String>,
    pub error: Option<String>,
}

impl RequestLog {
    pub fn new(request_id: String) -> Self {
        Self {
            request_id,
            method: String::new(),
            path: String::new(),
            status_code: 0,
            duration_ms: 0,
            upstream: None,
            error: None,
        }
    }

    pub fn with_request<B>(&mut self, req: &hyper::Request<B>) {
        self.method = req.method().to_string();
        self.path = req.uri().path().to_string();

        debug!(
            request_id = %self.request_id,
            method = %self.method,
            path = %self.path,
            "요청 수신"
        );
    }

    pub fn with_upstream(&mut self, upstream: &str) {
        self.upstream = Some(upstream.to_string());
    }

    pub fn with_response(&mut self, status: hyper::StatusCode) {
        self.status_code = status.as_u16();
    }

    pub fn with_error(&mut self, error: impl std::fmt::Display) {
        self.error = Some(error.to_string());
    }
}

/// 요청 처리 결과를 결과에 맞는 레벨로 한 번에 기록합니다.
pub fn log_request(log: &RequestLog) {
    let level = if log.error.is_some() {
        Level::ERROR
    } else if log.status_code >= 400 {
        Level::WARN
    } else {
        Level::INFO
    };

    let span = span!(
        Level::INFO,
        "request",
        request_id = %log.request_id,
        method = %log.method,
        path = %log.path,
        status = %log.status_code,
        duration_ms = %log.duration_ms
    );
    let _enter = span.enter();

    match level {
        Level::ERROR => error!(
            upstream = ?log.upstream,
            error = ?log.error,
            "요청 실패"
        ),
        Level::WARN => warn!(
            upstream = ?log.upstream,
            "요청 거부됨"
        ),
        _ => info!(
            upstream = ?log.upstream,
            "요청 완료"
        ),
    }
}
