use std::convert::Infallible;
use std::time::Duration;

use http_body_util::combinators::BoxBody;
use http_body_util::{BodyExt, Full};
use hyper::body::Bytes;
use hyper::{HeaderMap, Request, Response, StatusCode, Uri};
use hyper_util::client::legacy;
use hyper_util::client::legacy::connect::HttpConnector;
use hyper_util::rt::TokioExecutor;
use tracing::{error, info, instrument};

use crate::routing::ResolvedTarget;

/// 파이프라인 전체에서 사용하는 스트리밍 바디 타입입니다.
///
/// 인바운드 바디와 업스트림 응답 바디 모두 이 타입으로 감싸서 버퍼링
/// 없이 그대로 통과시킵니다.
pub type ProxyBody = BoxBody<Bytes, hyper::Error>;

/// 고정 바이트를 ProxyBody로 감쌉니다. 오류 응답 본문 등에 사용합니다.
pub fn full_body(data: impl Into<Bytes>) -> ProxyBody {
    BoxBody::new(Full::new(data.into()).map_err(|never: Infallible| match never {}))
}

/// 빈 바디
pub fn empty_body() -> ProxyBody {
    full_body(Bytes::new())
}

type HttpsClient = legacy::Client<hyper_rustls::HttpsConnector<HttpConnector>, ProxyBody>;

/// 업스트림 호출에 쓰이는 공유 클라이언트와 타임아웃 설정입니다.
#[derive(Clone)]
pub struct ProxyConfig {
    client: HttpsClient,
    request_timeout: Option<Duration>,
}

impl ProxyConfig {
    pub fn new(request_timeout: Option<Duration>) -> Self {
        let mut connector = HttpConnector::new();
        connector.set_connect_timeout(Some(Duration::from_secs(10)));
        connector.enforce_http(false);

        // 업스트림은 HTTPS 443 포트로만 접속한다
        let https = hyper_rustls::HttpsConnectorBuilder::new()
            .with_native_roots()
            .expect("failed to load native root certificates")
            .https_only()
            .enable_http1()
            .wrap_connector(connector);

        let client = legacy::Client::builder(TokioExecutor::new())
            .pool_idle_timeout(Duration::from_secs(90))
            .build(https);

        Self {
            client,
            request_timeout,
        }
    }
}

/// 업스트림 구간에서 발생할 수 있는 오류입니다.
///
/// DNS 실패, 연결 거부, TLS 실패, 중간 연결 종료 등 전송 계층 실패는
/// 원인을 구분하지 않고 모두 단일 게이트웨이 오류(502)로 매핑됩니다.
#[derive(Debug, thiserror::Error)]
pub enum ProxyError {
    #[error("잘못된 업스트림 URI: {0}")]
    InvalidUri(#[from] hyper::http::uri::InvalidUri),

    #[error("업스트림 요청 생성 실패: {0}")]
    RequestBuild(#[from] hyper::http::Error),

    #[error("{0}")]
    Upstream(#[from] legacy::Error),

    #[error("업스트림 응답 대기 시간 초과 ({0:?})")]
    Timeout(Duration),
}

/// 업스트림으로 요청을 전달하고 응답을 그대로 되돌립니다.
///
/// 인바운드 바디는 아웃바운드 요청으로, 업스트림 응답 바디는 호출자
/// 응답으로 청크 단위 스트리밍됩니다. 응답 상태와 헤더는 바디가 끝나기
/// 전에 도착하는 즉시 호출자에게 전달됩니다.
#[instrument(skip_all, fields(upstream = %target.upstream, path = %target.path))]
pub async fn proxy_request(
    config: &ProxyConfig,
    target: &ResolvedTarget,
    headers: HeaderMap,
    req: Request<ProxyBody>,
) -> Result<Response<ProxyBody>, ProxyError> {
    // 재작성 결과가 '/'로 시작하지 않으면 호스트 이름에 붙어버린다
    let path = if target.path.starts_with('/') {
        target.path.clone()
    } else {
        format!("/{}", target.path)
    };
    let uri: Uri = format!("https://{}{}", target.upstream, path).parse()?;

    let (parts, body) = req.into_parts();
    let mut upstream_req = Request::builder()
        .method(parts.method)
        .uri(uri)
        .body(body)?;
    *upstream_req.headers_mut() = headers;

    info!(method = %upstream_req.method(), "업스트림으로 전달");

    let pending = config.client.request(upstream_req);
    let res = match config.request_timeout {
        Some(limit) => tokio::time::timeout(limit, pending)
            .await
            .map_err(|_| ProxyError::Timeout(limit))??,
        None => pending.await?,
    };

    let (parts, body) = res.into_parts();
    Ok(Response::from_parts(parts, BoxBody::new(body)))
}

/// 전송 계층 오류를 502 응답으로 변환합니다. 실패 원인 메시지는
/// 운영자 진단을 위해 본문에 그대로 노출합니다.
pub fn error_response(err: &ProxyError) -> Response<ProxyBody> {
    error!(error = %err, "업스트림 요청 실패");
    Response::builder()
        .status(StatusCode::BAD_GATEWAY)
        .body(full_body(format!("Proxy error: {}", err)))
        .unwrap_or_else(|_| {
            let mut res = Response::new(full_body("Proxy error"));
            *res.status_mut() = StatusCode::BAD_GATEWAY;
            res
        })
}
