use std::convert::Infallible;
use std::sync::Arc;
use std::time::Instant;

use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper::{Request, Response, StatusCode};
use uuid::Uuid;

use crate::headers::ForwardPolicy;
use crate::logging::{log_request, RequestLog};
use crate::middleware::{handle_middleware_error, MiddlewareChain, MiddlewareError};
use crate::proxy::{self, full_body, ProxyBody, ProxyConfig};
use crate::routing::RouteTable;

/// 헬스 체크 경로. 인증과 라우팅을 거치지 않습니다.
pub const HEALTH_PATH: &str = "/health";

/// 요청 하나를 파이프라인 전체에 통과시키는 핸들러입니다.
///
/// 처리 순서: 요청 미들웨어(CORS preflight 단락, 접근 키 검사) →
/// 헬스 체크 → 라우트 해석 → 헤더 정책 → 업스트림 전달 →
/// 응답 미들웨어(CORS 주입)
pub struct RequestHandler {
    route_table: Arc<RouteTable>,
    chain: MiddlewareChain,
    policy: ForwardPolicy,
    proxy_config: ProxyConfig,
}

impl RequestHandler {
    pub fn new(
        route_table: Arc<RouteTable>,
        chain: MiddlewareChain,
        policy: ForwardPolicy,
        proxy_config: ProxyConfig,
    ) -> Self {
        Self {
            route_table,
            chain,
            policy,
            proxy_config,
        }
    }

    pub async fn handle_request(
        &self,
        req: Request<ProxyBody>,
    ) -> Result<Response<ProxyBody>, Infallible> {
        let request_id = Uuid::new_v4().to_string();
        let start = Instant::now();
        let mut log = RequestLog::new(request_id);
        log.with_request(&req);

        let response = self.dispatch(&mut log, req).await;

        log.with_response(response.status());
        log.duration_ms = start.elapsed().as_millis() as u64;
        log_request(&log);

        Ok(response)
    }

    async fn dispatch(
        &self,
        log: &mut RequestLog,
        req: Request<ProxyBody>,
    ) -> Response<ProxyBody> {
        // 1. 요청 미들웨어: preflight 단락, 접근 키 검사
        let req = match self.chain.handle_request(req).await {
            Ok(req) => req,
            Err(MiddlewareError::Preflight(res)) => return self.finish(res).await,
            Err(e) => {
                log.with_error(&e);
                return self.finish(handle_middleware_error(e)).await;
            }
        };

        // 2. 헬스 체크는 라우팅 없이 바로 응답
        if req.uri().path() == HEALTH_PATH {
            return self.finish(health_response()).await;
        }

        // 3. 라우트 해석 (쿼리 포함 경로 기준)
        let target = req
            .uri()
            .path_and_query()
            .map(|pq| pq.as_str().to_string())
            .unwrap_or_else(|| "/".to_string());
        let resolved = match self.route_table.resolve(&target) {
            Ok(resolved) => resolved,
            Err(e) => {
                log.with_error(&e);
                return self.finish(not_found_response()).await;
            }
        };
        log.with_upstream(&resolved.upstream);

        // 4. 헤더 정책: 허용 목록에 있는 헤더만 업스트림으로 전달
        let headers = self
            .policy
            .build_upstream_headers(req.headers(), &resolved.upstream);

        // 5. 업스트림 전달
        match proxy::proxy_request(&self.proxy_config, &resolved, headers, req).await {
            Ok(response) => self.finish(response).await,
            Err(e) => {
                log.with_error(&e);
                self.finish(proxy::error_response(&e)).await
            }
        }
    }

    /// 모든 최종 응답은 응답 미들웨어 체인을 거칩니다. 오류 응답에도
    /// CORS 헤더가 실리는 것은 이 경로가 보장합니다.
    async fn finish(&self, res: Response<ProxyBody>) -> Response<ProxyBody> {
        match self.chain.handle_response(res).await {
            Ok(res) => res,
            Err(e) => handle_middleware_error(e),
        }
    }

    pub async fn handle_connection<I>(
        &self,
        io: I,
    ) -> std::result::Result<(), Box<dyn std::error::Error + Send + Sync>>
    where
        I: hyper::rt::Read + hyper::rt::Write + Send + Unpin + 'static,
    {
        http1::Builder::new()
            .serve_connection(
                io,
                service_fn(|req| self.handle_request(req.map(ProxyBody::new))),
            )
            .await
            .map_err(|e| e.into())
    }
}

fn health_response() -> Response<ProxyBody> {
    Response::builder()
        .status(StatusCode::OK)
        .body(full_body("ok"))
        .unwrap_or_else(|_| Response::new(full_body("ok")))
}

fn not_found_response() -> Response<ProxyBody> {
    Response::builder()
        .status(StatusCode::NOT_FOUND)
        .body(full_body("Unknown route"))
        .unwrap_or_else(|_| Response::new(full_body("Unknown route")))
}
