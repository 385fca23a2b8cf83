use std::sync::Arc;

use tracing::{error, info};

use demeter_proxy::logging;
use demeter_proxy::middleware::cors::CorsMiddleware;
use demeter_proxy::middleware::proxy_key::{ProxyKeyConfig, ProxyKeyMiddleware};
use demeter_proxy::middleware::MiddlewareChain;
use demeter_proxy::proxy::ProxyConfig;
use demeter_proxy::server::{RequestHandler, ServerListener};
use demeter_proxy::settings::Settings;

#[tokio::main]
async fn main() {
    let settings = match Settings::load() {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("설정 로드 실패: {}", e);
            std::process::exit(1);
        }
    };

    logging::init_logging(&settings.logging);

    let route_table = Arc::new(settings.build_route_table());

    // preflight 단락이 키 검사보다 먼저 와야 하므로 등록 순서가 중요하다
    let mut chain = MiddlewareChain::new();
    match CorsMiddleware::new(&settings.cors) {
        Ok(cors) => chain.add(cors),
        Err(e) => {
            error!(error = %e, "CORS 미들웨어 생성 실패");
            std::process::exit(1);
        }
    }
    match ProxyKeyMiddleware::new(ProxyKeyConfig::new(settings.server.proxy_key.clone())) {
        Ok(gate) => chain.add(gate),
        Err(e) => {
            error!(error = %e, "접근 키 미들웨어 생성 실패");
            std::process::exit(1);
        }
    }

    let policy = match settings.headers.to_policy() {
        Ok(policy) => policy,
        Err(e) => {
            error!(error = %e, "헤더 정책 생성 실패");
            std::process::exit(1);
        }
    };

    let proxy_config = ProxyConfig::new(settings.server.request_timeout());
    let handler = Arc::new(RequestHandler::new(
        route_table.clone(),
        chain,
        policy,
        proxy_config,
    ));

    info!(
        port = settings.server.port,
        routes = ?route_table.prefixes(),
        auth = if settings.server.auth_enabled() { "enabled" } else { "disabled" },
        "demeter-proxy 시작"
    );

    let listener = match ServerListener::new(&settings.server).await {
        Ok(listener) => listener,
        Err(e) => {
            error!(error = %e, "리스너 초기화 실패");
            std::process::exit(1);
        }
    };

    if let Err(e) = listener.run(handler).await {
        error!(error = %e, "서버 종료");
        std::process::exit(1);
    }
}
