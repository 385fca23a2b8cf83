use std::sync::Arc;

use demeter_proxy::headers::ForwardPolicy;
use demeter_proxy::middleware::cors::{CorsConfig, CorsMiddleware};
use demeter_proxy::middleware::proxy_key::{ProxyKeyConfig, ProxyKeyMiddleware};
use demeter_proxy::middleware::MiddlewareChain;
use demeter_proxy::proxy::ProxyConfig;
use demeter_proxy::routing::{MatchStrategy, PathRewrite, Route, RouteTable};
use demeter_proxy::server::{RequestHandler, ServerListener};
use demeter_proxy::settings::ServerSettings;

/// 포트 0으로 프록시를 띄우고 베이스 URL을 돌려주는 테스트 헬퍼입니다.
/// 업스트림 접속이 필요 없는 경로(preflight, 헬스, 401, 404)만 테스트합니다.
async fn spawn_proxy(proxy_key: Option<&str>) -> String {
    let settings = ServerSettings {
        port: 0,
        proxy_key: proxy_key.map(String::from),
        request_timeout_secs: 5,
    };

    let route_table = Arc::new(RouteTable::new(
        vec![Route::new(
            "/zerion",
            "api.zerion.io",
            PathRewrite::Identity,
        )],
        MatchStrategy::DeclarationOrder,
    ));

    let mut chain = MiddlewareChain::new();
    chain.add(CorsMiddleware::new(&CorsConfig::default()).unwrap());
    chain.add(ProxyKeyMiddleware::new(ProxyKeyConfig::new(settings.proxy_key.clone())).unwrap());

    let handler = Arc::new(RequestHandler::new(
        route_table,
        chain,
        ForwardPolicy::default(),
        ProxyConfig::new(settings.request_timeout()),
    ));

    let listener = ServerListener::new(&settings).await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(listener.run(handler));

    format!("http://127.0.0.1:{}", addr.port())
}

#[tokio::test]
async fn test_health_bypasses_auth() {
    let base = spawn_proxy(Some("secret")).await;
    let client = reqwest::Client::new();

    // 키 헤더 없이도 헬스 체크는 200
    let res = client.get(format!("{}/health", base)).send().await.unwrap();
    assert_eq!(res.status(), 200);
    assert_eq!(
        res.headers().get("access-control-allow-origin").unwrap(),
        "*"
    );
    assert_eq!(res.text().await.unwrap(), "ok");
}

#[tokio::test]
async fn test_preflight_bypasses_auth_and_routing() {
    let base = spawn_proxy(Some("secret")).await;
    let client = reqwest::Client::new();

    let res = client
        .request(reqwest::Method::OPTIONS, format!("{}/zerion/anything", base))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), 204);
    assert_eq!(
        res.headers().get("access-control-allow-origin").unwrap(),
        "*"
    );
    assert_eq!(
        res.headers().get("access-control-allow-methods").unwrap(),
        "GET, POST, OPTIONS"
    );
    assert_eq!(res.text().await.unwrap(), "", "preflight 본문은 비어 있어야 함");
}

#[tokio::test]
async fn test_wrong_key_is_rejected_with_cors() {
    let base = spawn_proxy(Some("secret")).await;
    let client = reqwest::Client::new();

    let res = client
        .get(format!("{}/zerion/v1/wallets", base))
        .header("x-proxy-key", "wrong")
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), 401);
    assert_eq!(
        res.headers().get("access-control-allow-origin").unwrap(),
        "*",
        "401 응답에도 CORS 헤더가 실려야 함"
    );
    assert_eq!(res.text().await.unwrap(), "Unauthorized");
}

#[tokio::test]
async fn test_missing_key_is_rejected() {
    let base = spawn_proxy(Some("secret")).await;
    let client = reqwest::Client::new();

    let res = client
        .get(format!("{}/zerion/v1/wallets", base))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), 401);
}

#[tokio::test]
async fn test_unknown_route_is_404_with_cors() {
    let base = spawn_proxy(Some("secret")).await;
    let client = reqwest::Client::new();

    // 올바른 키를 제시해도 매칭되는 라우트가 없으면 404
    let res = client
        .get(format!("{}/unknown/path", base))
        .header("x-proxy-key", "secret")
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), 404);
    assert_eq!(
        res.headers().get("access-control-allow-origin").unwrap(),
        "*",
        "404 응답에도 CORS 헤더가 실려야 함"
    );
    assert_eq!(res.text().await.unwrap(), "Unknown route");
}

#[tokio::test]
async fn test_auth_disabled_admits_without_key() {
    let base = spawn_proxy(None).await;
    let client = reqwest::Client::new();

    // 키가 설정되지 않았으면 아무 헤더 없이도 라우팅 단계까지 진행된다
    let res = client
        .get(format!("{}/unknown/path", base))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), 404, "인증 비활성 상태에서는 404까지 도달해야 함");
}
