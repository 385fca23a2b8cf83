use std::env;
use std::io::Write;

use serial_test::serial;
use tempfile::NamedTempFile;

use demeter_proxy::routing::MatchStrategy;
use demeter_proxy::settings::Settings;

fn write_config(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

#[test]
fn test_from_toml_file() {
    let file = write_config(
        r#"
        [server]
        port = 8080
        proxy_key = "secret"
        request_timeout_secs = 5

        [routing]
        strategy = "longest-prefix"

        [[routes]]
        prefix = "/api"
        upstream = "api.example.com"
        rewrite_prefix = "/v2"
        "#,
    );

    let settings = Settings::from_toml_file(file.path()).unwrap();
    assert_eq!(settings.server.port, 8080);
    assert!(settings.server.auth_enabled());
    assert_eq!(settings.server.request_timeout().unwrap().as_secs(), 5);
    assert_eq!(settings.routing.strategy, MatchStrategy::LongestPrefix);

    let table = settings.build_route_table();
    let resolved = table.resolve("/api/users").unwrap();
    assert_eq!(resolved.upstream, "api.example.com");
    assert_eq!(resolved.path, "/v2/users");
}

#[test]
fn test_toml_without_routes_uses_defaults() {
    let file = write_config(
        r#"
        [server]
        port = 8080
        "#,
    );

    let settings = Settings::from_toml_file(file.path()).unwrap();
    let table = settings.build_route_table();

    // 기본 라우트: /zerion과 /ibkr
    assert_eq!(table.prefixes(), vec!["/zerion", "/ibkr"]);
    let resolved = table.resolve("/ibkr/SomeOp").unwrap();
    assert_eq!(resolved.upstream, "ndcdyn.interactivebrokers.com");
    assert_eq!(resolved.path, "/AccountManagement/FlexWebService/SomeOp");
}

#[test]
fn test_invalid_toml_is_rejected() {
    let file = write_config("server = not valid toml");
    assert!(Settings::from_toml_file(file.path()).is_err());
}

#[test]
fn test_missing_file_is_rejected() {
    assert!(Settings::from_toml_file("/nonexistent/proxy.toml").is_err());
}

#[test]
fn test_zero_port_is_rejected() {
    let file = write_config(
        r#"
        [server]
        port = 0
        "#,
    );
    assert!(Settings::from_toml_file(file.path()).is_err());
}

#[serial]
#[test]
fn test_from_env() {
    env::set_var("PORT", "4000");
    env::set_var("PROXY_KEY", "env-secret");

    let settings = Settings::from_env().unwrap();
    assert_eq!(settings.server.port, 4000);
    assert!(settings.server.auth_enabled());
    assert_eq!(settings.server.proxy_key.as_deref(), Some("env-secret"));

    env::remove_var("PORT");
    env::remove_var("PROXY_KEY");
}

#[serial]
#[test]
fn test_from_env_defaults() {
    env::remove_var("PORT");
    env::remove_var("PROXY_KEY");
    env::remove_var("PROXY_REQUEST_TIMEOUT_SECS");

    let settings = Settings::from_env().unwrap();
    assert_eq!(settings.server.port, 3000, "기본 포트는 3000이어야 함");
    assert!(!settings.server.auth_enabled(), "기본값은 인증 비활성");
    assert_eq!(settings.server.request_timeout_secs, 30);
    assert_eq!(settings.build_route_table().prefixes(), vec!["/zerion", "/ibkr"]);
}

#[serial]
#[test]
fn test_from_env_invalid_port() {
    env::set_var("PORT", "not-a-port");
    assert!(Settings::from_env().is_err());
    env::remove_var("PORT");
}
