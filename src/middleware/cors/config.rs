use serde::Deserialize;

/// CORS 정책 설정
///
/// 프록시가 내보내는 모든 응답에 적용됩니다. 오류 응답과 preflight
/// 응답도 예외가 아닙니다.
#[derive(Debug, Clone, Deserialize)]
pub struct CorsConfig {
    /// Access-Control-Allow-Origin 값
    #[serde(default = "default_allow_origin")]
    pub allow_origin: String,

    /// 허용할 HTTP 메서드 목록
    #[serde(default = "default_methods")]
    pub allow_methods: Vec<String>,

    /// 허용할 요청 헤더 목록. 공유 키 헤더를 항상 포함합니다
    #[serde(default = "default_headers")]
    pub allow_headers: Vec<String>,
}

fn default_allow_origin() -> String {
    "*".to_string()
}

fn default_methods() -> Vec<String> {
    vec!["GET", "POST", "OPTIONS"]
        .into_iter()
        .map(String::from)
        .collect()
}

fn default_headers() -> Vec<String> {
    vec!["Content-Type", "Authorization", "X-Proxy-Key", "User-Agent"]
        .into_iter()
        .map(String::from)
        .collect()
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allow_origin: default_allow_origin(),
            allow_methods: default_methods(),
            allow_headers: default_headers(),
        }
    }
}
