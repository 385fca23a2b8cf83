/// 공유 키 접근 제어 설정
#[derive(Debug, Clone)]
pub struct ProxyKeyConfig {
    /// 기대하는 키 값. None이거나 빈 문자열이면 검사를 하지 않습니다
    pub key: Option<String>,

    /// 키를 담는 요청 헤더 이름
    pub header_name: String,

    /// 키 없이 통과하는 경로 (정확히 일치)
    pub exempt_paths: Vec<String>,
}

/// 공유 키를 담는 기본 헤더 이름
pub const DEFAULT_KEY_HEADER: &str = "x-proxy-key";

impl ProxyKeyConfig {
    /// 헬스 체크 경로만 면제하는 기본 구성입니다. 빈 키는 비활성화로
    /// 취급합니다.
    pub fn new(key: Option<String>) -> Self {
        Self {
            key: key.filter(|k| !k.is_empty()),
            header_name: DEFAULT_KEY_HEADER.to_string(),
            exempt_paths: vec!["/health".to_string()],
        }
    }

    pub fn enabled(&self) -> bool {
        self.key.as_deref().map_or(false, |k| !k.is_empty())
    }
}

impl Default for ProxyKeyConfig {
    fn default() -> Self {
        Self::new(None)
    }
}
