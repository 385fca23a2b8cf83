use super::Response;

#[derive(Debug, thiserror::Error)]
pub enum MiddlewareError {
    #[error("설정 오류: {0}")]
    Config(String),

    #[error("잘못된 요청: {0}")]
    InvalidRequest(String),

    #[error("Unauthorized")]
    Unauthorized {
        /// 호출자가 제시한 키 값. 기대값은 절대 담지 않는다
        presented: Option<String>,
    },

    /// CORS preflight 응답을 그대로 반환하기 위한 단락 경로
    #[error("CORS preflight")]
    Preflight(Response),
}
