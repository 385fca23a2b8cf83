//! 업스트림으로 전달할 헤더를 계산하는 허용 목록 정책입니다.
//!
//! 인바운드 헤더 전체를 그대로 넘기지 않고, 규칙 테이블에 있는 헤더만
//! 전달합니다. 호출자의 `Host`나 프록시 전용 헤더가 업스트림으로 새어
//! 나가는 것을 막습니다.

use hyper::header::{
    HeaderMap, HeaderName, HeaderValue, ACCEPT, AUTHORIZATION, CONTENT_TYPE, HOST, USER_AGENT,
};

/// `Accept` 헤더가 없을 때 쓰는 기본값
pub const DEFAULT_ACCEPT: &str = "*/*";

/// `User-Agent` 헤더가 없을 때 쓰는 기본값
pub const DEFAULT_USER_AGENT: &str = "Demeter/1.0";

/// 개별 헤더에 적용되는 전달 규칙입니다.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ForwardRule {
    /// 호출자가 보낸 경우에만 그대로 전달. 절대 합성하지 않음
    IfPresent,
    /// 호출자가 보낸 값, 없으면 고정 기본값
    OrDefault(HeaderValue),
    /// 매칭된 라우트의 업스트림 호스트로 항상 덮어씀
    SetUpstreamHost,
}

/// (헤더 이름, 전달 규칙) 테이블로 표현한 헤더 정책입니다.
///
/// 배포별로 달라지는 허용 목록을 조건문 대신 데이터로 들고 있어서
/// 규칙 단위 테스트가 가능합니다.
#[derive(Debug, Clone)]
pub struct ForwardPolicy {
    rules: Vec<(HeaderName, ForwardRule)>,
}

impl ForwardPolicy {
    pub fn new(rules: Vec<(HeaderName, ForwardRule)>) -> Self {
        Self { rules }
    }

    /// 기본 정책: `Accept`/`User-Agent`는 기본값 대체, `Authorization`과
    /// `Content-Type`은 있을 때만, `Host`는 업스트림 호스트로 교체합니다.
    pub fn with_defaults(accept: HeaderValue, user_agent: HeaderValue) -> Self {
        Self::new(vec![
            (ACCEPT, ForwardRule::OrDefault(accept)),
            (HOST, ForwardRule::SetUpstreamHost),
            (USER_AGENT, ForwardRule::OrDefault(user_agent)),
            (AUTHORIZATION, ForwardRule::IfPresent),
            (CONTENT_TYPE, ForwardRule::IfPresent),
        ])
    }

    pub fn rules(&self) -> &[(HeaderName, ForwardRule)] {
        &self.rules
    }

    /// 인바운드 헤더와 업스트림 호스트로부터 전달 헤더 집합을 만듭니다.
    /// 테이블에 없는 인바운드 헤더는 모두 버려집니다.
    pub fn build_upstream_headers(&self, inbound: &HeaderMap, upstream: &str) -> HeaderMap {
        let mut headers = HeaderMap::with_capacity(self.rules.len());

        for (name, rule) in &self.rules {
            match rule {
                ForwardRule::IfPresent => {
                    if let Some(value) = inbound.get(name) {
                        headers.insert(name.clone(), value.clone());
                    }
                }
                ForwardRule::OrDefault(default) => {
                    let value = inbound.get(name).cloned().unwrap_or_else(|| default.clone());
                    headers.insert(name.clone(), value);
                }
                ForwardRule::SetUpstreamHost => {
                    // 업스트림 호스트는 설정 검증을 통과한 호스트 이름이다
                    if let Ok(value) = HeaderValue::from_str(upstream) {
                        headers.insert(name.clone(), value);
                    }
                }
            }
        }

        headers
    }
}

impl Default for ForwardPolicy {
    fn default() -> Self {
        Self::with_defaults(
            HeaderValue::from_static(DEFAULT_ACCEPT),
            HeaderValue::from_static(DEFAULT_USER_AGENT),
        )
    }
}
