use tracing::debug;

use super::{Middleware, MiddlewareError, Request, Response};

/// 등록된 순서대로 요청을, 역순으로 응답을 처리하는 미들웨어 체인입니다.
#[derive(Default)]
pub struct MiddlewareChain {
    middlewares: Vec<Box<dyn Middleware>>,
}

impl MiddlewareChain {
    pub fn new() -> Self {
        Self {
            middlewares: Vec::new(),
        }
    }

    pub fn add<M: Middleware + 'static>(&mut self, middleware: M) {
        self.middlewares.push(Box::new(middleware));
    }

    pub async fn handle_request(&self, mut req: Request) -> Result<Request, MiddlewareError> {
        for middleware in &self.middlewares {
            debug!(middleware = middleware.name(), "요청 미들웨어 적용");
            req = middleware.handle_request(req).await?;
        }
        Ok(req)
    }

    pub async fn handle_response(&self, mut res: Response) -> Result<Response, MiddlewareError> {
        // 응답은 역순으로 처리
        for middleware in self.middlewares.iter().rev() {
            res = middleware.handle_response(res).await?;
        }
        Ok(res)
    }
}
