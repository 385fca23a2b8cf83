use std::net::SocketAddr;
use std::sync::Arc;

use hyper_util::rt::TokioIo;
use tokio::net::TcpListener;
use tracing::{error, info};

use super::handler::RequestHandler;
use super::Result;
use crate::settings::ServerSettings;

/// TCP 리스너를 소유하고 수락 루프를 실행합니다.
pub struct ServerListener {
    listener: TcpListener,
}

impl ServerListener {
    pub async fn new(settings: &ServerSettings) -> Result<Self> {
        let listener = TcpListener::bind(format!("0.0.0.0:{}", settings.port))
            .await
            .map_err(|e| {
                error!(error = %e, port = settings.port, "포트 바인딩 실패");
                e
            })?;

        info!(port = settings.port, "HTTP 리스너 시작");
        Ok(Self { listener })
    }

    /// 실제 바인딩된 주소. 포트 0으로 띄운 테스트에서 사용합니다.
    pub fn local_addr(&self) -> Result<SocketAddr> {
        self.listener.local_addr().map_err(Into::into)
    }

    pub async fn run(self, handler: Arc<RequestHandler>) -> Result<()> {
        loop {
            match self.listener.accept().await {
                Ok((stream, _)) => {
                    let handler = handler.clone();
                    tokio::spawn(async move {
                        let io = TokioIo::new(stream);
                        // 연결 단위 실패는 여기서 격리되고 수락 루프는 계속 돈다
                        if let Err(err) = handler.handle_connection(io).await {
                            error!(error = %err, "연결 처리 실패");
                        }
                    });
                }
                Err(e) => {
                    error!(error = %e, "연결 수락 실패");
                }
            }
        }
    }
}
