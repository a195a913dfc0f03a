//! 빈 포트 확보 포트 구현 어댑터.

use std::net::{Ipv4Addr, SocketAddr};

use anyhow::{Context, Result};
use async_trait::async_trait;
use tokio::net::TcpListener;
use tracing::debug;

use crate::application::ports::PortProber;

/// 로컬 루프백에 바인드해 보고 사용 가능한 포트를 돌려주는 어댑터.
/// 확인 직후 리스너를 닫으므로 실제 사용 전까지 다른 프로세스가 가져갈 수 있다.
pub struct TcpPortProber;

#[async_trait]
impl PortProber for TcpPortProber {
    async fn acquire(&self, preferred: Option<u16>) -> Result<u16> {
        if let Some(port) = preferred {
            match bind(port).await {
                Ok(found) => return Ok(found),
                Err(err) => debug!(port, error = %err, "preferred port unavailable"),
            }
        }

        bind(0).await.context("failed to find a free port")
    }
}

async fn bind(port: u16) -> std::io::Result<u16> {
    let listener = TcpListener::bind(SocketAddr::from((Ipv4Addr::LOCALHOST, port))).await?;
    Ok(listener.local_addr()?.port())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn any_port_is_nonzero() {
        let port = TcpPortProber.acquire(None).await.unwrap();
        assert_ne!(port, 0);
    }

    #[tokio::test]
    async fn busy_preferred_port_falls_back_to_another() {
        let held = TcpListener::bind((Ipv4Addr::LOCALHOST, 0)).await.unwrap();
        let busy = held.local_addr().unwrap().port();

        let port = TcpPortProber.acquire(Some(busy)).await.unwrap();
        assert_ne!(port, busy);
    }

    #[tokio::test]
    async fn free_preferred_port_is_kept() {
        let free = TcpPortProber.acquire(None).await.unwrap();
        assert_eq!(TcpPortProber.acquire(Some(free)).await.unwrap(), free);
    }
}
