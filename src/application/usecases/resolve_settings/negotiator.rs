//! 포트 협상 단계.
//!
//! 명시적으로 고정한 포트는 정확히 확보하거나 실패하고,
//! 기본값/자동 포트는 확보된 다른 포트를 그대로 받아들인다.
//! 기본 프록시 포트가 애플리케이션 포트와 겹치면 아무 빈 포트로 한 번 다시 요청한다.

use anyhow::Result;
use tracing::debug;

use crate::application::error::{SettingsError, property};
use crate::application::ports::PortProber;

pub(super) struct PortNegotiator<'a> {
    prober: &'a dyn PortProber,
}

impl<'a> PortNegotiator<'a> {
    pub(super) fn new(prober: &'a dyn PortProber) -> Self {
        Self { prober }
    }

    /// 선호 포트를 요청하고 확보된 포트를 그대로 반환한다.
    pub(super) async fn negotiate(&self, preferred: Option<u16>) -> Result<u16> {
        let port = self.prober.acquire(preferred).await?;
        debug!(?preferred, port, "negotiated port");
        Ok(port)
    }

    /// 프록시 포트: 사용자가 고정한 포트는 정확히 일치해야 한다.
    /// 고정하지 않았다면 애플리케이션 포트와 겹치지 않는 포트를 받는다.
    pub(super) async fn proxy_port(
        &self,
        pinned: Option<u16>,
        default_port: u16,
        app_port: u16,
    ) -> Result<u16> {
        let Some(pinned) = pinned else {
            let port = self.negotiate(Some(default_port)).await?;
            if port != app_port {
                return Ok(port);
            }

            debug!(port, "default proxy port collides with application port");
            let port = self.negotiate(None).await?;
            if port == app_port {
                return Err(SettingsError::Unsatisfiable(format!(
                    "Could not acquire a {} different from the application port {app_port}. Please set {} explicitly",
                    property("port"),
                    property("port")
                ))
                .into());
            }
            return Ok(port);
        };

        let port = self.negotiate(Some(pinned)).await?;
        if port != pinned {
            return Err(SettingsError::Unsatisfiable(format!(
                "Could not acquire required {}: {pinned}",
                property("port")
            ))
            .into());
        }
        Ok(port)
    }
}
