//! 개발 프록시 실행 설정 해석 유스케이스.
//!
//! CLI 플래그, 설정 파일 `dev` 블록, 프레임워크 자동 감지, OS 포트 가용성을
//! 하나의 검증된 설정으로 합치거나 구체적인 오류로 실패한다.

mod branches;
mod negotiator;
mod normalize;
mod overrides;
mod tls;

use std::env;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::debug;

use crate::application::config::{RawDevConfig, RawFlags, ResolverDefaults};
use crate::application::ports::{FileReader, FrameworkDetector, FrameworkPicker, PortProber, Reporter};
use crate::domain::origin::SettingsOrigin;
use crate::domain::settings::ResolvedSettings;

use branches::{draft_from_origin, static_server_draft};
use negotiator::PortNegotiator;
use normalize::normalize;
use overrides::{
    apply_command_override, apply_dist_override, apply_target_port, ensure_distinct_ports,
    functions_dir, jwt_settings, require_command, require_framework_port,
};
use tls::load_https;

/// 설정 해석 진입점. 호출마다 새 설정을 만들고 호출 간 상태를 공유하지 않는다.
pub struct ResolveSettingsUseCase<'a> {
    pub detector: &'a dyn FrameworkDetector,
    pub picker: &'a dyn FrameworkPicker,
    pub file_reader: &'a dyn FileReader,
    pub port_prober: &'a dyn PortProber,
    pub reporter: &'a dyn Reporter,
    pub defaults: ResolverDefaults,
}

impl<'a> ResolveSettingsUseCase<'a> {
    /// 입력 검증 → 분기 선택 → 오버라이드 규칙 → 포트 협상 → 최종 검증 순서로 진행한다.
    /// 어느 단계든 실패하면 부분 결과 없이 즉시 오류를 반환한다.
    pub async fn execute(
        &self,
        dev_config: &RawDevConfig,
        flags: &RawFlags,
        project_dir: &Path,
    ) -> Result<ResolvedSettings> {
        let config = normalize(dev_config, flags)?;

        let origin = SettingsOrigin::select(
            &config.framework,
            flags.dir.as_deref(),
            config.command.is_some(),
            config.target_port.is_some(),
        );
        debug!(?origin, framework = %config.framework, "selected settings origin");

        let draft = draft_from_origin(self, &origin, &config, flags, project_dir).await?;
        let draft = apply_command_override(draft, &config, self.reporter);
        let draft = apply_dist_override(draft, &config, flags);
        let draft = apply_target_port(draft, &config, flags)?;
        ensure_distinct_ports(&config, draft.framework_port)?;

        let draft = if draft.is_unresolved() {
            static_server_draft(self, draft.dist, flags, project_dir).await?
        } else {
            draft
        };

        let framework_port = require_framework_port(&draft)?;
        // 정적 서버 대체가 애플리케이션 포트를 바꿨을 수 있으므로 다시 확인한다.
        ensure_distinct_ports(&config, Some(framework_port))?;
        require_command(&draft)?;

        let negotiator = PortNegotiator::new(self.port_prober);
        let port = negotiator
            .proxy_port(config.port, self.defaults.proxy_port, framework_port)
            .await?;

        let functions = functions_dir(&config, &draft);
        let functions_port = match functions {
            Some(_) => Some(negotiator.negotiate(config.functions_port).await?),
            None => None,
        };

        let https = match &config.https {
            Some(files) => Some(load_https(self.file_reader, files).await?),
            None => None,
        };

        let dist = match draft.dist {
            Some(dist) => dist,
            None => env::current_dir().context("failed to read current working directory")?,
        };
        let (jwt_secret, jwt_role_path) = jwt_settings(&config, &self.defaults);

        Ok(ResolvedSettings {
            command: draft.command,
            framework_port,
            port,
            dist,
            framework: draft.framework,
            env: draft.env,
            no_cmd: draft.no_cmd,
            jwt_secret,
            jwt_role_path,
            functions,
            functions_port,
            https,
        })
    }
}
