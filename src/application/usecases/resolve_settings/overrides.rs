//! 분기 결과에 적용하는 오버라이드/검증 규칙.
//! 각 규칙은 초안 전체를 받아 새 초안을 반환한다.

use std::path::PathBuf;

use crate::application::config::{DevConfig, RawFlags, ResolverDefaults};
use crate::application::error::{SettingsError, property};
use crate::application::ports::Reporter;
use crate::domain::settings::SettingsDraft;

use super::normalize::same_port_values;

/// 정적 서버 초안이 아니면 설정의 `command`가 감지된 명령을 덮어쓴다.
pub(super) fn apply_command_override(
    draft: SettingsDraft,
    config: &DevConfig,
    reporter: &dyn Reporter,
) -> SettingsDraft {
    let Some(command) = config.command.as_ref().filter(|_| !draft.no_cmd) else {
        return draft;
    };

    if let Some(detected) = draft.command.as_deref()
        && detected != command
    {
        reporter.notice(&format!(
            "Overriding {} \"{detected}\" with setting derived from the \"dev\" block of your config file",
            property("command")
        ));
    }

    SettingsDraft {
        command: Some(command.clone()),
        ..draft
    }
}

/// `dist` 우선순위: `--dir` 플래그 > `publish` > 분기 결과.
pub(super) fn apply_dist_override(
    draft: SettingsDraft,
    config: &DevConfig,
    flags: &RawFlags,
) -> SettingsDraft {
    let dist = flags
        .dir
        .clone()
        .or_else(|| config.publish.clone())
        .or(draft.dist);

    SettingsDraft { dist, ..draft }
}

/// `targetPort`가 있으면 애플리케이션 포트로 사용한다.
pub(super) fn apply_target_port(
    draft: SettingsDraft,
    config: &DevConfig,
    flags: &RawFlags,
) -> Result<SettingsDraft, SettingsError> {
    let Some(target_port) = config.target_port else {
        return Ok(draft);
    };

    if config.port == Some(target_port) {
        return Err(same_port_values());
    }
    if flags.dir.is_some() {
        return Err(SettingsError::Conflict(format!(
            "{} option cannot be used in conjunction with {} flag which is used to run a static server",
            property("targetPort"),
            property("dir")
        )));
    }
    if draft.command.is_none() {
        return Err(SettingsError::Conflict(format!(
            "No {0} specified or detected. The {0} option is required to use {1} option",
            property("command"),
            property("targetPort")
        )));
    }

    Ok(SettingsDraft {
        framework_port: Some(target_port),
        ..draft
    })
}

/// 프록시 포트와 애플리케이션 포트는 같을 수 없다.
pub(super) fn ensure_distinct_ports(
    config: &DevConfig,
    framework_port: Option<u16>,
) -> Result<(), SettingsError> {
    match (config.port, framework_port) {
        (Some(port), Some(framework_port)) if port == framework_port => {
            Err(SettingsError::Conflict(format!(
                "The {0} option you specified conflicts with the port of your application. Please use a different value for {0}",
                property("port")
            )))
        }
        _ => Ok(()),
    }
}

pub(super) fn require_framework_port(draft: &SettingsDraft) -> Result<u16, SettingsError> {
    draft.framework_port.ok_or_else(|| {
        SettingsError::Unsatisfiable(format!(
            "No {} option specified or detected",
            property("targetPort")
        ))
    })
}

/// `no_cmd`가 아니면 실행할 명령이 있어야 한다.
pub(super) fn require_command(draft: &SettingsDraft) -> Result<(), SettingsError> {
    if draft.no_cmd || draft.command.is_some() {
        return Ok(());
    }

    let framework = draft.framework.as_deref().unwrap_or("unknown");
    Err(SettingsError::Unsatisfiable(format!(
        "No {} specified or detected for framework \"{framework}\"",
        property("command")
    )))
}

pub(super) fn jwt_settings(config: &DevConfig, defaults: &ResolverDefaults) -> (String, String) {
    (
        config
            .jwt_secret
            .clone()
            .unwrap_or_else(|| defaults.jwt_secret.clone()),
        config
            .jwt_role_path
            .clone()
            .unwrap_or_else(|| defaults.jwt_role_path.clone()),
    )
}

pub(super) fn functions_dir(config: &DevConfig, draft: &SettingsDraft) -> Option<PathBuf> {
    config.functions.clone().or_else(|| draft.functions.clone())
}
