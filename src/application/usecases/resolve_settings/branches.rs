//! 설정 출처 분기별 초안 생성 단계(감지/선택/정적 서버).

use std::env;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::debug;

use crate::application::config::{DevConfig, RawFlags};
use crate::application::error::{SettingsError, property};
use crate::application::usecases::resolve_settings::ResolveSettingsUseCase;
use crate::domain::choice::{build_choices, fuzzy_match};
use crate::domain::origin::{FrameworkSetting, SettingsOrigin};
use crate::domain::settings::SettingsDraft;

use super::negotiator::PortNegotiator;

/// 선택된 분기에 해당하는 작업을 수행해 초안을 만든다.
pub(super) async fn draft_from_origin(
    use_case: &ResolveSettingsUseCase<'_>,
    origin: &SettingsOrigin,
    config: &DevConfig,
    flags: &RawFlags,
    project_dir: &Path,
) -> Result<SettingsDraft> {
    match origin {
        SettingsOrigin::StaticDir(dir) => {
            use_case
                .reporter
                .notice("Using simple static server because --dir flag was specified");
            static_server_draft(use_case, Some(dir.clone()), flags, project_dir).await
        }
        SettingsOrigin::AutoDetected => auto_detected_draft(use_case, project_dir).await,
        SettingsOrigin::Custom => Ok(custom_draft(config)?),
        SettingsOrigin::NamedFramework(id) => named_framework_draft(use_case, id, project_dir).await,
        SettingsOrigin::Fallback => Ok(SettingsDraft::default()),
    }
}

async fn auto_detected_draft(
    use_case: &ResolveSettingsUseCase<'_>,
    project_dir: &Path,
) -> Result<SettingsDraft> {
    let descriptors = use_case
        .detector
        .list(project_dir)
        .await
        .with_context(|| format!("failed to detect frameworks in {}", project_dir.display()))?;
    debug!(count = descriptors.len(), "framework detection finished");

    match descriptors.as_slice() {
        [] => Ok(SettingsDraft::default()),
        [only] => Ok(SettingsDraft::from_descriptor(only)),
        _ => {
            let choices = build_choices(&descriptors);
            let chosen = use_case
                .picker
                .choose(
                    "Multiple possible start commands found",
                    &choices,
                    fuzzy_match,
                )
                .context("failed to select a start command")?;

            use_case.reporter.hint(&format!(
                "Add {}: \"{}\" to the \"dev\" block of your config file to skip this selection prompt next time",
                property("framework"),
                chosen.descriptor.id
            ));
            Ok(SettingsDraft::from_descriptor(&chosen.descriptor))
        }
    }
}

/// 명령/포트는 이후 오버라이드 규칙에서 원본 설정으로 채운다.
fn custom_draft(config: &DevConfig) -> Result<SettingsDraft, SettingsError> {
    let has_pair = config.command.is_some() && config.target_port.is_some();

    if config.framework == FrameworkSetting::Custom && !has_pair {
        return Err(SettingsError::Conflict(format!(
            "{} and {} properties are required when {} is set to \"#custom\"",
            property("command"),
            property("targetPort"),
            property("framework")
        )));
    }

    // `#auto`는 명령+포트 조합이 주어지면 사용자 지정으로 취급한다.
    if !matches!(
        config.framework,
        FrameworkSetting::Custom | FrameworkSetting::Auto
    ) && has_pair
    {
        return Err(SettingsError::Conflict(format!(
            "{} option must be set to \"#custom\" when specifying both {} and {} options",
            property("framework"),
            property("command"),
            property("targetPort")
        )));
    }

    Ok(SettingsDraft::custom())
}

async fn named_framework_draft(
    use_case: &ResolveSettingsUseCase<'_>,
    id: &str,
    project_dir: &Path,
) -> Result<SettingsDraft> {
    let qualifies = use_case
        .detector
        .has_framework(id, project_dir)
        .await
        .with_context(|| format!("failed to check framework \"{id}\""))?;
    if !qualifies {
        return Err(SettingsError::Unsatisfiable(format!(
            "Specified {} detector \"{id}\" did not pass requirements for your project",
            property("framework")
        ))
        .into());
    }

    let descriptor = use_case
        .detector
        .get_framework(id, project_dir)
        .await
        .with_context(|| format!("failed to load framework \"{id}\""))?;
    Ok(SettingsDraft::from_descriptor(&descriptor))
}

/// 실행할 프로세스 없이 `dist`를 제공하는 정적 서버 초안.
/// `dist`가 없으면 현재 작업 디렉터리를 쓴다.
pub(super) async fn static_server_draft(
    use_case: &ResolveSettingsUseCase<'_>,
    dist: Option<PathBuf>,
    flags: &RawFlags,
    project_dir: &Path,
) -> Result<SettingsDraft> {
    let dist = match dist {
        Some(dist) => dist,
        None => {
            use_case.reporter.warn(
                "Unable to determine public folder to serve files from. Using current working directory",
            );
            use_case.reporter.hint(
                "Set \"publish\" in the \"dev\" block of your config file to choose the folder to serve",
            );
            env::current_dir().context("failed to read current working directory")?
        }
    };

    let shown = dist.strip_prefix(project_dir).unwrap_or(&dist);
    use_case
        .reporter
        .notice(&format!("Running static server from \"{}\"", shown.display()));

    let preferred = flags
        .static_server_port
        .unwrap_or(use_case.defaults.static_port);
    let port = PortNegotiator::new(use_case.port_prober)
        .negotiate(Some(preferred))
        .await?;

    Ok(SettingsDraft::static_server(dist, port))
}
