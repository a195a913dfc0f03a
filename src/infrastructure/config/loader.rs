//! 설정 파일 탐색/병합 로더.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::application::config::{DefaultsConfig, RawDevConfig};

pub const PROJECT_CONFIG_FILE: &str = "devproxy.json";
pub const CONFIG_ENV: &str = "DEVPROXY_CONFIG";

/// 설정 파일 한 개의 내용. 모든 블록은 선택값이다.
#[derive(Debug, Clone, Default, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    dev: Option<RawDevConfig>,
    #[serde(default)]
    defaults: Option<DefaultsConfig>,
}

#[derive(Debug, Clone)]
pub(crate) struct LoadedConfig {
    pub dev: RawDevConfig,
    pub defaults: DefaultsConfig,
    pub searched_paths: Vec<PathBuf>,
    pub loaded_paths: Vec<PathBuf>,
}

/// 우선순위 경로를 순회해 JSON 설정을 병합한다.
pub(crate) fn load_merged_config(project_dir: &Path) -> Result<LoadedConfig> {
    load_from_paths(config_paths(project_dir))
}

/// 낮은 우선순위에서 높은 우선순위 순서로 병합한다.
/// `dev.framework`는 `#auto`로 시작하고, 파일이 지정하면 덮어쓴다.
pub(crate) fn load_from_paths(paths: Vec<PathBuf>) -> Result<LoadedConfig> {
    let mut dev = RawDevConfig::with_default_framework();
    let mut defaults = DefaultsConfig::default();
    let mut loaded_paths = Vec::new();

    for path in &paths {
        if !path.exists() {
            continue;
        }

        let raw = fs::read_to_string(path)
            .with_context(|| format!("failed to read config at {}", path.display()))?;
        let parsed: ConfigFile = serde_json::from_str(&raw)
            .with_context(|| format!("failed to parse JSON in {}", path.display()))?;

        if let Some(incoming) = parsed.dev {
            dev.merge_from(incoming);
        }
        if let Some(incoming) = parsed.defaults {
            defaults.merge_from(incoming);
        }
        loaded_paths.push(path.to_path_buf());
    }

    Ok(LoadedConfig {
        dev,
        defaults,
        searched_paths: paths,
        loaded_paths,
    })
}

/// 사용자 + 프로젝트 + 명시 경로 순으로 병합 경로를 구성한다.
pub fn config_paths(project_dir: &Path) -> Vec<PathBuf> {
    let mut paths = Vec::new();

    if let Some(base) = dirs::config_dir() {
        paths.push(base.join("devproxy").join("config.json"));
    }

    paths.push(project_dir.join(PROJECT_CONFIG_FILE));

    if let Ok(path) = env::var(CONFIG_ENV) {
        paths.push(PathBuf::from(path));
    }

    dedup_paths(paths)
}

fn dedup_paths(paths: Vec<PathBuf>) -> Vec<PathBuf> {
    let mut out = Vec::new();
    for p in paths {
        if !out.contains(&p) {
            out.push(p);
        }
    }
    out
}
