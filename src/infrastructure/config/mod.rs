//! 사용자/프로젝트 설정(JSON) 로딩/병합 모듈.
//! 여러 경로의 설정을 우선순위대로 병합하고, 실행 진단용 정보를 함께 제공한다.

mod inspection;
mod loader;

use std::path::Path;

use anyhow::Result;

use crate::application::config::LoadedDevConfig;

pub use inspection::ConfigInspection;
pub use loader::{CONFIG_ENV, PROJECT_CONFIG_FILE, config_paths};

/// 병합된 `dev` 블록과 해석기 기본값을 로딩한다.
pub fn load(project_dir: &Path) -> Result<LoadedDevConfig> {
    let loaded = loader::load_merged_config(project_dir)?;
    Ok(LoadedDevConfig {
        defaults: loaded.defaults.resolve(),
        dev: loaded.dev,
    })
}

/// 디버깅/진단용 설정 정보를 구성한다.
pub fn inspect(project_dir: &Path) -> Result<ConfigInspection> {
    let loaded = loader::load_merged_config(project_dir)?;
    Ok(ConfigInspection::from_loaded(loaded))
}

/// 설정 진단 결과를 사람이 읽기 쉬운 JSON으로 반환한다.
pub fn inspect_pretty_json(project_dir: &Path) -> Result<String> {
    Ok(serde_json::to_string_pretty(&inspect(project_dir)?)?)
}
