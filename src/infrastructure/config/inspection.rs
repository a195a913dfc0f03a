//! 적용 설정 진단(inspection) 뷰 모델.

use serde::Serialize;

use super::loader::LoadedConfig;
use crate::application::config::{DefaultsConfig, RawDevConfig, ResolverDefaults};

#[derive(Debug, Clone, Serialize)]
pub struct ConfigInspection {
    pub searched_paths: Vec<String>,
    pub loaded_paths: Vec<String>,
    /// 병합된 `dev` 블록(타입 검증 전)
    pub dev: RawDevConfig,
    pub defaults: DefaultsConfig,
    pub effective_defaults: ResolverDefaults,
}

impl ConfigInspection {
    pub(crate) fn from_loaded(loaded: LoadedConfig) -> Self {
        Self {
            searched_paths: loaded
                .searched_paths
                .iter()
                .map(|p| p.display().to_string())
                .collect(),
            loaded_paths: loaded
                .loaded_paths
                .iter()
                .map(|p| p.display().to_string())
                .collect(),
            effective_defaults: loaded.defaults.resolve(),
            defaults: loaded.defaults,
            dev: loaded.dev,
        }
    }
}
