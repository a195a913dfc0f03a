//! 프로젝트 설정 파일을 읽어 실행 설정을 해석하는 유스케이스.

use std::path::Path;

use anyhow::{Context, Result};

use crate::application::config::RawFlags;
use crate::application::ports::{
    ConfigRepository, FileReader, FrameworkDetector, FrameworkPicker, PortProber, Reporter,
};
use crate::application::usecases::resolve_settings::ResolveSettingsUseCase;
use crate::domain::settings::ResolvedSettings;

/// 설정 로딩 → CLI 플래그 병합 → 설정 해석을 조율한다.
pub struct ProjectSettingsUseCase<'a> {
    pub config_repo: &'a dyn ConfigRepository,
    pub detector: &'a dyn FrameworkDetector,
    pub picker: &'a dyn FrameworkPicker,
    pub file_reader: &'a dyn FileReader,
    pub port_prober: &'a dyn PortProber,
    pub reporter: &'a dyn Reporter,
}

impl<'a> ProjectSettingsUseCase<'a> {
    pub async fn execute(&self, flags: &RawFlags, project_dir: &Path) -> Result<ResolvedSettings> {
        let loaded = self
            .config_repo
            .load(project_dir)
            .context("failed to load devproxy config")?;

        // 플래그 값이 설정 파일의 같은 키를 덮어쓴다.
        let mut dev_config = loaded.dev;
        dev_config.merge_from(flags.dev_overrides());

        let resolver = ResolveSettingsUseCase {
            detector: self.detector,
            picker: self.picker,
            file_reader: self.file_reader,
            port_prober: self.port_prober,
            reporter: self.reporter,
            defaults: loaded.defaults,
        };
        resolver.execute(&dev_config, flags, project_dir).await
    }
}
