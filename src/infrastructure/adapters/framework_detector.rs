//! 프레임워크 감지 포트 구현 어댑터.

use std::path::Path;

use anyhow::Result;
use async_trait::async_trait;
use tracing::debug;

use crate::application::ports::FrameworkDetector;
use crate::domain::framework::FrameworkDescriptor;
use crate::infrastructure::frameworks::{self, ProjectSnapshot};

/// 내장 카탈로그와 프로젝트 파일(package.json, 설정 파일)로 감지하는 어댑터.
pub struct CatalogFrameworkDetector;

#[async_trait]
impl FrameworkDetector for CatalogFrameworkDetector {
    async fn list(&self, project_dir: &Path) -> Result<Vec<FrameworkDescriptor>> {
        let project = ProjectSnapshot::read(project_dir).await?;
        let found = project.detect_all().await;
        debug!(
            count = found.len(),
            dir = %project_dir.display(),
            "framework detection finished"
        );
        Ok(found)
    }

    async fn has_framework(&self, id: &str, project_dir: &Path) -> Result<bool> {
        let Ok(definition) = frameworks::find_definition(id) else {
            return Ok(false);
        };
        let project = ProjectSnapshot::read(project_dir).await?;
        Ok(project.matches(definition).await)
    }

    async fn get_framework(&self, id: &str, project_dir: &Path) -> Result<FrameworkDescriptor> {
        let definition = frameworks::find_definition(id)?;
        let project = ProjectSnapshot::read(project_dir).await?;
        Ok(project.describe(definition))
    }
}
