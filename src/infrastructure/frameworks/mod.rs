//! 프로젝트 파일을 보고 내장 카탈로그의 프레임워크를 감지하는 모듈.

mod catalog;
mod package_json;

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{Result, bail};

use crate::domain::framework::{BuildOutput, DevCommand, FrameworkDescriptor, WatchCommands};

pub use catalog::{FRAMEWORKS, FrameworkDefinition};
pub use package_json::{PackageJson, PackageManager};

/// 감지에 필요한 프로젝트 정보 스냅샷.
#[derive(Debug, Clone)]
pub struct ProjectSnapshot {
    dir: PathBuf,
    package: PackageJson,
    package_manager: PackageManager,
}

impl ProjectSnapshot {
    pub async fn read(project_dir: &Path) -> Result<Self> {
        Ok(Self {
            dir: project_dir.to_path_buf(),
            package: PackageJson::read(project_dir).await?,
            package_manager: PackageManager::detect(project_dir).await,
        })
    }

    /// 의존성 또는 설정 파일 조건 중 하나라도 만족하면 감지된 것으로 본다.
    pub async fn matches(&self, definition: &FrameworkDefinition) -> bool {
        let excluded = definition
            .excluded_npm_dependencies
            .iter()
            .any(|dep| self.package.has_dependency(dep));
        let by_dependency = !excluded
            && definition
                .npm_dependencies
                .iter()
                .any(|dep| self.package.has_dependency(dep));
        if by_dependency {
            return true;
        }

        for file in definition.config_files {
            if package_json::exists(&self.dir.join(file)).await {
                return true;
            }
        }
        false
    }

    /// 카탈로그 정의를 이 프로젝트 기준의 기술자로 변환한다.
    pub fn describe(&self, definition: &FrameworkDefinition) -> FrameworkDescriptor {
        let mut commands: Vec<String> = self
            .package
            .dev_scripts(definition.binary(), definition.dev_command)
            .iter()
            .map(|script| self.package_manager.run_script(script))
            .collect();
        if commands.is_empty() {
            commands.push(definition.dev_command.to_string());
        }

        FrameworkDescriptor {
            id: definition.id.to_string(),
            name: definition.name.to_string(),
            dev: DevCommand {
                commands,
                port: definition.dev_port,
            },
            build: BuildOutput {
                directory: self.dir.join(definition.build_directory),
            },
            static_assets_directory: definition
                .static_assets_directory
                .map(|dir| self.dir.join(dir)),
            env: definition
                .env
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect::<BTreeMap<_, _>>(),
            watch: WatchCommands {
                commands: definition
                    .watch_args
                    .iter()
                    .map(|args| args.iter().map(|a| a.to_string()).collect())
                    .collect(),
            },
        }
    }

    /// 카탈로그 순서대로 감지된 모든 프레임워크.
    pub async fn detect_all(&self) -> Vec<FrameworkDescriptor> {
        let mut found = Vec::new();
        for definition in FRAMEWORKS {
            if self.matches(definition).await {
                found.push(self.describe(definition));
            }
        }
        found
    }
}

pub fn find_definition(id: &str) -> Result<&'static FrameworkDefinition> {
    match catalog::find(id) {
        Some(definition) => Ok(definition),
        None => bail!("unknown framework \"{id}\""),
    }
}
