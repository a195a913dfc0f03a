//! 프로젝트 `package.json`과 패키지 매니저 정보.

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageJson {
    #[serde(default)]
    pub dependencies: BTreeMap<String, Value>,
    #[serde(default)]
    pub dev_dependencies: BTreeMap<String, Value>,
    #[serde(default)]
    pub scripts: BTreeMap<String, Value>,
}

impl PackageJson {
    /// 프로젝트 루트의 `package.json`을 읽는다. 파일이 없으면 빈 값.
    pub async fn read(project_dir: &Path) -> Result<Self> {
        let path = project_dir.join("package.json");
        if !tokio::fs::try_exists(&path).await.unwrap_or(false) {
            return Ok(Self::default());
        }

        let raw = tokio::fs::read_to_string(&path)
            .await
            .with_context(|| format!("failed to read {}", path.display()))?;
        serde_json::from_str(&raw).with_context(|| format!("failed to parse JSON in {}", path.display()))
    }

    pub fn has_dependency(&self, name: &str) -> bool {
        self.dependencies.contains_key(name) || self.dev_dependencies.contains_key(name)
    }

    /// 개발 서버를 띄우는 스크립트 이름(선호 이름 우선).
    ///
    /// 개발용 이름(`dev`, `start` 등)이면서 `binary`를 호출하거나,
    /// 여러 단어로 된 `dev_command`를 그대로 포함하는 스크립트만 고른다.
    /// `build`/`lint`처럼 같은 실행 파일을 쓰는 다른 작업은 제외된다.
    pub fn dev_scripts(&self, binary: &str, dev_command: &str) -> Vec<String> {
        const PREFERRED: [&str; 5] = ["dev", "start", "serve", "develop", "watch"];

        let dev_words: Vec<&str> = dev_command.split_whitespace().collect();
        let mut matching: Vec<&String> = self
            .scripts
            .iter()
            .filter(|(name, body)| {
                let Some(body) = body.as_str() else {
                    return false;
                };
                let words: Vec<&str> = body.split_whitespace().collect();
                let invokes_binary = words.iter().any(|word| *word == binary);
                let runs_dev_command = dev_words.len() > 1
                    && words.windows(dev_words.len()).any(|w| w == dev_words.as_slice());

                runs_dev_command || (invokes_binary && PREFERRED.contains(&name.as_str()))
            })
            .map(|(name, _)| name)
            .collect();

        matching.sort_by_key(|name| {
            PREFERRED
                .iter()
                .position(|p| p == name)
                .unwrap_or(PREFERRED.len())
        });
        matching.into_iter().cloned().collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PackageManager {
    Npm,
    Yarn,
    Pnpm,
}

impl PackageManager {
    /// 잠금 파일로 패키지 매니저를 추정한다.
    pub async fn detect(project_dir: &Path) -> Self {
        if exists(&project_dir.join("pnpm-lock.yaml")).await {
            return Self::Pnpm;
        }
        if exists(&project_dir.join("yarn.lock")).await {
            return Self::Yarn;
        }
        Self::Npm
    }

    pub fn run_script(self, script: &str) -> String {
        match self {
            Self::Npm => format!("npm run {script}"),
            Self::Yarn => format!("yarn {script}"),
            Self::Pnpm => format!("pnpm {script}"),
        }
    }
}

pub(crate) async fn exists(path: &Path) -> bool {
    tokio::fs::try_exists(path).await.unwrap_or(false)
}
