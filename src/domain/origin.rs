//! 설정 출처(origin) 분기 선택 규칙.
//! 분기 선택은 순수 함수이고, 각 분기의 부수효과(감지/선택/포트 확보)는 유스케이스에서 수행한다.

use std::fmt;
use std::path::{Path, PathBuf};

/// 설정 파일 `framework` 값의 해석 결과.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FrameworkSetting {
    /// `#auto`: 프로젝트에서 프레임워크를 자동 감지
    Auto,
    /// `#custom`: 사용자가 명령과 포트를 직접 지정
    Custom,
    /// `#static`: 정적 파일 서버
    Static,
    /// 특정 프레임워크 식별자
    Named(String),
}

impl FrameworkSetting {
    pub fn parse(raw: &str) -> Self {
        match raw {
            "#auto" => Self::Auto,
            "#custom" => Self::Custom,
            "#static" => Self::Static,
            other => Self::Named(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Auto => "#auto",
            Self::Custom => "#custom",
            Self::Static => "#static",
            Self::Named(name) => name,
        }
    }
}

impl fmt::Display for FrameworkSetting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 서로 배타적인 설정 출처 분기.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SettingsOrigin {
    /// `--dir` 플래그로 지정한 디렉터리를 정적 서버로 제공
    StaticDir(PathBuf),
    /// 프로젝트 자동 감지
    AutoDetected,
    /// 사용자 지정 명령 + 포트
    Custom,
    /// 이름으로 지정한 프레임워크
    NamedFramework(String),
    /// 다른 분기가 없으면 이후 정적 서버 대체 규칙이 처리한다
    Fallback,
}

impl SettingsOrigin {
    /// 우선순위 순서대로 첫 번째로 일치하는 분기를 고른다.
    pub fn select(
        framework: &FrameworkSetting,
        static_dir: Option<&Path>,
        has_command: bool,
        has_target_port: bool,
    ) -> Self {
        let has_custom_pair = has_command && has_target_port;

        if let Some(dir) = static_dir {
            return Self::StaticDir(dir.to_path_buf());
        }

        match framework {
            FrameworkSetting::Auto if !has_custom_pair => Self::AutoDetected,
            FrameworkSetting::Custom => Self::Custom,
            _ if has_custom_pair => Self::Custom,
            FrameworkSetting::Named(name) => Self::NamedFramework(name.clone()),
            FrameworkSetting::Auto | FrameworkSetting::Static => Self::Fallback,
        }
    }
}
