//! 애플리케이션 계층이 의존하는 포트(추상 인터페이스) 모음.

use std::io;
use std::path::Path;

use anyhow::Result;
use async_trait::async_trait;

use crate::application::config::LoadedDevConfig;
use crate::domain::choice::FrameworkChoice;
use crate::domain::framework::FrameworkDescriptor;

/// 설정 로딩/점검을 담당하는 저장소 포트.
pub trait ConfigRepository: Send + Sync {
    fn load(&self, project_dir: &Path) -> Result<LoadedDevConfig>;
    fn inspect_pretty_json(&self, project_dir: &Path) -> Result<String>;
}

/// 프로젝트에서 사용 중인 프레임워크를 찾는 포트.
#[async_trait]
pub trait FrameworkDetector: Send + Sync {
    /// 프로젝트에서 감지된 모든 프레임워크.
    async fn list(&self, project_dir: &Path) -> Result<Vec<FrameworkDescriptor>>;
    /// 지정한 프레임워크가 이 프로젝트의 요건을 만족하는지 여부.
    async fn has_framework(&self, id: &str, project_dir: &Path) -> Result<bool>;
    async fn get_framework(&self, id: &str, project_dir: &Path) -> Result<FrameworkDescriptor>;
}

/// 선택지 라벨을 입력 문자열로 거르는 조건(입력, 라벨).
pub type ChoiceFilter = fn(&str, &str) -> bool;

/// 여러 선택지 중 하나를 사용자에게 고르게 하는 포트.
pub trait FrameworkPicker: Send + Sync {
    fn choose(
        &self,
        message: &str,
        choices: &[FrameworkChoice],
        filter: ChoiceFilter,
    ) -> Result<FrameworkChoice>;
}

/// 파일 내용을 읽는 포트.
#[async_trait]
pub trait FileReader: Send + Sync {
    async fn read(&self, path: &Path) -> io::Result<Vec<u8>>;
}

/// 사용 가능한 TCP 포트를 확보하는 포트.
#[async_trait]
pub trait PortProber: Send + Sync {
    /// `preferred`가 비어 있으면 아무 빈 포트나 반환한다.
    /// 선호 포트가 사용 중이면 다른 포트를 반환할 수 있다.
    async fn acquire(&self, preferred: Option<u16>) -> Result<u16>;
}

/// 콘솔/로그 출력 추상화 포트.
pub trait Reporter: Send + Sync {
    fn notice(&self, message: &str);
    fn warn(&self, message: &str);
    fn hint(&self, message: &str);
}
