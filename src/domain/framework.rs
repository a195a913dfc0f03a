//! 프레임워크 감지기가 반환하는 프레임워크 기술자(descriptor).

use std::collections::BTreeMap;
use std::path::PathBuf;

/// 감지된 프레임워크를 프로젝트에서 실행/빌드/감시하는 방법.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameworkDescriptor {
    /// 설정 파일 `framework` 값으로 쓰는 식별자(예: `next`)
    pub id: String,
    /// 사용자 표시 이름(예: `Next.js`)
    pub name: String,
    pub dev: DevCommand,
    pub build: BuildOutput,
    /// 빌드 결과와 별도로 정적 자산을 제공하는 디렉터리
    pub static_assets_directory: Option<PathBuf>,
    /// 애플리케이션 프로세스에 추가할 환경변수
    pub env: BTreeMap<String, String>,
    pub watch: WatchCommands,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DevCommand {
    /// 우선순위 순서의 대체 실행 명령
    pub commands: Vec<String>,
    /// 프레임워크 개발 서버가 수신하는 포트
    pub port: u16,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildOutput {
    pub directory: PathBuf,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WatchCommands {
    /// 기본 명령 뒤에 붙일 감시 모드 인자 목록(대안별)
    pub commands: Vec<Vec<String>>,
}

impl FrameworkDescriptor {
    pub fn primary_command(&self) -> Option<&str> {
        self.dev.commands.first().map(String::as_str)
    }

    /// 정적 자산 디렉터리가 있으면 우선하고, 없으면 빌드 디렉터리를 쓴다.
    pub fn dist(&self) -> PathBuf {
        self.static_assets_directory
            .clone()
            .unwrap_or_else(|| self.build.directory.clone())
    }
}
