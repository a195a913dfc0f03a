//! 애플리케이션 조립(composition root) 모듈.

use crate::application::ports::FrameworkPicker;
use crate::application::usecases::inspect_config::InspectConfigUseCase;
use crate::application::usecases::project_settings::ProjectSettingsUseCase;
use crate::infrastructure::adapters::{
    CatalogFrameworkDetector, ConsoleReporter, JsonConfigRepository, TcpPortProber,
    TokioFileReader,
};
use crate::interface::cli::picker::TerminalPicker;

/// 실행 시점 의존성을 한 곳에서 조립하는 컨테이너.
pub struct AppComposition {
    config_repo: JsonConfigRepository,
    detector: CatalogFrameworkDetector,
    file_reader: TokioFileReader,
    port_prober: TcpPortProber,
    reporter: ConsoleReporter,
    picker: Box<dyn FrameworkPicker>,
}

impl Default for AppComposition {
    fn default() -> Self {
        Self::new()
    }
}

impl AppComposition {
    /// 터미널 선택 프롬프트를 쓰는 기본 조합을 생성한다.
    pub fn new() -> Self {
        Self::with_picker(Box::new(TerminalPicker))
    }

    /// 선택 어댑터를 외부에서 주입한다.
    pub fn with_picker(picker: Box<dyn FrameworkPicker>) -> Self {
        Self {
            config_repo: JsonConfigRepository,
            detector: CatalogFrameworkDetector,
            file_reader: TokioFileReader,
            port_prober: TcpPortProber,
            reporter: ConsoleReporter::new(),
            picker,
        }
    }

    /// 프로젝트 설정 해석 유스케이스를 생성한다.
    pub fn project_settings_usecase(&self) -> ProjectSettingsUseCase<'_> {
        ProjectSettingsUseCase {
            config_repo: &self.config_repo,
            detector: &self.detector,
            picker: self.picker.as_ref(),
            file_reader: &self.file_reader,
            port_prober: &self.port_prober,
            reporter: &self.reporter,
        }
    }

    /// 설정 점검 유스케이스를 생성한다.
    pub fn inspect_config_usecase(&self) -> InspectConfigUseCase<'_> {
        InspectConfigUseCase {
            config_repo: &self.config_repo,
        }
    }
}
