//! 애플리케이션 포트를 실제 인프라 구현체로 연결하는 어댑터 계층.

mod config_repository;
mod file_reader;
mod framework_detector;
mod port_prober;
mod reporter;

pub use config_repository::JsonConfigRepository;
pub use file_reader::TokioFileReader;
pub use framework_detector::CatalogFrameworkDetector;
pub use port_prober::TcpPortProber;
pub use reporter::ConsoleReporter;
