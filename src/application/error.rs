//! 설정 해석 실패 분류.
//!
//! 모든 오류는 즉시 호출자에게 전파되고, 해석기 내부에서 복구하지 않는다.

use std::fmt;
use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SettingsError {
    /// 설정 값의 타입이 잘못된 경우
    #[error("{0}")]
    InvalidType(String),

    /// 서로 배타적이거나 함께 필요한 옵션 조합이 맞지 않는 경우
    #[error("{0}")]
    Conflict(String),

    /// 요구 조건을 만족시킬 수 없는 경우(프레임워크 요건, 포트 확보 등)
    #[error("{0}")]
    Unsatisfiable(String),

    #[error("Error reading {kind} file {}: {source}", path.display())]
    TlsRead {
        kind: TlsFileKind,
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TlsFileKind {
    PrivateKey,
    Certificate,
}

impl fmt::Display for TlsFileKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PrivateKey => f.write_str("private key"),
            Self::Certificate => f.write_str("certificate"),
        }
    }
}

/// 설정 값 이름을 오류 메시지 형식(`"name"`)으로 감싼다.
pub(crate) fn property(name: &str) -> String {
    format!("\"{name}\"")
}
