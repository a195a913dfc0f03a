//! 해석 중인 설정 초안과 최종 해석 결과.

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};

use crate::domain::framework::FrameworkDescriptor;

/// `framework = "#custom"` 초안에 기록하는 프레임워크 이름.
pub const CUSTOM_FRAMEWORK: &str = "#custom";

/// 오버라이드 규칙을 거치기 전의 미완성 설정.
///
/// 각 규칙은 초안을 받아 새 초안을 반환한다(공유 상태 변경 없음).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SettingsDraft {
    pub command: Option<String>,
    pub framework_port: Option<u16>,
    pub dist: Option<PathBuf>,
    pub framework: Option<String>,
    pub env: BTreeMap<String, String>,
    /// 실행할 프로세스 없이 정적 파일만 제공하는 경우 true
    pub no_cmd: bool,
    pub functions: Option<PathBuf>,
}

impl SettingsDraft {
    /// 프레임워크 기술자를 설정 초안으로 사상한다.
    pub fn from_descriptor(descriptor: &FrameworkDescriptor) -> Self {
        Self {
            command: descriptor.primary_command().map(ToString::to_string),
            framework_port: Some(descriptor.dev.port),
            dist: Some(descriptor.dist()),
            framework: Some(descriptor.name.clone()),
            env: descriptor.env.clone(),
            no_cmd: false,
            functions: None,
        }
    }

    /// 명령/포트는 이후 원본 설정에서 채워진다.
    pub fn custom() -> Self {
        Self {
            framework: Some(CUSTOM_FRAMEWORK.to_string()),
            ..Self::default()
        }
    }

    pub fn static_server(dist: PathBuf, framework_port: u16) -> Self {
        Self {
            framework_port: Some(framework_port),
            dist: Some(dist),
            no_cmd: true,
            ..Self::default()
        }
    }

    /// 명령도 프레임워크도 없고 정적 서버도 아닌 상태인지 여부.
    pub fn is_unresolved(&self) -> bool {
        self.command.is_none() && self.framework.is_none() && !self.no_cmd
    }
}

/// 인증서 파일에서 읽은 TLS 자료.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpsSettings {
    pub key: Vec<u8>,
    pub cert: Vec<u8>,
}

// 키/인증서 내용은 출력하지 않고 크기만 노출한다.
impl Serialize for HttpsSettings {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("HttpsSettings", 2)?;
        state.serialize_field("keyBytes", &self.key.len())?;
        state.serialize_field("certBytes", &self.cert.len())?;
        state.end()
    }
}

/// 프록시와 애플리케이션 프로세스를 시작하는 데 필요한 최종 설정.
///
/// 불변식: `port != framework_port`, `no_cmd`가 false면 `command`가 존재한다.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedSettings {
    pub command: Option<String>,
    pub framework_port: u16,
    pub port: u16,
    pub dist: PathBuf,
    pub framework: Option<String>,
    pub env: BTreeMap<String, String>,
    pub no_cmd: bool,
    pub jwt_secret: String,
    pub jwt_role_path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub functions: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub functions_port: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub https: Option<HttpsSettings>,
}
