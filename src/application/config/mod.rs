//! 애플리케이션이 사용하는 설정 스키마(순수 데이터).
//!
//! 주의: 파일/환경변수/프로세스 접근은 `infrastructure`에서만 수행한다.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::domain::origin::FrameworkSetting;

pub const DEFAULT_PROXY_PORT: u16 = 8888;
pub const DEFAULT_STATIC_PORT: u16 = 3999;
pub const DEFAULT_JWT_SECRET: &str = "secret";
pub const DEFAULT_JWT_ROLE_PATH: &str = "app_metadata.authorization.roles";
pub const DEFAULT_FRAMEWORK: &str = "#auto";

/// 설정 해석기에 주입하는 기본값 묶음.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolverDefaults {
    /// 포트를 지정하지 않았을 때 프록시가 먼저 시도할 포트
    pub proxy_port: u16,
    /// 정적 서버가 먼저 시도할 포트
    pub static_port: u16,
    pub jwt_secret: String,
    pub jwt_role_path: String,
}

impl Default for ResolverDefaults {
    fn default() -> Self {
        Self {
            proxy_port: DEFAULT_PROXY_PORT,
            static_port: DEFAULT_STATIC_PORT,
            jwt_secret: DEFAULT_JWT_SECRET.to_string(),
            jwt_role_path: DEFAULT_JWT_ROLE_PATH.to_string(),
        }
    }
}

/// 사용자 설정 파일의 `defaults` 블록(모두 선택값).
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct DefaultsConfig {
    pub proxy_port: Option<u16>,
    pub static_port: Option<u16>,
    pub jwt_secret: Option<String>,
    pub jwt_role_path: Option<String>,
}

impl DefaultsConfig {
    /// 후순위(나중 파일) 값으로 덮어쓰는 병합 규칙.
    pub fn merge_from(&mut self, other: DefaultsConfig) {
        if other.proxy_port.is_some() {
            self.proxy_port = other.proxy_port;
        }
        if other.static_port.is_some() {
            self.static_port = other.static_port;
        }
        if other.jwt_secret.is_some() {
            self.jwt_secret = other.jwt_secret;
        }
        if other.jwt_role_path.is_some() {
            self.jwt_role_path = other.jwt_role_path;
        }
    }

    pub fn resolve(&self) -> ResolverDefaults {
        let base = ResolverDefaults::default();
        ResolverDefaults {
            proxy_port: self.proxy_port.unwrap_or(base.proxy_port),
            static_port: self.static_port.unwrap_or(base.static_port),
            jwt_secret: self.jwt_secret.clone().unwrap_or(base.jwt_secret),
            jwt_role_path: self.jwt_role_path.clone().unwrap_or(base.jwt_role_path),
        }
    }
}

/// 설정 파일 `dev` 블록 원본. 타입 검증 전이므로 JSON 값을 그대로 보관한다.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(transparent)]
pub struct RawDevConfig(pub Map<String, Value>);

impl RawDevConfig {
    /// `framework`만 `#auto`로 채운 기본 블록.
    pub fn with_default_framework() -> Self {
        let mut map = Map::new();
        map.insert(
            "framework".to_string(),
            Value::String(DEFAULT_FRAMEWORK.to_string()),
        );
        Self(map)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn set(&mut self, key: &str, value: impl Into<Value>) {
        self.0.insert(key.to_string(), value.into());
    }

    /// 후순위 블록의 키가 같은 이름의 키를 덮어쓴다.
    pub fn merge_from(&mut self, other: RawDevConfig) {
        for (key, value) in other.0 {
            self.0.insert(key, value);
        }
    }
}

/// CLI 플래그로 받은 값.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawFlags {
    /// 정적 서버로 제공할 디렉터리
    pub dir: Option<PathBuf>,
    pub static_server_port: Option<u16>,
    pub framework: Option<String>,
    pub command: Option<String>,
    pub target_port: Option<u16>,
    pub port: Option<u16>,
    pub functions: Option<PathBuf>,
    pub functions_port: Option<u16>,
}

impl RawFlags {
    /// `dev` 블록 위에 덮어쓸 플래그 값을 블록 형태로 반환한다.
    pub fn dev_overrides(&self) -> RawDevConfig {
        let mut out = RawDevConfig::default();
        if let Some(framework) = &self.framework {
            out.set("framework", framework.as_str());
        }
        if let Some(command) = &self.command {
            out.set("command", command.as_str());
        }
        if let Some(target_port) = self.target_port {
            out.set("targetPort", target_port);
        }
        if let Some(port) = self.port {
            out.set("port", port);
        }
        if let Some(functions) = &self.functions {
            out.set("functions", functions.display().to_string());
        }
        if let Some(functions_port) = self.functions_port {
            out.set("functionsPort", functions_port);
        }
        out
    }
}

/// TLS 키/인증서 파일 경로.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpsFiles {
    pub key_file: PathBuf,
    pub cert_file: PathBuf,
}

/// 타입 검증을 통과한 `dev` 블록.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DevConfig {
    pub framework: FrameworkSetting,
    pub command: Option<String>,
    pub target_port: Option<u16>,
    pub port: Option<u16>,
    pub publish: Option<PathBuf>,
    pub functions: Option<PathBuf>,
    pub functions_port: Option<u16>,
    pub jwt_secret: Option<String>,
    pub jwt_role_path: Option<String>,
    pub https: Option<HttpsFiles>,
}

impl DevConfig {
    pub fn new(framework: FrameworkSetting) -> Self {
        Self {
            framework,
            command: None,
            target_port: None,
            port: None,
            publish: None,
            functions: None,
            functions_port: None,
            jwt_secret: None,
            jwt_role_path: None,
            https: None,
        }
    }
}

/// 설정 저장소가 반환하는 로딩 결과.
#[derive(Debug, Clone)]
pub struct LoadedDevConfig {
    pub dev: RawDevConfig,
    pub defaults: ResolverDefaults,
}
