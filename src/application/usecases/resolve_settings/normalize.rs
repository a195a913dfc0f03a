//! 원본 입력(`dev` 블록, CLI 플래그)의 타입 검증 단계.

use std::path::PathBuf;

use serde_json::Value;

use crate::application::config::{DevConfig, HttpsFiles, RawDevConfig, RawFlags};
use crate::application::error::{SettingsError, property};
use crate::domain::origin::FrameworkSetting;

/// 원본 `dev` 블록을 타입이 보장된 설정으로 변환한다.
/// 잘못된 타입이나 즉시 판별 가능한 충돌은 어떤 협력자도 호출하기 전에 실패한다.
pub(super) fn normalize(raw: &RawDevConfig, flags: &RawFlags) -> Result<DevConfig, SettingsError> {
    let framework = match present(raw, "framework") {
        Some(Value::String(value)) => FrameworkSetting::parse(value),
        Some(_) => {
            return Err(SettingsError::InvalidType(format!(
                "Invalid {0} option provided in config. The value of {0} option must be a string",
                property("framework")
            )));
        }
        None => {
            return Err(SettingsError::InvalidType(format!(
                "Missing {} option in config",
                property("framework")
            )));
        }
    };

    let mut config = DevConfig::new(framework);
    config.command = string_property(raw, "command")?.filter(|v| !v.trim().is_empty());
    config.publish = string_property(raw, "publish")?.map(PathBuf::from);
    config.functions = string_property(raw, "functions")?.map(PathBuf::from);
    config.jwt_secret = string_property(raw, "jwtSecret")?;
    config.jwt_role_path = string_property(raw, "jwtRolePath")?;
    config.target_port = port_property(raw, "targetPort")?;
    config.port = port_property(raw, "port")?;
    config.functions_port = port_property(raw, "functionsPort")?;
    config.https = https_property(raw)?;

    if let (Some(target_port), Some(port)) = (config.target_port, config.port)
        && target_port == port
    {
        return Err(same_port_values());
    }

    if flags.dir.is_some() {
        // 정적 서버 디렉터리와 애플리케이션 실행 옵션은 함께 쓸 수 없다.
        let conflicting = [
            ("command", flags.command.is_some()),
            ("targetPort", flags.target_port.is_some()),
        ];
        if let Some((name, _)) = conflicting.iter().find(|(_, set)| *set) {
            return Err(SettingsError::Conflict(format!(
                "{} option cannot be used in conjunction with {} flag which is used to run a static server",
                property(name),
                property("dir")
            )));
        }
    }

    Ok(config)
}

pub(super) fn same_port_values() -> SettingsError {
    SettingsError::Conflict(format!(
        "{} and {} options cannot have same values",
        property("port"),
        property("targetPort")
    ))
}

// JSON null은 값이 없는 것으로 취급한다.
fn present<'a>(raw: &'a RawDevConfig, key: &str) -> Option<&'a Value> {
    raw.get(key).filter(|v| !v.is_null())
}

fn string_property(raw: &RawDevConfig, key: &str) -> Result<Option<String>, SettingsError> {
    match present(raw, key) {
        None => Ok(None),
        Some(Value::String(value)) => Ok(Some(value.clone())),
        Some(_) => Err(SettingsError::InvalidType(format!(
            "Invalid {0} option specified. The value of {0} option must be a string",
            property(key)
        ))),
    }
}

fn port_property(raw: &RawDevConfig, key: &str) -> Result<Option<u16>, SettingsError> {
    let Some(value) = present(raw, key) else {
        return Ok(None);
    };

    value
        .as_u64()
        .filter(|v| *v > 0)
        .and_then(|v| u16::try_from(v).ok())
        .map(Some)
        .ok_or_else(|| {
            SettingsError::InvalidType(format!(
                "Invalid {0} option specified. The value of {0} option must be an integer",
                property(key)
            ))
        })
}

fn https_property(raw: &RawDevConfig) -> Result<Option<HttpsFiles>, SettingsError> {
    let Some(value) = present(raw, "https") else {
        return Ok(None);
    };

    let shape_error = || {
        SettingsError::InvalidType(format!(
            "https options should be an object with {} and {} string properties",
            property("keyFile"),
            property("certFile")
        ))
    };

    let Value::Object(options) = value else {
        return Err(shape_error());
    };

    let key_file = match options.get("keyFile") {
        Some(Value::String(path)) => PathBuf::from(path),
        Some(_) => {
            return Err(SettingsError::InvalidType(
                "Private key file configuration should be a string".to_string(),
            ));
        }
        None => return Err(shape_error()),
    };
    let cert_file = match options.get("certFile") {
        Some(Value::String(path)) => PathBuf::from(path),
        Some(_) => {
            return Err(SettingsError::InvalidType(
                "Certificate file configuration should be a string".to_string(),
            ));
        }
        None => return Err(shape_error()),
    };

    Ok(Some(HttpsFiles {
        key_file,
        cert_file,
    }))
}
