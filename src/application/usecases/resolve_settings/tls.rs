//! TLS 키/인증서 로딩 단계.

use crate::application::config::HttpsFiles;
use crate::application::error::{SettingsError, TlsFileKind};
use crate::application::ports::FileReader;
use crate::domain::settings::HttpsSettings;

/// 키와 인증서를 동시에 읽고 둘 다 끝날 때까지 기다린다.
/// 둘 다 실패하면 키 파일 오류를 먼저 보고한다.
pub(super) async fn load_https(
    reader: &dyn FileReader,
    files: &HttpsFiles,
) -> Result<HttpsSettings, SettingsError> {
    let (key, cert) = futures::join!(
        reader.read(&files.key_file),
        reader.read(&files.cert_file)
    );

    let key = key.map_err(|source| SettingsError::TlsRead {
        kind: TlsFileKind::PrivateKey,
        path: files.key_file.clone(),
        source,
    })?;
    let cert = cert.map_err(|source| SettingsError::TlsRead {
        kind: TlsFileKind::Certificate,
        path: files.cert_file.clone(),
        source,
    })?;

    Ok(HttpsSettings { key, cert })
}
