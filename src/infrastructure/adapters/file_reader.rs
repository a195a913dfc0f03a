//! 파일 읽기 포트 구현 어댑터.

use std::io;
use std::path::Path;

use async_trait::async_trait;

use crate::application::ports::FileReader;

/// tokio 파일시스템 API로 읽는 어댑터.
pub struct TokioFileReader;

#[async_trait]
impl FileReader for TokioFileReader {
    async fn read(&self, path: &Path) -> io::Result<Vec<u8>> {
        tokio::fs::read(path).await
    }
}
