//! devproxy library root.
//! Clean Architecture + DDD 계층을 외부에 노출한다.

use std::path::Path;

use anyhow::Result;

pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod interface;

use application::config::RawFlags;
use domain::settings::ResolvedSettings;
use interface::cli::AppComposition;

/// 라이브러리 직접 호출용 설정 해석 함수.
pub async fn resolve_settings(flags: &RawFlags, project_dir: &Path) -> Result<ResolvedSettings> {
    let composition = AppComposition::default();
    composition
        .project_settings_usecase()
        .execute(flags, project_dir)
        .await
}

/// 설정 점검 JSON 출력용 함수.
pub fn inspect_config_pretty_json(project_dir: &Path) -> Result<String> {
    let composition = AppComposition::default();
    composition.inspect_config_usecase().execute(project_dir)
}
