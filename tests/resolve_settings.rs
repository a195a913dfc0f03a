use std::collections::BTreeMap;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{Result, bail};
use async_trait::async_trait;
use serde_json::{Value, json};

use devproxy::application::config::{RawDevConfig, RawFlags, ResolverDefaults};
use devproxy::application::error::{SettingsError, TlsFileKind};
use devproxy::application::ports::{
    ChoiceFilter, FileReader, FrameworkDetector, FrameworkPicker, PortProber, Reporter,
};
use devproxy::application::usecases::resolve_settings::ResolveSettingsUseCase;
use devproxy::domain::choice::FrameworkChoice;
use devproxy::domain::framework::{BuildOutput, DevCommand, FrameworkDescriptor, WatchCommands};
use devproxy::domain::settings::ResolvedSettings;

fn descriptor(id: &str, name: &str, command: &str, port: u16, dir: &str) -> FrameworkDescriptor {
    FrameworkDescriptor {
        id: id.to_string(),
        name: name.to_string(),
        dev: DevCommand {
            commands: vec![command.to_string()],
            port,
        },
        build: BuildOutput {
            directory: PathBuf::from(dir),
        },
        static_assets_directory: None,
        env: BTreeMap::new(),
        watch: WatchCommands::default(),
    }
}

#[derive(Default)]
struct StubDetector {
    found: Vec<FrameworkDescriptor>,
}

#[async_trait]
impl FrameworkDetector for StubDetector {
    async fn list(&self, _project_dir: &Path) -> Result<Vec<FrameworkDescriptor>> {
        Ok(self.found.clone())
    }

    async fn has_framework(&self, id: &str, _project_dir: &Path) -> Result<bool> {
        Ok(self.found.iter().any(|f| f.id == id))
    }

    async fn get_framework(&self, id: &str, _project_dir: &Path) -> Result<FrameworkDescriptor> {
        match self.found.iter().find(|f| f.id == id) {
            Some(found) => Ok(found.clone()),
            None => bail!("unknown framework {id}"),
        }
    }
}

/// 호출 기록을 남기고 지정 인덱스의 선택지를 고른다.
struct RecordingPicker {
    pick: usize,
    calls: Mutex<Vec<Vec<String>>>,
}

impl RecordingPicker {
    fn picking(pick: usize) -> Self {
        Self {
            pick,
            calls: Mutex::new(Vec::new()),
        }
    }
}

impl FrameworkPicker for RecordingPicker {
    fn choose(
        &self,
        _message: &str,
        choices: &[FrameworkChoice],
        _filter: ChoiceFilter,
    ) -> Result<FrameworkChoice> {
        self.calls
            .lock()
            .unwrap()
            .push(choices.iter().map(|c| c.label.clone()).collect());
        Ok(choices[self.pick].clone())
    }
}

/// 경로 이름에 `missing`이 들어 있으면 실패한다.
struct StubReader;

#[async_trait]
impl FileReader for StubReader {
    async fn read(&self, path: &Path) -> io::Result<Vec<u8>> {
        if path.to_string_lossy().contains("missing") {
            return Err(io::Error::new(io::ErrorKind::NotFound, "no such file"));
        }
        Ok(format!("contents of {}", path.display()).into_bytes())
    }
}

/// 선호 포트를 그대로 돌려주고, 선호 포트가 없으면 고정 값을 준다.
struct EchoProber;

#[async_trait]
impl PortProber for EchoProber {
    async fn acquire(&self, preferred: Option<u16>) -> Result<u16> {
        Ok(preferred.unwrap_or(34567))
    }
}

/// 항상 다음 포트를 돌려준다(선호 포트가 사용 중인 상황).
struct BusyProber;

#[async_trait]
impl PortProber for BusyProber {
    async fn acquire(&self, preferred: Option<u16>) -> Result<u16> {
        Ok(preferred.map_or(40000, |p| p + 1))
    }
}

/// 어떤 요청에도 같은 포트만 돌려준다.
struct StuckProber(u16);

#[async_trait]
impl PortProber for StuckProber {
    async fn acquire(&self, _preferred: Option<u16>) -> Result<u16> {
        Ok(self.0)
    }
}

#[derive(Default)]
struct SilentReporter {
    lines: Mutex<Vec<String>>,
}

impl Reporter for SilentReporter {
    fn notice(&self, message: &str) {
        self.lines.lock().unwrap().push(format!("notice: {message}"));
    }

    fn warn(&self, message: &str) {
        self.lines.lock().unwrap().push(format!("warn: {message}"));
    }

    fn hint(&self, message: &str) {
        self.lines.lock().unwrap().push(format!("hint: {message}"));
    }
}

struct Harness {
    detector: StubDetector,
    picker: RecordingPicker,
    prober: Box<dyn PortProber>,
    reporter: SilentReporter,
}

impl Harness {
    fn new() -> Self {
        Self {
            detector: StubDetector::default(),
            picker: RecordingPicker::picking(0),
            prober: Box::new(EchoProber),
            reporter: SilentReporter::default(),
        }
    }

    async fn resolve(&self, dev: Value, flags: &RawFlags) -> Result<ResolvedSettings> {
        let use_case = ResolveSettingsUseCase {
            detector: &self.detector,
            picker: &self.picker,
            file_reader: &StubReader,
            port_prober: self.prober.as_ref(),
            reporter: &self.reporter,
            defaults: ResolverDefaults::default(),
        };
        let dev: RawDevConfig = serde_json::from_value(dev)?;
        use_case.execute(&dev, flags, Path::new("/work/site")).await
    }
}

fn settings_error(err: &anyhow::Error) -> &SettingsError {
    err.downcast_ref::<SettingsError>()
        .unwrap_or_else(|| panic!("expected a settings error, got {err:#}"))
}

fn assert_invariants(settings: &ResolvedSettings) {
    assert_ne!(settings.framework_port, settings.port);
    if !settings.no_cmd {
        assert!(settings.command.as_deref().is_some_and(|c| !c.is_empty()));
    }
}

#[tokio::test]
async fn custom_framework_uses_configured_command_and_port() {
    let harness = Harness::new();
    let settings = harness
        .resolve(
            json!({ "framework": "#custom", "command": "npm run x", "targetPort": 3000 }),
            &RawFlags::default(),
        )
        .await
        .unwrap();

    assert_eq!(settings.framework.as_deref(), Some("#custom"));
    assert_eq!(settings.command.as_deref(), Some("npm run x"));
    assert_eq!(settings.framework_port, 3000);
    assert_eq!(settings.port, 8888);
    assert_eq!(settings.jwt_secret, "secret");
    assert_eq!(settings.jwt_role_path, "app_metadata.authorization.roles");
    assert_invariants(&settings);
}

#[tokio::test]
async fn custom_framework_without_target_port_fails() {
    let err = Harness::new()
        .resolve(
            json!({ "framework": "#custom", "command": "npm run x" }),
            &RawFlags::default(),
        )
        .await
        .unwrap_err();

    assert!(matches!(settings_error(&err), SettingsError::Conflict(_)));
    assert!(err.to_string().contains(
        "\"command\" and \"targetPort\" properties are required when \"framework\" is set to \"#custom\""
    ));
}

#[tokio::test]
async fn dir_flag_runs_static_server() {
    let harness = Harness::new();
    let flags = RawFlags {
        dir: Some(PathBuf::from("./public")),
        ..RawFlags::default()
    };
    let settings = harness.resolve(json!({ "framework": "#auto" }), &flags).await.unwrap();

    assert!(settings.no_cmd);
    assert_eq!(settings.dist, PathBuf::from("./public"));
    assert_eq!(settings.framework_port, 3999);
    assert_eq!(settings.command, None);
    assert_invariants(&settings);

    let lines = harness.reporter.lines.lock().unwrap();
    assert!(lines.iter().any(|l| l.contains("--dir flag was specified")));
}

#[tokio::test]
async fn equal_port_and_target_port_fail_regardless_of_framework() {
    for framework in ["#custom", "#auto", "#static", "vite"] {
        let err = Harness::new()
            .resolve(
                json!({
                    "framework": framework,
                    "command": "npm start",
                    "port": 3000,
                    "targetPort": 3000
                }),
                &RawFlags::default(),
            )
            .await
            .unwrap_err();

        assert!(matches!(settings_error(&err), SettingsError::Conflict(_)));
        assert!(
            err.to_string()
                .contains("\"port\" and \"targetPort\" options cannot have same values"),
            "{framework}: {err}"
        );
    }
}

#[tokio::test]
async fn multiple_candidates_prompt_once() {
    let mut harness = Harness::new();
    harness.detector.found = vec![
        descriptor("gatsby", "Gatsby", "npm run develop", 8000, "/work/site/public"),
        descriptor("vite", "Vite", "npm run dev", 5173, "/work/site/dist"),
    ];
    harness.picker = RecordingPicker::picking(1);

    let settings = harness
        .resolve(json!({ "framework": "#auto" }), &RawFlags::default())
        .await
        .unwrap();

    let calls = harness.picker.calls.lock().unwrap();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0], ["[Gatsby] npm run develop", "[Vite] npm run dev"]);

    assert_eq!(settings.command.as_deref(), Some("npm run dev"));
    assert_eq!(settings.framework_port, 5173);
    assert_eq!(settings.dist, PathBuf::from("/work/site/dist"));
    assert_eq!(settings.framework.as_deref(), Some("Vite"));

    let lines = harness.reporter.lines.lock().unwrap();
    assert!(lines.iter().any(|l| l.starts_with("hint:") && l.contains("\"vite\"")));
}

#[tokio::test]
async fn single_candidate_skips_prompt() {
    let mut harness = Harness::new();
    harness.detector.found = vec![descriptor("next", "Next.js", "npm run dev", 3000, "/work/site/out")];

    let settings = harness
        .resolve(json!({ "framework": "#auto" }), &RawFlags::default())
        .await
        .unwrap();

    assert!(harness.picker.calls.lock().unwrap().is_empty());
    assert_eq!(settings.framework.as_deref(), Some("Next.js"));
    assert_eq!(settings.framework_port, 3000);
}

#[tokio::test]
async fn certificate_read_failure_names_certificate_file() {
    let err = Harness::new()
        .resolve(
            json!({
                "framework": "#custom",
                "command": "npm run x",
                "targetPort": 3000,
                "https": { "keyFile": "k.pem", "certFile": "missing-c.pem" }
            }),
            &RawFlags::default(),
        )
        .await
        .unwrap_err();

    match settings_error(&err) {
        SettingsError::TlsRead { kind, path, .. } => {
            assert_eq!(*kind, TlsFileKind::Certificate);
            assert_eq!(path, &PathBuf::from("missing-c.pem"));
        }
        other => panic!("unexpected error: {other}"),
    }
    let message = err.to_string();
    assert!(message.contains("certificate file missing-c.pem"));
    assert!(!message.contains("k.pem"));
}

#[tokio::test]
async fn https_files_are_loaded() {
    let settings = Harness::new()
        .resolve(
            json!({
                "framework": "#custom",
                "command": "npm run x",
                "targetPort": 3000,
                "https": { "keyFile": "k.pem", "certFile": "c.pem" }
            }),
            &RawFlags::default(),
        )
        .await
        .unwrap();

    let https = settings.https.unwrap();
    assert_eq!(https.key, b"contents of k.pem");
    assert_eq!(https.cert, b"contents of c.pem");
}

#[tokio::test]
async fn resolution_is_idempotent() {
    let harness = Harness::new();
    let dev = json!({
        "framework": "#custom",
        "command": "npm run x",
        "targetPort": 3000,
        "functions": "functions",
        "jwtSecret": "shh"
    });

    let first = harness.resolve(dev.clone(), &RawFlags::default()).await.unwrap();
    let second = harness.resolve(dev, &RawFlags::default()).await.unwrap();

    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );
}

#[tokio::test]
async fn named_framework_must_match_project() {
    let err = Harness::new()
        .resolve(json!({ "framework": "gatsby" }), &RawFlags::default())
        .await
        .unwrap_err();

    assert!(matches!(settings_error(&err), SettingsError::Unsatisfiable(_)));
    assert!(err.to_string().contains(
        "Specified \"framework\" detector \"gatsby\" did not pass requirements for your project"
    ));
}

#[tokio::test]
async fn named_framework_uses_its_descriptor() {
    let mut harness = Harness::new();
    harness.detector.found = vec![descriptor("gatsby", "Gatsby", "npm run develop", 8000, "/work/site/public")];

    let settings = harness
        .resolve(
            json!({ "framework": "gatsby", "command": "gatsby develop -H 0.0.0.0" }),
            &RawFlags::default(),
        )
        .await
        .unwrap();

    assert_eq!(settings.command.as_deref(), Some("gatsby develop -H 0.0.0.0"));
    assert_eq!(settings.framework_port, 8000);
    assert_invariants(&settings);
}

#[tokio::test]
async fn static_framework_serves_publish_directory() {
    let harness = Harness::new();
    let settings = harness
        .resolve(json!({ "framework": "#static", "publish": "site" }), &RawFlags::default())
        .await
        .unwrap();

    assert!(settings.no_cmd);
    assert_eq!(settings.dist, PathBuf::from("site"));
    assert_eq!(settings.framework_port, 3999);
    assert_invariants(&settings);
}

#[tokio::test]
async fn pinned_proxy_port_must_be_acquired_exactly() {
    let mut harness = Harness::new();
    harness.prober = Box::new(BusyProber);

    let err = harness
        .resolve(
            json!({ "framework": "#custom", "command": "npm run x", "targetPort": 3000, "port": 8000 }),
            &RawFlags::default(),
        )
        .await
        .unwrap_err();

    assert!(matches!(settings_error(&err), SettingsError::Unsatisfiable(_)));
    assert!(err.to_string().contains("Could not acquire required \"port\": 8000"));
}

#[tokio::test]
async fn static_fallback_port_is_checked_against_pinned_port() {
    let err = Harness::new()
        .resolve(json!({ "framework": "#static", "port": 3999 }), &RawFlags::default())
        .await
        .unwrap_err();

    assert!(matches!(settings_error(&err), SettingsError::Conflict(_)));
    assert!(err.to_string().contains(
        "The \"port\" option you specified conflicts with the port of your application"
    ));
}

#[tokio::test]
async fn default_proxy_port_shifts_when_application_uses_it() {
    let settings = Harness::new()
        .resolve(
            json!({ "framework": "#custom", "command": "npm run x", "targetPort": 8888 }),
            &RawFlags::default(),
        )
        .await
        .unwrap();

    assert_eq!(settings.framework_port, 8888);
    assert_eq!(settings.port, 34567);
    assert_invariants(&settings);
}

#[tokio::test]
async fn proxy_port_fails_when_only_application_port_is_free() {
    let mut harness = Harness::new();
    harness.prober = Box::new(StuckProber(8888));

    let err = harness
        .resolve(
            json!({ "framework": "#custom", "command": "npm run x", "targetPort": 8888 }),
            &RawFlags::default(),
        )
        .await
        .unwrap_err();

    assert!(matches!(settings_error(&err), SettingsError::Unsatisfiable(_)));
    assert!(err.to_string().contains(
        "Could not acquire a \"port\" different from the application port 8888"
    ));
}

#[tokio::test]
async fn unpinned_ports_accept_negotiated_values() {
    let mut harness = Harness::new();
    harness.prober = Box::new(BusyProber);

    let settings = harness
        .resolve(
            json!({ "framework": "#custom", "command": "npm run x", "targetPort": 3000, "functions": "fns" }),
            &RawFlags::default(),
        )
        .await
        .unwrap();

    assert_eq!(settings.port, 8889);
    assert_eq!(settings.functions, Some(PathBuf::from("fns")));
    assert_eq!(settings.functions_port, Some(40000));
}

#[tokio::test]
async fn dir_flag_conflicts_with_command_flag() {
    let flags = RawFlags {
        dir: Some(PathBuf::from("./public")),
        command: Some("npm start".to_string()),
        ..RawFlags::default()
    };
    let err = Harness::new()
        .resolve(json!({ "framework": "#auto", "command": "npm start" }), &flags)
        .await
        .unwrap_err();

    assert!(matches!(settings_error(&err), SettingsError::Conflict(_)));
}

#[tokio::test]
async fn wrong_property_type_is_rejected() {
    let err = Harness::new()
        .resolve(json!({ "framework": "#auto", "port": "eight" }), &RawFlags::default())
        .await
        .unwrap_err();

    assert!(matches!(settings_error(&err), SettingsError::InvalidType(_)));
}

#[tokio::test]
async fn settings_serialize_without_raw_tls_bytes() {
    let settings = Harness::new()
        .resolve(
            json!({
                "framework": "#custom",
                "command": "npm run x",
                "targetPort": 3000,
                "https": { "keyFile": "k.pem", "certFile": "c.pem" }
            }),
            &RawFlags::default(),
        )
        .await
        .unwrap();

    let value = serde_json::to_value(&settings).unwrap();
    assert_eq!(value["frameworkPort"], json!(3000));
    assert_eq!(value["noCmd"], json!(false));
    assert_eq!(value["https"]["keyBytes"], json!("contents of k.pem".len()));
    assert!(value.get("functionsPort").is_none());
}
