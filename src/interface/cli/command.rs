//! CLI 명령 파싱 모듈.

use std::env;
use std::ffi::OsString;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::application::config::RawFlags;

#[derive(Debug, Parser)]
#[command(name = "devproxy")]
#[command(about = "Resolve how to run a local dev server behind a proxy")]
pub struct Cli {
    #[command(subcommand)]
    subcommand: Option<Commands>,

    /// Project directory (defaults to the current directory)
    #[arg(long, global = true)]
    cwd: Option<PathBuf>,

    #[command(flatten)]
    flags: FlagArgs,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Show searched config paths and the merged dev block
    Config,
}

#[derive(Debug, Default, Args)]
struct FlagArgs {
    /// Serve this directory with the built-in static server
    #[arg(short, long)]
    dir: Option<PathBuf>,

    /// Port for the built-in static server
    #[arg(long)]
    static_server_port: Option<u16>,

    /// Framework id, `#auto`, `#custom` or `#static`
    #[arg(short, long)]
    framework: Option<String>,

    /// Command that starts the application server
    #[arg(short, long)]
    command: Option<String>,

    /// Port the application server listens on
    #[arg(long)]
    target_port: Option<u16>,

    /// Port for the proxy in front of the application
    #[arg(short, long)]
    port: Option<u16>,

    /// Serverless functions directory
    #[arg(long)]
    functions: Option<PathBuf>,

    /// Port for the functions server
    #[arg(long)]
    functions_port: Option<u16>,
}

impl From<FlagArgs> for RawFlags {
    fn from(args: FlagArgs) -> Self {
        Self {
            dir: args.dir,
            static_server_port: args.static_server_port,
            framework: args.framework,
            command: args.command,
            target_port: args.target_port,
            port: args.port,
            functions: args.functions,
            functions_port: args.functions_port,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ResolveOptions {
    pub project_dir: PathBuf,
    pub flags: RawFlags,
}

#[derive(Debug, Clone)]
pub enum CliAction {
    InspectConfig { project_dir: PathBuf },
    Resolve(ResolveOptions),
}

impl Cli {
    pub fn parse_action() -> Result<CliAction, String> {
        Cli::parse().into_action()
    }

    /// 인자 목록에서 실행 동작을 만든다. `--help`/파싱 오류는 clap 메시지로 반환한다.
    pub fn try_parse_action<I, T>(args: I) -> Result<CliAction, String>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        Cli::try_parse_from(args)
            .map_err(|err| err.to_string())?
            .into_action()
    }

    fn into_action(self) -> Result<CliAction, String> {
        let project_dir = match self.cwd {
            Some(dir) => dir,
            None => env::current_dir()
                .map_err(|err| format!("cannot determine current directory: {err}"))?,
        };

        match self.subcommand {
            Some(Commands::Config) => Ok(CliAction::InspectConfig { project_dir }),
            None => Ok(CliAction::Resolve(ResolveOptions {
                project_dir,
                flags: self.flags.into(),
            })),
        }
    }
}
