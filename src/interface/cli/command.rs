//! CLI 명령 파싱 모듈.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::application::config::ServeOptions;

#[derive(Debug, Parser)]
#[command(name = "codehelper")]
#[command(about = "Code review/explain/clean/debug gateway in front of a chat-completion API")]
pub struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Listen host (overrides config)
    #[arg(long)]
    host: Option<String>,

    /// Listen port (overrides config and PORT)
    #[arg(long)]
    port: Option<u16>,

    /// Directory of the prebuilt SPA bundle
    #[arg(long)]
    static_dir: Option<PathBuf>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Show effective merged config, provider credential source and routes
    Config,
}

pub enum CliAction {
    InspectConfig,
    Serve(ServeOptions),
}

impl Cli {
    pub fn parse_action() -> CliAction {
        Cli::parse().into_action()
    }

    fn into_action(self) -> CliAction {
        match self.command {
            Some(Commands::Config) => CliAction::InspectConfig,
            None => CliAction::Serve(ServeOptions {
                host: self.host,
                port: self.port,
                static_dir: self.static_dir,
            }),
        }
    }
}
