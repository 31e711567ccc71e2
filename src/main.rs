//! `codehelper` 바이너리 진입점.

use codehelper::interface::cli::{Cli, CliAction};
use codehelper::interface::composition::AppComposition;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let composition = AppComposition::default();

    match Cli::parse_action() {
        CliAction::InspectConfig => match composition.inspect_config_usecase().execute() {
            Ok(json) => println!("{json}"),
            Err(err) => {
                eprintln!("error: {err:#}");
                std::process::exit(1);
            }
        },
        CliAction::Serve(options) => {
            let result = match composition.http_server(&options) {
                Ok(server) => server.run().await,
                Err(err) => Err(err),
            };
            if let Err(err) = result {
                eprintln!("error: {err:#}");
                std::process::exit(1);
            }
        }
    }
}
