use clap::{Parser, Subcommand};
use env_logger::Env;
use slide_uploader::config::config::{ClientConfig, ConfigError};
use slide_uploader::control::StopControl;
use slide_uploader::page::{ConsoleNotifier, Gallery, PathFileSource};
use slide_uploader::transport::HttpTransport;
use slide_uploader::upload::{SubmitOutcome, UploadHandler};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "slide-uploader", version, about = "Upload a presentation and render its slides")]
struct Cli {
    /// Backend base URL, overrides SLIDES_BASE_URL
    #[arg(long, global = true)]
    base_url: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Upload a presentation and print the slides container as HTML
    Upload {
        file: Option<PathBuf>,

        /// Write the HTML here instead of stdout
        #[arg(long)]
        html_out: Option<PathBuf>,
    },
    /// Ask the backend to stop processing
    Stop,
}

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let config = match load_config(cli.base_url.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            log::error!("{e}");
            return ExitCode::FAILURE;
        }
    };
    let transport = match HttpTransport::new(&config) {
        Ok(transport) => transport,
        Err(e) => {
            log::error!("{e}");
            return ExitCode::FAILURE;
        }
    };

    match cli.command {
        Command::Upload { file, html_out } => {
            let handler = UploadHandler::new(
                transport,
                PathFileSource::new(file),
                Gallery::new(),
                ConsoleNotifier,
            )
            .with_config(&config);

            match handler.submit().await {
                Ok(SubmitOutcome::Rendered { .. }) => {
                    write_gallery(handler.target(), html_out).await
                }
                Ok(SubmitOutcome::Acknowledged { .. }) => ExitCode::SUCCESS,
                Err(_) => ExitCode::FAILURE,
            }
        }
        Command::Stop => {
            let control = StopControl::new(transport, ConsoleNotifier);
            match control.stop().await {
                Ok(_) => ExitCode::SUCCESS,
                Err(_) => ExitCode::FAILURE,
            }
        }
    }
}

fn load_config(base_url: Option<&str>) -> Result<ClientConfig, ConfigError> {
    let config = ClientConfig::from_env()?;
    match base_url {
        Some(raw) => config.with_base_url(raw),
        None => Ok(config),
    }
}

async fn write_gallery(gallery: &Gallery, html_out: Option<PathBuf>) -> ExitCode {
    let html = gallery.to_html();
    match html_out {
        Some(path) => match tokio::fs::write(&path, html).await {
            Ok(()) => {
                log::info!("wrote {} slides to {}", gallery.len(), path.display());
                ExitCode::SUCCESS
            }
            Err(e) => {
                log::error!("write {path:?} failed: {e}");
                ExitCode::FAILURE
            }
        },
        None => {
            print!("{html}");
            ExitCode::SUCCESS
        }
    }
}
