//! vml-loader: upload one or more VML documents to a scene-graph host.

use std::{path::PathBuf, process::ExitCode};

use clap::Parser;
use log::{error, LevelFilter};

use vml_client::{load_documents, transport::TcpSession, ClientConfig, ClientError, Driver};

/// Upload VML scene documents to a scene-graph host
#[derive(Parser)]
#[command(name = "vml-loader")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Host address, as `host` or `host:port`
    #[arg(short, long = "ip", default_value = "localhost")]
    ip: String,

    /// User name to connect as
    #[arg(long, default_value = "loader")]
    name: String,

    /// Password to connect with
    #[arg(long, default_value = "<secret>")]
    password: String,

    /// More output; repeat for even more
    #[arg(short, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Less output; repeat for even less
    #[arg(short, action = clap::ArgAction::Count)]
    quiet: u8,

    /// Documents to upload, merged into one scene
    #[arg(required = true)]
    files: Vec<PathBuf>,
}

impl Cli {
    fn level(&self) -> LevelFilter {
        const LEVELS: [LevelFilter; 6] = [
            LevelFilter::Off,
            LevelFilter::Error,
            LevelFilter::Warn,
            LevelFilter::Info,
            LevelFilter::Debug,
            LevelFilter::Trace,
        ];
        let base = 3 + i32::from(self.verbose) - i32::from(self.quiet);
        LEVELS[base.clamp(0, 5) as usize]
    }
}

fn run(cli: Cli) -> Result<(), ClientError> {
    let document = load_documents(&cli.files)?;
    let config = ClientConfig {
        name: cli.name,
        password: cli.password,
        address: cli.ip,
        ..ClientConfig::default()
    };
    let session = TcpSession::connect(&config.address)?;
    Driver::new(session, config).run(&document)
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    env_logger::Builder::new()
        .filter_level(cli.level())
        .parse_default_env()
        .init();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            error!("{}", error);
            ExitCode::FAILURE
        }
    }
}
