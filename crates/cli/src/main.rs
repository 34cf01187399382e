use std::process::ExitCode;

use ajaxconsole_core::{
    error::{Error, ValidationError},
    types::{InstanceId, PrefixedIdRule},
};
use clap::{CommandFactory, Parser};
use tracing_subscriber::EnvFilter;

mod commands {
    pub mod get_ajax_console;
}

#[derive(Debug, Parser)]
#[command(name = "get-ajax-console", version)]
#[command(about = "Print the ajax console URL of a running instance", long_about = None)]
struct Cli {
    #[arg(long, help = "Print diagnostic output to standard error")]
    debug: bool,

    #[arg(help = "The instance ID to open a console for")]
    instance_id: Option<String>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(error) => {
            // a failed write has nowhere left to be reported
            let _ = error.print();
            return if error.use_stderr() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            };
        }
    };
    init_logging(cli.debug);

    match run(&cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("{error}");
            if shows_usage(&error) {
                eprintln!("{}", Cli::command().render_usage());
            }
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: &Cli) -> Result<(), Error> {
    let rule = PrefixedIdRule::default();
    let instance_id = InstanceId::parse(cli.instance_id.as_deref().unwrap_or_default(), &rule)?;
    commands::get_ajax_console::print_ajax_console(&instance_id).await
}

fn shows_usage(error: &Error) -> bool {
    matches!(
        error,
        Error::Validation(ValidationError::MissingInstanceId)
            | Error::Credentials(_)
            | Error::Configuration(_)
    )
}

fn init_logging(debug: bool) {
    let filter = if debug {
        "warn,ajaxconsole_core=debug,ajaxconsole_ec2=debug,ajaxconsole_cli=debug"
    } else {
        "warn"
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_env_filter(EnvFilter::new(filter))
        .init();
}
