//! credflow CLI binary entry point.

use credflow::cli::{Cli, Commands, ImapCommands, LinkedinCommands};
use credflow::config::CredflowConfig;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("credflow=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse_args();
    let config = cli.apply_overrides(CredflowConfig::from_env());

    let missing = config.missing();
    if !missing.is_empty() {
        tracing::debug!(?missing, "configuration values not set");
    }

    let result = match &cli.command {
        Commands::Linkedin(args) => match &args.command {
            LinkedinCommands::Authorize => credflow::cli::linkedin::handle_authorize(&config),
            LinkedinCommands::Callback(callback) => {
                credflow::cli::linkedin::handle_callback(&config, callback).await
            }
            LinkedinCommands::Connect => credflow::cli::linkedin::handle_connect(&config),
        },
        Commands::Imap(args) => match &args.command {
            ImapCommands::Schema => credflow::cli::imap::handle_schema(&config).await,
            #[cfg(feature = "imap")]
            ImapCommands::Test(mailbox) => credflow::cli::imap::handle_test(&config, mailbox).await,
            ImapCommands::Create(create) => credflow::cli::imap::handle_create(&config, create).await,
        },
    };

    if let Err(e) = result {
        eprintln!("{}", credflow::cli::errors::format_error_help(&e));
        std::process::exit(1);
    }
}
