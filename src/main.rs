//! plex-playlist - Create themed playlists from your Plex library
//!
//! # Usage
//!
//! ```bash
//! export PLEX_URL=http://192.168.1.10:32400
//! export PLEX_TOKEN=xxxxxxxx
//!
//! plex-playlist themes
//! plex-playlist create christmas --dry-run
//! plex-playlist create musical --name "Sing Along"
//! ```

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use plex_playlist::cli::{Cli, Command, ExitCode, Output};
use plex_playlist::commands;
use plex_playlist::config::Config;
use plex_playlist::themes::ThemeSet;

#[tokio::main(flavor = "current_thread")]
async fn main() -> std::process::ExitCode {
    let cli = Cli::parse();
    init_logging(cli.quiet);

    run_cli(cli).await.into()
}

/// Initialize tracing on stderr. `RUST_LOG` overrides the default level.
fn init_logging(quiet: bool) {
    let default = if quiet { "warn" } else { "plex_playlist=info" };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default.into()))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .without_time(),
        )
        .init();
}

/// Run CLI command and return exit code
async fn run_cli(cli: Cli) -> ExitCode {
    let output = Output::new(&cli);

    let config = match Config::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => return output.error(e.to_string(), ExitCode::Error),
    };
    let themes = ThemeSet::with_custom(config.themes.clone());

    // Unknown themes are rejected before connecting
    if let Command::Create(cmd) = &cli.command {
        if let Err(e) = themes.resolve(&cmd.theme) {
            return output.error(e.to_string(), ExitCode::InvalidArgs);
        }
    }

    if let Command::Themes(cmd) = cli.command {
        return commands::themes_cmd(cmd, &themes, &output);
    }

    let creds = match config.credentials(cli.url.as_deref(), cli.token.as_deref()) {
        Ok(creds) => creds,
        Err(e) => return output.error(e.to_string(), ExitCode::Error),
    };

    let client = match commands::connect(&creds, &output).await {
        Ok(client) => client,
        Err(code) => return code,
    };

    match cli.command {
        Command::Create(cmd) => commands::create_cmd(cmd, &client, &themes, &output).await,

        Command::HighlyRated(cmd) => {
            commands::highly_rated_cmd(cmd, &client, config.min_rating(), &output).await
        }

        Command::List(cmd) => commands::list_cmd(cmd, &client, &output).await,

        Command::Delete(cmd) => commands::delete_cmd(cmd, &client, &output).await,

        Command::Themes(cmd) => commands::themes_cmd(cmd, &themes, &output),
    }
}
