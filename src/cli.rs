//! CLI - Command Line Interface for plex-playlist
//!
//! Every command prints human-readable text by default, or JSON with `--json`.
//!
//! # Examples
//!
//! ```bash
//! # Preview a Christmas playlist
//! plex-playlist create christmas --dry-run
//!
//! # Build the musical playlist under a custom name
//! plex-playlist create musical --name "Sing Along" --yes
//!
//! # Housekeeping
//! plex-playlist list
//! plex-playlist delete "Christmas Episodes"
//! ```

use clap::{Args, Parser, Subcommand};
use serde::{Deserialize, Serialize};
use std::io::{BufRead, IsTerminal, Write};
use std::path::PathBuf;

use crate::models::MediaItem;
use crate::selector::Scope;

// =============================================================================
// Exit Codes
// =============================================================================

/// Exit codes for CLI operations (semantic for scripting)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Success (including "nothing found")
    Success = 0,
    /// Connection, credential, config or server error
    Error = 1,
    /// Invalid arguments (e.g. unknown theme)
    InvalidArgs = 2,
    /// Playlist not found
    NotFound = 3,
    /// User declined a destructive action
    Aborted = 4,
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> i32 {
        code as i32
    }
}

impl From<ExitCode> for std::process::ExitCode {
    fn from(code: ExitCode) -> std::process::ExitCode {
        std::process::ExitCode::from(code as u8)
    }
}

// =============================================================================
// Main CLI Structure
// =============================================================================

/// Plex Playlist Manager - Create themed playlists from your library
#[derive(Parser, Debug)]
#[command(
    name = "plex-playlist",
    version,
    about = "Create themed playlists from your Plex library",
    long_about = "Filters your Plex library into themed collections (christmas, \
                  halloween, musical, ...) and saves them as playlists.\n\n\
                  Connection settings come from --url/--token, the PLEX_URL and \
                  PLEX_TOKEN environment variables, or the config file.",
    after_help = "EXAMPLES:\n\
                  plex-playlist themes                         List themes\n\
                  plex-playlist create christmas --dry-run     Preview matches\n\
                  plex-playlist create musical -y              Create or replace\n\
                  plex-playlist highly-rated --min-rating 8.5  Unwatched favourites"
)]
pub struct Cli {
    /// Plex server URL
    #[arg(long, global = true)]
    pub url: Option<String>,

    /// Plex auth token
    #[arg(long, global = true)]
    pub token: Option<String>,

    /// Output format as JSON
    #[arg(long, short = 'j', global = true)]
    pub json: bool,

    /// Suppress progress output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Path to config file
    #[arg(long, short = 'c', global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

// =============================================================================
// Subcommands
// =============================================================================

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create a themed playlist
    Create(CreateCmd),

    /// List available themes
    #[command(visible_alias = "list-themes")]
    Themes(ThemesCmd),

    /// List existing playlists
    #[command(visible_alias = "list-playlists")]
    List(ListCmd),

    /// Create a playlist of unwatched, highly rated movies
    HighlyRated(HighlyRatedCmd),

    /// Delete a playlist by name
    Delete(DeleteCmd),
}

/// Create a themed playlist
#[derive(Args, Debug)]
pub struct CreateCmd {
    /// Theme id (see `themes`), or "musical"
    #[arg(required = true)]
    pub theme: String,

    /// Playlist name (default: "<Theme> Episodes")
    #[arg(long, short = 'n')]
    pub name: Option<String>,

    /// Only scan TV shows
    #[arg(long, conflicts_with = "movies_only")]
    pub tv_only: bool,

    /// Only scan movies
    #[arg(long)]
    pub movies_only: bool,

    /// Show what would be added without creating
    #[arg(long)]
    pub dry_run: bool,

    /// Replace an existing playlist without asking
    #[arg(long, short = 'y')]
    pub yes: bool,
}

impl CreateCmd {
    /// Library scope selected by the toggles
    pub fn scope(&self) -> Scope {
        if self.tv_only {
            Scope::tv_only()
        } else if self.movies_only {
            Scope::movies_only()
        } else {
            Scope::all()
        }
    }

    /// Effective playlist name
    pub fn playlist_name(&self) -> String {
        self.name
            .clone()
            .unwrap_or_else(|| default_playlist_name(&self.theme))
    }
}

/// "christmas" -> "Christmas Episodes"
pub fn default_playlist_name(theme: &str) -> String {
    let mut chars = theme.chars();
    let capitalized: String = match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    };
    format!("{} Episodes", capitalized)
}

/// List available themes
#[derive(Args, Debug)]
pub struct ThemesCmd {}

/// List existing playlists
#[derive(Args, Debug)]
pub struct ListCmd {}

/// Default name for the highly rated playlist
pub const HIGHLY_RATED_NAME: &str = "Highly Rated Unwatched";

/// Create a playlist of unwatched movies above a rating threshold
#[derive(Args, Debug)]
pub struct HighlyRatedCmd {
    /// Minimum rating, critic or audience (default: 8.0)
    #[arg(long, short = 'm')]
    pub min_rating: Option<f32>,

    /// Playlist name
    #[arg(long, short = 'n', default_value = HIGHLY_RATED_NAME)]
    pub name: String,

    /// Show what would be added without creating
    #[arg(long)]
    pub dry_run: bool,

    /// Replace an existing playlist without asking
    #[arg(long, short = 'y')]
    pub yes: bool,
}

/// Delete a playlist by exact name
#[derive(Args, Debug)]
pub struct DeleteCmd {
    /// Playlist name
    #[arg(required = true)]
    pub name: String,

    /// Delete without asking
    #[arg(long, short = 'y')]
    pub yes: bool,
}

// =============================================================================
// JSON Output Types
// =============================================================================

/// Generic JSON output wrapper with status
#[derive(Debug, Serialize, Deserialize)]
pub struct JsonOutput<T: Serialize> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "is_zero")]
    pub exit_code: i32,
}

fn is_zero(n: &i32) -> bool {
    *n == 0
}

impl<T: Serialize> JsonOutput<T> {
    /// Create success output with data
    pub fn success(data: T) -> Self {
        Self {
            data: Some(data),
            error: None,
            exit_code: 0,
        }
    }

    /// Create error output (no data)
    pub fn error_msg(msg: impl Into<String>, code: ExitCode) -> JsonOutput<()> {
        JsonOutput::<()> {
            data: None,
            error: Some(msg.into()),
            exit_code: code.into(),
        }
    }
}

/// Result of a create or highly-rated run
#[derive(Debug, Serialize, Deserialize)]
pub struct PlaylistResponse {
    /// "created", "dry_run", "empty" or "aborted"
    pub status: String,
    pub name: String,
    pub count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_ms: Option<u64>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub items: Vec<MediaItem>,
}

/// Theme listing entry
#[derive(Debug, Serialize, Deserialize)]
pub struct ThemeInfo {
    pub id: String,
    pub description: String,
}

// =============================================================================
// Output Helpers
// =============================================================================

/// How destructive actions get confirmed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmMode {
    /// Prompt on stderr, read the answer from stdin
    Ask,
    /// Behave as if the user said yes (`--yes`)
    AssumeYes,
    /// Behave as if the user said no (stdin is not a terminal)
    AssumeNo,
}

impl ConfirmMode {
    /// Prompt only when stdin is a terminal; otherwise every answer is no
    pub fn for_stdin(is_terminal: bool) -> Self {
        if is_terminal {
            Self::Ask
        } else {
            Self::AssumeNo
        }
    }
}

/// Output handler for consistent formatting
pub struct Output {
    pub json: bool,
    pub quiet: bool,
    pub confirm: ConfirmMode,
}

impl Output {
    pub fn new(cli: &Cli) -> Self {
        Self {
            json: cli.json,
            quiet: cli.quiet,
            confirm: ConfirmMode::for_stdin(std::io::stdin().is_terminal()),
        }
    }

    /// Same output settings with a different confirmation mode
    pub fn with_confirm(&self, confirm: ConfirmMode) -> Self {
        Self {
            json: self.json,
            quiet: self.quiet,
            confirm,
        }
    }

    /// Print success data: JSON envelope, or the human rendering
    pub fn print<T: Serialize>(&self, data: T, human: impl FnOnce(&T) -> String) -> anyhow::Result<()> {
        if self.json {
            let output = JsonOutput::success(data);
            println!("{}", serde_json::to_string_pretty(&output)?);
        } else {
            println!("{}", human(&data));
        }
        Ok(())
    }

    /// Print error and return exit code
    pub fn error(&self, msg: impl Into<String>, code: ExitCode) -> ExitCode {
        let msg = msg.into();
        if self.json {
            let output = JsonOutput::<()>::error_msg(&msg, code);
            if let Ok(json) = serde_json::to_string_pretty(&output) {
                eprintln!("{}", json);
            }
        } else {
            eprintln!("Error: {}", msg);
        }
        code
    }

    /// Print info message (suppressed in quiet mode)
    pub fn info(&self, msg: impl std::fmt::Display) {
        if !self.quiet && !self.json {
            eprintln!("{}", msg);
        }
    }

    /// Ask the user to confirm a destructive action
    pub fn confirm(&self, prompt: &str) -> bool {
        match self.confirm {
            ConfirmMode::AssumeYes => true,
            ConfirmMode::AssumeNo => false,
            ConfirmMode::Ask => {
                eprint!("{} [y/N] ", prompt);
                let _ = std::io::stderr().flush();

                let mut answer = String::new();
                if std::io::stdin().lock().read_line(&mut answer).is_err() {
                    return false;
                }
                is_yes(&answer)
            }
        }
    }
}

/// Interpret a prompt answer
pub fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}

/// Human-readable preview: first `limit` items, then a count of the rest
pub fn preview_lines(items: &[MediaItem], limit: usize) -> Vec<String> {
    let mut lines: Vec<String> = items
        .iter()
        .take(limit)
        .map(|item| format!("  • {}", item))
        .collect();
    if items.len() > limit {
        lines.push(format!("  ... and {} more", items.len() - limit));
    }
    lines
}

// =============================================================================
// Tests
// =============================================================================
