//! plex-playlist - Create themed playlists from your Plex library
//!
//! Filters a library into thematic collections using keyword matching over
//! titles and summaries, or curated per-show episode lists, then saves the
//! result as a server-side playlist.
//!
//! # Modules
//!
//! - `models` - Sections, shows, episodes, movies and playlists
//! - `themes` - Theme registry, keyword matcher and musical tables
//! - `library` - The `LibraryClient` boundary
//! - `selector` - Themed, musical and highly-rated selection
//! - `playlist` - Create-or-replace playlist materialization
//! - `api` - Plex HTTP client
//! - `cli` / `commands` - Command line surface and handlers
//! - `config` - Config file and credential resolution

pub mod models;
pub mod themes;
pub mod library;
pub mod selector;
pub mod playlist;
pub mod api;
pub mod cli;
pub mod commands;
pub mod config;

// Re-export commonly used types
pub use models::{Episode, MediaItem, Movie, Playlist, Section, SectionKind, Show};
pub use themes::{Selection, Theme, ThemeSet, UnknownTheme};
pub use library::LibraryClient;
pub use selector::{find_highly_rated_unwatched, find_musicals, find_themed_content, Scope};
pub use playlist::create_or_replace;
pub use api::{PlexClient, PlexError};
pub use config::{Config, Credentials};
