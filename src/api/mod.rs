//! API clients for external services
//!
//! - Plex: library browsing and playlist management

pub mod plex;

pub use plex::{PlexClient, PlexError};
