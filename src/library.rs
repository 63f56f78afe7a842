//! Library client boundary
//!
//! Everything the selector and playlist logic need from a media server.
//! [`crate::api::PlexClient`] is the production implementation.

use anyhow::Result;
use async_trait::async_trait;

use crate::models::{Episode, MediaItem, Movie, Playlist, Section, SectionKind, Show};

/// Read access to a media library plus playlist management
#[async_trait]
pub trait LibraryClient: Send + Sync {
    /// All library sections, in server order
    async fn sections(&self) -> Result<Vec<Section>>;

    /// All shows in a show section
    async fn shows(&self, section: &Section) -> Result<Vec<Show>>;

    /// All movies in a movie section
    async fn movies(&self, section: &Section) -> Result<Vec<Movie>>;

    /// Every episode of a show, in season/episode order
    async fn episodes(&self, show: &Show) -> Result<Vec<Episode>>;

    /// All playlists on the server
    async fn playlists(&self) -> Result<Vec<Playlist>>;

    /// Create a playlist holding exactly `items`, in order
    async fn create_playlist(&self, name: &str, items: &[MediaItem]) -> Result<Playlist>;

    /// Delete a playlist
    async fn delete_playlist(&self, playlist: &Playlist) -> Result<()>;

    /// Sections of a single kind. No matching section yields an empty list.
    async fn sections_of(&self, kind: SectionKind) -> Result<Vec<Section>> {
        let mut sections = self.sections().await?;
        sections.retain(|s| s.kind == kind);
        Ok(sections)
    }
}
