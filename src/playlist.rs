//! Playlist materialization
//!
//! Playlists are replaced wholesale: an existing playlist with the same name
//! is deleted, then a fresh one is created with the new items. Confirming a
//! destructive replace is the caller's job.

use anyhow::{Context, Result};
use tracing::info;

use crate::library::LibraryClient;
use crate::models::{MediaItem, Playlist};

/// Find a playlist by exact title
pub async fn find_playlist<C: LibraryClient + ?Sized>(
    client: &C,
    name: &str,
) -> Result<Option<Playlist>> {
    let playlists = client.playlists().await.context("Failed to list playlists")?;
    Ok(playlists.into_iter().find(|p| p.title == name))
}

/// Create `name` with exactly `items`, replacing any playlist of that name.
///
/// Returns `None` without touching the server when `items` is empty.
pub async fn create_or_replace<C: LibraryClient + ?Sized>(
    client: &C,
    name: &str,
    items: &[MediaItem],
) -> Result<Option<Playlist>> {
    if items.is_empty() {
        return Ok(None);
    }

    if let Some(existing) = find_playlist(client, name).await? {
        info!("Removing existing playlist '{}'...", name);
        client
            .delete_playlist(&existing)
            .await
            .with_context(|| format!("Failed to delete playlist '{}'", name))?;
    }

    let playlist = client
        .create_playlist(name, items)
        .await
        .with_context(|| format!("Failed to create playlist '{}'", name))?;

    Ok(Some(playlist))
}

/// Delete the playlist titled `name`. Returns false if there is none.
pub async fn delete_by_name<C: LibraryClient + ?Sized>(client: &C, name: &str) -> Result<bool> {
    match find_playlist(client, name).await? {
        Some(playlist) => {
            client
                .delete_playlist(&playlist)
                .await
                .with_context(|| format!("Failed to delete playlist '{}'", name))?;
            Ok(true)
        }
        None => Ok(false),
    }
}
