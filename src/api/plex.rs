//! Plex Media Server API client
//!
//! Talks to the server's JSON API using an `X-Plex-Token`. Every response is
//! wrapped in a `MediaContainer` object; list endpoints omit the list entirely
//! when it is empty.

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use crate::library::LibraryClient;
use crate::models::{Episode, MediaItem, Movie, Playlist, Section, SectionKind, Show};

/// Plex API error types
#[derive(Error, Debug)]
pub enum PlexError {
    #[error("Unauthorized (401): check your Plex token")]
    Unauthorized,

    #[error("Resource not found (404)")]
    NotFound,

    #[error("Server error: {0}")]
    ServerError(u16),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),
}

/// Plex API client, bound to one server
pub struct PlexClient {
    base_url: String,
    token: String,
    machine_identifier: String,
    client: reqwest::Client,
}

impl PlexClient {
    /// Connect to a server and fetch its machine identifier.
    ///
    /// Fails if the server is unreachable or rejects the token.
    pub async fn connect(base_url: impl Into<String>, token: impl Into<String>) -> Result<Self> {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        let mut client = Self {
            base_url,
            token: token.into(),
            machine_identifier: String::new(),
            client: reqwest::Client::new(),
        };

        let identity: ServerIdentity = client
            .get("/")
            .await
            .with_context(|| format!("Failed to connect to Plex at {}", client.base_url))?;

        debug!(
            machine = %identity.machine_identifier,
            name = identity.friendly_name.as_deref().unwrap_or(""),
            "Connected to Plex"
        );
        client.machine_identifier = identity.machine_identifier;
        Ok(client)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn machine_identifier(&self) -> &str {
        &self.machine_identifier
    }

    /// Send an authenticated request and return the body on success
    async fn execute(&self, method: Method, endpoint: &str) -> Result<String, PlexError> {
        let url = format!("{}{}", self.base_url, endpoint);
        debug!(%method, url = %url, "Plex request");

        let response = self
            .client
            .request(method, &url)
            .header("X-Plex-Token", &self.token)
            .header("Accept", "application/json")
            .send()
            .await?;

        match response.status() {
            status if status.is_success() => Ok(response.text().await?),
            StatusCode::UNAUTHORIZED => Err(PlexError::Unauthorized),
            StatusCode::NOT_FOUND => Err(PlexError::NotFound),
            status => Err(PlexError::ServerError(status.as_u16())),
        }
    }

    /// Send a request and unwrap the `MediaContainer` envelope
    async fn fetch<T: DeserializeOwned>(&self, method: Method, endpoint: &str) -> Result<T, PlexError> {
        let body = self.execute(method, endpoint).await?;
        let envelope: Envelope<T> = serde_json::from_str(&body)
            .map_err(|e| PlexError::InvalidResponse(format!("JSON parse error: {}", e)))?;
        Ok(envelope.media_container)
    }

    async fn get<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T, PlexError> {
        self.fetch(Method::GET, endpoint).await
    }

    /// Library URI for a list of items, as expected by playlist creation
    fn items_uri(&self, items: &[MediaItem]) -> String {
        let keys: Vec<&str> = items.iter().map(|i| i.rating_key()).collect();
        format!(
            "server://{}/com.plexapp.plugins.library/library/metadata/{}",
            self.machine_identifier,
            keys.join(",")
        )
    }
}

#[async_trait]
impl LibraryClient for PlexClient {
    async fn sections(&self) -> Result<Vec<Section>> {
        let container: DirectoryContainer = self.get("/library/sections").await?;
        Ok(container
            .directories
            .into_iter()
            .map(SectionRaw::into_section)
            .collect())
    }

    async fn shows(&self, section: &Section) -> Result<Vec<Show>> {
        let endpoint = format!("/library/sections/{}/all", section.key);
        let container: MetadataContainer<ShowRaw> = self.get(&endpoint).await?;
        Ok(container
            .metadata
            .into_iter()
            .map(ShowRaw::into_show)
            .collect())
    }

    async fn movies(&self, section: &Section) -> Result<Vec<Movie>> {
        let endpoint = format!("/library/sections/{}/all", section.key);
        let container: MetadataContainer<MovieRaw> = self.get(&endpoint).await?;
        Ok(container
            .metadata
            .into_iter()
            .map(MovieRaw::into_movie)
            .collect())
    }

    async fn episodes(&self, show: &Show) -> Result<Vec<Episode>> {
        let endpoint = format!("/library/metadata/{}/allLeaves", show.rating_key);
        let container: MetadataContainer<EpisodeRaw> = self.get(&endpoint).await?;
        Ok(container
            .metadata
            .into_iter()
            .map(|e| e.into_episode(&show.title))
            .collect())
    }

    async fn playlists(&self) -> Result<Vec<Playlist>> {
        let container: MetadataContainer<PlaylistRaw> = self.get("/playlists").await?;
        Ok(container
            .metadata
            .into_iter()
            .map(PlaylistRaw::into_playlist)
            .collect())
    }

    async fn create_playlist(&self, name: &str, items: &[MediaItem]) -> Result<Playlist> {
        let endpoint = format!(
            "/playlists?type=video&title={}&smart=0&uri={}",
            urlencoding::encode(name),
            urlencoding::encode(&self.items_uri(items))
        );
        let container: MetadataContainer<PlaylistRaw> =
            self.fetch(Method::POST, &endpoint).await?;

        let playlist = container
            .metadata
            .into_iter()
            .next()
            .ok_or_else(|| PlexError::InvalidResponse("No playlist in create response".into()))?;
        Ok(playlist.into_playlist())
    }

    async fn delete_playlist(&self, playlist: &Playlist) -> Result<()> {
        let endpoint = format!("/playlists/{}", playlist.rating_key);
        self.execute(Method::DELETE, &endpoint).await?;
        Ok(())
    }
}

// =============================================================================
// Response Structures (internal deserialization)
// =============================================================================

#[derive(Debug, Deserialize)]
struct Envelope<T> {
    #[serde(rename = "MediaContainer")]
    media_container: T,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ServerIdentity {
    machine_identifier: String,
    friendly_name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct DirectoryContainer {
    #[serde(rename = "Directory", default)]
    directories: Vec<SectionRaw>,
}

#[derive(Debug, Deserialize)]
struct MetadataContainer<T> {
    #[serde(rename = "Metadata", default = "Vec::new")]
    metadata: Vec<T>,
}

#[derive(Debug, Deserialize)]
struct SectionRaw {
    key: String,
    #[serde(rename = "type")]
    kind: SectionKind,
    title: String,
}

impl SectionRaw {
    fn into_section(self) -> Section {
        Section {
            key: self.key,
            kind: self.kind,
            title: self.title,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ShowRaw {
    rating_key: String,
    title: Option<String>,
}

impl ShowRaw {
    fn into_show(self) -> Show {
        Show {
            rating_key: self.rating_key,
            title: self.title.unwrap_or_default(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MovieRaw {
    rating_key: String,
    title: Option<String>,
    year: Option<u16>,
    summary: Option<String>,
    duration: Option<u64>,
    rating: Option<f32>,
    audience_rating: Option<f32>,
    view_count: Option<u32>,
}

impl MovieRaw {
    fn into_movie(self) -> Movie {
        Movie {
            rating_key: self.rating_key,
            title: self.title.unwrap_or_default(),
            year: self.year,
            summary: self.summary.unwrap_or_default(),
            duration_ms: self.duration,
            rating: self.rating,
            audience_rating: self.audience_rating,
            watched: self.view_count.unwrap_or(0) > 0,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct EpisodeRaw {
    rating_key: String,
    title: Option<String>,
    grandparent_title: Option<String>,
    parent_index: Option<u32>,
    index: Option<u32>,
    summary: Option<String>,
    duration: Option<u64>,
}

impl EpisodeRaw {
    fn into_episode(self, show_title: &str) -> Episode {
        Episode {
            rating_key: self.rating_key,
            show_title: self
                .grandparent_title
                .unwrap_or_else(|| show_title.to_string()),
            season: self.parent_index,
            episode: self.index,
            title: self.title.unwrap_or_default(),
            summary: self.summary.unwrap_or_default(),
            duration_ms: self.duration,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PlaylistRaw {
    rating_key: String,
    title: String,
    smart: Option<bool>,
    leaf_count: Option<u32>,
    duration: Option<u64>,
}

impl PlaylistRaw {
    fn into_playlist(self) -> Playlist {
        Playlist {
            rating_key: self.rating_key,
            title: self.title,
            item_count: self.leaf_count.unwrap_or(0),
            duration_ms: self.duration,
            smart: self.smart.unwrap_or(false),
        }
    }
}
