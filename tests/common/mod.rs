//! In-memory library shared by the integration tests

#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use anyhow::{bail, Result};
use async_trait::async_trait;

use plex_playlist::library::LibraryClient;
use plex_playlist::models::{Episode, MediaItem, Movie, Playlist, Section, SectionKind, Show};

/// Server mutation recorded by [`MockLibrary`]
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Delete(String),
    Create { name: String, keys: Vec<String> },
}

#[derive(Default)]
pub struct MockLibrary {
    sections: Vec<Section>,
    shows: HashMap<String, Vec<Show>>,
    movies: HashMap<String, Vec<Movie>>,
    episodes: HashMap<String, Vec<Episode>>,
    broken_shows: HashSet<String>,
    playlists: Mutex<Vec<Playlist>>,
    calls: Mutex<Vec<Call>>,
    next_key: Mutex<u32>,
}

impl MockLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    fn key(&self) -> String {
        let mut next = self.next_key.lock().unwrap();
        *next += 1;
        next.to_string()
    }

    pub fn with_section(mut self, key: &str, kind: SectionKind, title: &str) -> Self {
        self.sections.push(Section {
            key: key.to_string(),
            kind,
            title: title.to_string(),
        });
        self
    }

    /// Add a show with `(title, summary)` episodes, numbered S01E01..
    pub fn with_show(mut self, section: &str, title: &str, episodes: &[(&str, &str)]) -> Self {
        let show = Show {
            rating_key: self.key(),
            title: title.to_string(),
        };
        let eps = episodes
            .iter()
            .enumerate()
            .map(|(i, (ep_title, summary))| Episode {
                rating_key: self.key(),
                show_title: title.to_string(),
                season: Some(1),
                episode: Some(i as u32 + 1),
                title: ep_title.to_string(),
                summary: summary.to_string(),
                duration_ms: Some(22 * 60_000),
            })
            .collect();
        self.episodes.insert(show.rating_key.clone(), eps);
        self.shows.entry(section.to_string()).or_default().push(show);
        self
    }

    /// Add a show whose episode listing fails
    pub fn with_broken_show(mut self, section: &str, title: &str) -> Self {
        let show = Show {
            rating_key: self.key(),
            title: title.to_string(),
        };
        self.broken_shows.insert(show.rating_key.clone());
        self.shows.entry(section.to_string()).or_default().push(show);
        self
    }

    pub fn with_movie(mut self, section: &str, movie: Movie) -> Self {
        self.movies.entry(section.to_string()).or_default().push(movie);
        self
    }

    pub fn with_playlist(self, title: &str) -> Self {
        let playlist = Playlist {
            rating_key: self.key(),
            title: title.to_string(),
            item_count: 3,
            duration_ms: None,
            smart: false,
        };
        self.playlists.lock().unwrap().push(playlist);
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn playlist_titles(&self) -> Vec<String> {
        self.playlists
            .lock()
            .unwrap()
            .iter()
            .map(|p| p.title.clone())
            .collect()
    }
}

/// Movie builder for tests
pub fn movie(title: &str, summary: &str) -> Movie {
    Movie {
        rating_key: format!("m-{}", title),
        title: title.to_string(),
        year: Some(2000),
        summary: summary.to_string(),
        duration_ms: Some(100 * 60_000),
        rating: None,
        audience_rating: None,
        watched: false,
    }
}

pub fn titles(items: &[MediaItem]) -> Vec<&str> {
    items.iter().map(|i| i.title()).collect()
}

#[async_trait]
impl LibraryClient for MockLibrary {
    async fn sections(&self) -> Result<Vec<Section>> {
        Ok(self.sections.clone())
    }

    async fn shows(&self, section: &Section) -> Result<Vec<Show>> {
        Ok(self.shows.get(&section.key).cloned().unwrap_or_default())
    }

    async fn movies(&self, section: &Section) -> Result<Vec<Movie>> {
        Ok(self.movies.get(&section.key).cloned().unwrap_or_default())
    }

    async fn episodes(&self, show: &Show) -> Result<Vec<Episode>> {
        if self.broken_shows.contains(&show.rating_key) {
            bail!("connection reset");
        }
        Ok(self.episodes.get(&show.rating_key).cloned().unwrap_or_default())
    }

    async fn playlists(&self) -> Result<Vec<Playlist>> {
        Ok(self.playlists.lock().unwrap().clone())
    }

    async fn create_playlist(&self, name: &str, items: &[MediaItem]) -> Result<Playlist> {
        let keys: Vec<String> = items.iter().map(|i| i.rating_key().to_string()).collect();
        self.calls.lock().unwrap().push(Call::Create {
            name: name.to_string(),
            keys,
        });

        let playlist = Playlist {
            rating_key: self.key(),
            title: name.to_string(),
            item_count: items.len() as u32,
            duration_ms: None,
            smart: false,
        };
        self.playlists.lock().unwrap().push(playlist.clone());
        Ok(playlist)
    }

    async fn delete_playlist(&self, playlist: &Playlist) -> Result<()> {
        self.calls
            .lock()
            .unwrap()
            .push(Call::Delete(playlist.title.clone()));
        self.playlists
            .lock()
            .unwrap()
            .retain(|p| p.rating_key != playlist.rating_key);
        Ok(())
    }
}
