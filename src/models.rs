//! Data structures for plex-playlist
//!
//! Read-only views of the Plex library, organized by domain:
//! - **Library**: sections and shows
//! - **Media**: episodes, movies and the `MediaItem` sum type
//! - **Playlists**: server-side playlists managed by this tool

use serde::{Deserialize, Serialize};
use std::fmt;

// =============================================================================
// Library Models
// =============================================================================

/// Kind of a top-level library section
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SectionKind {
    Show,
    Movie,
    /// Music, photo and anything else we never scan
    #[serde(other)]
    Other,
}

impl fmt::Display for SectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SectionKind::Show => write!(f, "TV Shows"),
            SectionKind::Movie => write!(f, "Movies"),
            SectionKind::Other => write!(f, "Other"),
        }
    }
}

/// A library section (e.g. "TV Shows", "Movies")
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    pub key: String,
    pub kind: SectionKind,
    pub title: String,
}

/// A TV show inside a show section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Show {
    pub rating_key: String,
    pub title: String,
}

// =============================================================================
// Media Models
// =============================================================================

/// A single TV episode
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Episode {
    pub rating_key: String,
    /// Title of the parent show
    pub show_title: String,
    pub season: Option<u32>,
    pub episode: Option<u32>,
    pub title: String,
    pub summary: String,
    /// Duration in milliseconds
    pub duration_ms: Option<u64>,
}

impl fmt::Display for Episode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.season, self.episode) {
            (Some(s), Some(e)) => {
                write!(f, "{} - S{:02}E{:02} - {}", self.show_title, s, e, self.title)
            }
            _ => write!(f, "{} - {}", self.show_title, self.title),
        }
    }
}

/// A movie
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Movie {
    pub rating_key: String,
    pub title: String,
    pub year: Option<u16>,
    pub summary: String,
    /// Duration in milliseconds
    pub duration_ms: Option<u64>,
    /// Critic rating (0-10)
    pub rating: Option<f32>,
    /// Audience rating (0-10)
    pub audience_rating: Option<f32>,
    pub watched: bool,
}

impl Movie {
    /// Best of critic and audience rating, if either is present
    pub fn best_rating(&self) -> Option<f32> {
        match (self.rating, self.audience_rating) {
            (Some(r), Some(a)) => Some(r.max(a)),
            (r, a) => r.or(a),
        }
    }
}

impl fmt::Display for Movie {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.year {
            Some(year) => write!(f, "{} ({})", self.title, year),
            None => write!(f, "{}", self.title),
        }
    }
}

/// Anything that can go into a playlist
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum MediaItem {
    Episode(Episode),
    Movie(Movie),
}

impl MediaItem {
    pub fn rating_key(&self) -> &str {
        match self {
            MediaItem::Episode(e) => &e.rating_key,
            MediaItem::Movie(m) => &m.rating_key,
        }
    }

    pub fn title(&self) -> &str {
        match self {
            MediaItem::Episode(e) => &e.title,
            MediaItem::Movie(m) => &m.title,
        }
    }

    pub fn summary(&self) -> &str {
        match self {
            MediaItem::Episode(e) => &e.summary,
            MediaItem::Movie(m) => &m.summary,
        }
    }

    pub fn duration_ms(&self) -> Option<u64> {
        match self {
            MediaItem::Episode(e) => e.duration_ms,
            MediaItem::Movie(m) => m.duration_ms,
        }
    }
}

impl From<Episode> for MediaItem {
    fn from(episode: Episode) -> Self {
        MediaItem::Episode(episode)
    }
}

impl From<Movie> for MediaItem {
    fn from(movie: Movie) -> Self {
        MediaItem::Movie(movie)
    }
}

impl fmt::Display for MediaItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MediaItem::Episode(e) => e.fmt(f),
            MediaItem::Movie(m) => m.fmt(f),
        }
    }
}

// =============================================================================
// Playlist Models
// =============================================================================

/// A server-side playlist
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Playlist {
    pub rating_key: String,
    pub title: String,
    pub item_count: u32,
    /// Duration in milliseconds
    pub duration_ms: Option<u64>,
    /// Rule-based playlist (reported, never created here)
    pub smart: bool,
}

impl fmt::Display for Playlist {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({} items", self.title, self.item_count)?;
        if let Some(ms) = self.duration_ms {
            write!(f, ", {}", format_duration(ms))?;
        }
        if self.smart {
            write!(f, ", smart")?;
        }
        write!(f, ")")
    }
}

/// Total duration of a list of items, in milliseconds
pub fn total_duration_ms(items: &[MediaItem]) -> u64 {
    items.iter().filter_map(|i| i.duration_ms()).sum()
}

/// Format milliseconds as "1h 05m" or "42m"
pub fn format_duration(ms: u64) -> String {
    let total_mins = ms / 60_000;
    let hours = total_mins / 60;
    let mins = total_mins % 60;
    if hours > 0 {
        format!("{}h {:02}m", hours, mins)
    } else {
        format!("{}m", mins)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn movie(rating: Option<f32>, audience: Option<f32>) -> Movie {
        Movie {
            rating_key: "1".into(),
            title: "Test".into(),
            year: Some(2001),
            summary: String::new(),
            duration_ms: None,
            rating,
            audience_rating: audience,
            watched: false,
        }
    }

    #[test]
    fn test_best_rating() {
        assert_eq!(movie(Some(8.5), Some(7.0)).best_rating(), Some(8.5));
        assert_eq!(movie(Some(6.0), Some(8.2)).best_rating(), Some(8.2));
        assert_eq!(movie(None, Some(8.2)).best_rating(), Some(8.2));
        assert_eq!(movie(Some(7.1), None).best_rating(), Some(7.1));
        assert_eq!(movie(None, None).best_rating(), None);
    }

    #[test]
    fn test_episode_display() {
        let ep = Episode {
            rating_key: "10".into(),
            show_title: "Scrubs".into(),
            season: Some(6),
            episode: Some(6),
            title: "My Musical".into(),
            summary: String::new(),
            duration_ms: None,
        };
        assert_eq!(ep.to_string(), "Scrubs - S06E06 - My Musical");
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(42 * 60_000), "42m");
        assert_eq!(format_duration(65 * 60_000), "1h 05m");
        assert_eq!(format_duration(0), "0m");
    }

    #[test]
    fn test_section_kind_unknown_is_other() {
        let kind: SectionKind = serde_json::from_str("\"artist\"").unwrap();
        assert_eq!(kind, SectionKind::Other);
        let kind: SectionKind = serde_json::from_str("\"show\"").unwrap();
        assert_eq!(kind, SectionKind::Show);
    }
}
