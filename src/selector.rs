//! Content selection
//!
//! Walks the library through a [`LibraryClient`] and collects the items that
//! belong to a theme, the musical tables, or the highly-rated filter. Calls
//! are strictly sequential and results keep enumeration order.

use anyhow::{Context, Result};
use tracing::{debug, info};

use crate::library::LibraryClient;
use crate::models::{MediaItem, Movie, SectionKind};
use crate::themes::{self, Selection, Theme};

/// Which parts of the library a keyword scan covers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Scope {
    pub tv: bool,
    pub movies: bool,
}

impl Scope {
    pub fn all() -> Self {
        Self { tv: true, movies: true }
    }

    pub fn tv_only() -> Self {
        Self { tv: true, movies: false }
    }

    pub fn movies_only() -> Self {
        Self { tv: false, movies: true }
    }
}

impl Default for Scope {
    fn default() -> Self {
        Self::all()
    }
}

/// Run a `create` selection: keyword theme or musical mode
pub async fn select<C: LibraryClient + ?Sized>(
    client: &C,
    selection: Selection<'_>,
    scope: Scope,
) -> Result<Vec<MediaItem>> {
    match selection {
        Selection::Keywords(theme) => find_themed_content(client, theme, scope).await,
        Selection::Musical => find_musicals(client).await,
    }
}

/// All episodes (then movies) whose title and summary match the theme.
///
/// TV matches come first, then movie matches, each in enumeration order.
pub async fn find_themed_content<C: LibraryClient + ?Sized>(
    client: &C,
    theme: &Theme,
    scope: Scope,
) -> Result<Vec<MediaItem>> {
    let mut items = Vec::new();

    if scope.tv {
        for section in client.sections_of(SectionKind::Show).await? {
            info!("Scanning {}...", section.title);
            let shows = client
                .shows(&section)
                .await
                .with_context(|| format!("Failed to list shows in {}", section.title))?;

            for show in shows {
                let episodes = client
                    .episodes(&show)
                    .await
                    .with_context(|| format!("Failed to list episodes of {}", show.title))?;

                items.extend(
                    episodes
                        .into_iter()
                        .filter(|e| theme.matches(&e.title, &e.summary))
                        .map(MediaItem::Episode),
                );
            }
        }
    }

    if scope.movies {
        for section in client.sections_of(SectionKind::Movie).await? {
            info!("Scanning {}...", section.title);
            let movies = client
                .movies(&section)
                .await
                .with_context(|| format!("Failed to list movies in {}", section.title))?;

            items.extend(
                movies
                    .into_iter()
                    .filter(|m| theme.matches(&m.title, &m.summary))
                    .map(MediaItem::Movie),
            );
        }
    }

    debug!(theme = %theme.id, count = items.len(), "Theme scan complete");
    Ok(items)
}

/// Musical episodes from the curated tables.
///
/// Full musical series contribute every episode. Shows with specific musical
/// episodes contribute the episodes whose title contains one of the target
/// fragments. Movies are never scanned.
pub async fn find_musicals<C: LibraryClient + ?Sized>(client: &C) -> Result<Vec<MediaItem>> {
    let mut items = Vec::new();

    for section in client.sections_of(SectionKind::Show).await? {
        info!("Scanning {}...", section.title);
        let shows = client
            .shows(&section)
            .await
            .with_context(|| format!("Failed to list shows in {}", section.title))?;

        for show in shows {
            if themes::is_musical_series(&show.title) {
                let episodes = client
                    .episodes(&show)
                    .await
                    .with_context(|| format!("Failed to list episodes of {}", show.title))?;
                info!("  {}: {} episodes (musical series)", show.title, episodes.len());
                items.extend(episodes.into_iter().map(MediaItem::Episode));
                continue;
            }

            let Some(targets) = themes::musical_episode_targets(&show.title) else {
                continue;
            };

            let episodes = client
                .episodes(&show)
                .await
                .with_context(|| format!("Failed to list episodes of {}", show.title))?;

            for episode in episodes {
                if themes::matching_fragment(targets, &episode.title).is_some() {
                    info!("  {}", episode);
                    items.push(MediaItem::Episode(episode));
                }
            }
        }
    }

    Ok(items)
}

/// Unwatched movies rated at least `min_rating`, best first.
///
/// A movie's rating is the higher of its critic and audience ratings; movies
/// with neither are skipped. Equal ratings are ordered by title.
pub async fn find_highly_rated_unwatched<C: LibraryClient + ?Sized>(
    client: &C,
    min_rating: f32,
) -> Result<Vec<Movie>> {
    let mut movies = Vec::new();

    for section in client.sections_of(SectionKind::Movie).await? {
        info!("Scanning {}...", section.title);
        let all = client
            .movies(&section)
            .await
            .with_context(|| format!("Failed to list movies in {}", section.title))?;

        movies.extend(all.into_iter().filter(|m| {
            !m.watched && m.best_rating().is_some_and(|r| r >= min_rating)
        }));
    }

    sort_by_rating(&mut movies);
    Ok(movies)
}

/// Sort descending by best rating, then title ascending
fn sort_by_rating(movies: &mut [Movie]) {
    movies.sort_by(|a, b| {
        let ra = a.best_rating().unwrap_or(f32::MIN);
        let rb = b.best_rating().unwrap_or(f32::MIN);
        rb.total_cmp(&ra).then_with(|| a.title.cmp(&b.title))
    });
}
