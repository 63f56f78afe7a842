//! Selector and playlist tests
//!
//! Runs theme, musical and rating selection plus playlist replacement
//! against an in-memory library.

mod common;

use common::{movie, titles, Call, MockLibrary};
use plex_playlist::models::{MediaItem, SectionKind};
use plex_playlist::playlist::{create_or_replace, delete_by_name, find_playlist};
use plex_playlist::selector::{
    find_highly_rated_unwatched, find_musicals, find_themed_content, select, Scope,
};
use plex_playlist::themes::{Selection, ThemeSet};

fn holiday_library() -> MockLibrary {
    MockLibrary::new()
        .with_section("1", SectionKind::Show, "TV Shows")
        .with_section("2", SectionKind::Movie, "Movies")
        .with_section("3", SectionKind::Other, "Music")
        .with_show(
            "1",
            "The Office",
            &[
                ("Christmas Party", "Michael hosts Secret Santa"),
                ("Halloween", "Costumes at the office"),
                ("Moroccan Christmas", "Meredith catches fire"),
            ],
        )
        .with_show(
            "1",
            "Community",
            &[
                ("Pilot", "Jeff starts community college"),
                ("Abed's Uncontrollable Christmas", "Stop-motion holiday special"),
            ],
        )
        .with_movie(
            "2",
            movie(
                "It's a Wonderful Life",
                "A man learns the value of his life on Christmas Eve",
            ),
        )
        .with_movie("2", movie("Halloween Christmas Special", ""))
        .with_movie("2", movie("Heat", "Cops and robbers in Los Angeles"))
}

// =============================================================================
// Keyword Themes
// =============================================================================

#[tokio::test]
async fn test_themed_content_tv_then_movies_in_order() {
    let library = holiday_library();
    let themes = ThemeSet::builtin();
    let christmas = themes.get("christmas").unwrap();

    let items = find_themed_content(&library, christmas, Scope::all())
        .await
        .unwrap();

    assert_eq!(
        titles(&items),
        vec![
            "Christmas Party",
            "Moroccan Christmas",
            "Abed's Uncontrollable Christmas",
            "It's a Wonderful Life",
        ]
    );
    assert!(matches!(items[0], MediaItem::Episode(_)));
    assert!(matches!(items[3], MediaItem::Movie(_)));
}

#[tokio::test]
async fn test_themed_content_respects_scope() {
    let library = holiday_library();
    let themes = ThemeSet::builtin();
    let christmas = themes.get("christmas").unwrap();

    let tv = find_themed_content(&library, christmas, Scope::tv_only())
        .await
        .unwrap();
    assert_eq!(tv.len(), 3);
    assert!(tv.iter().all(|i| matches!(i, MediaItem::Episode(_))));

    let movies = find_themed_content(&library, christmas, Scope::movies_only())
        .await
        .unwrap();
    assert_eq!(titles(&movies), vec!["It's a Wonderful Life"]);
}

#[tokio::test]
async fn test_missing_movie_section_contributes_nothing() {
    let library = MockLibrary::new()
        .with_section("1", SectionKind::Show, "TV Shows")
        .with_show("1", "Frasier", &[("Halloween", "A costume party")]);
    let themes = ThemeSet::builtin();

    let items = find_themed_content(&library, themes.get("halloween").unwrap(), Scope::all())
        .await
        .unwrap();
    assert_eq!(titles(&items), vec!["Halloween"]);

    let movies = find_highly_rated_unwatched(&library, 0.0).await.unwrap();
    assert!(movies.is_empty());
}

#[tokio::test]
async fn test_no_duplicates_removed_across_sections() {
    let library = MockLibrary::new()
        .with_section("1", SectionKind::Movie, "Movies")
        .with_section("2", SectionKind::Movie, "Kids Movies")
        .with_movie("1", movie("The Grinch", ""))
        .with_movie("2", movie("The Grinch", ""));
    let themes = ThemeSet::builtin();

    let items = find_themed_content(&library, themes.get("christmas").unwrap(), Scope::all())
        .await
        .unwrap();
    assert_eq!(items.len(), 2);
}

// =============================================================================
// Musical Mode
// =============================================================================

fn musical_library() -> MockLibrary {
    MockLibrary::new()
        .with_section("1", SectionKind::Show, "TV Shows")
        .with_section("2", SectionKind::Movie, "Movies")
        .with_show(
            "1",
            "Glee",
            &[("Pilot", ""), ("Showmance", ""), ("Acafellas", "")],
        )
        .with_show(
            "1",
            "Scrubs",
            &[
                ("My First Day", ""),
                ("My Musical (Director's Cut)", ""),
                ("My Lunch", ""),
            ],
        )
        .with_show(
            "1",
            "Psych",
            &[("Psych: The Musical", "Shawn and Gus sing"), ("Pilot", "")],
        )
        .with_show("1", "Seinfeld", &[("The Musical", "")])
        .with_movie("2", movie("Grease", "A musical"))
}

#[tokio::test]
async fn test_musical_series_contributes_every_episode() {
    let library = musical_library();
    let items = find_musicals(&library).await.unwrap();

    let glee: Vec<_> = items
        .iter()
        .filter(|i| matches!(i, MediaItem::Episode(e) if e.show_title == "Glee"))
        .collect();
    assert_eq!(glee.len(), 3);
}

#[tokio::test]
async fn test_musical_specific_episodes() {
    let library = musical_library();
    let items = find_musicals(&library).await.unwrap();

    assert_eq!(
        titles(&items),
        vec![
            "Pilot",
            "Showmance",
            "Acafellas",
            "My Musical (Director's Cut)",
            // matches two fragments, appears once
            "Psych: The Musical",
        ]
    );
}

#[tokio::test]
async fn test_select_dispatches_modes() {
    let library = musical_library();
    let themes = ThemeSet::builtin();

    let musical = select(&library, Selection::Musical, Scope::movies_only())
        .await
        .unwrap();
    assert_eq!(musical.len(), 5);

    let selection = themes.resolve("christmas").unwrap();
    let christmas = select(&library, selection, Scope::all()).await.unwrap();
    assert!(christmas.is_empty());
}

#[tokio::test]
async fn test_musical_scan_error_names_show() {
    let library = MockLibrary::new()
        .with_section("1", SectionKind::Show, "TV Shows")
        .with_show("1", "Glee", &[("Pilot", "")])
        .with_broken_show("1", "Scrubs");

    let err = find_musicals(&library).await.unwrap_err();
    let message = format!("{:#}", err);
    assert!(message.contains("Failed to list episodes of Scrubs"));
    assert!(message.contains("connection reset"));
}

#[tokio::test]
async fn test_musical_series_error_names_show() {
    let library = MockLibrary::new()
        .with_section("1", SectionKind::Show, "TV Shows")
        .with_broken_show("1", "Glee");

    let err = find_musicals(&library).await.unwrap_err();
    assert!(format!("{:#}", err).contains("Failed to list episodes of Glee"));
}

// =============================================================================
// Highly Rated
// =============================================================================

#[tokio::test]
async fn test_highly_rated_unwatched() {
    let mut a = movie("A", "");
    a.rating = Some(8.5);
    let mut b = movie("B", "");
    b.rating = Some(9.0);
    b.watched = true;
    let mut c = movie("C", "");
    c.audience_rating = Some(8.2);
    let mut d = movie("D", "");
    d.rating = Some(6.0);
    d.audience_rating = Some(7.9);
    let e = movie("E", "");

    let library = MockLibrary::new()
        .with_section("1", SectionKind::Movie, "Movies")
        .with_movie("1", c)
        .with_movie("1", b)
        .with_movie("1", a)
        .with_movie("1", d)
        .with_movie("1", e);

    let movies = find_highly_rated_unwatched(&library, 8.0).await.unwrap();
    let ratings: Vec<_> = movies.iter().map(|m| m.best_rating().unwrap()).collect();
    assert_eq!(ratings, vec![8.5, 8.2]);
    assert_eq!(movies[0].title, "A");
    assert_eq!(movies[1].title, "C");
}

// =============================================================================
// Playlist Materializer
// =============================================================================

#[tokio::test]
async fn test_create_or_replace_empty_is_noop() {
    let library = MockLibrary::new().with_playlist("Christmas Episodes");

    let result = create_or_replace(&library, "Christmas Episodes", &[])
        .await
        .unwrap();

    assert!(result.is_none());
    assert!(library.calls().is_empty());
    assert_eq!(library.playlist_titles(), vec!["Christmas Episodes"]);
}

#[tokio::test]
async fn test_create_or_replace_deletes_once_before_create() {
    let library = holiday_library().with_playlist("Christmas Episodes");
    let themes = ThemeSet::builtin();
    let items = find_themed_content(&library, themes.get("christmas").unwrap(), Scope::all())
        .await
        .unwrap();

    let playlist = create_or_replace(&library, "Christmas Episodes", &items)
        .await
        .unwrap()
        .unwrap();

    assert_eq!(playlist.title, "Christmas Episodes");
    assert_eq!(playlist.item_count, 4);

    let calls = library.calls();
    assert_eq!(calls.len(), 2);
    assert_eq!(calls[0], Call::Delete("Christmas Episodes".into()));
    let expected_keys: Vec<String> = items.iter().map(|i| i.rating_key().to_string()).collect();
    assert_eq!(
        calls[1],
        Call::Create {
            name: "Christmas Episodes".into(),
            keys: expected_keys,
        }
    );
    assert_eq!(library.playlist_titles(), vec!["Christmas Episodes"]);
}

#[tokio::test]
async fn test_create_without_existing_only_creates() {
    let library = MockLibrary::new().with_playlist("Other");
    let items = vec![MediaItem::Movie(movie("Elf", ""))];

    create_or_replace(&library, "Christmas Episodes", &items)
        .await
        .unwrap();

    let calls = library.calls();
    assert_eq!(calls.len(), 1);
    assert!(matches!(&calls[0], Call::Create { name, .. } if name == "Christmas Episodes"));
}

#[tokio::test]
async fn test_find_playlist_exact_name() {
    let library = MockLibrary::new().with_playlist("Christmas Episodes");

    assert!(find_playlist(&library, "Christmas Episodes").await.unwrap().is_some());
    assert!(find_playlist(&library, "christmas episodes").await.unwrap().is_none());
}

#[tokio::test]
async fn test_delete_by_name() {
    let library = MockLibrary::new().with_playlist("Old");

    assert!(!delete_by_name(&library, "Missing").await.unwrap());
    assert!(delete_by_name(&library, "Old").await.unwrap());
    assert_eq!(library.calls(), vec![Call::Delete("Old".into())]);
    assert!(library.playlist_titles().is_empty());
}
