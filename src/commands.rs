//! CLI Command Handlers
//!
//! Implements all CLI commands on top of the selector and playlist modules.
//! Each handler takes CLI args, a library client and Output, returns ExitCode.

use serde::Serialize;

use crate::api::PlexClient;
use crate::cli::{
    ConfirmMode, CreateCmd, DeleteCmd, ExitCode, HighlyRatedCmd, ListCmd, Output,
    PlaylistResponse, ThemeInfo, ThemesCmd,
};
use crate::config::Credentials;
use crate::library::LibraryClient;
use crate::models::{total_duration_ms, MediaItem};
use crate::playlist;
use crate::selector;
use crate::themes::{ThemeSet, MUSICAL_DESCRIPTION, MUSICAL_ID};

/// Number of items listed before "... and N more"
const PREVIEW_LIMIT: usize = 20;

// =============================================================================
// Connection
// =============================================================================

/// Connect to the Plex server, reporting failures as exit code 1
pub async fn connect(creds: &Credentials, output: &Output) -> Result<PlexClient, ExitCode> {
    match PlexClient::connect(&creds.url, &creds.token).await {
        Ok(client) => Ok(client),
        Err(e) => Err(output.error(format!("{:#}", e), ExitCode::Error)),
    }
}

/// Honour a command's `--yes` flag on top of the global confirm mode
fn confirming(output: &Output, yes: bool) -> Output {
    if yes {
        output.with_confirm(ConfirmMode::AssumeYes)
    } else {
        output.with_confirm(output.confirm)
    }
}

// =============================================================================
// Themes Command
// =============================================================================

pub fn themes_cmd(_cmd: ThemesCmd, themes: &ThemeSet, output: &Output) -> ExitCode {
    let infos: Vec<ThemeInfo> = themes
        .iter()
        .map(|t| ThemeInfo {
            id: t.id.clone(),
            description: t.description.clone(),
        })
        .chain(std::iter::once(ThemeInfo {
            id: MUSICAL_ID.to_string(),
            description: MUSICAL_DESCRIPTION.to_string(),
        }))
        .collect();

    let result = output.print(infos, |infos| {
        let mut text = String::from("Available themes:\n");
        for info in infos {
            text.push_str(&format!("\n  {}: {}", info.id, info.description));
        }
        text
    });
    if let Err(e) = result {
        return output.error(format!("Failed to serialize: {}", e), ExitCode::Error);
    }
    ExitCode::Success
}

// =============================================================================
// Create Command
// =============================================================================

pub async fn create_cmd<C: LibraryClient + ?Sized>(
    cmd: CreateCmd,
    client: &C,
    themes: &ThemeSet,
    output: &Output,
) -> ExitCode {
    let selection = match themes.resolve(&cmd.theme) {
        Ok(selection) => selection,
        Err(e) => return output.error(e.to_string(), ExitCode::InvalidArgs),
    };

    let name = cmd.playlist_name();
    let output = confirming(output, cmd.yes);

    output.info(format!("Searching for {} content...", selection.id()));

    let items = match selector::select(client, selection, cmd.scope()).await {
        Ok(items) => items,
        Err(e) => return output.error(format!("Library scan failed: {:#}", e), ExitCode::Error),
    };

    let label = selection.id().to_string();
    materialize(client, &name, items, cmd.dry_run, &label, &output).await
}

// =============================================================================
// Highly Rated Command
// =============================================================================

pub async fn highly_rated_cmd<C: LibraryClient + ?Sized>(
    cmd: HighlyRatedCmd,
    client: &C,
    default_min_rating: f32,
    output: &Output,
) -> ExitCode {
    let min_rating = cmd.min_rating.unwrap_or(default_min_rating);
    let output = confirming(output, cmd.yes);

    output.info(format!("Searching for unwatched movies rated {:.1}+...", min_rating));

    let movies = match selector::find_highly_rated_unwatched(client, min_rating).await {
        Ok(movies) => movies,
        Err(e) => return output.error(format!("Library scan failed: {:#}", e), ExitCode::Error),
    };

    let items: Vec<MediaItem> = movies.into_iter().map(MediaItem::Movie).collect();
    materialize(client, &cmd.name, items, cmd.dry_run, "highly rated", &output).await
}

/// Shared tail of `create` and `highly-rated`: preview, confirm, replace
async fn materialize<C: LibraryClient + ?Sized>(
    client: &C,
    name: &str,
    items: Vec<MediaItem>,
    dry_run: bool,
    label: &str,
    output: &Output,
) -> ExitCode {
    if items.is_empty() {
        let response = response("empty", name, Vec::new());
        return finish(output, response, |_| {
            format!("No {} content found in your library.", label)
        });
    }

    let preview = crate::cli::preview_lines(&items, PREVIEW_LIMIT);

    if dry_run {
        let response = response("dry_run", name, items);
        return finish(output, response, |r| {
            format!(
                "Found {} items:\n{}\n\nDry run - playlist not created",
                r.count,
                preview.join("\n")
            )
        });
    }

    output.info(format!("Found {} items:", items.len()));
    for line in &preview {
        output.info(line);
    }

    match playlist::find_playlist(client, name).await {
        Ok(Some(_)) => {
            let prompt = format!("Playlist '{}' already exists. Replace it?", name);
            if !output.confirm(&prompt) {
                let response = response("aborted", name, Vec::new());
                finish(output, response, |_| "Aborted, playlist left unchanged.".to_string());
                return ExitCode::Aborted;
            }
        }
        Ok(None) => {}
        Err(e) => return output.error(format!("{:#}", e), ExitCode::Error),
    }

    output.info(format!("Creating playlist '{}'...", name));

    match playlist::create_or_replace(client, name, &items).await {
        Ok(created) => {
            let mut response = response("created", name, Vec::new());
            response.count = items.len();
            response.duration_ms = created
                .and_then(|p| p.duration_ms)
                .or(response_duration(&items));
            finish(output, response, |r| {
                format!("Created playlist '{}' with {} items!", r.name, r.count)
            })
        }
        Err(e) => output.error(format!("{:#}", e), ExitCode::Error),
    }
}

fn response(status: &str, name: &str, items: Vec<MediaItem>) -> PlaylistResponse {
    PlaylistResponse {
        status: status.to_string(),
        name: name.to_string(),
        count: items.len(),
        duration_ms: response_duration(&items),
        items,
    }
}

fn response_duration(items: &[MediaItem]) -> Option<u64> {
    match total_duration_ms(items) {
        0 => None,
        ms => Some(ms),
    }
}

/// Print a response and map serialization failure to an exit code
fn finish<T: Serialize>(output: &Output, data: T, human: impl FnOnce(&T) -> String) -> ExitCode {
    match output.print(data, human) {
        Ok(()) => ExitCode::Success,
        Err(e) => output.error(format!("Failed to serialize: {}", e), ExitCode::Error),
    }
}

// =============================================================================
// List Command
// =============================================================================

pub async fn list_cmd<C: LibraryClient + ?Sized>(
    _cmd: ListCmd,
    client: &C,
    output: &Output,
) -> ExitCode {
    let playlists = match client.playlists().await {
        Ok(playlists) => playlists,
        Err(e) => return output.error(format!("Failed to list playlists: {:#}", e), ExitCode::Error),
    };

    finish(output, playlists, |playlists| {
        if playlists.is_empty() {
            return "No playlists found.".to_string();
        }
        let mut text = String::from("Playlists:\n");
        for p in playlists {
            text.push_str(&format!("\n  • {}", p));
        }
        text
    })
}

// =============================================================================
// Delete Command
// =============================================================================

#[derive(Serialize)]
struct DeleteResponse {
    status: &'static str,
    name: String,
}

pub async fn delete_cmd<C: LibraryClient + ?Sized>(
    cmd: DeleteCmd,
    client: &C,
    output: &Output,
) -> ExitCode {
    let output = confirming(output, cmd.yes);

    match playlist::find_playlist(client, &cmd.name).await {
        Ok(Some(_)) => {}
        Ok(None) => {
            return output.error(format!("Playlist '{}' not found", cmd.name), ExitCode::NotFound)
        }
        Err(e) => return output.error(format!("{:#}", e), ExitCode::Error),
    }

    if !output.confirm(&format!("Delete playlist '{}'?", cmd.name)) {
        let response = DeleteResponse {
            status: "aborted",
            name: cmd.name,
        };
        finish(&output, response, |_| "Aborted, playlist left unchanged.".to_string());
        return ExitCode::Aborted;
    }

    match playlist::delete_by_name(client, &cmd.name).await {
        Ok(true) => finish(
            &output,
            DeleteResponse {
                status: "deleted",
                name: cmd.name,
            },
            |r| format!("Deleted playlist '{}'", r.name),
        ),
        Ok(false) => output.error(format!("Playlist '{}' not found", cmd.name), ExitCode::NotFound),
        Err(e) => output.error(format!("{:#}", e), ExitCode::Error),
    }
}
