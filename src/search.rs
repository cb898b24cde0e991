//! Turns a raw query into the entries shown by the launcher.

use crate::actions::Action;
use crate::api::BookmarkApi;
use crate::bookmark::Bookmark;
use crate::query::QueryCommand;
use crate::rpc::ResultEntry;
use crate::settings::Settings;

pub const TOP_LIMIT: usize = 10;
pub const SEARCH_LIMIT: usize = 15;
/// Action keyword registered with the host, used in usage hints.
pub const KEYWORD: &str = "lv";

pub fn search<A: BookmarkApi + ?Sized>(
    api: &A,
    settings: &Settings,
    query: &str,
) -> Vec<ResultEntry> {
    let command = QueryCommand::parse(query);
    if command.needs_api_key() && !settings.is_configured() {
        return vec![not_configured()];
    }

    match command {
        QueryCommand::Top => top_bookmarks(api, settings),
        QueryCommand::Configure {
            server_url: Some(server_url),
            api_key: Some(api_key),
        } => vec![ResultEntry::info(
            format!("Set API Key and connect to {server_url}"),
            "Press Enter to save configuration",
        )
        .with_action(&Action::Configure {
            server_url: server_url.to_string(),
            api_key: api_key.to_string(),
        })],
        QueryCommand::Configure { .. } => vec![ResultEntry::info(
            "Configure AnchorMarks",
            format!("Usage: {KEYWORD} config <server_url> <api_key>"),
        )],
        QueryCommand::OpenServer => vec![ResultEntry::info(
            "Open AnchorMarks",
            format!("Open {} in browser", settings.server_url),
        )
        .with_action(&Action::OpenUrl {
            url: settings.server_url.clone(),
        })],
        QueryCommand::Add { url } => vec![ResultEntry::info(
            format!("Add bookmark: {url}"),
            "Press Enter to add this URL to AnchorMarks",
        )
        .with_action(&Action::AddBookmark {
            url: url.to_string(),
        })],
        QueryCommand::Search { term } => search_bookmarks(api, settings, term),
    }
}

fn top_bookmarks<A: BookmarkApi + ?Sized>(api: &A, settings: &Settings) -> Vec<ResultEntry> {
    let bookmarks = match fetch(api, settings, None, TOP_LIMIT) {
        Some(list) => list,
        None => return vec![cannot_connect(settings)],
    };
    if bookmarks.is_empty() {
        return vec![ResultEntry::info(
            "No bookmarks found",
            "Add some bookmarks in AnchorMarks",
        )
        .with_action(&Action::OpenUrl {
            url: settings.server_url.clone(),
        })];
    }

    let mut entries = Vec::with_capacity(bookmarks.len() + 1);
    entries.push(ResultEntry::info(
        "Your Top Bookmarks",
        "Type to search or select a bookmark below",
    ));
    entries.extend(bookmarks.iter().map(Bookmark::to_entry));
    entries
}

fn search_bookmarks<A: BookmarkApi + ?Sized>(
    api: &A,
    settings: &Settings,
    term: &str,
) -> Vec<ResultEntry> {
    match fetch(api, settings, Some(term), SEARCH_LIMIT) {
        None => vec![cannot_connect(settings)],
        Some(list) if list.is_empty() => vec![ResultEntry::info(
            format!("No bookmarks found for '{term}'"),
            "Try a different search term",
        )],
        Some(list) => list.iter().map(Bookmark::to_entry).collect(),
    }
}

/// Every failure kind collapses to `None`; the reason only reaches the log.
fn fetch<A: BookmarkApi + ?Sized>(
    api: &A,
    settings: &Settings,
    term: Option<&str>,
    limit: usize,
) -> Option<Vec<Bookmark>> {
    match api.quick_search(settings, term, limit) {
        Ok(list) => Some(list),
        Err(e) => {
            tracing::warn!("quick-search against {} failed: {e}", settings.server_url);
            None
        }
    }
}

fn not_configured() -> ResultEntry {
    ResultEntry::info(
        "AnchorMarks not configured",
        format!("Type: {KEYWORD} config http://localhost:3000 your_api_key"),
    )
}

fn cannot_connect(settings: &Settings) -> ResultEntry {
    ResultEntry::info(
        "Cannot connect to AnchorMarks",
        format!("Check if server is running at {}", settings.server_url),
    )
}
