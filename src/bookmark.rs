use serde::{Deserialize, Serialize};
use url::Url;

use crate::actions::Action;
use crate::rpc::ResultEntry;

/// Bookmark ids are strings in current AnchorMarks builds but numeric in
/// older ones.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BookmarkId {
    Text(String),
    Number(i64),
}

impl std::fmt::Display for BookmarkId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BookmarkId::Text(s) => write!(f, "{s}"),
            BookmarkId::Number(n) => write!(f, "{n}"),
        }
    }
}

/// A bookmark as returned by `/api/quick-search` and `/api/bookmarks`.
///
/// Every field is optional on the wire: one odd record must not sink the
/// whole list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Bookmark {
    #[serde(default)]
    pub id: Option<BookmarkId>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub favicon: Option<String>,
    #[serde(default)]
    pub click_count: Option<u64>,
}

impl Bookmark {
    /// Id as text; empty when the server sent none.
    pub fn id(&self) -> String {
        self.id.as_ref().map(ToString::to_string).unwrap_or_default()
    }

    pub fn url(&self) -> &str {
        self.url.as_deref().unwrap_or_default()
    }

    pub fn display_title(&self) -> &str {
        match self.title.as_deref() {
            Some(title) if !title.trim().is_empty() => title,
            _ if !self.url().is_empty() => self.url(),
            _ => "Untitled",
        }
    }

    /// `host[:port]` of the bookmark URL, or the URL itself if it does not parse.
    pub fn domain(&self) -> String {
        match Url::parse(self.url()) {
            Ok(parsed) => match (parsed.host_str(), parsed.port()) {
                (Some(host), Some(port)) => format!("{host}:{port}"),
                (Some(host), None) => host.to_string(),
                (None, _) => String::new(),
            },
            Err(_) => self.url().to_string(),
        }
    }

    pub fn subtitle(&self) -> String {
        let domain = self.domain();
        match self.click_count.unwrap_or(0) {
            0 => domain,
            clicks => format!("{domain} • {clicks} clicks"),
        }
    }

    pub fn open_action(&self) -> Action {
        Action::OpenBookmark {
            id: self.id(),
            url: self.url().to_string(),
        }
    }

    pub fn to_entry(&self) -> ResultEntry {
        ResultEntry::info(self.display_title(), self.subtitle()).with_action(&self.open_action())
    }
}
