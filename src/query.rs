//! Classification of the raw text typed after the plugin's action keyword.

pub const CONFIG_PREFIX: &str = "config ";
pub const ADD_PREFIX: &str = "add ";
pub const OPEN_COMMAND: &str = "open";

/// Intent of a query. Variants are listed in matching order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryCommand<'a> {
    /// Nothing typed: show the top bookmarks.
    Top,
    /// `config <server_url> <api_key>`. Either part may be missing.
    Configure {
        server_url: Option<&'a str>,
        api_key: Option<&'a str>,
    },
    /// `open`: open the AnchorMarks web UI.
    OpenServer,
    /// `add <url>`
    Add { url: &'a str },
    /// Anything else is handed to quick-search verbatim.
    Search { term: &'a str },
}

impl<'a> QueryCommand<'a> {
    pub fn parse(query: &'a str) -> Self {
        let trimmed = query.trim();
        if trimmed.is_empty() {
            return QueryCommand::Top;
        }

        if let Some(rest) = query.strip_prefix(CONFIG_PREFIX) {
            let rest = rest.trim();
            let (server_url, api_key) = match rest.split_once(' ') {
                Some((url, key)) => (Some(url), Some(key)),
                None => (Some(rest), None),
            };
            return QueryCommand::Configure {
                server_url: server_url.filter(|s| !s.is_empty()),
                api_key: api_key.filter(|s| !s.is_empty()),
            };
        }

        if trimmed == OPEN_COMMAND {
            return QueryCommand::OpenServer;
        }

        if let Some(url) = query.strip_prefix(ADD_PREFIX) {
            let url = url.trim();
            if !url.is_empty() {
                return QueryCommand::Add { url };
            }
        }

        QueryCommand::Search { term: query }
    }

    /// Whether handling this command talks to the server and so needs an API key.
    pub fn needs_api_key(&self) -> bool {
        matches!(
            self,
            QueryCommand::Top | QueryCommand::Add { .. } | QueryCommand::Search { .. }
        )
    }
}
