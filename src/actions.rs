use anyhow::{anyhow, bail};
use serde_json::Value;

use crate::rpc::RpcCall;

pub const OPEN_URL: &str = "open_url";
pub const OPEN_BOOKMARK: &str = "open_bookmark";
pub const ADD_BOOKMARK: &str = "add_bookmark";
pub const CONFIGURE: &str = "configure";

/// Something the user can run by selecting a result.
#[derive(Clone, PartialEq, Eq)]
pub enum Action {
    OpenUrl { url: String },
    /// Record a click for `id` and open `url`.
    OpenBookmark { id: String, url: String },
    AddBookmark { url: String },
    Configure { server_url: String, api_key: String },
}

/// The API key never reaches the log.
impl std::fmt::Debug for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Action::OpenUrl { url } => f.debug_struct("OpenUrl").field("url", url).finish(),
            Action::OpenBookmark { id, url } => f
                .debug_struct("OpenBookmark")
                .field("id", id)
                .field("url", url)
                .finish(),
            Action::AddBookmark { url } => f.debug_struct("AddBookmark").field("url", url).finish(),
            Action::Configure { server_url, .. } => f
                .debug_struct("Configure")
                .field("server_url", server_url)
                .field("api_key", &"<redacted>")
                .finish(),
        }
    }
}

impl Action {
    pub fn method(&self) -> &'static str {
        match self {
            Action::OpenUrl { .. } => OPEN_URL,
            Action::OpenBookmark { .. } => OPEN_BOOKMARK,
            Action::AddBookmark { .. } => ADD_BOOKMARK,
            Action::Configure { .. } => CONFIGURE,
        }
    }

    /// Positional parameters in the order the host passes them back.
    pub fn parameters(&self) -> Vec<Value> {
        let params: Vec<&str> = match self {
            Action::OpenUrl { url } | Action::AddBookmark { url } => vec![url.as_str()],
            Action::OpenBookmark { id, url } => vec![id.as_str(), url.as_str()],
            Action::Configure {
                server_url,
                api_key,
            } => vec![server_url.as_str(), api_key.as_str()],
        };
        params.into_iter().map(Value::from).collect()
    }

    pub fn to_rpc(&self) -> RpcCall {
        RpcCall::new(self.method(), self.parameters())
    }

    pub fn from_rpc(call: &RpcCall) -> anyhow::Result<Self> {
        let expected = match call.method.as_str() {
            OPEN_URL | ADD_BOOKMARK => 1,
            OPEN_BOOKMARK | CONFIGURE => 2,
            other => bail!("unknown method `{other}`"),
        };
        if call.parameters.len() != expected {
            bail!(
                "`{}` takes {expected} parameter(s), got {}",
                call.method,
                call.parameters.len()
            );
        }
        let arg = |idx: usize| {
            call.param_str(idx)
                .ok_or_else(|| anyhow!("`{}` parameter {idx} is not text", call.method))
        };
        Ok(match call.method.as_str() {
            OPEN_URL => Action::OpenUrl { url: arg(0)? },
            ADD_BOOKMARK => Action::AddBookmark { url: arg(0)? },
            OPEN_BOOKMARK => Action::OpenBookmark {
                id: arg(0)?,
                url: arg(1)?,
            },
            _ => Action::Configure {
                server_url: arg(0)?,
                api_key: arg(1)?,
            },
        })
    }
}
