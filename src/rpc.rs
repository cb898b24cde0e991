//! Wire types of the Flow Launcher JSON-RPC plugin protocol.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::io::Write;

use crate::actions::Action;

/// Icon shipped next to the plugin executable.
pub const ICON_PATH: &str = "icon.png";

pub const QUERY_METHOD: &str = "query";
pub const CONTEXT_MENU_METHOD: &str = "context_menu";

/// `{method, parameters}` pair, used both for incoming requests and for the
/// `JsonRPCAction` attached to a result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RpcCall {
    pub method: String,
    #[serde(default)]
    pub parameters: Vec<Value>,
}

impl RpcCall {
    pub fn new(method: &str, parameters: Vec<Value>) -> Self {
        Self {
            method: method.to_string(),
            parameters,
        }
    }

    /// Parameter `idx` as text. Numbers are accepted since hosts are not
    /// consistent about quoting ids.
    pub fn param_str(&self, idx: usize) -> Option<String> {
        match self.parameters.get(idx)? {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }
}

/// One row shown by the launcher.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultEntry {
    #[serde(rename = "Title")]
    pub title: String,
    #[serde(rename = "SubTitle")]
    pub subtitle: String,
    #[serde(rename = "IcoPath")]
    pub icon_path: String,
    #[serde(
        rename = "JsonRPCAction",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub action: Option<RpcCall>,
}

impl ResultEntry {
    /// An entry that does nothing when selected.
    pub fn info(title: impl Into<String>, subtitle: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            subtitle: subtitle.into(),
            icon_path: ICON_PATH.to_string(),
            action: None,
        }
    }

    pub fn with_action(mut self, action: &Action) -> Self {
        self.action = Some(action.to_rpc());
        self
    }

    /// Decoded form of the attached action, if any.
    pub fn decoded_action(&self) -> Option<Action> {
        self.action
            .as_ref()
            .and_then(|call| Action::from_rpc(call).ok())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RpcResponse {
    pub result: Vec<ResultEntry>,
}

impl RpcResponse {
    /// Write the response as a single JSON line.
    pub fn write_to<W: Write>(&self, mut out: W) -> anyhow::Result<()> {
        serde_json::to_writer(&mut out, self)?;
        writeln!(out)?;
        out.flush()?;
        Ok(())
    }
}

/// What the host asked for.
#[derive(Debug, Clone, PartialEq)]
pub enum Request {
    Query(String),
    ContextMenu,
    Action(Action),
}

impl Request {
    pub fn parse(raw: &str) -> anyhow::Result<Self> {
        let call: RpcCall = serde_json::from_str(raw)?;
        Self::from_call(&call)
    }

    pub fn from_call(call: &RpcCall) -> anyhow::Result<Self> {
        match call.method.as_str() {
            QUERY_METHOD => Ok(Request::Query(call.param_str(0).unwrap_or_default())),
            CONTEXT_MENU_METHOD => Ok(Request::ContextMenu),
            _ => Ok(Request::Action(Action::from_rpc(call)?)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn info_entry_omits_action() {
        let value = serde_json::to_value(ResultEntry::info("t", "s")).unwrap();
        assert_eq!(
            value,
            json!({"Title": "t", "SubTitle": "s", "IcoPath": "icon.png"})
        );
    }

    #[test]
    fn entry_uses_host_field_names() {
        let entry = ResultEntry::info("Open AnchorMarks", "Open it").with_action(&Action::OpenUrl {
            url: "http://localhost:3000".into(),
        });
        let value = serde_json::to_value(entry).unwrap();
        assert_eq!(value["JsonRPCAction"]["method"], "open_url");
        assert_eq!(
            value["JsonRPCAction"]["parameters"],
            json!(["http://localhost:3000"])
        );
    }

    #[test]
    fn parses_query_request() {
        let req = Request::parse(r#"{"method":"query","parameters":["rust"]}"#).unwrap();
        assert_eq!(req, Request::Query("rust".into()));
    }

    #[test]
    fn query_without_parameters_is_empty_query() {
        let req = Request::parse(r#"{"method":"query"}"#).unwrap();
        assert_eq!(req, Request::Query(String::new()));
    }

    #[test]
    fn parses_action_request() {
        let req =
            Request::parse(r#"{"method":"open_bookmark","parameters":[12,"https://a.io"]}"#)
                .unwrap();
        assert_eq!(
            req,
            Request::Action(Action::OpenBookmark {
                id: "12".into(),
                url: "https://a.io".into(),
            })
        );
    }

    #[test]
    fn parses_context_menu_request() {
        let req =
            Request::parse(r#"{"method":"context_menu","parameters":[{"Title":"x"}]}"#).unwrap();
        assert_eq!(req, Request::ContextMenu);
    }

    #[test]
    fn empty_response_is_one_json_line() {
        let mut out = Vec::new();
        RpcResponse::default().write_to(&mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "{\"result\":[]}\n");
    }

    #[test]
    fn response_wraps_entries_in_result() {
        let mut out = Vec::new();
        RpcResponse {
            result: vec![ResultEntry::info("No bookmarks found", "Try again")],
        }
        .write_to(&mut out)
        .unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.ends_with('\n'));
        let value: Value = serde_json::from_str(text.trim_end()).unwrap();
        assert_eq!(
            value,
            json!({"result": [{"Title": "No bookmarks found", "SubTitle": "Try again", "IcoPath": "icon.png"}]})
        );
    }

    #[test]
    fn rejects_unknown_method() {
        assert!(Request::parse(r#"{"method":"delete_everything","parameters":[]}"#).is_err());
    }
}
