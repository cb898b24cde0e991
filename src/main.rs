//! Flow Launcher entry point. The host runs the binary once per request with
//! the JSON-RPC call as the first argument and reads the reply from stdout.

use anchormarks_flow::api::ApiClient;
use anchormarks_flow::launcher::Launcher;
use anchormarks_flow::logging;
use anchormarks_flow::rpc::{Request, ResultEntry, RpcResponse};
use anchormarks_flow::search::search;
use anchormarks_flow::settings::{ConfigStore, LOG_FILE};
use anyhow::Context;
use std::io::Read;

fn main() -> anyhow::Result<()> {
    let store = ConfigStore::locate();
    let mut settings = store.load();
    let log_file = settings
        .debug_logging
        .then(|| store.dir().join(LOG_FILE));
    logging::init(settings.debug_logging, log_file.as_deref());

    let raw = read_request()?;
    // The raw request may carry an API key, so it is not echoed back.
    let request = Request::parse(&raw).context("invalid JSON-RPC request")?;
    tracing::debug!(?request, config = %store.path().display(), "handling request");

    let api = ApiClient::new()?;
    match request {
        Request::Query(query) => respond(search(&api, &settings, &query)),
        Request::ContextMenu => respond(Vec::new()),
        Request::Action(action) => {
            let result = Launcher::new(&api, &store).launch_action(&action, &mut settings);
            if let Err(e) = &result {
                tracing::error!("{} failed: {e:#}", action.method());
            }
            result
        }
    }
}

/// The request normally arrives as the first argument; fall back to stdin.
fn read_request() -> anyhow::Result<String> {
    if let Some(arg) = std::env::args().nth(1) {
        return Ok(arg);
    }
    let mut buf = String::new();
    std::io::stdin()
        .read_to_string(&mut buf)
        .context("failed to read request from stdin")?;
    Ok(buf)
}

fn respond(result: Vec<ResultEntry>) -> anyhow::Result<()> {
    RpcResponse { result }.write_to(std::io::stdout().lock())
}
