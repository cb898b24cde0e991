pub mod actions;
pub mod api;
pub mod bookmark;
pub mod launcher;
pub mod logging;
pub mod query;
pub mod rpc;
pub mod search;
pub mod settings;
