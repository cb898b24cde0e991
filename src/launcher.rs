use crate::actions::Action;
use crate::api::BookmarkApi;
use crate::settings::{ConfigStore, Settings};

/// Hands a URL to whatever should display it.
pub type UrlOpener = fn(&str) -> anyhow::Result<()>;

pub fn open_in_browser(url: &str) -> anyhow::Result<()> {
    open::that(url).map_err(|e| e.into())
}

/// Runs the action behind a selected result.
pub struct Launcher<'a, A: BookmarkApi + ?Sized> {
    api: &'a A,
    store: &'a ConfigStore,
    open_url: UrlOpener,
}

impl<'a, A: BookmarkApi + ?Sized> Launcher<'a, A> {
    pub fn new(api: &'a A, store: &'a ConfigStore) -> Self {
        Self {
            api,
            store,
            open_url: open_in_browser,
        }
    }

    pub fn with_opener(mut self, open_url: UrlOpener) -> Self {
        self.open_url = open_url;
        self
    }

    /// Execute `action`. Click tracking and bookmark creation are best-effort
    /// and never fail the call; opening a URL and saving the configuration do.
    pub fn launch_action(&self, action: &Action, settings: &mut Settings) -> anyhow::Result<()> {
        tracing::debug!(method = action.method(), "launching action");
        match action {
            Action::OpenUrl { url } => (self.open_url)(url),
            Action::OpenBookmark { id, url } => {
                self.track_click(settings, id);
                (self.open_url)(url)
            }
            Action::AddBookmark { url } => {
                match self.api.add_bookmark(settings, url) {
                    Ok(created) => tracing::info!("added bookmark {}", created.id()),
                    Err(e) => tracing::warn!("could not add bookmark {url}: {e}"),
                }
                Ok(())
            }
            Action::Configure {
                server_url,
                api_key,
            } => {
                *settings = self.store.save(server_url, api_key)?;
                Ok(())
            }
        }
    }

    fn track_click(&self, settings: &Settings, id: &str) {
        if id.is_empty() || !settings.is_configured() {
            return;
        }
        if let Err(e) = self.api.track_click(settings, id) {
            tracing::debug!("click tracking for {id} failed: {e}");
        }
    }
}
