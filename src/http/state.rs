//! Shared application state.

use std::sync::Arc;

use crate::config::ConfigDisplay;
use crate::facade::OdooClient;
use crate::render::Pages;

#[derive(Clone)]
pub struct AppState {
    pub client: Arc<OdooClient>,
    pub pages: Arc<Pages>,
    /// Connection info shown on the landing page (password excluded).
    pub display: ConfigDisplay,
}

impl AppState {
    pub fn new(client: Arc<OdooClient>, pages: Arc<Pages>) -> Self {
        let display = client.config().display();
        Self {
            client,
            pages,
            display,
        }
    }
}
