use std::sync::Arc;
use crate::server::database::store::OrderStore;
use crate::server::menu::upstream::MenuClient;

/// Handles shared by every worker, built once at startup
pub(crate) struct AppState {
    store: Arc<dyn OrderStore>,
    menu_client: MenuClient,
}

impl AppState {
    pub fn new(store: Arc<dyn OrderStore>, menu_client: MenuClient) -> Self {
        Self {
            store,
            menu_client,
        }
    }

    pub fn store(&self) -> &dyn OrderStore {
        self.store.as_ref()
    }

    pub fn menu_client(&self) -> &MenuClient {
        &self.menu_client
    }
}
