use std::sync::Arc;

use crate::config::Config;
use crate::db::store::Store;
use crate::session::SessionStore;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn Store>,
    pub sessions: Arc<SessionStore>,
    pub config: Arc<Config>,
}
