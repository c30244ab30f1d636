use crate::store::EntryStore;
use std::sync::Arc;
use tokio::sync::Mutex;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<Mutex<EntryStore>>,
}

impl AppState {
    pub fn new(store: EntryStore) -> Self {
        Self {
            store: Arc::new(Mutex::new(store)),
        }
    }
}
