// src/state.rs
use std::sync::Arc;

use crate::services::generator::ReplyGenerator;
use crate::services::router::MessageRouter;

pub type SharedState = Arc<AppState>;

pub struct AppState {
    pub router: MessageRouter,
}

impl AppState {
    pub fn new(generator: Arc<dyn ReplyGenerator>) -> Self {
        Self {
            router: MessageRouter::new(generator),
        }
    }
}
