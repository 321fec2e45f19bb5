use std::sync::Arc;

use inmokit_auth::{Authenticator, Directory};

/// Shared service handles injected into handlers.
pub struct AppServices {
    pub authenticator: Arc<Authenticator>,
    pub directory: Arc<dyn Directory>,
}
