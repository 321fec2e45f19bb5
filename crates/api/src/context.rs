use inmokit_auth::{IdentityClaim, RequestIdentity};

/// Caller identity for a request, as resolved by the guard pipeline.
///
/// Present in request extensions on every route that passed the guard;
/// `claim()` is `None` only for exempt operations.
#[derive(Debug, Clone)]
pub struct Caller(pub RequestIdentity);

impl Caller {
    pub fn claim(&self) -> Option<&IdentityClaim> {
        self.0.claim()
    }
}
