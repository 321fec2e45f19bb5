//! Public-route exemption registry.
//!
//! Exemptions are declared statically, before any request is served, and are
//! evaluated ahead of authentication: an exempt operation bypasses both the
//! authentication and the access-decision stage unconditionally.
//!
//! Declarations can live at two granularities. Resolution is
//! most-specific-wins, nearest-declaration-first: an operation-scope
//! declaration (either way) overrides a controller-scope one.

use std::collections::HashMap;

/// Static declaration-time marking of which operations bypass
/// authentication entirely.
#[derive(Debug, Default, Clone)]
pub struct ExemptionRegistry {
    operations: HashMap<String, bool>,
    controllers: HashMap<String, bool>,
}

impl ExemptionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare an operation exempt (or explicitly non-exempt, overriding a
    /// controller-scope exemption).
    pub fn mark_operation(&mut self, operation: impl Into<String>, exempt: bool) -> &mut Self {
        self.operations.insert(operation.into(), exempt);
        self
    }

    /// Declare a whole controller exempt (or explicitly non-exempt).
    pub fn mark_controller(&mut self, controller: impl Into<String>, exempt: bool) -> &mut Self {
        self.controllers.insert(controller.into(), exempt);
        self
    }

    /// Resolve whether `operation` (belonging to `controller`) is exempt.
    ///
    /// Undeclared means not exempt; authentication is the default.
    pub fn is_exempt(&self, controller: &str, operation: &str) -> bool {
        if let Some(&exempt) = self.operations.get(operation) {
            return exempt;
        }
        if let Some(&exempt) = self.controllers.get(controller) {
            return exempt;
        }
        false
    }
}
