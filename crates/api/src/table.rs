//! Static per-operation access declarations.
//!
//! Each exposed operation declares its requirement (or nothing) and,
//! independently, an exemption flag, as plain data the guard middleware
//! consults by matched route. Declaring access here instead of inside
//! handlers keeps the pipeline's evaluation order explicit and auditable.

use axum::http::Method;

use inmokit_auth::{AccessRequirement, ExemptionRegistry, RequirementToken};

/// One operation's declaration.
#[derive(Debug, Clone)]
pub struct OperationSpec {
    /// Stable operation name, `controller.action`.
    pub name: &'static str,
    pub controller: &'static str,
    pub method: Method,
    /// Axum route pattern, e.g. `/users/:id`.
    pub path: &'static str,
    pub access: AccessRequirement,
    /// Operation-scope exemption declaration. `None` defers to the
    /// controller scope; `Some` overrides it either way.
    pub exempt: Option<bool>,
}

/// The full set of declared operations, keyed by method + route pattern.
#[derive(Debug)]
pub struct RouteTable {
    operations: Vec<OperationSpec>,
    exempt_controllers: Vec<(&'static str, bool)>,
}

impl RouteTable {
    pub fn new(operations: Vec<OperationSpec>) -> Self {
        Self {
            operations,
            exempt_controllers: Vec::new(),
        }
    }

    /// Declare a controller-scope exemption (or explicit non-exemption).
    pub fn exempt_controller(mut self, controller: &'static str, exempt: bool) -> Self {
        self.exempt_controllers.push((controller, exempt));
        self
    }

    /// Find the declaration for a matched route.
    ///
    /// Patterns are the registered route strings, which is exactly what
    /// axum's `MatchedPath` reports.
    pub fn lookup(&self, method: &Method, matched_path: &str) -> Option<&OperationSpec> {
        self.operations
            .iter()
            .find(|op| op.method == *method && op.path == matched_path)
    }

    /// Build the exemption registry from the declarations.
    pub fn exemption_registry(&self) -> ExemptionRegistry {
        let mut registry = ExemptionRegistry::new();
        for (controller, exempt) in &self.exempt_controllers {
            registry.mark_controller(*controller, *exempt);
        }
        for op in &self.operations {
            if let Some(exempt) = op.exempt {
                registry.mark_operation(op.name, exempt);
            }
        }
        registry
    }

    /// The declarations served by this API.
    pub fn standard() -> Self {
        let admin = || AccessRequirement::any_of([RequirementToken::role("Admin")]);

        Self::new(vec![
            OperationSpec {
                name: "auth.register",
                controller: "auth",
                method: Method::POST,
                path: "/auth/register",
                access: AccessRequirement::none(),
                exempt: Some(true),
            },
            OperationSpec {
                name: "auth.login",
                controller: "auth",
                method: Method::POST,
                path: "/auth/login",
                access: AccessRequirement::none(),
                exempt: Some(true),
            },
            // Any authenticated caller: empty requirement, not exempt.
            OperationSpec {
                name: "auth.me",
                controller: "auth",
                method: Method::GET,
                path: "/auth/me",
                access: AccessRequirement::none(),
                exempt: None,
            },
            OperationSpec {
                name: "users.list",
                controller: "users",
                method: Method::GET,
                path: "/users",
                access: admin(),
                exempt: None,
            },
            OperationSpec {
                name: "users.get",
                controller: "users",
                method: Method::GET,
                path: "/users/:id",
                access: admin(),
                exempt: None,
            },
            OperationSpec {
                name: "users.update",
                controller: "users",
                method: Method::PATCH,
                path: "/users/:id",
                access: admin(),
                exempt: None,
            },
            OperationSpec {
                name: "roles.list",
                controller: "roles",
                method: Method::GET,
                path: "/roles",
                access: admin(),
                exempt: None,
            },
            OperationSpec {
                name: "roles.create",
                controller: "roles",
                method: Method::POST,
                path: "/roles",
                access: admin(),
                exempt: None,
            },
            OperationSpec {
                name: "roles.get",
                controller: "roles",
                method: Method::GET,
                path: "/roles/:id",
                access: admin(),
                exempt: None,
            },
            OperationSpec {
                name: "roles.set_permissions",
                controller: "roles",
                method: Method::PUT,
                path: "/roles/:id/permissions",
                access: admin(),
                exempt: None,
            },
            OperationSpec {
                name: "permissions.list",
                controller: "permissions",
                method: Method::GET,
                path: "/permissions",
                access: admin(),
                exempt: None,
            },
            OperationSpec {
                name: "permissions.create",
                controller: "permissions",
                method: Method::POST,
                path: "/permissions",
                access: admin(),
                exempt: None,
            },
            OperationSpec {
                name: "system.health",
                controller: "system",
                method: Method::GET,
                path: "/health",
                access: AccessRequirement::none(),
                exempt: None,
            },
        ])
        // Health & co. are reachable with no credentials at all.
        .exempt_controller("system", true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_by_method_and_pattern() {
        let table = RouteTable::standard();
        let spec = table.lookup(&Method::GET, "/users/:id").unwrap();
        assert_eq!(spec.name, "users.get");

        assert!(table.lookup(&Method::DELETE, "/users/:id").is_none());
    }

    #[test]
    fn registry_reflects_both_scopes() {
        let registry = RouteTable::standard().exemption_registry();
        assert!(registry.is_exempt("auth", "auth.login"));
        assert!(!registry.is_exempt("auth", "auth.me"));
        // Controller-scope exemption, no operation-scope declaration.
        assert!(registry.is_exempt("system", "system.health"));
        assert!(!registry.is_exempt("users", "users.list"));
    }
}
