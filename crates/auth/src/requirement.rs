//! Per-operation access requirement declarations.
//!
//! A requirement is an any-of set of tokens. Tokens are normalized to a
//! tagged union at declaration time, so the decision engine never guesses a
//! token's kind at runtime. Role *names* are the canonical addressing scheme
//! for declarations in this codebase; numeric role-id tokens remain
//! supported for call sites migrating from the older id-based scheme.

use std::borrow::Cow;

use serde::{Deserialize, Serialize};

use inmokit_core::RoleId;

/// A single declared token, sufficient on its own to authorize an operation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum RequirementToken {
    /// Satisfied by an exact role-name match.
    Role(Cow<'static, str>),

    /// Satisfied by any held permission with this name, regardless of role.
    Permission(Cow<'static, str>),

    /// Satisfied by an exact role-id match.
    RoleId(RoleId),
}

impl RequirementToken {
    pub fn role(name: impl Into<Cow<'static, str>>) -> Self {
        Self::Role(name.into())
    }

    pub fn permission(name: impl Into<Cow<'static, str>>) -> Self {
        Self::Permission(name.into())
    }

    pub fn role_id(id: RoleId) -> Self {
        Self::RoleId(id)
    }
}

/// The requirement declared on one operation.
///
/// Empty means "any authenticated caller"; a nonempty set allows when *any*
/// token matches. `{Role("Admin"), Permission("CREATE_PROJECT")}` reads as
/// "the Admin role, or anyone holding CREATE_PROJECT".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessRequirement(Vec<RequirementToken>);

impl AccessRequirement {
    /// No requirement: any authenticated (or exempt) caller is allowed.
    pub fn none() -> Self {
        Self(Vec::new())
    }

    pub fn any_of(tokens: impl IntoIterator<Item = RequirementToken>) -> Self {
        Self(tokens.into_iter().collect())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn tokens(&self) -> &[RequirementToken] {
        &self.0
    }
}

impl FromIterator<RequirementToken> for AccessRequirement {
    fn from_iter<I: IntoIterator<Item = RequirementToken>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
