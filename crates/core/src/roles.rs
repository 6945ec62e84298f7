//! Capabilities and the authorization guard.
//!
//! Role names must match the `roles` claim issued by the identity service.

use std::collections::BTreeSet;
use std::fmt;

use crate::error::CoreError;

pub const ROLE_READER: &str = "Reader";
pub const ROLE_WRITER: &str = "Writer";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Capability {
    Reader,
    Writer,
}

impl Capability {
    /// Map a role claim to a capability. Unknown roles grant nothing.
    pub fn from_role(role: &str) -> Option<Self> {
        if role.eq_ignore_ascii_case(ROLE_READER) {
            Some(Capability::Reader)
        } else if role.eq_ignore_ascii_case(ROLE_WRITER) {
            Some(Capability::Writer)
        } else {
            None
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Capability::Reader => ROLE_READER,
            Capability::Writer => ROLE_WRITER,
        }
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Read operations: either capability suffices.
pub const READ_ACCESS: &[Capability] = &[Capability::Reader, Capability::Writer];

/// Write operations.
pub const WRITE_ACCESS: &[Capability] = &[Capability::Writer];

/// The authenticated caller as seen by the handlers. Never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorizationContext {
    pub subject: String,
    capabilities: BTreeSet<Capability>,
}

impl AuthorizationContext {
    pub fn new(
        subject: impl Into<String>,
        capabilities: impl IntoIterator<Item = Capability>,
    ) -> Self {
        Self {
            subject: subject.into(),
            capabilities: capabilities.into_iter().collect(),
        }
    }

    /// Build from raw role claims, dropping roles that map to no capability.
    pub fn from_roles<S: AsRef<str>>(subject: impl Into<String>, roles: &[S]) -> Self {
        Self::new(
            subject,
            roles.iter().filter_map(|r| Capability::from_role(r.as_ref())),
        )
    }

    pub fn has(&self, capability: Capability) -> bool {
        self.capabilities.contains(&capability)
    }

    pub fn capabilities(&self) -> impl Iterator<Item = Capability> + '_ {
        self.capabilities.iter().copied()
    }
}

/// Allow the request when the caller holds any of `required`.
///
/// Handlers call this first, before validation or any repository access.
pub fn authorize(ctx: &AuthorizationContext, required: &[Capability]) -> Result<(), CoreError> {
    if required.iter().any(|c| ctx.has(*c)) {
        return Ok(());
    }
    let needed = required
        .iter()
        .map(Capability::as_str)
        .collect::<Vec<_>>()
        .join(" or ");
    Err(CoreError::Forbidden(format!("{needed} role required")))
}
