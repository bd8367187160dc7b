use anyhow::anyhow;

use crate::error::{self, AddCode};

/// Shared admin secret. Every privileged call presents the key again; there
/// is no session.
#[derive(Clone)]
pub struct AdminKey(String);

impl AdminKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    // Plain string comparison, see DESIGN.md on timing side channels.
    pub fn matches(&self, provided: Option<&str>) -> bool {
        provided == Some(self.0.as_str())
    }

    pub fn authorize(&self, provided: Option<&str>) -> error::Result<()> {
        if !self.matches(provided) {
            log::warn!("Rejected request with invalid admin key");
            return Err(anyhow!("Unauthorized").code(401));
        }
        Ok(())
    }
}

impl std::fmt::Debug for AdminKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("AdminKey(***)")
    }
}
