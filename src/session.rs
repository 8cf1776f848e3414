//! Caller identity passed to every store call

use serde::{Deserialize, Serialize};

use crate::error::{VersioningError, VersioningResult};

/// Who is making a request, and on behalf of which tenant
///
/// Built once per request by the caller and handed down explicitly; the
/// managers pass it through to the stores and never keep it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionContext {
    user_id: String,
    tenant: String,
}

impl SessionContext {
    pub fn new(user_id: impl Into<String>, tenant: impl Into<String>) -> VersioningResult<Self> {
        let user_id = user_id.into();
        let tenant = tenant.into();
        if user_id.trim().is_empty() {
            return Err(VersioningError::Session("user id was not set".to_string()));
        }
        if tenant.trim().is_empty() {
            return Err(VersioningError::Session("tenant was not set".to_string()));
        }
        Ok(Self { user_id, tenant })
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    pub fn tenant(&self) -> &str {
        &self.tenant
    }
}
