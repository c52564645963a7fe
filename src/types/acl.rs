//! Secret ACL record and the wire shapes of the remote ACL endpoints.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::constants::{PERMISSION_ATTR, PRINCIPAL_ATTR, SCOPE_ATTR};
use crate::error::{AclError, Result};
use crate::types::ResourceData;

/// Permission level a principal can hold on a secret scope.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Eq, PartialEq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AclPermission {
    Read,
    Write,
    Manage,
}

impl AclPermission {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Read => "READ",
            Self::Write => "WRITE",
            Self::Manage => "MANAGE",
        }
    }
}

impl fmt::Display for AclPermission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AclPermission {
    type Err = AclError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "READ" => Ok(Self::Read),
            "WRITE" => Ok(Self::Write),
            "MANAGE" => Ok(Self::Manage),
            other => Err(AclError::Validation {
                field: PERMISSION_ATTR.to_string(),
                reason: format!("unknown permission level '{other}'"),
            }),
        }
    }
}

/// Declared grant of `permission` to `principal` on `scope`.
///
/// Every field is force-new: a change destroys and recreates the entry.
/// `permission` is kept as the raw string because the remote service is the
/// source of truth for what levels exist.
#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq, Default)]
pub struct SecretAcl {
    pub scope: String,
    pub principal: String,
    pub permission: String,
}

impl SecretAcl {
    #[must_use]
    pub fn new(
        scope: impl Into<String>,
        principal: impl Into<String>,
        permission: AclPermission,
    ) -> Self {
        Self {
            scope: scope.into(),
            principal: principal.into(),
            permission: permission.as_str().to_string(),
        }
    }

    /// Parsed permission level, `None` when the value is not a known level.
    #[must_use]
    pub fn permission_level(&self) -> Option<AclPermission> {
        self.permission.parse().ok()
    }

    pub fn from_data(d: &ResourceData) -> Result<Self> {
        Ok(Self {
            scope: d.require(SCOPE_ATTR)?.to_string(),
            principal: d.require(PRINCIPAL_ATTR)?.to_string(),
            permission: d.require(PERMISSION_ATTR)?.to_string(),
        })
    }

    pub fn write_to(&self, d: &mut ResourceData) {
        d.set(SCOPE_ATTR, &self.scope);
        d.set(PRINCIPAL_ATTR, &self.principal);
        d.set(PERMISSION_ATTR, &self.permission);
    }
}

/// Body of `POST /secrets/acls/put`.
#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq)]
pub struct PutAcl {
    pub scope: String,
    pub principal: String,
    pub permission: String,
}

impl PutAcl {
    pub fn from_data(d: &ResourceData) -> Result<Self> {
        let acl = SecretAcl::from_data(d)?;
        Ok(Self {
            scope: acl.scope,
            principal: acl.principal,
            permission: acl.permission,
        })
    }
}

/// Query of `GET /secrets/acls/get`.
#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq)]
pub struct GetAclRequest {
    pub scope: String,
    pub principal: String,
}

impl GetAclRequest {
    pub fn from_data(d: &ResourceData) -> Result<Self> {
        Ok(Self {
            scope: d.require(SCOPE_ATTR)?.to_string(),
            principal: d.require(PRINCIPAL_ATTR)?.to_string(),
        })
    }
}

/// Body of `POST /secrets/acls/delete`. Carries no permission.
#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq)]
pub struct DeleteAcl {
    pub scope: String,
    pub principal: String,
}

impl DeleteAcl {
    pub fn from_data(d: &ResourceData) -> Result<Self> {
        Ok(Self {
            scope: d.require(SCOPE_ATTR)?.to_string(),
            principal: d.require(PRINCIPAL_ATTR)?.to_string(),
        })
    }
}

/// Observed grant returned by the remote lookup. The scope is not echoed.
#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq, Default)]
pub struct AclItem {
    pub principal: String,
    pub permission: String,
}

impl AclItem {
    #[must_use]
    pub fn new(principal: impl Into<String>, permission: impl Into<String>) -> Self {
        Self {
            principal: principal.into(),
            permission: permission.into(),
        }
    }

    /// Overwrites the observed fields of `d`; `scope` is left as it was.
    pub fn write_to(&self, d: &mut ResourceData) {
        d.set(PRINCIPAL_ATTR, &self.principal);
        d.set(PERMISSION_ATTR, &self.permission);
    }
}

/// Error payload returned by the service on non-2xx responses.
#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq, Default)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub error_code: String,
    #[serde(default)]
    pub message: String,
}
