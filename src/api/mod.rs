//! Boundary to the remote secrets ACL endpoints.
//!
//! The controller only depends on [`SecretsApi`]; transport, auth, and retry
//! live behind it.

#[cfg(feature = "http")]
pub mod http;

use crate::error::Result;
use crate::types::{AclItem, DeleteAcl, GetAclRequest, PutAcl};

#[cfg(feature = "http")]
pub use http::WorkspaceClient;

pub trait SecretsApi {
    /// Creates or overwrites one ACL grant.
    fn put_acl(&self, request: &PutAcl) -> Result<()>;

    /// Looks up one ACL grant. A missing grant surfaces as an
    /// [`crate::ApiError`] whose classification reports `is_missing()`.
    fn get_acl(&self, request: &GetAclRequest) -> Result<AclItem>;

    fn delete_acl(&self, request: &DeleteAcl) -> Result<()>;
}

impl<T: SecretsApi + ?Sized> SecretsApi for &T {
    fn put_acl(&self, request: &PutAcl) -> Result<()> {
        (**self).put_acl(request)
    }

    fn get_acl(&self, request: &GetAclRequest) -> Result<AclItem> {
        (**self).get_acl(request)
    }

    fn delete_acl(&self, request: &DeleteAcl) -> Result<()> {
        (**self).delete_acl(request)
    }
}
