//! Public types exposed by the `secret-acl-core` crate.

pub mod acl;
pub mod data;

pub use acl::{AclItem, AclPermission, ApiErrorBody, DeleteAcl, GetAclRequest, PutAcl, SecretAcl};
pub use data::ResourceData;
