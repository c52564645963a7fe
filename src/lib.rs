#![deny(clippy::all, clippy::pedantic)]
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![cfg_attr(test, allow(clippy::uninlined_format_args))]
#![allow(clippy::module_name_repetitions)]
//
// Documentation lints: internal helpers are self-describing; the public
// controller surface is documented where behaviour is not obvious.
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]
//
// Builders and request constructors take owned values on purpose.
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::return_self_not_must_use)]

//! Lifecycle controller for secret scope ACL entries.
//!
//! An ACL entry grants one principal a permission level on one secret scope.
//! [`ManagedResource`] drives the entry through create, read, and delete
//! against a [`SecretsApi`], keeping a `<scope>|||<principal>` identifier as
//! the entry's stable handle.
//!
//! ```
//! use secret_acl_core::testing::{Fixture, FixtureApi};
//! use secret_acl_core::{AclItem, AclPermission, ResourceData, SecretAcl, secret_acl};
//!
//! let api = FixtureApi::new(vec![
//!     Fixture::put(),
//!     Fixture::get(AclItem::new("data-team", "READ")),
//! ]);
//! let mut d = ResourceData::new();
//! SecretAcl::new("analytics", "data-team", AclPermission::Read).write_to(&mut d);
//!
//! secret_acl().create(&mut d, &api).unwrap();
//! assert_eq!(d.id(), "analytics|||data-team");
//! ```

/// The secret-acl-core crate version (matches `Cargo.toml`).
pub const SECRET_ACL_CORE_VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod api;
pub mod config;
pub mod constants;
pub mod error;
pub mod identity;
pub mod resource;
pub mod schema;
pub mod testing;
pub mod types;

pub use api::SecretsApi;
#[cfg(feature = "http")]
pub use api::WorkspaceClient;
pub use config::ClientConfig;
pub use constants::*;
pub use error::{AclError, ApiError, Result};
pub use identity::{PairId, SECRET_ACL_ID};
pub use resource::{ManagedResource, Resource, SecretAclResource, secret_acl};
pub use schema::{FieldDescriptor, Schema, secret_acl_schema, valid_scope};
pub use types::{
    AclItem, AclPermission, ApiErrorBody, DeleteAcl, GetAclRequest, PutAcl, ResourceData,
    SecretAcl,
};
