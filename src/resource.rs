//! Lifecycle controller for secret ACL entries.
//!
//! Responsibilities:
//! - Translate the declared record into put/get/delete requests.
//! - Pack the composite ID after a successful create and unpack it on read and delete.
//! - Refresh the record from the remote item on read.
//! - Classify a missing remote grant on read as "removed" rather than a failure.
//!
//! There is no update path: every attribute is force-new, so the host replaces
//! the entry instead.

use tracing::instrument;

use crate::api::SecretsApi;
use crate::error::Result;
use crate::identity::{PairId, SECRET_ACL_ID};
use crate::schema::{Schema, secret_acl_schema};
use crate::types::{DeleteAcl, GetAclRequest, PutAcl, ResourceData};

/// Entry points the orchestration host drives for one resource type.
///
/// Implementations hold no state between calls; the host persists
/// [`ResourceData`] and guarantees one in-flight operation per instance.
pub trait Resource {
    fn schema(&self) -> &Schema;

    fn create(&self, d: &mut ResourceData, api: &dyn SecretsApi) -> Result<()>;

    fn read(&self, d: &mut ResourceData, api: &dyn SecretsApi) -> Result<()>;

    fn delete(&self, d: &mut ResourceData, api: &dyn SecretsApi) -> Result<()>;
}

/// Grant of a permission level to a principal on a secret scope.
#[derive(Debug, Clone, Copy)]
pub struct SecretAclResource {
    id: PairId,
}

impl Default for SecretAclResource {
    fn default() -> Self {
        Self { id: SECRET_ACL_ID }
    }
}

impl SecretAclResource {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Restores scope and principal from the ID when one is set.
    fn lookup_key(&self, d: &mut ResourceData) -> Result<()> {
        if d.id().is_empty() {
            return Ok(());
        }
        self.id.unpack_into(d)
    }
}

impl Resource for SecretAclResource {
    fn schema(&self) -> &Schema {
        secret_acl_schema()
    }

    fn create(&self, d: &mut ResourceData, api: &dyn SecretsApi) -> Result<()> {
        let request = PutAcl::from_data(d)?;
        api.put_acl(&request)?;
        self.id.pack_into(d)
    }

    fn read(&self, d: &mut ResourceData, api: &dyn SecretsApi) -> Result<()> {
        self.lookup_key(d)?;
        let request = GetAclRequest::from_data(d)?;
        let item = api.get_acl(&request)?;
        item.write_to(d);
        Ok(())
    }

    fn delete(&self, d: &mut ResourceData, api: &dyn SecretsApi) -> Result<()> {
        self.lookup_key(d)?;
        let request = DeleteAcl::from_data(d)?;
        api.delete_acl(&request)
    }
}

/// Host-facing wrapper applying the policies shared by every resource type.
///
/// - create validates against the schema first and re-reads after success;
/// - read turns a missing-resource classification into [`ResourceData::mark_removed`];
/// - delete passes every error through, including a missing resource.
#[derive(Debug, Clone, Default)]
pub struct ManagedResource<R> {
    name: &'static str,
    inner: R,
}

impl<R: Resource> ManagedResource<R> {
    #[must_use]
    pub fn new(name: &'static str, inner: R) -> Self {
        Self { name, inner }
    }

    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }

    #[must_use]
    pub fn schema(&self) -> &Schema {
        self.inner.schema()
    }

    #[instrument(level = "debug", skip_all, fields(resource = self.name))]
    pub fn create(&self, d: &mut ResourceData, api: &dyn SecretsApi) -> Result<()> {
        self.inner.schema().validate(d)?;
        if let Err(err) = self.inner.create(d, api) {
            // Nothing was recorded; the host treats the create as never having happened.
            d.set_id("");
            tracing::warn!(target = "secret_acl::lifecycle", resource = self.name, error = %err, "create failed");
            return Err(err);
        }
        tracing::info!(target = "secret_acl::lifecycle", resource = self.name, id = d.id(), "created");
        match self.inner.read(d, api) {
            Ok(()) => Ok(()),
            // The grant vanished between put and get: report the create as failed.
            Err(err) if err.is_missing() => {
                tracing::warn!(target = "secret_acl::lifecycle", resource = self.name, id = d.id(), error = %err, "created entry missing on read-back");
                d.set_id("");
                Err(err)
            }
            Err(err) => {
                tracing::warn!(target = "secret_acl::lifecycle", resource = self.name, id = d.id(), error = %err, "read after create failed");
                Err(err)
            }
        }
    }

    #[instrument(level = "debug", skip_all, fields(resource = self.name, id = d.id()))]
    pub fn read(&self, d: &mut ResourceData, api: &dyn SecretsApi) -> Result<()> {
        match self.inner.read(d, api) {
            Ok(()) => Ok(()),
            Err(err) if err.is_missing() => {
                tracing::info!(
                    target = "secret_acl::lifecycle",
                    resource = self.name,
                    id = d.id(),
                    "removed on backend"
                );
                d.mark_removed();
                Ok(())
            }
            Err(err) => {
                tracing::warn!(target = "secret_acl::lifecycle", resource = self.name, id = d.id(), error = %err, "read failed");
                Err(err)
            }
        }
    }

    #[instrument(level = "debug", skip_all, fields(resource = self.name, id = d.id()))]
    pub fn delete(&self, d: &mut ResourceData, api: &dyn SecretsApi) -> Result<()> {
        self.inner.delete(d, api).inspect_err(|err| {
            tracing::warn!(target = "secret_acl::lifecycle", resource = self.name, id = d.id(), error = %err, "delete failed");
        })?;
        tracing::info!(target = "secret_acl::lifecycle", resource = self.name, id = d.id(), "deleted");
        Ok(())
    }
}

/// The secret ACL resource as the host registers it.
#[must_use]
pub fn secret_acl() -> ManagedResource<SecretAclResource> {
    ManagedResource::new("secret_acl", SecretAclResource::new())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{AclError, ApiError};
    use crate::testing::{Fixture, FixtureApi, RecordedCall};
    use crate::types::AclItem;

    fn declared(scope: &str) -> ResourceData {
        ResourceData::from_attributes([
            ("scope", scope),
            ("principal", "something"),
            ("permission", "MANAGE"),
        ])
    }

    #[test]
    fn bare_create_does_not_read_back() {
        let api = FixtureApi::new(vec![Fixture::put()]);
        let mut d = declared("global");
        SecretAclResource::new().create(&mut d, &api).unwrap();
        assert_eq!(d.id(), "global|||something");
        api.assert_exhausted();
    }

    #[test]
    fn invalid_scope_never_reaches_the_api() {
        let api = FixtureApi::new(Vec::new());
        let mut d = declared("no spaces allowed");
        let err = secret_acl().create(&mut d, &api).unwrap_err();
        assert!(matches!(err, AclError::Validation { .. }));
        assert!(api.calls().is_empty());
        assert_eq!(d.id(), "");
    }

    #[test]
    fn read_with_only_an_id_recovers_the_lookup_key() {
        let api = FixtureApi::new(vec![Fixture::get(AclItem::new("something", "READ"))]);
        let mut d = ResourceData::with_id("myapplication/branch|||something");
        secret_acl().read(&mut d, &api).unwrap();
        assert_eq!(
            api.calls(),
            vec![RecordedCall::Get(GetAclRequest {
                scope: "myapplication/branch".into(),
                principal: "something".into(),
            })]
        );
        assert_eq!(d.get("scope"), Some("myapplication/branch"));
        assert_eq!(d.get("permission"), Some("READ"));
    }

    #[test]
    fn malformed_id_fails_before_any_call() {
        let api = FixtureApi::new(Vec::new());
        let mut d = ResourceData::with_id("global");
        let err = secret_acl().read(&mut d, &api).unwrap_err();
        assert!(matches!(err, AclError::MalformedId { .. }));
        assert!(api.calls().is_empty());
        assert_eq!(d.id(), "global");
    }

    #[test]
    fn missing_grant_on_delete_is_still_an_error() {
        let api = FixtureApi::new(vec![
            Fixture::delete().failing(ApiError::new("RESOURCE_DOES_NOT_EXIST", "Item not found")),
        ]);
        let mut d = declared("global");
        d.set_id("global|||something");
        let err = secret_acl().delete(&mut d, &api).unwrap_err();
        assert!(err.is_missing());
        assert!(!d.is_removed());
        assert_eq!(d.id(), "global|||something");
    }

    #[test]
    fn read_after_create_failure_keeps_the_id() {
        let api = FixtureApi::new(vec![
            Fixture::put(),
            Fixture::get_failing(ApiError::new("INVALID_REQUEST", "lookup broke")),
        ]);
        let mut d = declared("global");
        let err = secret_acl().create(&mut d, &api).unwrap_err();
        assert_eq!(err.to_string(), "lookup broke");
        assert_eq!(d.id(), "global|||something");
    }

    #[test]
    fn grant_missing_on_read_back_fails_the_create() {
        let api = FixtureApi::new(vec![
            Fixture::put(),
            Fixture::get_failing(ApiError::new("NOT_FOUND", "Item not found")),
        ]);
        let mut d = declared("global");
        let err = secret_acl().create(&mut d, &api).unwrap_err();
        assert!(err.is_missing());
        assert_eq!(d.id(), "");
        assert!(!d.is_removed());
        api.assert_exhausted();
    }
}
