//! Field descriptor table for the secret ACL resource.
//!
//! The table is built once and consulted by the controller before any remote
//! call: required checks, per-field validators, and the force-new flags the
//! host uses to decide between in-place update and replacement.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::constants::{
    PERMISSION_ATTR, PRINCIPAL_ATTR, SCOPE_ATTR, SCOPE_NAME_PATTERN, SCOPE_NAME_RULE,
};
use crate::error::{AclError, Result};
use crate::types::ResourceData;

/// Validator returning a human-readable reason on rejection.
pub type Validator = fn(&str) -> std::result::Result<(), String>;

#[derive(Debug, Clone, Copy)]
pub struct FieldDescriptor {
    pub name: &'static str,
    pub required: bool,
    /// Any change to this field destroys and recreates the resource.
    pub force_new: bool,
    pub validator: Option<Validator>,
}

impl FieldDescriptor {
    #[must_use]
    pub const fn required(name: &'static str) -> Self {
        Self {
            name,
            required: true,
            force_new: false,
            validator: None,
        }
    }

    #[must_use]
    pub const fn force_new(mut self) -> Self {
        self.force_new = true;
        self
    }

    #[must_use]
    pub const fn validate_with(mut self, validator: Validator) -> Self {
        self.validator = Some(validator);
        self
    }
}

#[derive(Debug, Clone)]
pub struct Schema {
    fields: Vec<FieldDescriptor>,
}

impl Schema {
    #[must_use]
    pub fn new(fields: Vec<FieldDescriptor>) -> Self {
        Self { fields }
    }

    #[must_use]
    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    #[must_use]
    pub fn field(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Checks required fields and runs validators, stopping at the first failure.
    pub fn validate(&self, d: &ResourceData) -> Result<()> {
        for field in &self.fields {
            let value = match d.get(field.name) {
                Some(value) if !value.is_empty() => value,
                _ if field.required => {
                    return Err(AclError::MissingAttribute {
                        field: field.name.to_string(),
                    });
                }
                _ => continue,
            };
            if let Some(validator) = field.validator {
                validator(value).map_err(|reason| AclError::Validation {
                    field: field.name.to_string(),
                    reason,
                })?;
            }
        }
        Ok(())
    }

    /// Force-new fields whose value differs between `prior` and `proposed`.
    #[must_use]
    pub fn force_new_changes(&self, prior: &ResourceData, proposed: &ResourceData) -> Vec<&'static str> {
        self.fields
            .iter()
            .filter(|f| f.force_new && prior.get(f.name) != proposed.get(f.name))
            .map(|f| f.name)
            .collect()
    }
}

#[allow(clippy::unwrap_used)]
static SCOPE_NAME_RE: Lazy<Regex> = Lazy::new(|| Regex::new(SCOPE_NAME_PATTERN).unwrap());

/// Secret scope naming rule of the remote service.
pub fn valid_scope(value: &str) -> std::result::Result<(), String> {
    if SCOPE_NAME_RE.is_match(value) {
        Ok(())
    } else {
        Err(SCOPE_NAME_RULE.to_string())
    }
}

static SECRET_ACL_SCHEMA: Lazy<Schema> = Lazy::new(|| {
    Schema::new(vec![
        FieldDescriptor::required(SCOPE_ATTR)
            .force_new()
            .validate_with(valid_scope),
        FieldDescriptor::required(PRINCIPAL_ATTR).force_new(),
        FieldDescriptor::required(PERMISSION_ATTR).force_new(),
    ])
});

/// Schema of the secret ACL resource. Every field forces replacement.
#[must_use]
pub fn secret_acl_schema() -> &'static Schema {
    &SECRET_ACL_SCHEMA
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(scope: &str, principal: &str, permission: &str) -> ResourceData {
        ResourceData::from_attributes([
            (SCOPE_ATTR, scope),
            (PRINCIPAL_ATTR, principal),
            (PERMISSION_ATTR, permission),
        ])
    }

    #[test]
    fn every_field_forces_replacement() {
        let schema = secret_acl_schema();
        assert_eq!(schema.fields().len(), 3);
        assert!(schema.fields().iter().all(|f| f.force_new && f.required));
        assert!(schema.field(SCOPE_ATTR).unwrap().validator.is_some());
        assert!(schema.field(PERMISSION_ATTR).unwrap().validator.is_none());
    }

    #[test]
    fn scope_rule_accepts_path_like_names() {
        for scope in ["global", "myapplication/branch", "team.a@corp", "a-b_c"] {
            assert!(valid_scope(scope).is_ok(), "{scope} should be valid");
        }
        let too_long = "x".repeat(129);
        for scope in ["", "has space", "pipe|||inside", "données", "日本", "ａｂｃ", too_long.as_str()] {
            assert!(valid_scope(scope).is_err(), "{scope} should be rejected");
        }
        assert!(valid_scope(&"x".repeat(128)).is_ok());
    }

    #[test]
    fn validate_reports_scope_rule() {
        let err = secret_acl_schema()
            .validate(&record("bad scope", "something", "MANAGE"))
            .unwrap_err();
        match err {
            AclError::Validation { field, reason } => {
                assert_eq!(field, SCOPE_ATTR);
                assert_eq!(reason, SCOPE_NAME_RULE);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn validate_requires_all_fields() {
        let mut d = record("global", "something", "MANAGE");
        assert!(secret_acl_schema().validate(&d).is_ok());
        d.set(PRINCIPAL_ATTR, "");
        assert!(matches!(
            secret_acl_schema().validate(&d),
            Err(AclError::MissingAttribute { .. })
        ));
    }

    #[test]
    fn permission_change_requires_replacement() {
        let prior = record("global", "something", "READ");
        let proposed = record("global", "something", "MANAGE");
        assert_eq!(
            secret_acl_schema().force_new_changes(&prior, &proposed),
            vec![PERMISSION_ATTR]
        );
        assert!(secret_acl_schema().force_new_changes(&prior, &prior).is_empty());
    }
}
