//! Packs two attributes into one opaque resource ID and back.
//!
//! The ID is `<left><separator><right>` with no escaping. Unpacking splits on
//! the first separator, so it is lossless whenever the left value cannot
//! contain the separator. The scope naming rule guarantees that; the principal
//! may contain anything.

use crate::constants::{ID_SEPARATOR, PRINCIPAL_ATTR, SCOPE_ATTR};
use crate::error::{AclError, Result};
use crate::types::ResourceData;

/// Composite identifier over a pair of attributes joined by a separator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PairId {
    pub left_attr: &'static str,
    pub right_attr: &'static str,
    pub separator: &'static str,
}

/// `<scope>|||<principal>`
pub const SECRET_ACL_ID: PairId = PairId::new(SCOPE_ATTR, PRINCIPAL_ATTR, ID_SEPARATOR);

impl PairId {
    #[must_use]
    pub const fn new(
        left_attr: &'static str,
        right_attr: &'static str,
        separator: &'static str,
    ) -> Self {
        Self {
            left_attr,
            right_attr,
            separator,
        }
    }

    #[must_use]
    pub fn pack(&self, left: &str, right: &str) -> String {
        let mut id = String::with_capacity(left.len() + self.separator.len() + right.len());
        id.push_str(left);
        id.push_str(self.separator);
        id.push_str(right);
        id
    }

    /// Splits `id` on its first separator; later occurrences stay in the right half.
    ///
    /// Rejects IDs without a separator or with an empty half.
    pub fn unpack<'a>(&self, id: &'a str) -> Result<(&'a str, &'a str)> {
        let malformed = |reason: &str| AclError::MalformedId {
            id: id.to_string(),
            reason: reason.to_string(),
        };
        let (left, right) = id
            .split_once(self.separator)
            .ok_or_else(|| malformed("separator not found"))?;
        if left.is_empty() || right.is_empty() {
            return Err(malformed("empty component"));
        }
        Ok((left, right))
    }

    /// Sets the identifier of `d` from its two attributes.
    pub fn pack_into(&self, d: &mut ResourceData) -> Result<()> {
        let id = self.pack(d.require(self.left_attr)?, d.require(self.right_attr)?);
        d.set_id(id);
        Ok(())
    }

    /// Restores the two attributes of `d` from its identifier.
    pub fn unpack_into(&self, d: &mut ResourceData) -> Result<()> {
        let (left, right) = self.unpack(d.id())?;
        let (left, right) = (left.to_string(), right.to_string());
        d.set(self.left_attr, left);
        d.set(self.right_attr, right);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn packs_with_triple_pipe() {
        assert_eq!(SECRET_ACL_ID.pack("global", "something"), "global|||something");
        assert_eq!(
            SECRET_ACL_ID.pack("myapplication/branch", "something"),
            "myapplication/branch|||something"
        );
    }

    #[test]
    fn unpack_is_not_confused_by_slashes_or_single_pipes() {
        assert_eq!(
            SECRET_ACL_ID.unpack("myapplication/branch|||users/a|b").unwrap(),
            ("myapplication/branch", "users/a|b")
        );
    }

    #[test]
    fn random_pairs_round_trip() {
        const ALPHABET: &[u8] = b"abcXYZ019._-@/| ";
        let mut rng = fastrand::Rng::with_seed(0x5ec2_e7ac);
        for _ in 0..500 {
            let mut word = |max: usize| -> String {
                let len = rng.usize(1..=max);
                (0..len)
                    .map(|_| ALPHABET[rng.usize(..ALPHABET.len())] as char)
                    .collect()
            };
            let scope = word(24);
            let principal = word(24);
            // Valid scopes never contain a pipe; principals are unrestricted.
            if scope.contains('|') {
                continue;
            }
            let id = SECRET_ACL_ID.pack(&scope, &principal);
            assert_eq!(
                SECRET_ACL_ID.unpack(&id).unwrap(),
                (scope.as_str(), principal.as_str())
            );
        }
    }

    #[test]
    fn rejects_ids_not_produced_by_pack() {
        for id in ["", "global", "global||something", "|||something", "global|||"] {
            let err = SECRET_ACL_ID.unpack(id).unwrap_err();
            assert!(matches!(err, AclError::MalformedId { .. }), "{id}: {err}");
        }
    }

    #[test]
    fn separator_inside_principal_stays_with_principal() {
        let id = SECRET_ACL_ID.pack("global", "a|||b");
        assert_eq!(id, "global|||a|||b");
        assert_eq!(SECRET_ACL_ID.unpack(&id).unwrap(), ("global", "a|||b"));
        assert_eq!(SECRET_ACL_ID.unpack("global||||x").unwrap(), ("global", "|x"));
    }

    #[test]
    fn pack_into_and_unpack_into_use_attributes() {
        let mut d = ResourceData::from_attributes([("scope", "global"), ("principal", "something")]);
        SECRET_ACL_ID.pack_into(&mut d).unwrap();
        assert_eq!(d.id(), "global|||something");

        let mut bare = ResourceData::with_id(d.id());
        SECRET_ACL_ID.unpack_into(&mut bare).unwrap();
        assert_eq!(bare.get("scope"), Some("global"));
        assert_eq!(bare.get("principal"), Some("something"));
    }

    #[test]
    fn pack_into_requires_both_attributes() {
        let mut d = ResourceData::from_attributes([("scope", "global")]);
        assert!(matches!(
            SECRET_ACL_ID.pack_into(&mut d),
            Err(AclError::MissingAttribute { .. })
        ));
        assert_eq!(d.id(), "");
    }
}
