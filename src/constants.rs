//! Fixed names, paths, and rules shared across the crate.

/// Separator between scope and principal in a packed resource ID.
pub const ID_SEPARATOR: &str = "|||";

pub const SCOPE_ATTR: &str = "scope";
pub const PRINCIPAL_ATTR: &str = "principal";
pub const PERMISSION_ATTR: &str = "permission";

pub const PUT_ACL_PATH: &str = "/api/2.0/secrets/acls/put";
pub const GET_ACL_PATH: &str = "/api/2.0/secrets/acls/get";
pub const DELETE_ACL_PATH: &str = "/api/2.0/secrets/acls/delete";

/// Secret scope naming rule enforced by the remote service. ASCII only.
pub const SCOPE_NAME_PATTERN: &str = r"^[A-Za-z0-9_.@/-]{1,128}$";
pub const SCOPE_NAME_RULE: &str = "Must consist of alphanumeric characters, dashes, underscores, and periods, and may not exceed 128 characters.";

/// Error classifications meaning the addressed resource does not exist.
pub const MISSING_ERROR_CODES: &[&str] = &["NOT_FOUND", "RESOURCE_DOES_NOT_EXIST"];

pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 60;

pub const HOST_ENV: &str = "DATABRICKS_HOST";
pub const TOKEN_ENV: &str = "DATABRICKS_TOKEN";
pub const TIMEOUT_ENV: &str = "DATABRICKS_HTTP_TIMEOUT_SECONDS";
