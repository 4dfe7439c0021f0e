//! Type aliases and shared domain types.

use std::collections::BTreeMap;

/// The decrypted contents of the credential vault.
///
/// Maps a provider name (`"aws"`, `"gcp"`) to that provider's credential
/// fields, e.g. `access_key_id`, `secret_access_key`, `region`.
pub type SecretMap = BTreeMap<String, BTreeMap<String, String>>;

/// A supported cloud provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provider {
    Aws,
    Gcp,
}

impl Provider {
    pub fn as_str(&self) -> &'static str {
        match self {
            Provider::Aws => "aws",
            Provider::Gcp => "gcp",
        }
    }
}

impl std::fmt::Display for Provider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
