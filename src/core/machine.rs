//! Machine identity.
//!
//! The vault key is bound to the invoking account and host rather than a
//! user-supplied passphrase. This is a deliberate single-user,
//! single-machine trust model: a vault copied to another host or read by
//! another account fails authentication and the caller re-prompts for
//! credentials.

use zeroize::Zeroizing;

/// Key material identifying this account on this host.
///
/// Formatted as `<username>@<hostname>`. Falls back to `default@localhost`
/// when the account or host name cannot be resolved, so key derivation
/// never fails outright.
pub fn identity() -> Zeroizing<String> {
    let username = whoami::fallible::username().unwrap_or_else(|_| "default".to_string());
    let hostname = whoami::fallible::hostname().unwrap_or_else(|_| "localhost".to_string());
    Zeroizing::new(format!("{}@{}", username, hostname))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_is_stable_within_a_process() {
        assert_eq!(*identity(), *identity());
    }

    #[test]
    fn identity_has_user_and_host() {
        let id = identity();
        let (user, host) = id.split_once('@').expect("missing separator");
        assert!(!user.is_empty());
        assert!(!host.is_empty());
    }
}
