//! Constants used throughout palisade.
//!
//! Centralizes magic strings and configuration values.

/// Data directory relative to HOME (~/.palisade).
pub const DATA_DIR: &str = ".palisade";

/// Environment variable overriding the data directory location.
pub const DATA_DIR_ENV: &str = "PALISADE_DIR";

/// Settings file name inside the data directory.
pub const SETTINGS_FILE: &str = "config.toml";

/// Encrypted credential file name.
pub const CREDENTIALS_FILE: &str = "credentials.enc";

/// Key-derivation salt file name.
pub const SALT_FILE: &str = "salt.bin";

/// Quota state file name.
pub const QUOTA_FILE: &str = "quota.json";

/// Lock file guarding quota read-modify-write cycles.
pub const QUOTA_LOCK_FILE: &str = "quota.lock";

/// Current on-disk credential record version.
pub const VAULT_FORMAT_VERSION: u32 = 2;

/// Salt length in bytes (256 bits).
pub const SALT_LEN: usize = 32;

/// PBKDF2-HMAC-SHA256 iteration count for the vault key.
///
/// Deliberately slow (hundreds of milliseconds) as a brute-force deterrent;
/// the cost is paid once per encrypt or decrypt call.
pub const PBKDF2_ITERATIONS: u32 = 600_000;

/// Default daily instance-creation limit.
pub const DEFAULT_MAX_INSTANCES_PER_DAY: u32 = 10;

/// Default daily storage-provisioning limit in GB.
pub const DEFAULT_MAX_STORAGE_GB_PER_DAY: u64 = 1000;

/// Default single-disk size ceiling in GB.
pub const DEFAULT_MAX_DISK_SIZE_GB: u64 = 500;

/// Maximum number of tags/labels per resource.
pub const MAX_TAGS: usize = 50;

/// Maximum tag key length.
pub const MAX_TAG_KEY_LEN: usize = 128;

/// Maximum tag value length.
pub const MAX_TAG_VALUE_LEN: usize = 256;

/// Maximum resource name length accepted by AWS.
pub const AWS_MAX_NAME_LEN: usize = 255;

/// Maximum resource name length accepted by GCP.
pub const GCP_MAX_NAME_LEN: usize = 63;
