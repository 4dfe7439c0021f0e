//! Error taxonomy shared by the vault, validators, and quota guard.
//!
//! Every fallible operation in this crate returns exactly one of these
//! kinds. The orchestration layer uses the kind to decide between retrying
//! (connection and provider errors, which only it produces) and failing
//! fast (credential, validation, and quota errors).

use thiserror::Error;

/// Credential storage and decryption failures.
#[derive(Error, Debug)]
pub enum CredentialError {
    #[error("no stored credentials found")]
    NotFound,

    #[error("failed to decrypt credentials: {0}")]
    DecryptionFailed(String),

    #[error("stored credentials are invalid: {0}")]
    InvalidStored(String),
}

/// Input validation failures. Each variant carries enough context to show
/// the user exactly what was rejected and why.
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("{field} cannot be empty")]
    Empty { field: &'static str },

    #[error("invalid {kind} format: {value}. Expected format: {expected}")]
    InvalidResourceId {
        kind: &'static str,
        value: String,
        expected: &'static str,
    },

    #[error("unknown {provider} instance type: {value}")]
    UnknownInstanceType { provider: &'static str, value: String },

    #[error("invalid {provider} {kind}: {value}. Valid values: {valid}")]
    UnknownLocation {
        provider: &'static str,
        kind: &'static str,
        value: String,
        valid: String,
    },

    #[error("bucket name must be between 3 and 63 characters: {0}")]
    BucketNameLength(String),

    #[error("invalid bucket name: {value}. {reason}")]
    InvalidBucketName { value: String, reason: &'static str },

    #[error("project ID must be between 6 and 30 characters: {0}")]
    ProjectIdLength(String),

    #[error("invalid project ID: {0}. Must start with a letter and contain only lowercase letters, numbers, and hyphens")]
    InvalidProjectId(String),

    #[error("instance name must be 63 characters or less: {value} ({len} chars)")]
    InstanceNameTooLong { value: String, len: usize },

    #[error("invalid instance name: {0}. Must start with a lowercase letter and contain only lowercase letters, numbers, and hyphens")]
    InvalidInstanceName(String),

    #[error("disk size must be between {min} and {max} GB: {size}")]
    DiskSizeOutOfRange { size: u64, min: u64, max: u64 },

    #[error("too many tags: {count} (max: {max})")]
    TooManyTags { count: usize, max: usize },

    #[error("tag key too long (max {max} chars): {key}")]
    TagKeyTooLong { key: String, max: usize },

    #[error("tag value too long (max {max} chars): {value}")]
    TagValueTooLong { value: String, max: usize },

    #[error("duplicate tag key: {0}")]
    DuplicateTagKey(String),

    #[error("name contains only invalid characters: {0}")]
    UnsanitizableName(String),
}

/// Quota admission failures and configuration errors.
#[derive(Error, Debug)]
pub enum QuotaError {
    #[error("daily instance limit would be exceeded: {requested} requested, {used}/{limit} used. Limit resets tomorrow")]
    InstanceLimitExceeded { requested: u32, used: u32, limit: u32 },

    #[error("daily storage limit would be exceeded: {}GB / {limit}GB. Limit resets tomorrow", used + requested)]
    StorageLimitExceeded { requested: u64, used: u64, limit: u64 },

    #[error("disk size {size}GB exceeds maximum allowed: {max}GB. For larger disks, adjust quota limits")]
    DiskTooLarge { size: u64, max: u64 },

    #[error("operation would exceed the configured cost threshold: {0}")]
    CostThresholdExceeded(String),

    #[error("invalid cost threshold: {0} (expected small, medium, or large)")]
    InvalidThreshold(String),
}

/// Cloud provider connection failures. Raised by the provider wrapper
/// layer, never by this crate; defined here so the whole system shares one
/// vocabulary.
#[derive(Error, Debug)]
#[error("{provider} connection failed: {message}")]
pub struct ConnectionError {
    pub provider: &'static str,
    pub message: String,
}

/// Cloud provider API failures, carrying the provider's own error code
/// (e.g. `InvalidAMIID.NotFound`) when one was returned.
#[derive(Error, Debug)]
pub struct ProviderError {
    pub provider: &'static str,
    pub message: String,
    pub error_code: Option<String>,
}

impl std::fmt::Display for ProviderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.error_code {
            Some(code) => write!(f, "{} API error [{}]: {}", self.provider, code, self.message),
            None => write!(f, "{} API error: {}", self.provider, self.message),
        }
    }
}

/// Settings-file failures.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read settings: {0}")]
    ReadFile(#[source] std::io::Error),

    #[error("failed to parse settings: {0}")]
    Parse(#[from] toml::de::Error),
}

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Credential(#[from] CredentialError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Quota(#[from] QuotaError),

    #[error(transparent)]
    Connection(#[from] ConnectionError),

    #[error(transparent)]
    Provider(#[from] ProviderError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
