//! Palisade - the local security and governance core of a multi-cloud
//! provisioning tool.
//!
//! # Architecture
//!
//! ```text
//! src/
//! ├── config            # config.toml settings
//! ├── error             # Shared error taxonomy
//! └── core/             # Core library components
//!     ├── vault         # Machine-bound encrypted credential storage
//!     ├── token         # Authenticated token encoding (AES-CBC + HMAC)
//!     ├── keys          # PBKDF2 key derivation (+ legacy scheme)
//!     ├── machine       # user@host machine identity
//!     ├── validate/     # Fail-closed input validation
//!     │   ├── aws       # AMI/instance/volume IDs, regions, buckets
//!     │   ├── gcp       # Project IDs, names, zones, buckets
//!     │   └── common    # Disk sizes, tags, name sanitization
//!     ├── quota         # Daily usage budgets and cost warnings
//!     ├── catalog       # Known instance/machine types
//!     └── store         # Atomic, permission-restricted file writes
//! ```
//!
//! The provisioning orchestration and the provider API wrappers live
//! outside this crate. They are expected to validate every user-supplied
//! field first, ask the quota guard to admit the operation, fetch
//! credentials from the vault, and record usage only after the provider
//! call succeeded. All three components are independent; none performs
//! network I/O.

pub mod config;
pub mod core;
pub mod error;

pub use crate::config::Settings;
pub use crate::core::catalog::{self, Category, InstanceSpec};
pub use crate::core::quota::{QuotaGuard, QuotaLimits, QuotaState, ThresholdTier, UsageSummary};
pub use crate::core::types::{Provider, SecretMap};
pub use crate::core::validate;
pub use crate::core::vault::SecretVault;
pub use crate::error::{Error, Result};
