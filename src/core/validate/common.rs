//! Provider-agnostic validators: disk sizes, tags/labels, and name
//! sanitization.

use std::collections::BTreeMap;

use crate::core::constants::{MAX_TAGS, MAX_TAG_KEY_LEN, MAX_TAG_VALUE_LEN};
use crate::error::{Result, ValidationError};

use super::require_nonempty;

/// Default single-disk ceiling when the caller has no stricter bound.
pub const DEFAULT_MAX_DISK_GB: u64 = 65536;

/// What a disk is attached for; boot disks need a larger floor than data
/// disks because they hold an operating system image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiskKind {
    Boot,
    Data,
}

impl DiskKind {
    /// Minimum size in GB for this kind of disk.
    pub fn min_gb(&self) -> u64 {
        match self {
            DiskKind::Boot => 10,
            DiskKind::Data => 1,
        }
    }
}

/// Validate a disk size in GB against the kind-specific floor and the
/// given ceiling.
pub fn validate_disk_size(size_gb: u64, kind: DiskKind, max_gb: u64) -> Result<u64> {
    let min = kind.min_gb();
    if size_gb < min || size_gb > max_gb {
        return Err(ValidationError::DiskSizeOutOfRange {
            size: size_gb,
            min,
            max: max_gb,
        }
        .into());
    }
    Ok(size_gb)
}

/// Validate resource tags/labels.
///
/// Takes ordered pairs so duplicate keys are detectable, and canonicalizes
/// to a sorted map. At most 50 entries; keys up to 128 characters, values
/// up to 256.
pub fn validate_tags(pairs: &[(String, String)]) -> Result<BTreeMap<String, String>> {
    if pairs.len() > MAX_TAGS {
        return Err(ValidationError::TooManyTags {
            count: pairs.len(),
            max: MAX_TAGS,
        }
        .into());
    }

    let mut tags = BTreeMap::new();
    for (key, value) in pairs {
        let key = require_nonempty(key, "tag key")?;

        if key.len() > MAX_TAG_KEY_LEN {
            return Err(ValidationError::TagKeyTooLong {
                key: key.to_string(),
                max: MAX_TAG_KEY_LEN,
            }
            .into());
        }
        if value.len() > MAX_TAG_VALUE_LEN {
            return Err(ValidationError::TagValueTooLong {
                value: value.clone(),
                max: MAX_TAG_VALUE_LEN,
            }
            .into());
        }
        if tags.insert(key.to_string(), value.clone()).is_some() {
            return Err(ValidationError::DuplicateTagKey(key.to_string()).into());
        }
    }

    Ok(tags)
}

/// Sanitize a resource name.
///
/// Strips every character outside the allow-list (letters, digits,
/// hyphen, underscore), then truncates to `max_len`. Deterministic:
/// allowed characters are never dropped except by truncation.
pub fn sanitize_name(name: &str, max_len: usize) -> Result<String> {
    let name = require_nonempty(name, "name")?;

    let mut sanitized: String = name
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '-' || *c == '_')
        .collect();

    if sanitized.is_empty() {
        return Err(ValidationError::UnsanitizableName(name.to_string()).into());
    }

    sanitized.truncate(max_len);
    Ok(sanitized)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn disk_size_bounds() {
        assert_eq!(validate_disk_size(100, DiskKind::Data, 500).unwrap(), 100);
        assert_eq!(validate_disk_size(1, DiskKind::Data, 500).unwrap(), 1);
        assert_eq!(validate_disk_size(500, DiskKind::Data, 500).unwrap(), 500);

        assert!(validate_disk_size(0, DiskKind::Data, 500).is_err());
        assert!(validate_disk_size(501, DiskKind::Data, 500).is_err());
    }

    #[test]
    fn boot_disks_have_a_higher_floor() {
        assert!(validate_disk_size(8, DiskKind::Boot, 500).is_err());
        assert_eq!(validate_disk_size(10, DiskKind::Boot, 500).unwrap(), 10);
        assert_eq!(validate_disk_size(8, DiskKind::Data, 500).unwrap(), 8);
    }

    fn pairs(n: usize) -> Vec<(String, String)> {
        (0..n).map(|i| (format!("key-{i}"), format!("value-{i}"))).collect()
    }

    #[test]
    fn tag_count_boundary() {
        assert_eq!(validate_tags(&pairs(50)).unwrap().len(), 50);
        assert!(matches!(
            validate_tags(&pairs(51)),
            Err(crate::error::Error::Validation(ValidationError::TooManyTags {
                count: 51,
                max: 50
            }))
        ));
    }

    #[test]
    fn tag_length_bounds() {
        let long_key = vec![("k".repeat(129), "v".to_string())];
        assert!(validate_tags(&long_key).is_err());

        let long_value = vec![("k".to_string(), "v".repeat(257))];
        assert!(validate_tags(&long_value).is_err());

        let at_limit = vec![("k".repeat(128), "v".repeat(256))];
        assert!(validate_tags(&at_limit).is_ok());
    }

    #[test]
    fn duplicate_tag_keys_rejected() {
        let dup = vec![
            ("env".to_string(), "prod".to_string()),
            ("env".to_string(), "dev".to_string()),
        ];
        assert!(matches!(
            validate_tags(&dup),
            Err(crate::error::Error::Validation(ValidationError::DuplicateTagKey(_)))
        ));
    }

    #[test]
    fn empty_tag_key_rejected() {
        let empty = vec![("".to_string(), "v".to_string())];
        assert!(validate_tags(&empty).is_err());
    }

    #[test]
    fn sanitize_strips_and_truncates() {
        assert_eq!(sanitize_name("Web Server #1!", 255).unwrap(), "WebServer1");
        assert_eq!(sanitize_name("db_primary-01", 255).unwrap(), "db_primary-01");
        assert_eq!(sanitize_name("abcdef", 3).unwrap(), "abc");
    }

    #[test]
    fn sanitize_is_deterministic() {
        let a = sanitize_name("Web Server #1!", 63).unwrap();
        let b = sanitize_name("Web Server #1!", 63).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn sanitize_rejects_nothing_left() {
        assert!(sanitize_name("!!!", 255).is_err());
        assert!(sanitize_name("", 255).is_err());
    }
}
