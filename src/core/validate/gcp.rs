//! Validators for GCP resource parameters.

use once_cell::sync::Lazy;
use regex::Regex;

use super::require_nonempty;
use crate::core::catalog;
use crate::error::{Result, ValidationError};

/// Shared shape for project IDs and resource names: starts with a
/// lowercase letter, lowercase/digits/hyphens after, no trailing hyphen.
static RESOURCE_NAME: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[a-z]([-a-z0-9]*[a-z0-9])?$").unwrap());

static BUCKET_NAME: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[a-z0-9][a-z0-9._-]*[a-z0-9]$").unwrap());

/// Zones accepted for provisioning, whitelist rather than pattern.
const VALID_ZONES: &[&str] = &[
    "us-central1-a",
    "us-central1-b",
    "us-central1-c",
    "us-central1-f",
    "us-east1-b",
    "us-east1-c",
    "us-east1-d",
    "us-west1-a",
    "us-west1-b",
    "us-west1-c",
    "europe-west1-b",
    "europe-west1-c",
    "europe-west1-d",
    "asia-east1-a",
    "asia-east1-b",
    "asia-east1-c",
    "asia-southeast1-a",
    "asia-southeast1-b",
    "asia-southeast1-c",
];

/// Validate a project ID: 6-30 characters, starting with a letter.
pub fn validate_project_id(project_id: &str) -> Result<String> {
    let value = require_nonempty(project_id, "project ID")?;

    if value.len() < 6 || value.len() > 30 {
        return Err(ValidationError::ProjectIdLength(value.to_string()).into());
    }

    if !RESOURCE_NAME.is_match(value) {
        return Err(ValidationError::InvalidProjectId(value.to_string()).into());
    }

    Ok(value.to_string())
}

/// Validate an instance name: up to 63 characters, starting with a
/// lowercase letter.
pub fn validate_instance_name(name: &str) -> Result<String> {
    let value = require_nonempty(name, "instance name")?;

    if value.len() > 63 {
        return Err(ValidationError::InstanceNameTooLong {
            value: value.to_string(),
            len: value.len(),
        }
        .into());
    }

    if !RESOURCE_NAME.is_match(value) {
        return Err(ValidationError::InvalidInstanceName(value.to_string()).into());
    }

    Ok(value.to_string())
}

/// Validate a machine type against the known catalog.
pub fn validate_machine_type(machine_type: &str) -> Result<String> {
    let value = require_nonempty(machine_type, "machine type")?;
    if !catalog::gcp_machine_types().contains_key(value) {
        return Err(ValidationError::UnknownInstanceType {
            provider: "GCP",
            value: value.to_string(),
        }
        .into());
    }
    Ok(value.to_string())
}

/// Validate a zone against the whitelist.
pub fn validate_zone(zone: &str) -> Result<String> {
    let value = require_nonempty(zone, "zone")?;
    if !VALID_ZONES.contains(&value) {
        return Err(ValidationError::UnknownLocation {
            provider: "GCP",
            kind: "zone",
            value: value.to_string(),
            valid: VALID_ZONES.join(", "),
        }
        .into());
    }
    Ok(value.to_string())
}

/// Validate a Cloud Storage bucket name.
///
/// Similar to the S3 rules but underscores are allowed and Google
/// reserves the `goog` prefix and the `google` substring.
pub fn validate_bucket_name(bucket_name: &str) -> Result<String> {
    let value = require_nonempty(bucket_name, "bucket name")?;

    if value.len() < 3 || value.len() > 63 {
        return Err(ValidationError::BucketNameLength(value.to_string()).into());
    }

    if !BUCKET_NAME.is_match(value) {
        return Err(ValidationError::InvalidBucketName {
            value: value.to_string(),
            reason: "Must start/end with a letter or number and contain only lowercase letters, numbers, dots, hyphens, and underscores",
        }
        .into());
    }

    if value.starts_with("goog") {
        return Err(ValidationError::InvalidBucketName {
            value: value.to_string(),
            reason: "Cannot start with 'goog'",
        }
        .into());
    }

    if value.contains("google") {
        return Err(ValidationError::InvalidBucketName {
            value: value.to_string(),
            reason: "Cannot contain 'google'",
        }
        .into());
    }

    Ok(value.to_string())
}
