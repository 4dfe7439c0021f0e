//! Validators for AWS resource parameters.

use once_cell::sync::Lazy;
use regex::Regex;

use super::require_nonempty;
use crate::core::catalog;
use crate::error::{Result, ValidationError};

static AMI_ID: Lazy<Regex> = Lazy::new(|| Regex::new(r"^ami-[0-9a-f]{8,17}$").unwrap());
static INSTANCE_ID: Lazy<Regex> = Lazy::new(|| Regex::new(r"^i-[0-9a-f]{8,17}$").unwrap());
static VOLUME_ID: Lazy<Regex> = Lazy::new(|| Regex::new(r"^vol-[0-9a-f]{8,17}$").unwrap());
static SECURITY_GROUP_ID: Lazy<Regex> = Lazy::new(|| Regex::new(r"^sg-[0-9a-f]{8,17}$").unwrap());

static BUCKET_NAME: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[a-z0-9][a-z0-9.-]*[a-z0-9]$").unwrap());
static IPV4: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d+\.\d+\.\d+\.\d+$").unwrap());

/// Regions accepted for provisioning. A whitelist rather than a pattern so
/// deprecated or nonexistent locations fail closed.
const VALID_REGIONS: &[&str] = &[
    "us-east-1",
    "us-east-2",
    "us-west-1",
    "us-west-2",
    "eu-west-1",
    "eu-west-2",
    "eu-west-3",
    "eu-central-1",
    "ap-southeast-1",
    "ap-southeast-2",
    "ap-northeast-1",
    "ap-northeast-2",
    "ap-south-1",
    "sa-east-1",
    "ca-central-1",
];

fn validate_id(
    value: &str,
    pattern: &Regex,
    kind: &'static str,
    expected: &'static str,
) -> Result<String> {
    let value = require_nonempty(value, kind)?;
    if !pattern.is_match(value) {
        return Err(ValidationError::InvalidResourceId {
            kind,
            value: value.to_string(),
            expected,
        }
        .into());
    }
    Ok(value.to_string())
}

/// Validate an AMI identifier (`ami-` + 8 to 17 lowercase hex digits).
pub fn validate_ami_id(ami_id: &str) -> Result<String> {
    validate_id(ami_id, &AMI_ID, "AMI ID", "ami-XXXXXXXX (8-17 hex digits)")
}

/// Validate an EC2 instance identifier.
pub fn validate_instance_id(instance_id: &str) -> Result<String> {
    validate_id(
        instance_id,
        &INSTANCE_ID,
        "instance ID",
        "i-XXXXXXXX (8-17 hex digits)",
    )
}

/// Validate an EBS volume identifier.
pub fn validate_volume_id(volume_id: &str) -> Result<String> {
    validate_id(
        volume_id,
        &VOLUME_ID,
        "volume ID",
        "vol-XXXXXXXX (8-17 hex digits)",
    )
}

/// Validate a security group identifier.
pub fn validate_security_group_id(group_id: &str) -> Result<String> {
    validate_id(
        group_id,
        &SECURITY_GROUP_ID,
        "security group ID",
        "sg-XXXXXXXX (8-17 hex digits)",
    )
}

/// Validate an instance type against the known catalog.
pub fn validate_instance_type(instance_type: &str) -> Result<String> {
    let value = require_nonempty(instance_type, "instance type")?;
    if !catalog::aws_instance_types().contains_key(value) {
        return Err(ValidationError::UnknownInstanceType {
            provider: "AWS",
            value: value.to_string(),
        }
        .into());
    }
    Ok(value.to_string())
}

/// Validate a region against the whitelist.
pub fn validate_region(region: &str) -> Result<String> {
    let value = require_nonempty(region, "region")?;
    if !VALID_REGIONS.contains(&value) {
        return Err(ValidationError::UnknownLocation {
            provider: "AWS",
            kind: "region",
            value: value.to_string(),
            valid: VALID_REGIONS.join(", "),
        }
        .into());
    }
    Ok(value.to_string())
}

/// Validate an S3 bucket name.
///
/// 3-63 characters, lowercase letters/digits/hyphens/dots, must start and
/// end with a letter or digit, no adjacent special characters, and must
/// not read as a dotted IPv4 address.
pub fn validate_bucket_name(bucket_name: &str) -> Result<String> {
    let value = require_nonempty(bucket_name, "bucket name")?;

    if value.len() < 3 || value.len() > 63 {
        return Err(ValidationError::BucketNameLength(value.to_string()).into());
    }

    if !BUCKET_NAME.is_match(value) {
        return Err(ValidationError::InvalidBucketName {
            value: value.to_string(),
            reason: "Must start/end with a letter or number and contain only lowercase letters, numbers, hyphens, and dots",
        }
        .into());
    }

    if value.contains("..") || value.contains(".-") || value.contains("-.") {
        return Err(ValidationError::InvalidBucketName {
            value: value.to_string(),
            reason: "Cannot contain consecutive special characters",
        }
        .into());
    }

    if IPV4.is_match(value) {
        return Err(ValidationError::InvalidBucketName {
            value: value.to_string(),
            reason: "Cannot be formatted as an IP address",
        }
        .into());
    }

    Ok(value.to_string())
}
