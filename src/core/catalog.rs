//! Known instance and machine types.
//!
//! Fixed tables of AWS instance types and GCP machine types with the
//! specifications the validators and the quota guard need. Unknown type
//! names fail validation closed instead of being forwarded to a provider
//! API.

use std::collections::BTreeMap;

use once_cell::sync::Lazy;

use crate::core::types::Provider;

/// Broad pricing/workload category of an instance type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    GeneralPurpose,
    ComputeOptimized,
    MemoryOptimized,
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Category::GeneralPurpose => "General Purpose",
            Category::ComputeOptimized => "Compute Optimized",
            Category::MemoryOptimized => "Memory Optimized",
        })
    }
}

/// Hardware shape of a catalog entry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InstanceSpec {
    pub vcpu: u32,
    pub memory_gb: f64,
    pub category: Category,
}

fn spec(vcpu: u32, memory_gb: f64, category: Category) -> InstanceSpec {
    InstanceSpec {
        vcpu,
        memory_gb,
        category,
    }
}

use Category::{ComputeOptimized as C, GeneralPurpose as G, MemoryOptimized as M};

static AWS_INSTANCE_TYPES: Lazy<BTreeMap<&'static str, InstanceSpec>> = Lazy::new(|| {
    [
        // T-series (burstable)
        ("t2.micro", spec(1, 1.0, G)),
        ("t2.small", spec(1, 2.0, G)),
        ("t2.medium", spec(2, 4.0, G)),
        ("t2.large", spec(2, 8.0, G)),
        ("t2.xlarge", spec(4, 16.0, G)),
        ("t2.2xlarge", spec(8, 32.0, G)),
        ("t3.micro", spec(2, 1.0, G)),
        ("t3.small", spec(2, 2.0, G)),
        ("t3.medium", spec(2, 4.0, G)),
        ("t3.large", spec(2, 8.0, G)),
        ("t3.xlarge", spec(4, 16.0, G)),
        ("t3.2xlarge", spec(8, 32.0, G)),
        // M-series (general purpose)
        ("m5.large", spec(2, 8.0, G)),
        ("m5.xlarge", spec(4, 16.0, G)),
        ("m5.2xlarge", spec(8, 32.0, G)),
        ("m5.4xlarge", spec(16, 64.0, G)),
        ("m5.8xlarge", spec(32, 128.0, G)),
        ("m5.12xlarge", spec(48, 192.0, G)),
        ("m5.16xlarge", spec(64, 256.0, G)),
        ("m5.24xlarge", spec(96, 384.0, G)),
        ("m6i.large", spec(2, 8.0, G)),
        ("m6i.xlarge", spec(4, 16.0, G)),
        ("m6i.2xlarge", spec(8, 32.0, G)),
        ("m6i.4xlarge", spec(16, 64.0, G)),
        ("m6i.8xlarge", spec(32, 128.0, G)),
        // C-series (compute optimized)
        ("c5.large", spec(2, 4.0, C)),
        ("c5.xlarge", spec(4, 8.0, C)),
        ("c5.2xlarge", spec(8, 16.0, C)),
        ("c5.4xlarge", spec(16, 32.0, C)),
        ("c5.9xlarge", spec(36, 72.0, C)),
        ("c5.12xlarge", spec(48, 96.0, C)),
        ("c5.18xlarge", spec(72, 144.0, C)),
        ("c5.24xlarge", spec(96, 192.0, C)),
        // R-series (memory optimized)
        ("r5.large", spec(2, 16.0, M)),
        ("r5.xlarge", spec(4, 32.0, M)),
        ("r5.2xlarge", spec(8, 64.0, M)),
        ("r5.4xlarge", spec(16, 128.0, M)),
        ("r5.8xlarge", spec(32, 256.0, M)),
        ("r5.12xlarge", spec(48, 384.0, M)),
        ("r5.16xlarge", spec(64, 512.0, M)),
        ("r5.24xlarge", spec(96, 768.0, M)),
    ]
    .into_iter()
    .collect()
});

static GCP_MACHINE_TYPES: Lazy<BTreeMap<&'static str, InstanceSpec>> = Lazy::new(|| {
    [
        // E2 series (cost-optimized)
        ("e2-micro", spec(2, 1.0, G)),
        ("e2-small", spec(2, 2.0, G)),
        ("e2-medium", spec(2, 4.0, G)),
        ("e2-standard-2", spec(2, 8.0, G)),
        ("e2-standard-4", spec(4, 16.0, G)),
        ("e2-standard-8", spec(8, 32.0, G)),
        ("e2-standard-16", spec(16, 64.0, G)),
        ("e2-standard-32", spec(32, 128.0, G)),
        ("e2-highmem-2", spec(2, 16.0, M)),
        ("e2-highmem-4", spec(4, 32.0, M)),
        ("e2-highmem-8", spec(8, 64.0, M)),
        ("e2-highmem-16", spec(16, 128.0, M)),
        ("e2-highcpu-2", spec(2, 2.0, C)),
        ("e2-highcpu-4", spec(4, 4.0, C)),
        ("e2-highcpu-8", spec(8, 8.0, C)),
        ("e2-highcpu-16", spec(16, 16.0, C)),
        ("e2-highcpu-32", spec(32, 32.0, C)),
        // N1 series (first generation)
        ("n1-standard-1", spec(1, 3.75, G)),
        ("n1-standard-2", spec(2, 7.5, G)),
        ("n1-standard-4", spec(4, 15.0, G)),
        ("n1-standard-8", spec(8, 30.0, G)),
        ("n1-standard-16", spec(16, 60.0, G)),
        ("n1-standard-32", spec(32, 120.0, G)),
        ("n1-standard-64", spec(64, 240.0, G)),
        ("n1-standard-96", spec(96, 360.0, G)),
        ("n1-highmem-2", spec(2, 13.0, M)),
        ("n1-highmem-4", spec(4, 26.0, M)),
        ("n1-highmem-8", spec(8, 52.0, M)),
        ("n1-highmem-16", spec(16, 104.0, M)),
        ("n1-highmem-32", spec(32, 208.0, M)),
        ("n1-highmem-64", spec(64, 416.0, M)),
        ("n1-highmem-96", spec(96, 624.0, M)),
        ("n1-highcpu-2", spec(2, 1.8, C)),
        ("n1-highcpu-4", spec(4, 3.6, C)),
        ("n1-highcpu-8", spec(8, 7.2, C)),
        ("n1-highcpu-16", spec(16, 14.4, C)),
        ("n1-highcpu-32", spec(32, 28.8, C)),
        ("n1-highcpu-64", spec(64, 57.6, C)),
        ("n1-highcpu-96", spec(96, 86.4, C)),
        // N2 series (second generation)
        ("n2-standard-2", spec(2, 8.0, G)),
        ("n2-standard-4", spec(4, 16.0, G)),
        ("n2-standard-8", spec(8, 32.0, G)),
        ("n2-standard-16", spec(16, 64.0, G)),
        ("n2-standard-32", spec(32, 128.0, G)),
        ("n2-standard-48", spec(48, 192.0, G)),
        ("n2-standard-64", spec(64, 256.0, G)),
        ("n2-standard-80", spec(80, 320.0, G)),
        ("n2-highmem-2", spec(2, 16.0, M)),
        ("n2-highmem-4", spec(4, 32.0, M)),
        ("n2-highmem-8", spec(8, 64.0, M)),
        ("n2-highmem-16", spec(16, 128.0, M)),
        ("n2-highmem-32", spec(32, 256.0, M)),
        ("n2-highmem-48", spec(48, 384.0, M)),
        ("n2-highmem-64", spec(64, 512.0, M)),
        ("n2-highmem-80", spec(80, 640.0, M)),
        ("n2-highcpu-2", spec(2, 2.0, C)),
        ("n2-highcpu-4", spec(4, 4.0, C)),
        ("n2-highcpu-8", spec(8, 8.0, C)),
        ("n2-highcpu-16", spec(16, 16.0, C)),
        ("n2-highcpu-32", spec(32, 32.0, C)),
        ("n2-highcpu-48", spec(48, 48.0, C)),
        ("n2-highcpu-64", spec(64, 64.0, C)),
        ("n2-highcpu-80", spec(80, 80.0, C)),
    ]
    .into_iter()
    .collect()
});

/// All known AWS instance types.
pub fn aws_instance_types() -> &'static BTreeMap<&'static str, InstanceSpec> {
    &AWS_INSTANCE_TYPES
}

/// All known GCP machine types.
pub fn gcp_machine_types() -> &'static BTreeMap<&'static str, InstanceSpec> {
    &GCP_MACHINE_TYPES
}

/// Look up the spec for a provider's type name.
pub fn lookup(provider: Provider, name: &str) -> Option<&'static InstanceSpec> {
    match provider {
        Provider::Aws => AWS_INSTANCE_TYPES.get(name),
        Provider::Gcp => GCP_MACHINE_TYPES.get(name),
    }
}
