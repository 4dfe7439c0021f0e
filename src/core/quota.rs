//! Daily resource quotas and cost warnings.
//!
//! A single JSON artifact keyed by calendar day tracks how many instances
//! and how much storage have been provisioned today. Counters reset lazily:
//! whenever the stored date differs from today, every read sees zeroed
//! usage. There is no background timer.
//!
//! Admission checks are read-only. `record_usage` and `update_limits` are
//! read-modify-write cycles serialized by an exclusive advisory lock on a
//! sibling lock file, so concurrent invocations cannot silently undercount
//! usage.

use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use chrono::Local;
use fs2::FileExt;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::core::catalog::{self, Category};
use crate::core::constants::{
    DEFAULT_MAX_DISK_SIZE_GB, DEFAULT_MAX_INSTANCES_PER_DAY, DEFAULT_MAX_STORAGE_GB_PER_DAY,
    QUOTA_FILE, QUOTA_LOCK_FILE,
};
use crate::core::store;
use crate::core::types::Provider;
use crate::error::{QuotaError, Result};

/// Shapes at or above these thresholds always warn, independent of tier.
const EXPENSIVE_VCPU: u32 = 8;
const EXPENSIVE_MEMORY_GB: f64 = 32.0;

/// Cost-warning sensitivity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThresholdTier {
    Small,
    Medium,
    Large,
}

impl ThresholdTier {
    /// Categories that trigger a cost warning at this tier.
    fn cost_sensitive(&self) -> &'static [Category] {
        match self {
            ThresholdTier::Small => &[],
            ThresholdTier::Medium => &[Category::ComputeOptimized, Category::MemoryOptimized],
            ThresholdTier::Large => &[
                Category::ComputeOptimized,
                Category::MemoryOptimized,
                Category::GeneralPurpose,
            ],
        }
    }
}

impl FromStr for ThresholdTier {
    type Err = QuotaError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "small" => Ok(ThresholdTier::Small),
            "medium" => Ok(ThresholdTier::Medium),
            "large" => Ok(ThresholdTier::Large),
            other => Err(QuotaError::InvalidThreshold(other.to_string())),
        }
    }
}

/// Configured ceilings. Replaced wholesale by `update_limits`; today's
/// counters are untouched by a limits change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuotaLimits {
    pub max_instances_per_day: u32,
    pub max_storage_gb_per_day: u64,
    pub max_disk_size_gb: u64,
    pub warn_expensive_instances: bool,
    pub expensive_instance_threshold: ThresholdTier,
}

impl Default for QuotaLimits {
    fn default() -> Self {
        Self {
            max_instances_per_day: DEFAULT_MAX_INSTANCES_PER_DAY,
            max_storage_gb_per_day: DEFAULT_MAX_STORAGE_GB_PER_DAY,
            max_disk_size_gb: DEFAULT_MAX_DISK_SIZE_GB,
            warn_expensive_instances: true,
            expensive_instance_threshold: ThresholdTier::Medium,
        }
    }
}

/// Persisted usage record for one calendar day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuotaState {
    pub date: String,
    pub instances_created: u32,
    pub storage_gb_provisioned: u64,
    pub limits: QuotaLimits,
}

impl QuotaState {
    fn for_today(limits: QuotaLimits) -> Self {
        Self {
            date: today(),
            instances_created: 0,
            storage_gb_provisioned: 0,
            limits,
        }
    }
}

/// Point-in-time usage report for display layers.
#[derive(Debug, Clone, Serialize)]
pub struct UsageSummary {
    pub instances_used: u32,
    pub instances_limit: u32,
    pub instances_remaining: u32,
    pub storage_gb_used: u64,
    pub storage_gb_limit: u64,
    pub storage_gb_remaining: u64,
    pub reset_date: String,
}

fn today() -> String {
    Local::now().date_naive().to_string()
}

/// Daily budget enforcement over an injectable state directory.
#[derive(Debug, Clone)]
pub struct QuotaGuard {
    dir: PathBuf,
    initial_limits: QuotaLimits,
}

impl QuotaGuard {
    /// Guard over `dir` with default limits for a fresh state.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self::with_initial_limits(dir, QuotaLimits::default())
    }

    /// Guard over `dir`, seeding a fresh state with `limits`.
    ///
    /// Existing state keeps its stored limits; use `update_limits` to
    /// change them.
    pub fn with_initial_limits(dir: impl Into<PathBuf>, limits: QuotaLimits) -> Self {
        Self {
            dir: dir.into(),
            initial_limits: limits,
        }
    }

    /// Guard over the standard data directory.
    pub fn open_default() -> Self {
        Self::new(store::data_dir())
    }

    /// The state directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn state_path(&self) -> PathBuf {
        self.dir.join(QUOTA_FILE)
    }

    fn lock_path(&self) -> PathBuf {
        self.dir.join(QUOTA_LOCK_FILE)
    }

    /// Current state with the day-window reset applied.
    ///
    /// Reads never write; a stale record is zeroed in memory and persisted
    /// on the next recording operation.
    pub fn state(&self) -> Result<QuotaState> {
        let mut state = match self.read_state()? {
            Some(state) => state,
            None => QuotaState::for_today(self.initial_limits.clone()),
        };
        self.reset_if_stale(&mut state);
        Ok(state)
    }

    /// Admit creating `n` more instances today, or fail.
    pub fn check_instance_quota(&self, n: u32) -> Result<()> {
        let state = self.state()?;
        let limit = state.limits.max_instances_per_day;
        if state.instances_created.saturating_add(n) > limit {
            return Err(QuotaError::InstanceLimitExceeded {
                requested: n,
                used: state.instances_created,
                limit,
            }
            .into());
        }
        Ok(())
    }

    /// Admit provisioning `gb` more storage today, or fail.
    pub fn check_storage_quota(&self, gb: u64) -> Result<()> {
        let state = self.state()?;
        let limit = state.limits.max_storage_gb_per_day;
        if state.storage_gb_provisioned.saturating_add(gb) > limit {
            return Err(QuotaError::StorageLimitExceeded {
                requested: gb,
                used: state.storage_gb_provisioned,
                limit,
            }
            .into());
        }
        Ok(())
    }

    /// Reject a single disk larger than the configured ceiling,
    /// independent of daily totals.
    pub fn check_disk_size(&self, gb: u64) -> Result<()> {
        let state = self.state()?;
        let max = state.limits.max_disk_size_gb;
        if gb > max {
            return Err(QuotaError::DiskTooLarge { size: gb, max }.into());
        }
        Ok(())
    }

    /// Non-fatal cost check for an instance shape.
    ///
    /// Warns when the shape is large (>= 8 vCPUs or >= 32 GB memory) or
    /// when its category is cost-sensitive at the configured tier. Returns
    /// `None` when warnings are disabled.
    pub fn warn_if_expensive(
        &self,
        vcpu: u32,
        memory_gb: f64,
        category: Category,
    ) -> Result<Option<String>> {
        let limits = self.state()?.limits;
        if !limits.warn_expensive_instances {
            return Ok(None);
        }

        let tier = limits.expensive_instance_threshold;
        let reason = if tier.cost_sensitive().contains(&category) {
            format!("{} is a cost-sensitive category", category)
        } else if vcpu >= EXPENSIVE_VCPU {
            format!("{} vCPUs", vcpu)
        } else if memory_gb >= EXPENSIVE_MEMORY_GB {
            format!("{} GB memory", memory_gb)
        } else {
            return Ok(None);
        };

        Ok(Some(format!(
            "expensive instance shape ({}). This may result in significant costs. Proceed with caution.",
            reason
        )))
    }

    /// Cost check by catalog type name.
    ///
    /// Unknown names produce no warning; rejecting them is the validator's
    /// job.
    pub fn warn_for_instance_type(
        &self,
        provider: Provider,
        instance_type: &str,
    ) -> Result<Option<String>> {
        let Some(spec) = catalog::lookup(provider, instance_type) else {
            return Ok(None);
        };
        match self.warn_if_expensive(spec.vcpu, spec.memory_gb, spec.category)? {
            Some(_) => Ok(Some(format!(
                "{} is considered an expensive instance type. This may result in significant costs. Proceed with caution.",
                instance_type
            ))),
            None => Ok(None),
        }
    }

    /// Record usage after a provider operation actually succeeded.
    ///
    /// Never call speculatively: committing before success would
    /// undercount remaining capacity on failure, committing after failure
    /// would overcount. The whole read-modify-write holds the quota lock.
    pub fn record_usage(&self, instances: u32, storage_gb: u64) -> Result<()> {
        self.mutate(|state| {
            state.instances_created += instances;
            state.storage_gb_provisioned += storage_gb;
            debug!(
                instances = state.instances_created,
                storage_gb = state.storage_gb_provisioned,
                "usage recorded"
            );
        })
    }

    /// Replace the configured limits, preserving today's counters.
    pub fn update_limits(&self, limits: QuotaLimits) -> Result<()> {
        self.mutate(|state| {
            state.limits = limits.clone();
        })
    }

    /// Used/limit/remaining for both daily counters.
    pub fn usage_summary(&self) -> Result<UsageSummary> {
        let state = self.state()?;
        Ok(UsageSummary {
            instances_used: state.instances_created,
            instances_limit: state.limits.max_instances_per_day,
            instances_remaining: state
                .limits
                .max_instances_per_day
                .saturating_sub(state.instances_created),
            storage_gb_used: state.storage_gb_provisioned,
            storage_gb_limit: state.limits.max_storage_gb_per_day,
            storage_gb_remaining: state
                .limits
                .max_storage_gb_per_day
                .saturating_sub(state.storage_gb_provisioned),
            reset_date: state.date,
        })
    }

    fn mutate(&self, apply: impl FnOnce(&mut QuotaState)) -> Result<()> {
        store::ensure_dir(&self.dir)?;

        let lock = fs::OpenOptions::new()
            .create(true)
            .write(true)
            .open(self.lock_path())?;
        lock.lock_exclusive()?;

        // Re-read under the lock so concurrent writers never clobber each
        // other's increments.
        let result = (|| {
            let mut state = self.state()?;
            apply(&mut state);
            let bytes = serde_json::to_vec_pretty(&state).map_err(std::io::Error::from)?;
            store::write_atomic(&self.state_path(), &bytes)
        })();

        let _ = FileExt::unlock(&lock);
        result
    }

    fn read_state(&self) -> Result<Option<QuotaState>> {
        let contents = match fs::read_to_string(self.state_path()) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        match serde_json::from_str(&contents) {
            Ok(state) => Ok(Some(state)),
            Err(e) => {
                // An unreadable record must not brick provisioning; start
                // over with defaults.
                warn!(error = %e, "quota state unreadable, resetting to defaults");
                Ok(None)
            }
        }
    }

    fn reset_if_stale(&self, state: &mut QuotaState) {
        let today = today();
        if state.date != today {
            debug!(stored = %state.date, today = %today, "day window rolled, resetting counters");
            state.date = today;
            state.instances_created = 0;
            state.storage_gb_provisioned = 0;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use tempfile::TempDir;

    fn guard() -> (TempDir, QuotaGuard) {
        let tmp = TempDir::new().unwrap();
        let guard = QuotaGuard::new(tmp.path());
        (tmp, guard)
    }

    #[test]
    fn fresh_state_has_defaults() {
        let (_tmp, guard) = guard();
        let state = guard.state().unwrap();

        assert_eq!(state.instances_created, 0);
        assert_eq!(state.storage_gb_provisioned, 0);
        assert_eq!(state.limits, QuotaLimits::default());
        assert_eq!(state.date, today());
    }

    #[test]
    fn instance_quota_boundary() {
        let (_tmp, guard) = guard();
        let limit = QuotaLimits::default().max_instances_per_day;

        guard.check_instance_quota(limit).unwrap();
        assert!(matches!(
            guard.check_instance_quota(limit + 1),
            Err(Error::Quota(QuotaError::InstanceLimitExceeded { .. }))
        ));
    }

    #[test]
    fn storage_quota_counts_existing_usage() {
        let (_tmp, guard) = guard();

        guard.record_usage(0, 950).unwrap();
        guard.check_storage_quota(50).unwrap();
        assert!(matches!(
            guard.check_storage_quota(51),
            Err(Error::Quota(QuotaError::StorageLimitExceeded { .. }))
        ));
    }

    #[test]
    fn disk_size_is_independent_of_daily_totals() {
        let (_tmp, guard) = guard();

        guard.check_disk_size(500).unwrap();
        assert!(matches!(
            guard.check_disk_size(600),
            Err(Error::Quota(QuotaError::DiskTooLarge { size: 600, max: 500 }))
        ));
    }

    #[test]
    fn record_usage_reduces_headroom() {
        let (_tmp, guard) = guard();

        guard.record_usage(1, 100).unwrap();
        guard.record_usage(2, 50).unwrap();

        let summary = guard.usage_summary().unwrap();
        assert_eq!(summary.instances_used, 3);
        assert_eq!(summary.instances_remaining, 7);
        assert_eq!(summary.storage_gb_used, 150);
        assert_eq!(summary.storage_gb_remaining, 850);

        assert!(guard.check_instance_quota(7).is_ok());
        assert!(guard.check_instance_quota(8).is_err());
    }

    #[test]
    fn stale_date_resets_counters() {
        let (_tmp, guard) = guard();

        guard.record_usage(3, 200).unwrap();

        // Rewind the stored date; the next read must see zeroed counters.
        let mut state: QuotaState =
            serde_json::from_str(&fs::read_to_string(guard.state_path()).unwrap()).unwrap();
        state.date = "2000-01-01".to_string();
        fs::write(guard.state_path(), serde_json::to_vec(&state).unwrap()).unwrap();

        let fresh = guard.state().unwrap();
        assert_eq!(fresh.instances_created, 0);
        assert_eq!(fresh.storage_gb_provisioned, 0);
        assert_eq!(fresh.date, today());
        guard.check_instance_quota(QuotaLimits::default().max_instances_per_day).unwrap();
    }

    #[test]
    fn update_limits_preserves_counters() {
        let (_tmp, guard) = guard();

        guard.record_usage(2, 100).unwrap();
        guard
            .update_limits(QuotaLimits {
                max_instances_per_day: 20,
                max_storage_gb_per_day: 2000,
                max_disk_size_gb: 1000,
                ..QuotaLimits::default()
            })
            .unwrap();

        let state = guard.state().unwrap();
        assert_eq!(state.instances_created, 2);
        assert_eq!(state.storage_gb_provisioned, 100);
        assert_eq!(state.limits.max_instances_per_day, 20);
        guard.check_disk_size(1000).unwrap();
    }

    #[test]
    fn corrupt_state_file_resets_to_defaults() {
        let (_tmp, guard) = guard();

        store::ensure_dir(guard.dir()).unwrap();
        fs::write(guard.state_path(), b"not json").unwrap();

        let state = guard.state().unwrap();
        assert_eq!(state.limits, QuotaLimits::default());
        assert_eq!(state.instances_created, 0);
    }

    #[test]
    fn expensive_warning_by_shape() {
        let (_tmp, guard) = guard();

        // Large vCPU count warns regardless of category at medium tier.
        assert!(guard
            .warn_if_expensive(8, 16.0, Category::GeneralPurpose)
            .unwrap()
            .is_some());
        // Large memory warns.
        assert!(guard
            .warn_if_expensive(4, 32.0, Category::GeneralPurpose)
            .unwrap()
            .is_some());
        // Small general-purpose shape does not.
        assert!(guard
            .warn_if_expensive(1, 1.0, Category::GeneralPurpose)
            .unwrap()
            .is_none());
        // Cost-sensitive category warns at the default medium tier.
        assert!(guard
            .warn_if_expensive(4, 8.0, Category::ComputeOptimized)
            .unwrap()
            .is_some());
    }

    #[test]
    fn tier_scales_category_sensitivity() {
        let (_tmp, guard) = guard();

        guard
            .update_limits(QuotaLimits {
                expensive_instance_threshold: ThresholdTier::Small,
                ..QuotaLimits::default()
            })
            .unwrap();
        // Small tier: categories never trigger on their own.
        assert!(guard
            .warn_if_expensive(4, 8.0, Category::ComputeOptimized)
            .unwrap()
            .is_none());

        guard
            .update_limits(QuotaLimits {
                expensive_instance_threshold: ThresholdTier::Large,
                ..QuotaLimits::default()
            })
            .unwrap();
        // Large tier: even general purpose triggers.
        assert!(guard
            .warn_if_expensive(2, 4.0, Category::GeneralPurpose)
            .unwrap()
            .is_some());
    }

    #[test]
    fn warnings_can_be_disabled() {
        let (_tmp, guard) = guard();

        guard
            .update_limits(QuotaLimits {
                warn_expensive_instances: false,
                ..QuotaLimits::default()
            })
            .unwrap();

        assert!(guard
            .warn_if_expensive(96, 768.0, Category::MemoryOptimized)
            .unwrap()
            .is_none());
        assert!(guard
            .warn_for_instance_type(Provider::Aws, "r5.24xlarge")
            .unwrap()
            .is_none());
    }

    #[test]
    fn warning_by_type_name() {
        let (_tmp, guard) = guard();

        let warning = guard
            .warn_for_instance_type(Provider::Aws, "c5.xlarge")
            .unwrap()
            .expect("compute optimized should warn at medium tier");
        assert!(warning.contains("c5.xlarge"));

        assert!(guard
            .warn_for_instance_type(Provider::Aws, "t2.micro")
            .unwrap()
            .is_none());
        assert!(guard
            .warn_for_instance_type(Provider::Gcp, "no-such-type")
            .unwrap()
            .is_none());
    }

    #[test]
    fn threshold_tier_parses() {
        assert_eq!("small".parse::<ThresholdTier>().unwrap(), ThresholdTier::Small);
        assert_eq!("large".parse::<ThresholdTier>().unwrap(), ThresholdTier::Large);
        assert!(matches!(
            "huge".parse::<ThresholdTier>(),
            Err(QuotaError::InvalidThreshold(_))
        ));
    }
}
