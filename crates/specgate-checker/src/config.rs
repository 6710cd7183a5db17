//! Classification configuration.

use chrono::{NaiveDate, Utc};

use specgate_model::StabilityLevel;

use crate::localize::{EnglishLocalizer, Localizer};

/// Minimum days a beta endpoint must stay available after deprecation.
pub const DEFAULT_BETA_DEPRECATION_DAYS: i64 = 31;

/// Minimum days a stable endpoint must stay available after deprecation.
pub const DEFAULT_STABLE_DEPRECATION_DAYS: i64 = 180;

/// CheckConfig - everything the rule catalog reads besides the diff itself
pub struct CheckConfig {
    /// Message table for record text
    pub localizer: Box<dyn Localizer>,

    /// Optional-rule ids activated in addition to the required baseline
    pub include_checks: Vec<String>,

    pub beta_deprecation_days: i64,
    pub stable_deprecation_days: i64,

    /// Reference date for grace-period arithmetic; `None` means today.
    /// Pinned in tests so boundary behavior is reproducible.
    pub today: Option<NaiveDate>,
}

impl Default for CheckConfig {
    fn default() -> Self {
        Self {
            localizer: Box::new(EnglishLocalizer),
            include_checks: Vec::new(),
            beta_deprecation_days: DEFAULT_BETA_DEPRECATION_DAYS,
            stable_deprecation_days: DEFAULT_STABLE_DEPRECATION_DAYS,
            today: None,
        }
    }
}

impl CheckConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve record text through the configured localizer.
    pub fn translate(&self, key: &str, args: &[String]) -> String {
        self.localizer.translate(key, args)
    }

    /// Whether an optional rule id was activated.
    pub fn includes_check(&self, id: &str) -> bool {
        self.include_checks.iter().any(|c| c == id)
    }

    /// The grace period an endpoint of the given stability must honor.
    pub fn deprecation_days(&self, stability: StabilityLevel) -> i64 {
        match stability {
            StabilityLevel::Beta => self.beta_deprecation_days,
            StabilityLevel::Stable => self.stable_deprecation_days,
        }
    }

    /// The reference date for sunset comparisons.
    pub fn reference_date(&self) -> NaiveDate {
        self.today.unwrap_or_else(|| Utc::now().date_naive())
    }
}
