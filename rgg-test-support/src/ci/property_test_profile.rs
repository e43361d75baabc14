//! Property-test run profile shared by every proptest suite in the workspace.
//!
//! CI raises case counts or enables forking through environment variables;
//! malformed overrides are logged and ignored so a typo never silently turns
//! a suite off.

use std::env;

use thiserror::Error;

/// Environment variable overriding the number of cases per property.
pub const PROGTEST_CASES_ENV_KEY: &str = "PROGTEST_CASES";
/// Environment variable toggling forked proptest execution.
pub const RGG_PBT_FORK_ENV_KEY: &str = "RGG_PBT_FORK";

/// Reasons an override is rejected.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum OverrideError {
    /// The case count did not parse as an unsigned integer.
    #[error("expected a positive integer, got `{0}`")]
    NotANumber(String),
    /// A case count of zero would skip the property entirely.
    #[error("case count must be greater than zero")]
    ZeroCases,
    /// The fork flag was not a recognised boolean spelling.
    #[error("expected true/false/1/0/yes/no/on/off, got `{0}`")]
    NotABool(String),
}

/// Case count and fork setting for one property suite.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ProptestRunProfile {
    cases: u32,
    fork: bool,
}

impl ProptestRunProfile {
    /// Reads overrides from the environment, falling back to the given
    /// defaults when a variable is unset or invalid.
    ///
    /// # Examples
    /// ```
    /// use rgg_test_support::ci::property_test_profile::ProptestRunProfile;
    ///
    /// let profile = ProptestRunProfile::load(64, false);
    /// assert!(profile.cases() > 0);
    /// ```
    #[must_use]
    pub fn load(default_cases: u32, default_fork: bool) -> Self {
        Self {
            cases: override_or(PROGTEST_CASES_ENV_KEY, default_cases, parse_cases),
            fork: override_or(RGG_PBT_FORK_ENV_KEY, default_fork, parse_flag),
        }
    }

    /// Number of cases to run per property.
    #[must_use]
    #[rustfmt::skip]
    pub fn cases(&self) -> u32 { self.cases }

    /// Whether cases run in forked subprocesses.
    #[must_use]
    #[rustfmt::skip]
    pub fn fork(&self) -> bool { self.fork }
}

fn override_or<T: Copy>(
    key: &'static str,
    default: T,
    parse: fn(&str) -> Result<T, OverrideError>,
) -> T {
    let Ok(raw) = env::var(key) else {
        return default;
    };
    parse(&raw).unwrap_or_else(|reason| {
        tracing::warn!(
            env = key,
            raw = %raw,
            %reason,
            "ignoring invalid property-test override",
        );
        default
    })
}

fn parse_cases(raw: &str) -> Result<u32, OverrideError> {
    match raw.trim().parse::<u32>() {
        Ok(0) => Err(OverrideError::ZeroCases),
        Ok(cases) => Ok(cases),
        Err(_) => Err(OverrideError::NotANumber(raw.to_owned())),
    }
}

fn parse_flag(raw: &str) -> Result<bool, OverrideError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(OverrideError::NotABool(raw.to_owned())),
    }
}
