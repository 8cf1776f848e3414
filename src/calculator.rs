//! Version naming policy
//!
//! Version names are two dot-separated non-negative integers,
//! `"{major}.{minor}"`. Components are parsed and re-emitted as integers, so
//! `"1.9"` followed by a minor bump is `"1.10"`.

use serde_json::Value;
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use crate::error::{VersioningError, VersioningResult};
use crate::types::{Version, VersionCreationMethod, VersionStatus};

/// Property under which [`VersionCalculator::inject_additional_info`] records
/// the creation methods still available from a version
pub const OPTIONAL_CREATION_METHODS: &str = "OptionalCreationMethods";

/// Seed base name used when a version has no base
pub const DEFAULT_INITIAL_BASE: &str = "0.0";

const VERSION_STRING_VIOLATION_MSG: &str =
    "Version string must be in the format of: {integer}.{integer}";

/// Computes version names and annotates versions with naming options
pub trait VersionCalculator: Send + Sync {
    /// Name for a version derived from `base` with `method`. Without a base,
    /// the method is applied to the configured seed.
    fn calculate(
        &self,
        base: Option<&str>,
        method: VersionCreationMethod,
    ) -> VersioningResult<String>;

    /// Record on `version` which creation methods may still be used with it as base
    fn inject_additional_info(
        &self,
        version: &mut Version,
        existing_names: &HashSet<String>,
    ) -> VersioningResult<()>;
}

/// Parsed `"{major}.{minor}"` version name
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct VersionName {
    pub major: u32,
    pub minor: u32,
}

impl VersionName {
    /// The name one `method` step after this one
    pub fn next(&self, method: VersionCreationMethod) -> VersioningResult<VersionName> {
        let overflow = || VersioningError::validation(format!("Version {self} cannot be incremented"));
        match method {
            VersionCreationMethod::Major => Ok(VersionName {
                major: self.major.checked_add(1).ok_or_else(overflow)?,
                minor: 0,
            }),
            VersionCreationMethod::Minor => Ok(VersionName {
                major: self.major,
                minor: self.minor.checked_add(1).ok_or_else(overflow)?,
            }),
        }
    }
}

impl FromStr for VersionName {
    type Err = VersioningError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let levels: Vec<&str> = s.split('.').collect();
        if levels.len() != 2 {
            return Err(VersioningError::validation(VERSION_STRING_VIOLATION_MSG));
        }
        let major = parse_level(levels[0])?;
        let minor = parse_level(levels[1])?;
        Ok(VersionName { major, minor })
    }
}

impl fmt::Display for VersionName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}

// u32::from_str accepts a leading '+', which is not a valid level here
fn parse_level(level: &str) -> VersioningResult<u32> {
    if level.is_empty() || !level.bytes().all(|b| b.is_ascii_digit()) {
        return Err(VersioningError::validation(VERSION_STRING_VIOLATION_MSG));
    }
    level
        .parse::<u32>()
        .map_err(|_| VersioningError::validation(VERSION_STRING_VIOLATION_MSG))
}

/// Default policy: any certified version can seed the next major, unless that
/// major already exists
#[derive(Debug, Clone)]
pub struct MajorVersionCalculator {
    seed: VersionName,
}

impl MajorVersionCalculator {
    pub fn new() -> Self {
        Self {
            seed: VersionName { major: 0, minor: 0 },
        }
    }

    /// Calculator whose base-less versions derive from `seed`
    pub fn with_initial_base(seed: &str) -> VersioningResult<Self> {
        Ok(Self {
            seed: seed.parse()?,
        })
    }

    pub fn initial_base(&self) -> VersionName {
        self.seed
    }
}

impl Default for MajorVersionCalculator {
    fn default() -> Self {
        Self::new()
    }
}

impl VersionCalculator for MajorVersionCalculator {
    fn calculate(
        &self,
        base: Option<&str>,
        method: VersionCreationMethod,
    ) -> VersioningResult<String> {
        let base = match base {
            Some(name) => name.parse()?,
            None => self.seed,
        };
        Ok(base.next(method)?.to_string())
    }

    fn inject_additional_info(
        &self,
        version: &mut Version,
        existing_names: &HashSet<String>,
    ) -> VersioningResult<()> {
        let mut methods = Vec::new();
        if version.status == VersionStatus::Certified {
            let next = self.calculate(Some(&version.name), VersionCreationMethod::Major)?;
            if !existing_names.contains(&next) {
                methods.push(Value::from(VersionCreationMethod::Major.as_str()));
            }
        }
        version.add_property(OPTIONAL_CREATION_METHODS, Value::Array(methods));
        Ok(())
    }
}
