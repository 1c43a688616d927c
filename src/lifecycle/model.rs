//! Suite/case hierarchy model for lifecycle tracking.
//!
//! Upstream test frameworks overload a single notification channel to mean
//! either "this suite" or "this case" (failures, assumption failures, ignore
//! notifications all share one callback). That ambiguity is resolved exactly
//! once at the boundary into a [`NotificationTarget`], and everything past
//! the boundary dispatches on the variant.

use serde::{Deserialize, Serialize};

/// A suite node: a grouping of test cases, possibly nested inside other
/// suites. Only the `case_names` it directly contains matter for reporting;
/// purely structural wrapper suites (empty `case_names`) are never reported.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuiteDescriptor {
    /// Qualified suite name (e.g. "pkg.StorageSuite")
    pub name: String,

    /// Test framework that owns the suite
    pub framework: String,

    /// Framework version string
    pub framework_version: String,

    /// Declared categories/tags
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub categories: Vec<String>,

    /// Names of the runnable cases this suite directly contains
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub case_names: Vec<String>,
}

impl SuiteDescriptor {
    /// Whether the suite directly contains at least one runnable case.
    pub fn has_runnable_cases(&self) -> bool {
        !self.case_names.is_empty()
    }

    /// Descriptor for a directly-contained case.
    pub fn case(&self, name: &str) -> CaseDescriptor {
        CaseDescriptor {
            suite_name: self.name.clone(),
            name: name.to_string(),
            parameters: None,
            categories: self.categories.clone(),
        }
    }
}

/// A case node inside a suite. `suite_name` is a non-owning back-reference
/// to the enclosing suite.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaseDescriptor {
    /// Name of the enclosing suite
    pub suite_name: String,

    /// Case name
    pub name: String,

    /// Parameter description for parameterized cases
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parameters: Option<String>,

    /// Declared categories/tags
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub categories: Vec<String>,
}

impl CaseDescriptor {
    pub fn qualified_name(&self) -> String {
        format!("{}::{}", self.suite_name, self.name)
    }
}

/// The disambiguated target of an overloaded framework notification.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum NotificationTarget {
    Suite(SuiteDescriptor),
    Case(CaseDescriptor),
}

/// An immutable failure outcome: optional reason plus optional underlying
/// cause text. Attached to a node at most once.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FailureRecord {
    /// Human-readable failure reason
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    /// Underlying cause, when one exists
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cause: Option<String>,
}

impl FailureRecord {
    pub fn from_message(message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
            cause: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn suite() -> SuiteDescriptor {
        SuiteDescriptor {
            name: "pkg.StorageSuite".into(),
            framework: "junit4".into(),
            framework_version: "4.13".into(),
            categories: vec!["integration".into()],
            case_names: vec!["uploads".into(), "downloads".into()],
        }
    }

    #[test]
    fn test_wrapper_suite_has_no_runnable_cases() {
        let mut wrapper = suite();
        wrapper.case_names.clear();
        assert!(!wrapper.has_runnable_cases());
        assert!(suite().has_runnable_cases());
    }

    #[test]
    fn test_contained_case_inherits_suite_identity() {
        let case = suite().case("uploads");
        assert_eq!(case.suite_name, "pkg.StorageSuite");
        assert_eq!(case.qualified_name(), "pkg.StorageSuite::uploads");
        assert_eq!(case.categories, vec!["integration".to_string()]);
    }
}
