//! Rule trait and engine.

use std::sync::OnceLock;

use landscape_model::{Issue, Record};
use tracing::debug;

use crate::columns::ColumnSet;
use crate::rules::{BackupDateRule, IdentityRule, JobFailureRule};

/// A single column-gated validation rule.
///
/// # Implementing a Rule
///
/// ```ignore
/// struct HostRule;
///
/// impl Rule for HostRule {
///     fn name(&self) -> &'static str {
///         "host_presence"
///     }
///
///     fn applies_to(&self, columns: &ColumnSet) -> bool {
///         columns.contains("host")
///     }
///
///     fn evaluate(&self, records: &[Record]) -> Vec<Issue> {
///         Vec::new()
///     }
/// }
/// ```
pub trait Rule: Send + Sync {
    /// Stable identifier used in logs.
    fn name(&self) -> &'static str;

    /// Whether the rule's trigger columns are present.
    fn applies_to(&self, columns: &ColumnSet) -> bool;

    /// Evaluate the rule. Only called when [`Rule::applies_to`] returned true.
    fn evaluate(&self, records: &[Record]) -> Vec<Issue>;
}

/// Ordered collection of rules.
///
/// Every applicable rule runs, in registration order, regardless of what
/// earlier rules found.
#[derive(Default)]
pub struct RuleEngine {
    rules: Vec<Box<dyn Rule>>,
}

impl RuleEngine {
    /// Creates an engine with no rules.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an engine with the standard landscape rules.
    pub fn standard() -> Self {
        let mut engine = Self::new();
        engine.register(Box::new(IdentityRule));
        engine.register(Box::new(BackupDateRule));
        engine.register(Box::new(JobFailureRule));
        engine
    }

    /// Appends a rule after the already registered ones.
    pub fn register(&mut self, rule: Box<dyn Rule>) {
        self.rules.push(rule);
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn rule_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.rules.iter().map(|rule| rule.name())
    }

    /// Run all applicable rules and collect their issues in order.
    pub fn execute<S: AsRef<str>>(&self, records: &[Record], column_names: &[S]) -> Vec<Issue> {
        let columns = ColumnSet::from_names(column_names);
        let mut issues = Vec::new();
        for rule in &self.rules {
            if !rule.applies_to(&columns) {
                debug!(rule = rule.name(), "rule skipped, trigger columns absent");
                continue;
            }
            let found = rule.evaluate(records);
            debug!(
                rule = rule.name(),
                records = records.len(),
                issues = found.len(),
                "rule evaluated"
            );
            issues.extend(found);
        }
        issues
    }
}

static DEFAULT_ENGINE: OnceLock<RuleEngine> = OnceLock::new();

/// Returns the shared engine with the standard rules.
pub fn default_engine() -> &'static RuleEngine {
    DEFAULT_ENGINE.get_or_init(RuleEngine::standard)
}

#[cfg(test)]
mod tests {
    use super::*;

    struct AlwaysFlags;

    impl Rule for AlwaysFlags {
        fn name(&self) -> &'static str {
            "always"
        }

        fn applies_to(&self, columns: &ColumnSet) -> bool {
            columns.contains("host")
        }

        fn evaluate(&self, records: &[Record]) -> Vec<Issue> {
            vec![Issue::JobFailures {
                rows: records.len(),
            }]
        }
    }

    #[test]
    fn standard_engine_order() {
        let names: Vec<&str> = RuleEngine::standard().rule_names().collect();
        assert_eq!(names, vec!["identity_presence", "backup_date", "job_failure_scan"]);
    }

    #[test]
    fn registered_rules_are_gated_on_columns() {
        let mut engine = RuleEngine::new();
        engine.register(Box::new(AlwaysFlags));
        let records = vec![Record::new()];

        assert!(engine.execute(&records, &["sid"]).is_empty());
        assert_eq!(
            engine.execute(&records, &["HOST"]),
            vec![Issue::JobFailures { rows: 1 }]
        );
    }

    #[test]
    fn empty_engine_reports_nothing() {
        let engine = RuleEngine::new();
        assert!(engine.is_empty());
        assert!(engine.execute::<&str>(&[], &[]).is_empty());
    }
}
