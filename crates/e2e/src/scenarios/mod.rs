//! The acceptance scenarios
//!
//! One module per API surface. Each module exposes a [`Scenario`]
//! describing a fixed, strictly sequential call-and-assert flow; the
//! runner guarantees teardown after each one.

pub mod auth;
pub mod clients;
pub mod dashboard;
pub mod equipment;
pub mod financial;
pub mod freelancers;
pub mod projects;
pub mod proposals;
pub mod search;

use crate::runner::Scenario;

/// Every scenario, in suite order. Earlier entries have fewer
/// cross-resource dependencies.
pub fn all() -> Vec<Scenario> {
    vec![
        auth::scenario(),
        clients::scenario(),
        equipment::scenario(),
        freelancers::scenario(),
        projects::scenario(),
        proposals::scenario(),
        financial::scenario(),
        dashboard::scenario(),
        search::scenario(),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn registry_holds_nine_uniquely_named_scenarios() {
        let scenarios = all();
        assert_eq!(scenarios.len(), 9);

        let names: HashSet<&str> = scenarios.iter().map(|s| s.name).collect();
        assert_eq!(names.len(), scenarios.len(), "scenario names must be unique");
    }

    #[test]
    fn every_scenario_is_described_and_tagged() {
        for scenario in all() {
            assert!(
                !scenario.description.is_empty(),
                "{} has no description",
                scenario.name
            );
            assert!(!scenario.tags.is_empty(), "{} has no tags", scenario.name);
        }
    }
}
