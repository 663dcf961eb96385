//! Scenario request and report wire types.
//!
//! A scenario is an ordered sequence of named network operations applied as a
//! unit. Callers either submit an explicit step list or reference a built-in
//! template by name, optionally overriding template parameters. Every step
//! produces exactly one [`StepResult`], in execution order, regardless of
//! individual failures.

use serde::{Deserialize, Serialize};

use crate::params::ParamMap;

/// A single scenario step: an action identifier plus its parameter bag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioStep {
    /// Action identifier, e.g. `add_bridge` or `set_port_vlan`.
    pub action: String,
    /// Dynamically-typed parameters consumed by the action handler.
    #[serde(default)]
    pub params: ParamMap,
}

impl ScenarioStep {
    pub fn new(action: impl Into<String>, params: ParamMap) -> Self {
        Self {
            action: action.into(),
            params,
        }
    }
}

/// A named, reusable step sequence registered at startup.
///
/// Templates are read-only for the lifetime of the process; resolving a
/// templated request copies the steps, it never mutates the template.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioTemplate {
    pub name: String,
    pub steps: Vec<ScenarioStep>,
}

/// Scenario execution request.
///
/// Exactly one of `steps` (non-empty) or `scenario` determines the executed
/// sequence; explicit steps take precedence. `override_params` only applies
/// when a template is used, and is broadcast to every step of the template.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScenarioRequest {
    /// Built-in template name, consulted when `steps` is empty.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scenario: Option<String>,
    /// Explicit ordered step list.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub steps: Vec<ScenarioStep>,
    /// Caller overrides merged into every template step's parameters.
    #[serde(
        default,
        rename = "overrideParams",
        skip_serializing_if = "Option::is_none"
    )]
    pub override_params: Option<ParamMap>,
}

/// Outcome of one executed step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepResult {
    pub action: String,
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output: Option<String>,
}

impl StepResult {
    /// Successful step, optionally carrying the operation's output.
    pub fn ok(action: impl Into<String>, output: Option<String>) -> Self {
        Self {
            action: action.into(),
            success: true,
            error: None,
            output,
        }
    }

    /// Failed step carrying the error text; failed steps never have output.
    pub fn failed(action: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            action: action.into(),
            success: false,
            error: Some(error.into()),
            output: None,
        }
    }
}

/// Aggregate scenario outcome: the ordered per-step results plus the overall
/// success flag.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioReport {
    pub success: bool,
    pub results: Vec<StepResult>,
}

impl ScenarioReport {
    /// Aggregate per-step outcomes. Overall success is the logical AND over
    /// every step's success; result order is preserved.
    pub fn from_results(results: Vec<StepResult>) -> Self {
        let success = results.iter().all(|r| r.success);
        Self { success, results }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_success_is_and_of_step_results() {
        let all_ok = ScenarioReport::from_results(vec![
            StepResult::ok("add_bridge", None),
            StepResult::ok("add_port", None),
        ]);
        assert!(all_ok.success);
        assert_eq!(all_ok.results.len(), 2);

        let one_failed = ScenarioReport::from_results(vec![
            StepResult::ok("add_bridge", None),
            StepResult::failed("add_port", "no such bridge"),
            StepResult::ok("add_flow", None),
        ]);
        assert!(!one_failed.success);
        assert_eq!(one_failed.results.len(), 3);
        assert!(one_failed.results[0].success);
        assert!(!one_failed.results[1].success);
        assert!(one_failed.results[2].success);
    }

    #[test]
    fn test_empty_report_is_successful() {
        // Vacuous AND; resolution errors are reported separately, never as
        // an empty report.
        assert!(ScenarioReport::from_results(Vec::new()).success);
    }

    #[test]
    fn test_request_json_shape() {
        let json = r#"{
            "scenario": "vxlan_vlan_isolation",
            "overrideParams": {"tag": 200}
        }"#;

        let request: ScenarioRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.scenario.as_deref(), Some("vxlan_vlan_isolation"));
        assert!(request.steps.is_empty());
        let overrides = request.override_params.unwrap();
        assert_eq!(overrides.len(), 1);
        assert!(overrides.contains_key("tag"));
    }

    #[test]
    fn test_step_result_serialization_omits_empty_fields() {
        let ok = serde_json::to_string(&StepResult::ok("add_bridge", None)).unwrap();
        assert!(!ok.contains("error"));
        assert!(!ok.contains("output"));

        let failed =
            serde_json::to_string(&StepResult::failed("add_port", "no such bridge")).unwrap();
        assert!(failed.contains("\"error\":\"no such bridge\""));
    }
}
