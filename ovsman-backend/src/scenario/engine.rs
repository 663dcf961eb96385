//! The scenario execution engine.
//!
//! Resolution picks the effective step list (explicit steps win over a
//! template reference, overrides are merged into template steps only), then
//! the engine dispatches each step strictly in order. A failing step is
//! recorded and execution moves on; nothing short of resolution failure
//! prevents later steps from running.

use tracing::{info, instrument, warn};

use ovsman_shared::errors::ScenarioError;
use ovsman_shared::params::merge_params;
use ovsman_shared::scenario::{ScenarioReport, ScenarioRequest, ScenarioStep, StepResult};

use crate::ops::NetworkBackend;
use crate::scenario::registry::ActionKind;
use crate::scenario::templates::TemplateStore;

/// Drives scenario requests against a network backend.
pub struct ScenarioEngine<B: NetworkBackend> {
    backend: B,
    templates: TemplateStore,
}

impl<B: NetworkBackend> ScenarioEngine<B> {
    /// Engine with the built-in template store.
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            templates: TemplateStore::builtin(),
        }
    }

    pub fn templates(&self) -> &TemplateStore {
        &self.templates
    }

    /// Resolve a request into the effective step list.
    ///
    /// Explicit steps are taken verbatim and `overrideParams` is ignored.
    /// Otherwise the named template's steps are copied, with the override
    /// map merged into every step's parameters. A request with neither
    /// steps nor a usable template name is rejected before anything runs.
    pub fn resolve_steps(
        &self,
        request: &ScenarioRequest,
    ) -> Result<Vec<ScenarioStep>, ScenarioError> {
        if !request.steps.is_empty() {
            return Ok(request.steps.clone());
        }

        let name = match request.scenario.as_deref() {
            Some(name) if !name.is_empty() => name,
            _ => return Err(ScenarioError::EmptyRequest),
        };
        let template = self
            .templates
            .get(name)
            .ok_or_else(|| ScenarioError::UnknownTemplate {
                name: name.to_string(),
            })?;

        let steps = match &request.override_params {
            Some(overrides) => template
                .steps
                .iter()
                .map(|step| {
                    ScenarioStep::new(&step.action, merge_params(&step.params, overrides))
                })
                .collect(),
            None => template.steps.clone(),
        };
        Ok(steps)
    }

    /// Execute a scenario request and report every step's outcome.
    #[instrument(skip(self, request), fields(scenario = request.scenario.as_deref()))]
    pub async fn apply(&self, request: &ScenarioRequest) -> Result<ScenarioReport, ScenarioError> {
        let steps = self.resolve_steps(request)?;
        info!(step_count = steps.len(), "executing scenario");

        let mut results = Vec::with_capacity(steps.len());
        for step in &steps {
            results.push(self.execute_step(step).await);
        }

        let report = ScenarioReport::from_results(results);
        if report.success {
            info!("scenario completed");
        } else {
            warn!("scenario completed with failed steps");
        }
        Ok(report)
    }

    async fn execute_step(&self, step: &ScenarioStep) -> StepResult {
        let Some(kind) = ActionKind::parse(&step.action) else {
            warn!(action = %step.action, "unsupported action");
            return StepResult::failed(
                &step.action,
                format!("unsupported action: {}", step.action),
            );
        };

        match self.backend.invoke(kind.build_op(&step.params)).await {
            Ok(output) => StepResult::ok(&step.action, output),
            Err(err) => {
                warn!(action = %step.action, error = %err, "step failed");
                StepResult::failed(&step.action, err.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;

    use ovsman_shared::errors::{OvsError, OvsResult};
    use ovsman_shared::ops::NetworkOp;
    use ovsman_shared::params::{ParamMap, ParamValue};

    /// Records every invoked operation; fails the invocations whose
    /// zero-based index is listed in `fail_on`.
    #[derive(Default)]
    struct MockBackend {
        calls: Mutex<Vec<NetworkOp>>,
        fail_on: Vec<usize>,
        output: Option<String>,
    }

    impl MockBackend {
        fn failing_on(indexes: &[usize]) -> Self {
            Self {
                fail_on: indexes.to_vec(),
                ..Self::default()
            }
        }

        fn calls(&self) -> Vec<NetworkOp> {
            self.calls.lock().unwrap().clone()
        }
    }

    impl NetworkBackend for &MockBackend {
        async fn invoke(&self, op: NetworkOp) -> OvsResult<Option<String>> {
            let mut calls = self.calls.lock().unwrap();
            let index = calls.len();
            calls.push(op);
            if self.fail_on.contains(&index) {
                return Err(OvsError::CommandFailed {
                    program: "ovs-vsctl".to_string(),
                    detail: "ovs-vsctl: bridge br0 does not exist".to_string(),
                });
            }
            Ok(self.output.clone())
        }
    }

    fn step(action: &str, pairs: &[(&str, ParamValue)]) -> ScenarioStep {
        let params: ParamMap = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect();
        ScenarioStep::new(action, params)
    }

    fn explicit_request(steps: Vec<ScenarioStep>) -> ScenarioRequest {
        ScenarioRequest {
            steps,
            ..ScenarioRequest::default()
        }
    }

    #[tokio::test]
    async fn test_explicit_steps_run_in_order() {
        let backend = MockBackend::default();
        let engine = ScenarioEngine::new(&backend);

        let request = explicit_request(vec![
            step("add_bridge", &[("name", ParamValue::Str("br0".to_string()))]),
            step(
                "add_port",
                &[
                    ("bridge", ParamValue::Str("br0".to_string())),
                    ("portName", ParamValue::Str("eth1".to_string())),
                ],
            ),
        ]);

        let report = engine.apply(&request).await.unwrap();
        assert!(report.success);
        assert_eq!(report.results.len(), 2);

        let calls = backend.calls();
        assert_eq!(calls[0], NetworkOp::CreateBridge { name: "br0".to_string() });
        assert_eq!(
            calls[1],
            NetworkOp::AddPort {
                bridge: "br0".to_string(),
                port: "eth1".to_string(),
                port_type: String::new(),
            }
        );
    }

    #[tokio::test]
    async fn test_failed_step_does_not_abort_the_rest() {
        let backend = MockBackend::failing_on(&[1]);
        let engine = ScenarioEngine::new(&backend);

        let request = explicit_request(vec![
            step("add_bridge", &[("name", ParamValue::Str("br0".to_string()))]),
            step("add_bridge", &[("name", ParamValue::Str("br1".to_string()))]),
            step("create_netns", &[("name", ParamValue::Str("ns0".to_string()))]),
        ]);

        let report = engine.apply(&request).await.unwrap();
        assert!(!report.success);
        assert_eq!(report.results.len(), 3);
        assert!(report.results[0].success);
        assert!(!report.results[1].success);
        assert!(
            report.results[1]
                .error
                .as_deref()
                .unwrap()
                .contains("does not exist")
        );
        assert!(report.results[2].success);
        // the failing step never stops later invocations
        assert_eq!(backend.calls().len(), 3);
    }

    #[tokio::test]
    async fn test_unsupported_action_fails_step_without_invoking_backend() {
        let backend = MockBackend::default();
        let engine = ScenarioEngine::new(&backend);

        let request = explicit_request(vec![
            step("teleport_bridge", &[]),
            step("add_bridge", &[("name", ParamValue::Str("br0".to_string()))]),
        ]);

        let report = engine.apply(&request).await.unwrap();
        assert!(!report.success);
        assert_eq!(
            report.results[0].error.as_deref(),
            Some("unsupported action: teleport_bridge")
        );
        assert!(report.results[0].output.is_none());
        assert!(report.results[1].success);
        assert_eq!(backend.calls().len(), 1);
    }

    #[tokio::test]
    async fn test_template_resolution_and_override_broadcast() {
        let backend = MockBackend::default();
        let engine = ScenarioEngine::new(&backend);

        let request = ScenarioRequest {
            scenario: Some("vxlan_vlan_isolation".to_string()),
            steps: Vec::new(),
            override_params: Some(HashMap::from([(
                "tag".to_string(),
                ParamValue::Int(200),
            )])),
        };

        let report = engine.apply(&request).await.unwrap();
        assert!(report.success);
        assert_eq!(report.results.len(), 4);

        // the override lands in every step's bag; only set_port_vlan reads it
        let calls = backend.calls();
        assert!(matches!(
            &calls[2],
            NetworkOp::SetPortVlanTag { port, tag: 200 } if port == "vnet0"
        ));
        assert_eq!(calls[0], NetworkOp::CreateBridge { name: "br-int".to_string() });
    }

    #[tokio::test]
    async fn test_explicit_steps_win_over_template_name() {
        let backend = MockBackend::default();
        let engine = ScenarioEngine::new(&backend);

        let request = ScenarioRequest {
            scenario: Some("patch_trunk".to_string()),
            steps: vec![step(
                "delete_bridge",
                &[("name", ParamValue::Str("br9".to_string()))],
            )],
            override_params: None,
        };

        let report = engine.apply(&request).await.unwrap();
        assert_eq!(report.results.len(), 1);
        assert_eq!(
            backend.calls(),
            vec![NetworkOp::DeleteBridge { name: "br9".to_string() }]
        );
    }

    #[tokio::test]
    async fn test_empty_request_is_rejected() {
        let backend = MockBackend::default();
        let engine = ScenarioEngine::new(&backend);

        let err = engine
            .apply(&ScenarioRequest::default())
            .await
            .expect_err("empty request must fail");
        assert_eq!(err, ScenarioError::EmptyRequest);

        // an empty template name is as good as no name
        let request = ScenarioRequest {
            scenario: Some(String::new()),
            ..ScenarioRequest::default()
        };
        let err = engine.apply(&request).await.expect_err("must fail");
        assert_eq!(err, ScenarioError::EmptyRequest);
        assert!(backend.calls().is_empty());
    }

    #[tokio::test]
    async fn test_unknown_template_is_rejected() {
        let backend = MockBackend::default();
        let engine = ScenarioEngine::new(&backend);

        let request = ScenarioRequest {
            scenario: Some("does_not_exist".to_string()),
            ..ScenarioRequest::default()
        };
        let err = engine.apply(&request).await.expect_err("must fail");
        assert_eq!(
            err,
            ScenarioError::UnknownTemplate {
                name: "does_not_exist".to_string()
            }
        );
        assert!(backend.calls().is_empty());
    }

    #[tokio::test]
    async fn test_backend_output_lands_in_step_result() {
        let backend = MockBackend {
            output: Some("br0".to_string()),
            ..MockBackend::default()
        };
        let engine = ScenarioEngine::new(&backend);

        let request = explicit_request(vec![step(
            "add_bridge",
            &[("name", ParamValue::Str("br0".to_string()))],
        )]);

        let report = engine.apply(&request).await.unwrap();
        assert_eq!(report.results[0].output.as_deref(), Some("br0"));
    }

    #[tokio::test]
    async fn test_overrides_are_ignored_for_explicit_steps() {
        let backend = MockBackend::default();
        let engine = ScenarioEngine::new(&backend);

        let request = ScenarioRequest {
            scenario: None,
            steps: vec![step(
                "set_port_vlan",
                &[
                    ("portName", ParamValue::Str("vnet0".to_string())),
                    ("tag", ParamValue::Int(100)),
                ],
            )],
            override_params: Some(HashMap::from([(
                "tag".to_string(),
                ParamValue::Int(999),
            )])),
        };

        engine.apply(&request).await.unwrap();
        assert!(matches!(
            backend.calls()[0],
            NetworkOp::SetPortVlanTag { tag: 100, .. }
        ));
    }
}
