//! Built-in scenario templates.
//!
//! The store is populated once at construction and never mutated; resolving
//! a template copies its steps so callers can merge overrides freely.

use std::collections::HashMap;

use ovsman_shared::params::{ParamMap, ParamValue};
use ovsman_shared::scenario::{ScenarioStep, ScenarioTemplate};

/// Immutable registry of named step sequences.
#[derive(Debug, Clone)]
pub struct TemplateStore {
    templates: HashMap<String, ScenarioTemplate>,
}

impl TemplateStore {
    /// Store holding the built-in templates.
    pub fn builtin() -> Self {
        let templates = [vxlan_vlan_isolation(), patch_trunk()]
            .into_iter()
            .map(|template| (template.name.clone(), template))
            .collect();
        Self { templates }
    }

    pub fn get(&self, name: &str) -> Option<&ScenarioTemplate> {
        self.templates.get(name)
    }

    /// Template names in stable (sorted) order.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.templates.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn iter(&self) -> impl Iterator<Item = &ScenarioTemplate> {
        self.templates.values()
    }
}

fn step(action: &str, pairs: &[(&str, ParamValue)]) -> ScenarioStep {
    let params: ParamMap = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.clone()))
        .collect();
    ScenarioStep::new(action, params)
}

/// Integration bridge with a VLAN-tagged internal port and a bonded uplink.
fn vxlan_vlan_isolation() -> ScenarioTemplate {
    ScenarioTemplate {
        name: "vxlan_vlan_isolation".to_string(),
        steps: vec![
            step("add_bridge", &[("name", ParamValue::Str("br-int".to_string()))]),
            step(
                "add_port",
                &[
                    ("bridge", ParamValue::Str("br-int".to_string())),
                    ("portName", ParamValue::Str("vnet0".to_string())),
                    ("type", ParamValue::Str("internal".to_string())),
                ],
            ),
            step(
                "set_port_vlan",
                &[
                    ("portName", ParamValue::Str("vnet0".to_string())),
                    ("tag", ParamValue::Int(100)),
                ],
            ),
            step(
                "add_bond",
                &[
                    ("bridge", ParamValue::Str("br-int".to_string())),
                    ("bondName", ParamValue::Str("bond0".to_string())),
                    (
                        "slaves",
                        ParamValue::List(vec![
                            ParamValue::Str("eth0".to_string()),
                            ParamValue::Str("eth1".to_string()),
                        ]),
                    ),
                    ("bondMode", ParamValue::Str("balance-tcp".to_string())),
                ],
            ),
        ],
    }
}

/// Two bridges joined by mutually-peered patch ports, one side trunked.
fn patch_trunk() -> ScenarioTemplate {
    ScenarioTemplate {
        name: "patch_trunk".to_string(),
        steps: vec![
            step("add_bridge", &[("name", ParamValue::Str("br0".to_string()))]),
            step("add_bridge", &[("name", ParamValue::Str("br1".to_string()))]),
            step(
                "add_patch_port",
                &[
                    ("bridge", ParamValue::Str("br0".to_string())),
                    ("portName", ParamValue::Str("patch0".to_string())),
                    ("peer", ParamValue::Str("patch1".to_string())),
                ],
            ),
            step(
                "add_patch_port",
                &[
                    ("bridge", ParamValue::Str("br1".to_string())),
                    ("portName", ParamValue::Str("patch1".to_string())),
                    ("peer", ParamValue::Str("patch0".to_string())),
                ],
            ),
            step(
                "set_port_vlan_mode",
                &[
                    ("portName", ParamValue::Str("patch0".to_string())),
                    ("vlanMode", ParamValue::Str("trunk".to_string())),
                ],
            ),
        ],
    }
}
