//! Link aggregation. Creating a bond is two toolset transactions: the
//! `add-bond` itself, then a `set port` for mode, LACP and extra columns
//! that is skipped entirely when nothing was requested.

use std::collections::HashMap;

use ovsman_shared::errors::OvsResult;

use super::{OvsManager, sorted_pairs};

impl OvsManager {
    pub async fn add_bond(
        &self,
        bridge: &str,
        bond: &str,
        slaves: &[String],
        mode: &str,
        lacp: &str,
        other_options: &HashMap<String, String>,
    ) -> OvsResult<Option<String>> {
        let mut args = vec![
            "add-bond".to_string(),
            bridge.to_string(),
            bond.to_string(),
        ];
        args.extend(slaves.iter().cloned());
        let output = self.runner.run("ovs-vsctl", args).await?;

        match bond_set_args(bond, mode, lacp, other_options) {
            Some(set_args) => self.runner.run("ovs-vsctl", set_args).await,
            None => Ok(output),
        }
    }
}

fn bond_set_args(
    bond: &str,
    mode: &str,
    lacp: &str,
    other_options: &HashMap<String, String>,
) -> Option<Vec<String>> {
    let mut args = vec!["set".to_string(), "port".to_string(), bond.to_string()];
    if !mode.is_empty() {
        args.push(format!("bond_mode={mode}"));
    }
    if !lacp.is_empty() {
        args.push(format!("lacp={lacp}"));
    }
    for (key, value) in sorted_pairs(other_options) {
        args.push(format!("{key}={value}"));
    }
    (args.len() > 3).then_some(args)
}
