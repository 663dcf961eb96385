//! Bridge lifecycle and bridge-level feature toggles.
//!
//! Monitoring attachments (NetFlow, sFlow, IPFIX) follow the `ovs-vsctl`
//! two-phase pattern: point the bridge column at a fresh row id, then create
//! the row in the same transaction.

use std::collections::HashMap;

use ovsman_shared::errors::OvsResult;

use super::{OvsManager, sorted_pairs};

impl OvsManager {
    pub async fn create_bridge(&self, name: &str) -> OvsResult<Option<String>> {
        self.runner.run("ovs-vsctl", ["add-br", name]).await
    }

    pub async fn delete_bridge(&self, name: &str) -> OvsResult<Option<String>> {
        self.runner.run("ovs-vsctl", ["del-br", name]).await
    }

    pub async fn list_bridges(&self) -> OvsResult<Vec<String>> {
        let output = self.runner.run("ovs-vsctl", ["list-br"]).await?;
        Ok(split_lines(output))
    }

    pub async fn set_netflow(
        &self,
        bridge: &str,
        target: &str,
        engine_id: i64,
    ) -> OvsResult<Option<String>> {
        self.runner
            .run("ovs-vsctl", netflow_args(bridge, target, engine_id))
            .await
    }

    pub async fn set_sflow(
        &self,
        bridge: &str,
        targets: &[String],
        sampling: i64,
        header: i64,
        polling: i64,
        agent: &str,
    ) -> OvsResult<Option<String>> {
        self.runner
            .run(
                "ovs-vsctl",
                sflow_args(bridge, targets, sampling, header, polling, agent),
            )
            .await
    }

    pub async fn set_ipfix(
        &self,
        bridge: &str,
        targets: &[String],
        sampling: i64,
        obs_domain_id: i64,
        obs_point_id: i64,
    ) -> OvsResult<Option<String>> {
        self.runner
            .run(
                "ovs-vsctl",
                ipfix_args(bridge, targets, sampling, obs_domain_id, obs_point_id),
            )
            .await
    }

    pub async fn set_stp(&self, bridge: &str, enable: bool) -> OvsResult<Option<String>> {
        self.set_bridge_flag(bridge, "stp_enable", enable).await
    }

    pub async fn set_rstp(&self, bridge: &str, enable: bool) -> OvsResult<Option<String>> {
        self.set_bridge_flag(bridge, "rstp_enable", enable).await
    }

    pub async fn set_mcast_snooping(&self, bridge: &str, enable: bool) -> OvsResult<Option<String>> {
        self.set_bridge_flag(bridge, "mcast_snooping_enable", enable)
            .await
    }

    pub async fn set_datapath_type(
        &self,
        bridge: &str,
        datapath_type: &str,
    ) -> OvsResult<Option<String>> {
        self.runner
            .run(
                "ovs-vsctl",
                [
                    "set".to_string(),
                    "Bridge".to_string(),
                    bridge.to_string(),
                    format!("datapath_type={datapath_type}"),
                ],
            )
            .await
    }

    async fn set_bridge_flag(
        &self,
        bridge: &str,
        column: &str,
        enable: bool,
    ) -> OvsResult<Option<String>> {
        self.runner
            .run(
                "ovs-vsctl",
                [
                    "set".to_string(),
                    "Bridge".to_string(),
                    bridge.to_string(),
                    format!("{column}={enable}"),
                ],
            )
            .await
    }
}

pub(crate) fn split_lines(output: Option<String>) -> Vec<String> {
    output
        .map(|text| text.lines().map(|line| line.trim().to_string()).collect())
        .unwrap_or_default()
}

fn netflow_args(bridge: &str, target: &str, engine_id: i64) -> Vec<String> {
    let mut args = vec![
        "set".to_string(),
        "Bridge".to_string(),
        bridge.to_string(),
        "netflow=@nf".to_string(),
        "--".to_string(),
        "--id=@nf".to_string(),
        "create".to_string(),
        "NetFlow".to_string(),
        format!("targets=[\"{target}\"]"),
    ];
    if engine_id != 0 {
        args.push(format!("engine_id={engine_id}"));
    }
    args
}

fn sflow_args(
    bridge: &str,
    targets: &[String],
    sampling: i64,
    header: i64,
    polling: i64,
    agent: &str,
) -> Vec<String> {
    let mut args = vec![
        "set".to_string(),
        "Bridge".to_string(),
        bridge.to_string(),
        "sflow=@sf".to_string(),
        "--".to_string(),
        "--id=@sf".to_string(),
        "create".to_string(),
        "sFlow".to_string(),
        format!("targets=[{}]", quoted_list(targets)),
    ];
    if sampling != 0 {
        args.push(format!("sampling={sampling}"));
    }
    if header != 0 {
        args.push(format!("header={header}"));
    }
    if polling != 0 {
        args.push(format!("polling={polling}"));
    }
    if !agent.is_empty() {
        args.push(format!("agent={agent}"));
    }
    args
}

fn ipfix_args(
    bridge: &str,
    targets: &[String],
    sampling: i64,
    obs_domain_id: i64,
    obs_point_id: i64,
) -> Vec<String> {
    let mut args = vec![
        "set".to_string(),
        "Bridge".to_string(),
        bridge.to_string(),
        "ipfix=@ipf".to_string(),
        "--".to_string(),
        "--id=@ipf".to_string(),
        "create".to_string(),
        "IPFIX".to_string(),
        format!("targets=[{}]", quoted_list(targets)),
    ];
    if sampling != 0 {
        args.push(format!("sampling={sampling}"));
    }
    if obs_domain_id != 0 {
        args.push(format!("obs_domain_id={obs_domain_id}"));
    }
    if obs_point_id != 0 {
        args.push(format!("obs_point_id={obs_point_id}"));
    }
    args
}

fn quoted_list(items: &[String]) -> String {
    items
        .iter()
        .map(|item| format!("\"{item}\""))
        .collect::<Vec<_>>()
        .join(",")
}

pub(crate) fn joined_pairs(map: &HashMap<String, String>) -> String {
    sorted_pairs(map)
        .into_iter()
        .map(|(k, v)| format!("{k}={v}"))
        .collect::<Vec<_>>()
        .join(",")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_netflow_args_with_engine_id() {
        let args = netflow_args("br0", "10.0.0.5:2055", 7);
        assert_eq!(
            args,
            vec![
                "set",
                "Bridge",
                "br0",
                "netflow=@nf",
                "--",
                "--id=@nf",
                "create",
                "NetFlow",
                "targets=[\"10.0.0.5:2055\"]",
                "engine_id=7",
            ]
        );
    }

    #[test]
    fn test_netflow_args_omits_zero_engine_id() {
        let args = netflow_args("br0", "10.0.0.5:2055", 0);
        assert!(!args.iter().any(|a| a.starts_with("engine_id")));
    }

    #[test]
    fn test_sflow_args_quotes_all_targets() {
        let targets = vec!["10.0.0.1:6343".to_string(), "10.0.0.2:6343".to_string()];
        let args = sflow_args("br0", &targets, 64, 128, 10, "eth0");
        assert_eq!(
            args[8],
            "targets=[\"10.0.0.1:6343\",\"10.0.0.2:6343\"]".to_string()
        );
        assert!(args.contains(&"sampling=64".to_string()));
        assert!(args.contains(&"header=128".to_string()));
        assert!(args.contains(&"polling=10".to_string()));
        assert!(args.contains(&"agent=eth0".to_string()));
    }

    #[test]
    fn test_sflow_args_skips_defaults() {
        let targets = vec!["10.0.0.1:6343".to_string()];
        let args = sflow_args("br0", &targets, 0, 0, 0, "");
        assert_eq!(args.len(), 9);
    }

    #[test]
    fn test_ipfix_args_full() {
        let targets = vec!["192.168.1.10:4739".to_string()];
        let args = ipfix_args("br0", &targets, 32, 100, 200);
        assert!(args.contains(&"sampling=32".to_string()));
        assert!(args.contains(&"obs_domain_id=100".to_string()));
        assert!(args.contains(&"obs_point_id=200".to_string()));
    }

    #[test]
    fn test_split_lines_handles_empty_output() {
        assert!(split_lines(None).is_empty());
        assert_eq!(
            split_lines(Some("br0\nbr1".to_string())),
            vec!["br0".to_string(), "br1".to_string()]
        );
    }

    #[test]
    fn test_joined_pairs_sorts_keys() {
        let mut map = HashMap::new();
        map.insert("zeta".to_string(), "1".to_string());
        map.insert("alpha".to_string(), "2".to_string());
        assert_eq!(joined_pairs(&map), "alpha=2,zeta=1");
    }
}
