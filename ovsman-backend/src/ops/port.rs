//! Port management: plain ports, VLAN attributes, patch and tunnel ports,
//! interface-level monitoring (BFD/CFM) and QoS.

use std::collections::HashMap;

use ovsman_shared::errors::OvsResult;

use super::bridge::{joined_pairs, split_lines};
use super::{OvsManager, sorted_pairs};

impl OvsManager {
    pub async fn add_port(
        &self,
        bridge: &str,
        port: &str,
        port_type: &str,
    ) -> OvsResult<Option<String>> {
        self.runner
            .run("ovs-vsctl", add_port_args(bridge, port, port_type))
            .await
    }

    pub async fn delete_port(&self, bridge: &str, port: &str) -> OvsResult<Option<String>> {
        self.runner
            .run("ovs-vsctl", ["del-port", bridge, port])
            .await
    }

    pub async fn list_ports(&self, bridge: &str) -> OvsResult<Vec<String>> {
        let output = self.runner.run("ovs-vsctl", ["list-ports", bridge]).await?;
        Ok(split_lines(output))
    }

    pub async fn set_port_vlan_tag(&self, port: &str, tag: i64) -> OvsResult<Option<String>> {
        self.runner
            .run(
                "ovs-vsctl",
                [
                    "set".to_string(),
                    "port".to_string(),
                    port.to_string(),
                    format!("tag={tag}"),
                ],
            )
            .await
    }

    pub async fn set_port_vlan_mode(&self, port: &str, mode: &str) -> OvsResult<Option<String>> {
        self.runner
            .run(
                "ovs-vsctl",
                [
                    "set".to_string(),
                    "port".to_string(),
                    port.to_string(),
                    format!("vlan_mode={mode}"),
                ],
            )
            .await
    }

    pub async fn set_port_trunks(&self, port: &str, trunks: &[i64]) -> OvsResult<Option<String>> {
        let joined = trunks
            .iter()
            .map(|t| t.to_string())
            .collect::<Vec<_>>()
            .join(",");
        self.runner
            .run(
                "ovs-vsctl",
                [
                    "set".to_string(),
                    "port".to_string(),
                    port.to_string(),
                    format!("trunks={joined}"),
                ],
            )
            .await
    }

    pub async fn add_patch_port(
        &self,
        bridge: &str,
        port: &str,
        peer: &str,
    ) -> OvsResult<Option<String>> {
        self.runner
            .run(
                "ovs-vsctl",
                [
                    "add-port".to_string(),
                    bridge.to_string(),
                    port.to_string(),
                    "--".to_string(),
                    "set".to_string(),
                    "interface".to_string(),
                    port.to_string(),
                    "type=patch".to_string(),
                    format!("options:peer={peer}"),
                ],
            )
            .await
    }

    pub async fn add_tunnel_port(
        &self,
        bridge: &str,
        port: &str,
        tunnel_type: &str,
        options: &HashMap<String, String>,
    ) -> OvsResult<Option<String>> {
        self.runner
            .run(
                "ovs-vsctl",
                tunnel_port_args(bridge, port, tunnel_type, options),
            )
            .await
    }

    pub async fn set_bfd(
        &self,
        port: &str,
        options: &HashMap<String, String>,
    ) -> OvsResult<Option<String>> {
        self.runner
            .run("ovs-vsctl", interface_kv_args(port, "bfd", options))
            .await
    }

    pub async fn set_cfm(
        &self,
        port: &str,
        options: &HashMap<String, String>,
    ) -> OvsResult<Option<String>> {
        self.runner
            .run("ovs-vsctl", interface_kv_args(port, "cfm", options))
            .await
    }

    pub async fn set_qos(
        &self,
        port: &str,
        qos_type: &str,
        max_rate: &str,
        queues: &HashMap<String, String>,
    ) -> OvsResult<Option<String>> {
        self.runner
            .run("ovs-vsctl", qos_args(port, qos_type, max_rate, queues))
            .await
    }

    pub async fn set_hfsc_qos(
        &self,
        port: &str,
        max_rate: &str,
        queues: &HashMap<String, String>,
    ) -> OvsResult<Option<String>> {
        self.runner
            .run("ovs-vsctl", qos_args(port, "hfsc", max_rate, queues))
            .await
    }
}

fn add_port_args(bridge: &str, port: &str, port_type: &str) -> Vec<String> {
    let mut args = vec![
        "add-port".to_string(),
        bridge.to_string(),
        port.to_string(),
    ];
    if !port_type.is_empty() {
        args.extend([
            "--".to_string(),
            "set".to_string(),
            "Interface".to_string(),
            port.to_string(),
            format!("type={port_type}"),
        ]);
    }
    args
}

fn tunnel_port_args(
    bridge: &str,
    port: &str,
    tunnel_type: &str,
    options: &HashMap<String, String>,
) -> Vec<String> {
    let mut args = vec![
        "add-port".to_string(),
        bridge.to_string(),
        port.to_string(),
        "--".to_string(),
        "set".to_string(),
        "interface".to_string(),
        port.to_string(),
        format!("type={tunnel_type}"),
    ];
    for (key, value) in sorted_pairs(options) {
        args.push(format!("options:{key}={value}"));
    }
    args
}

fn interface_kv_args(port: &str, column: &str, options: &HashMap<String, String>) -> Vec<String> {
    let mut args = vec![
        "set".to_string(),
        "interface".to_string(),
        port.to_string(),
    ];
    for (key, value) in sorted_pairs(options) {
        args.push(format!("{column}:{key}={value}"));
    }
    args
}

fn qos_args(
    port: &str,
    qos_type: &str,
    max_rate: &str,
    queues: &HashMap<String, String>,
) -> Vec<String> {
    let mut args = vec![
        "set".to_string(),
        "port".to_string(),
        port.to_string(),
        "qos=@newqos".to_string(),
        "--".to_string(),
        "--id=@newqos".to_string(),
        "create".to_string(),
        "qos".to_string(),
        format!("type={qos_type}"),
    ];
    if !max_rate.is_empty() {
        args.push(format!("other-config:max-rate={max_rate}"));
    }
    if !queues.is_empty() {
        args.push(format!("queues={}", joined_pairs(queues)));
    }
    args
}
