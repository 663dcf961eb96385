//! Typed network operations consumed by the operation provider.
//!
//! Every scenario action resolves to exactly one variant here, with fields
//! already coerced to their final shapes. The provider translates a variant
//! into one invocation of the external toolset (`ovs-vsctl`, `ovs-ofctl`,
//! `ip`); it never looks back into the raw parameter bag.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A single network configuration operation with typed arguments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum NetworkOp {
    CreateBridge {
        name: String,
    },
    DeleteBridge {
        name: String,
    },
    AddPort {
        bridge: String,
        port: String,
        port_type: String,
    },
    DeletePort {
        bridge: String,
        port: String,
    },
    SetPortVlanTag {
        port: String,
        tag: i64,
    },
    SetPortVlanMode {
        port: String,
        mode: String,
    },
    SetPortTrunks {
        port: String,
        trunks: Vec<i64>,
    },
    AddPatchPort {
        bridge: String,
        port: String,
        peer: String,
    },
    AddBond {
        bridge: String,
        bond: String,
        slaves: Vec<String>,
        mode: String,
        lacp: String,
        other_options: HashMap<String, String>,
    },
    SetBfd {
        port: String,
        options: HashMap<String, String>,
    },
    SetCfm {
        port: String,
        options: HashMap<String, String>,
    },
    SetQos {
        port: String,
        qos_type: String,
        max_rate: String,
        queues: HashMap<String, String>,
    },
    SetHfscQos {
        port: String,
        max_rate: String,
        queues: HashMap<String, String>,
    },
    AddTunnelPort {
        bridge: String,
        port: String,
        tunnel_type: String,
        options: HashMap<String, String>,
    },
    SetNetflow {
        bridge: String,
        target: String,
        engine_id: i64,
    },
    SetSflow {
        bridge: String,
        targets: Vec<String>,
        sampling: i64,
        header: i64,
        polling: i64,
        agent: String,
    },
    SetStp {
        bridge: String,
        enable: bool,
    },
    SetRstp {
        bridge: String,
        enable: bool,
    },
    SetIpfix {
        bridge: String,
        targets: Vec<String>,
        sampling: i64,
        obs_domain_id: i64,
        obs_point_id: i64,
    },
    SetMcastSnooping {
        bridge: String,
        enable: bool,
    },
    SetDatapathType {
        bridge: String,
        datapath_type: String,
    },
    AddMirror {
        bridge: String,
        name: String,
        select_src_ports: Vec<String>,
        select_dst_ports: Vec<String>,
        select_vlan: Option<i64>,
        output_port: String,
        output_vlan: Option<i64>,
        select_all: bool,
    },
    DeleteMirror {
        bridge: String,
        name: String,
    },
    AddFlow {
        bridge: String,
        flow: String,
    },
    DeleteFlow {
        bridge: String,
        /// OpenFlow match expression; empty deletes every flow on the bridge.
        match_expr: String,
    },
    CreateNetns {
        name: String,
    },
    DeleteNetns {
        name: String,
    },
}
