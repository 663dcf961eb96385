//! Action registry: the closed set of step action identifiers and the
//! extraction of typed operations from untyped parameter bags.
//!
//! Extraction is tolerant by contract: a missing or wrongly-shaped parameter
//! degrades to its neutral default and the operation is still produced. The
//! only step-level rejection the registry knows is an identifier outside the
//! closed set.

use ovsman_shared::ops::NetworkOp;
use ovsman_shared::params::{
    ParamMap, bool_param, int_list_param, int_param, opt_int_param, str_list_param, str_map_param,
    str_param,
};

/// Closed enumeration of supported scenario actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionKind {
    AddBridge,
    DeleteBridge,
    AddPort,
    DeletePort,
    SetPortVlan,
    SetPortVlanMode,
    SetPortTrunks,
    AddPatchPort,
    AddBond,
    SetBfd,
    SetCfm,
    SetQos,
    SetHfscQos,
    AddTunnelPort,
    SetNetflow,
    SetSflow,
    SetStp,
    SetRstp,
    SetIpfix,
    SetMcastSnooping,
    SetDatapathType,
    AddMirror,
    DeleteMirror,
    AddFlow,
    DeleteFlow,
    CreateNetns,
    DeleteNetns,
}

impl ActionKind {
    /// Look an action identifier up in the registry.
    pub fn parse(action: &str) -> Option<Self> {
        Some(match action {
            "add_bridge" => Self::AddBridge,
            "delete_bridge" => Self::DeleteBridge,
            "add_port" => Self::AddPort,
            "delete_port" => Self::DeletePort,
            "set_port_vlan" => Self::SetPortVlan,
            "set_port_vlan_mode" => Self::SetPortVlanMode,
            "set_port_trunks" => Self::SetPortTrunks,
            "add_patch_port" => Self::AddPatchPort,
            "add_bond" => Self::AddBond,
            "set_bfd" => Self::SetBfd,
            "set_cfm" => Self::SetCfm,
            "set_qos" => Self::SetQos,
            "set_hfsc_qos" => Self::SetHfscQos,
            "add_tunnel_port" => Self::AddTunnelPort,
            "set_netflow" => Self::SetNetflow,
            "set_sflow" => Self::SetSflow,
            "set_stp" => Self::SetStp,
            "set_rstp" => Self::SetRstp,
            "set_ipfix" => Self::SetIpfix,
            "set_mcast_snooping" => Self::SetMcastSnooping,
            "set_datapath_type" => Self::SetDatapathType,
            "add_mirror" => Self::AddMirror,
            "delete_mirror" => Self::DeleteMirror,
            "add_flow" => Self::AddFlow,
            "delete_flow" => Self::DeleteFlow,
            "create_netns" => Self::CreateNetns,
            "delete_netns" => Self::DeleteNetns,
            _ => return None,
        })
    }

    /// Extract the typed operation for this action from a parameter bag.
    ///
    /// Parameter keys follow the wire convention (camelCase). Extraction is
    /// total: whatever the bag contains, an operation comes out.
    pub fn build_op(self, params: &ParamMap) -> NetworkOp {
        match self {
            Self::AddBridge => NetworkOp::CreateBridge {
                name: str_param(params, "name"),
            },
            Self::DeleteBridge => NetworkOp::DeleteBridge {
                name: str_param(params, "name"),
            },
            Self::AddPort => NetworkOp::AddPort {
                bridge: str_param(params, "bridge"),
                port: str_param(params, "portName"),
                port_type: str_param(params, "type"),
            },
            Self::DeletePort => NetworkOp::DeletePort {
                bridge: str_param(params, "bridge"),
                port: str_param(params, "portName"),
            },
            Self::SetPortVlan => NetworkOp::SetPortVlanTag {
                port: str_param(params, "portName"),
                tag: int_param(params, "tag"),
            },
            Self::SetPortVlanMode => NetworkOp::SetPortVlanMode {
                port: str_param(params, "portName"),
                mode: str_param(params, "vlanMode"),
            },
            Self::SetPortTrunks => NetworkOp::SetPortTrunks {
                port: str_param(params, "portName"),
                trunks: int_list_param(params, "trunks"),
            },
            Self::AddPatchPort => NetworkOp::AddPatchPort {
                bridge: str_param(params, "bridge"),
                port: str_param(params, "portName"),
                peer: str_param(params, "peer"),
            },
            Self::AddBond => NetworkOp::AddBond {
                bridge: str_param(params, "bridge"),
                bond: str_param(params, "bondName"),
                slaves: str_list_param(params, "slaves"),
                mode: str_param(params, "bondMode"),
                lacp: str_param(params, "lacp"),
                other_options: str_map_param(params, "otherOptions"),
            },
            Self::SetBfd => NetworkOp::SetBfd {
                port: str_param(params, "portName"),
                options: str_map_param(params, "bfd"),
            },
            Self::SetCfm => NetworkOp::SetCfm {
                port: str_param(params, "portName"),
                options: str_map_param(params, "cfm"),
            },
            Self::SetQos => NetworkOp::SetQos {
                port: str_param(params, "portName"),
                qos_type: str_param(params, "type"),
                max_rate: str_param(params, "maxRate"),
                queues: str_map_param(params, "queues"),
            },
            Self::SetHfscQos => NetworkOp::SetHfscQos {
                port: str_param(params, "portName"),
                max_rate: str_param(params, "maxRate"),
                queues: str_map_param(params, "queues"),
            },
            Self::AddTunnelPort => NetworkOp::AddTunnelPort {
                bridge: str_param(params, "bridge"),
                port: str_param(params, "portName"),
                tunnel_type: str_param(params, "type"),
                options: str_map_param(params, "options"),
            },
            Self::SetNetflow => NetworkOp::SetNetflow {
                bridge: str_param(params, "bridge"),
                target: str_param(params, "target"),
                engine_id: int_param(params, "engineID"),
            },
            Self::SetSflow => NetworkOp::SetSflow {
                bridge: str_param(params, "bridge"),
                targets: str_list_param(params, "targets"),
                sampling: int_param(params, "sampling"),
                header: int_param(params, "header"),
                polling: int_param(params, "polling"),
                agent: str_param(params, "agent"),
            },
            Self::SetStp => NetworkOp::SetStp {
                bridge: str_param(params, "bridge"),
                enable: bool_param(params, "enable"),
            },
            Self::SetRstp => NetworkOp::SetRstp {
                bridge: str_param(params, "bridge"),
                enable: bool_param(params, "enable"),
            },
            Self::SetIpfix => NetworkOp::SetIpfix {
                bridge: str_param(params, "bridge"),
                targets: str_list_param(params, "targets"),
                sampling: int_param(params, "sampling"),
                obs_domain_id: int_param(params, "obsDomainID"),
                obs_point_id: int_param(params, "obsPointID"),
            },
            Self::SetMcastSnooping => NetworkOp::SetMcastSnooping {
                bridge: str_param(params, "bridge"),
                enable: bool_param(params, "enable"),
            },
            Self::SetDatapathType => NetworkOp::SetDatapathType {
                bridge: str_param(params, "bridge"),
                datapath_type: str_param(params, "datapathType"),
            },
            Self::AddMirror => NetworkOp::AddMirror {
                bridge: str_param(params, "bridge"),
                name: str_param(params, "name"),
                select_src_ports: str_list_param(params, "selectSrcPorts"),
                select_dst_ports: str_list_param(params, "selectDstPorts"),
                select_vlan: opt_int_param(params, "selectVlan"),
                output_port: str_param(params, "outputPort"),
                output_vlan: opt_int_param(params, "outputVlan"),
                select_all: bool_param(params, "selectAll"),
            },
            Self::DeleteMirror => NetworkOp::DeleteMirror {
                bridge: str_param(params, "bridge"),
                name: str_param(params, "name"),
            },
            Self::AddFlow => NetworkOp::AddFlow {
                bridge: str_param(params, "bridge"),
                flow: str_param(params, "flow"),
            },
            Self::DeleteFlow => NetworkOp::DeleteFlow {
                bridge: str_param(params, "bridge"),
                match_expr: str_param(params, "match"),
            },
            Self::CreateNetns => NetworkOp::CreateNetns {
                name: str_param(params, "name"),
            },
            Self::DeleteNetns => NetworkOp::DeleteNetns {
                name: str_param(params, "name"),
            },
        }
    }
}
