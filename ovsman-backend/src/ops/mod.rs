//! Network-operation provider backed by the OVS toolset.
//!
//! [`OvsManager`] exposes one method per supported operation, each translating
//! typed arguments into a single toolset invocation. The [`NetworkBackend`]
//! trait is the seam the scenario engine dispatches through, so tests can
//! substitute a recording backend without touching host state.

mod bond;
mod bridge;
mod flow;
mod mirror;
mod netns;
mod port;

use std::collections::HashMap;

use tracing::instrument;

use ovsman_shared::errors::OvsResult;
use ovsman_shared::ops::NetworkOp;

use crate::runner::CommandRunner;

/// Capability set consumed by the scenario engine.
///
/// Each invocation applies exactly one network operation and reports either
/// the operation's output or the provider's error text. Implementations do
/// not retry and do not roll back.
#[allow(async_fn_in_trait)]
pub trait NetworkBackend {
    async fn invoke(&self, op: NetworkOp) -> OvsResult<Option<String>>;
}

/// Production provider driving `ovs-vsctl`, `ovs-ofctl` and `ip`.
#[derive(Debug, Clone, Default)]
pub struct OvsManager {
    pub(crate) runner: CommandRunner,
}

impl OvsManager {
    pub fn new() -> Self {
        Self {
            runner: CommandRunner::new(),
        }
    }
}

/// Key-sorted view of an option map, so generated commands are stable.
pub(crate) fn sorted_pairs(map: &HashMap<String, String>) -> Vec<(&String, &String)> {
    let mut pairs: Vec<_> = map.iter().collect();
    pairs.sort_by_key(|(k, _)| k.as_str());
    pairs
}

impl NetworkBackend for OvsManager {
    #[instrument(skip(self))]
    async fn invoke(&self, op: NetworkOp) -> OvsResult<Option<String>> {
        match op {
            NetworkOp::CreateBridge { name } => self.create_bridge(&name).await,
            NetworkOp::DeleteBridge { name } => self.delete_bridge(&name).await,
            NetworkOp::AddPort {
                bridge,
                port,
                port_type,
            } => self.add_port(&bridge, &port, &port_type).await,
            NetworkOp::DeletePort { bridge, port } => self.delete_port(&bridge, &port).await,
            NetworkOp::SetPortVlanTag { port, tag } => self.set_port_vlan_tag(&port, tag).await,
            NetworkOp::SetPortVlanMode { port, mode } => {
                self.set_port_vlan_mode(&port, &mode).await
            }
            NetworkOp::SetPortTrunks { port, trunks } => {
                self.set_port_trunks(&port, &trunks).await
            }
            NetworkOp::AddPatchPort { bridge, port, peer } => {
                self.add_patch_port(&bridge, &port, &peer).await
            }
            NetworkOp::AddBond {
                bridge,
                bond,
                slaves,
                mode,
                lacp,
                other_options,
            } => {
                self.add_bond(&bridge, &bond, &slaves, &mode, &lacp, &other_options)
                    .await
            }
            NetworkOp::SetBfd { port, options } => self.set_bfd(&port, &options).await,
            NetworkOp::SetCfm { port, options } => self.set_cfm(&port, &options).await,
            NetworkOp::SetQos {
                port,
                qos_type,
                max_rate,
                queues,
            } => self.set_qos(&port, &qos_type, &max_rate, &queues).await,
            NetworkOp::SetHfscQos {
                port,
                max_rate,
                queues,
            } => self.set_hfsc_qos(&port, &max_rate, &queues).await,
            NetworkOp::AddTunnelPort {
                bridge,
                port,
                tunnel_type,
                options,
            } => {
                self.add_tunnel_port(&bridge, &port, &tunnel_type, &options)
                    .await
            }
            NetworkOp::SetNetflow {
                bridge,
                target,
                engine_id,
            } => self.set_netflow(&bridge, &target, engine_id).await,
            NetworkOp::SetSflow {
                bridge,
                targets,
                sampling,
                header,
                polling,
                agent,
            } => {
                self.set_sflow(&bridge, &targets, sampling, header, polling, &agent)
                    .await
            }
            NetworkOp::SetStp { bridge, enable } => self.set_stp(&bridge, enable).await,
            NetworkOp::SetRstp { bridge, enable } => self.set_rstp(&bridge, enable).await,
            NetworkOp::SetIpfix {
                bridge,
                targets,
                sampling,
                obs_domain_id,
                obs_point_id,
            } => {
                self.set_ipfix(&bridge, &targets, sampling, obs_domain_id, obs_point_id)
                    .await
            }
            NetworkOp::SetMcastSnooping { bridge, enable } => {
                self.set_mcast_snooping(&bridge, enable).await
            }
            NetworkOp::SetDatapathType {
                bridge,
                datapath_type,
            } => self.set_datapath_type(&bridge, &datapath_type).await,
            NetworkOp::AddMirror {
                bridge,
                name,
                select_src_ports,
                select_dst_ports,
                select_vlan,
                output_port,
                output_vlan,
                select_all,
            } => {
                self.add_mirror(
                    &bridge,
                    &name,
                    &select_src_ports,
                    &select_dst_ports,
                    select_vlan,
                    &output_port,
                    output_vlan,
                    select_all,
                )
                .await
            }
            NetworkOp::DeleteMirror { bridge, name } => self.delete_mirror(&bridge, &name).await,
            NetworkOp::AddFlow { bridge, flow } => self.add_flow(&bridge, &flow).await,
            NetworkOp::DeleteFlow { bridge, match_expr } => {
                self.delete_flow(&bridge, &match_expr).await
            }
            NetworkOp::CreateNetns { name } => self.create_netns(&name).await,
            NetworkOp::DeleteNetns { name } => self.delete_netns(&name).await,
        }
    }
}
