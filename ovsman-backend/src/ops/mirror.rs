//! Traffic mirroring. A mirror is created in one `ovs-vsctl` transaction
//! that attaches the new Mirror row to the bridge's `mirrors` column.

use ovsman_shared::errors::OvsResult;

use super::OvsManager;

impl OvsManager {
    #[allow(clippy::too_many_arguments)]
    pub async fn add_mirror(
        &self,
        bridge: &str,
        name: &str,
        select_src_ports: &[String],
        select_dst_ports: &[String],
        select_vlan: Option<i64>,
        output_port: &str,
        output_vlan: Option<i64>,
        select_all: bool,
    ) -> OvsResult<Option<String>> {
        self.runner
            .run(
                "ovs-vsctl",
                mirror_args(
                    bridge,
                    name,
                    select_src_ports,
                    select_dst_ports,
                    select_vlan,
                    output_port,
                    output_vlan,
                    select_all,
                ),
            )
            .await
    }

    /// Clears every mirror on the bridge; individual removal is not
    /// supported by the underlying transaction shape.
    pub async fn delete_mirror(&self, bridge: &str, _name: &str) -> OvsResult<Option<String>> {
        self.runner
            .run("ovs-vsctl", ["--", "clear", "Bridge", bridge, "mirrors"])
            .await
    }
}

#[allow(clippy::too_many_arguments)]
fn mirror_args(
    bridge: &str,
    name: &str,
    select_src_ports: &[String],
    select_dst_ports: &[String],
    select_vlan: Option<i64>,
    output_port: &str,
    output_vlan: Option<i64>,
    select_all: bool,
) -> Vec<String> {
    let mut args = vec![
        "--".to_string(),
        "set".to_string(),
        "Bridge".to_string(),
        bridge.to_string(),
        "mirrors=@m".to_string(),
        "--".to_string(),
        "--id=@m".to_string(),
        "create".to_string(),
        "Mirror".to_string(),
        format!("name={name}"),
    ];
    if select_all {
        args.push("select_all=true".to_string());
    }
    for port in select_src_ports {
        args.push(format!("select-src-port={port}"));
    }
    for port in select_dst_ports {
        args.push(format!("select-dst-port={port}"));
    }
    if let Some(vlan) = select_vlan {
        args.push(format!("select_vlan={vlan}"));
    }
    if !output_port.is_empty() {
        args.push(format!("output-port={output_port}"));
    }
    if let Some(vlan) = output_vlan {
        args.push(format!("output_vlan={vlan}"));
    }
    args
}
