//! OpenFlow table manipulation through `ovs-ofctl`.

use ovsman_shared::errors::OvsResult;

use super::OvsManager;

impl OvsManager {
    pub async fn add_flow(&self, bridge: &str, flow: &str) -> OvsResult<Option<String>> {
        self.runner
            .run("ovs-ofctl", ["add-flow", bridge, flow])
            .await
    }

    /// Deletes matching flows; an empty match expression deletes every flow
    /// on the bridge.
    pub async fn delete_flow(&self, bridge: &str, match_expr: &str) -> OvsResult<Option<String>> {
        if match_expr.is_empty() {
            self.runner.run("ovs-ofctl", ["del-flows", bridge]).await
        } else {
            self.runner
                .run("ovs-ofctl", ["del-flows", bridge, match_expr])
                .await
        }
    }

    pub async fn dump_flows(&self, bridge: &str) -> OvsResult<Option<String>> {
        self.runner.run("ovs-ofctl", ["dump-flows", bridge]).await
    }
}
