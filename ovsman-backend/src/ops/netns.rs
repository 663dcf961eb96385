//! Network namespace lifecycle through `ip netns`.

use ovsman_shared::errors::OvsResult;

use super::OvsManager;

impl OvsManager {
    pub async fn create_netns(&self, name: &str) -> OvsResult<Option<String>> {
        self.runner.run("ip", ["netns", "add", name]).await
    }

    pub async fn delete_netns(&self, name: &str) -> OvsResult<Option<String>> {
        self.runner.run("ip", ["netns", "del", name]).await
    }

    pub async fn list_netns(&self) -> OvsResult<Vec<String>> {
        let output = self.runner.run("ip", ["netns", "list"]).await?;
        Ok(parse_netns_list(output))
    }
}

/// `ip netns list` appends state like `(id: 0)`; only the first field of
/// each line is the namespace name.
fn parse_netns_list(output: Option<String>) -> Vec<String> {
    output
        .map(|text| {
            text.lines()
                .filter_map(|line| line.split_whitespace().next())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}
