use anyhow::{Context, Result};
use tokio::io::AsyncReadExt;
use tracing::{debug, info};

use ovsman_shared::scenario::{ScenarioRequest, ScenarioTemplate};

use ovsman_backend::config::{CliCommand, ConfigManager};
use ovsman_backend::ops::OvsManager;
use ovsman_backend::scenario::{ScenarioEngine, TemplateStore};

#[tokio::main]
async fn main() -> Result<()> {
    let config = ConfigManager::from_cli()?;
    config.validate()?;
    config.init_logging()?;

    debug!(command = ?config.cli.command, "starting ovsman backend");

    let manager = OvsManager::new();
    match config.cli.command.clone() {
        CliCommand::Apply {
            request_file,
            pretty,
        } => apply(manager, request_file, pretty).await,
        CliCommand::Templates => {
            print_templates(&TemplateStore::builtin())?;
            Ok(())
        }
        CliCommand::ListBridges => {
            for bridge in manager.list_bridges().await? {
                println!("{bridge}");
            }
            Ok(())
        }
        CliCommand::ListPorts { bridge } => {
            for port in manager.list_ports(&bridge).await? {
                println!("{port}");
            }
            Ok(())
        }
        CliCommand::DumpFlows { bridge } => {
            if let Some(flows) = manager.dump_flows(&bridge).await? {
                println!("{flows}");
            }
            Ok(())
        }
        CliCommand::ListNetns => {
            for netns in manager.list_netns().await? {
                println!("{netns}");
            }
            Ok(())
        }
    }
}

/// Execute a scenario request and print the report; a failed report exits
/// non-zero after printing.
async fn apply(manager: OvsManager, request_file: Option<String>, pretty: bool) -> Result<()> {
    let raw = read_request(request_file.as_deref()).await?;
    let request: ScenarioRequest =
        serde_json::from_str(&raw).context("invalid scenario request JSON")?;

    let engine = ScenarioEngine::new(manager);
    let report = engine.apply(&request).await?;

    let rendered = if pretty {
        serde_json::to_string_pretty(&report)?
    } else {
        serde_json::to_string(&report)?
    };
    println!("{rendered}");

    if !report.success {
        std::process::exit(1);
    }
    info!("scenario applied");
    Ok(())
}

async fn read_request(request_file: Option<&str>) -> Result<String> {
    match request_file {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read request file {path}")),
        None => {
            let mut raw = String::new();
            tokio::io::stdin()
                .read_to_string(&mut raw)
                .await
                .context("failed to read request from stdin")?;
            Ok(raw)
        }
    }
}

fn print_templates(store: &TemplateStore) -> Result<()> {
    let mut templates: Vec<&ScenarioTemplate> = store.iter().collect();
    templates.sort_by(|a, b| a.name.cmp(&b.name));
    println!("{}", serde_json::to_string_pretty(&templates)?);
    Ok(())
}
