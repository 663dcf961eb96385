//! ovsman backend library: configuration, the OVS toolset provider, and the
//! scenario execution engine.

pub mod config;
pub mod ops;
pub mod runner;
pub mod scenario;

pub use config::{CliCommand, CliConfig, ConfigManager};
pub use ops::{NetworkBackend, OvsManager};
pub use runner::CommandRunner;
pub use scenario::{ActionKind, ScenarioEngine, TemplateStore};
