//! Scenario execution: action registry, built-in templates, and the
//! sequential step engine.

pub mod engine;
pub mod registry;
pub mod templates;

pub use engine::ScenarioEngine;
pub use registry::ActionKind;
pub use templates::TemplateStore;
