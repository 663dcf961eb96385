//! Shared types and message definitions for ovsman.
//!
//! This crate contains the data structures shared between callers and the
//! ovsman backend: the dynamically-typed parameter values carried by scenario
//! steps, the scenario request/report wire types, the typed network-operation
//! enum consumed by the operation provider, and the common error types.
//!
//! # Key Components
//!
//! * [`ParamValue`] - Dynamically-typed step parameter with tolerant coercions
//! * [`ScenarioRequest`]/[`ScenarioReport`] - Scenario execution (request/reply)
//! * [`ScenarioStep`]/[`StepResult`] - Per-step input and outcome
//! * [`NetworkOp`] - Typed network operation dispatched to the provider
//! * [`errors`] - Error types for resolution and provider failures

pub mod errors;
pub mod ops;
pub mod params;
pub mod scenario;

pub use errors::{OvsError, ScenarioError};
pub use ops::NetworkOp;
pub use params::{ParamMap, ParamValue, merge_params};
pub use scenario::{ScenarioReport, ScenarioRequest, ScenarioStep, ScenarioTemplate, StepResult};
