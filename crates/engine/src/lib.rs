//! `engine` crate — workflow models, structural validation, and the
//! breadth-first execution simulator.

pub mod config;
pub mod document;
pub mod error;
pub mod graph;
pub mod models;
pub mod simulator;
pub mod validator;

pub use config::{EdgePolicy, SimulatorConfig, ValidatorConfig};
pub use document::WorkflowDocument;
pub use error::{DocumentError, EngineError, StructuralError};
pub use models::{Edge, Node, NodeKind, Position};
pub use simulator::{run_simulation, SimulationLog, SimulationResult, StepStatus, WorkflowSimulator};
pub use validator::{validate, ValidationResult, WorkflowValidator};
