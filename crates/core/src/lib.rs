//! # Strata Core
//!
//! The registry and composition engine behind Strata. A catalog of prompt
//! fragments is organised in three levels:
//!
//! ```text
//! Pipeline ──▶ Stage ──▶ Strategy
//! (workflow)   (phase)   (prompt fragment)
//! ```
//!
//! An agent walks the hierarchy top-down through the [`Orchestrator`]
//! (pipelines, then stages, then strategies) and finally asks for a composed
//! prompt built from an ordered list of strategy ids.
//!
//! ## Design Philosophy
//!
//! - Identifiers are case-insensitive: every id is uppercased when the value
//!   is constructed and every lookup key is uppercased before use.
//! - Containers hold shared `Arc` handles, never copies, so a stage can be
//!   part of several pipelines.
//! - The [`Orchestrator`] is an explicit value, not a global. Build one at
//!   startup and hand out `Arc<Orchestrator>` clones.

pub mod error;
pub mod id;
pub mod orchestrator;
pub mod pipeline;
pub mod registry;
pub mod stage;
pub mod strategy;
pub mod tool;

// Re-export key types at crate root for ergonomics
pub use error::{EntityKind, Error, RegistryError, Result, ToolError};
pub use id::Identifier;
pub use orchestrator::{CascadeRemoval, Orchestrator, RegistrySnapshot};
pub use pipeline::Pipeline;
pub use registry::{Entry, Registry};
pub use stage::Stage;
pub use strategy::Strategy;
pub use tool::{Tool, ToolCall, ToolDefinition, ToolRegistry, ToolResult};
