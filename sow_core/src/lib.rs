//! # sow_core - SOW Generation Engine
//!
//! `sow_core` is the computational heart of SowGen, providing the wind
//! uplift, jurisdiction, and document-selection logic for commercial
//! roofing Statements of Work with a clean, LLM-friendly API. All inputs
//! and outputs are JSON-serializable, making it ideal for integration with
//! AI assistants via MCP or similar protocols.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: Pure functions that take input and return results
//! - **JSON-First**: All types implement Serialize/Deserialize
//! - **Rich Errors**: Structured error types, not just strings
//! - **Degrade, don't crash**: unmapped locations and implausible outputs
//!   surface as warnings on the result, never as panics
//!
//! ## Quick Start
//!
//! ```rust
//! use sow_core::pipeline::SowPipeline;
//! use sow_core::takeoff::TakeoffData;
//!
//! let mut pipeline = SowPipeline::new();
//! let report = pipeline.run(TakeoffData {
//!     project_name: "Harborview DC".to_string(),
//!     address: "4100 Commerce Pkwy, Tampa, FL 33605".to_string(),
//!     roof_area: 41300.0,
//!     building_height: Some(42.0),
//!     county: Some("Hillsborough".to_string()),
//!     state: Some("FL".to_string()),
//!     ..Default::default()
//! });
//!
//! let summary = report.summary.expect("workflow produced a summary");
//! println!("{}", serde_json::to_string_pretty(&summary).unwrap());
//! ```
//!
//! ## Modules
//!
//! - [`pipeline`] - The takeoff-to-summary workflow
//! - [`calculations`] - Wind pressure and zone geometry calculations
//! - [`asce_factors`] - ASCE 7 factors and pressure coefficients
//! - [`jurisdiction`] - County/state to code-cycle resolution
//! - [`takeoff`] - Intake form payload and validation
//! - [`roofing`] - Roofing system vocabulary (membranes, decks, attachment)
//! - [`templates`] - SOW template catalog and selection
//! - [`sections`] - Document section rule table
//! - [`summary`] - Material quantities and summary assembly
//! - [`cache`] - TTL memoization with an injectable clock
//! - [`project`] - Project container, metadata, and settings
//! - [`units`] - Type-safe unit wrappers
//! - [`errors`] - Structured error types
//! - [`file_io`] - File operations with atomic saves and locking

pub mod asce_factors;
pub mod cache;
pub mod calculations;
pub mod errors;
pub mod file_io;
pub mod jurisdiction;
pub mod pipeline;
pub mod project;
pub mod roofing;
pub mod sections;
pub mod summary;
pub mod takeoff;
pub mod templates;
pub mod units;

// Re-export commonly used types at crate root for convenience
pub use errors::{SowError, SowResult};
pub use file_io::{load_project, save_project, FileLock};
pub use pipeline::{SowPipeline, WorkflowReport, WorkflowStatus};
pub use project::{GlobalSettings, ProjectMetadata, SowProject};
