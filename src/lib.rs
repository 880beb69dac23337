//! # tidyts
//!
//! Deterministic member and declaration organizer for TypeScript sources.
//!
//! The engine reorders the declarations of a source file — imports, top-level
//! types, and the members of classes and interfaces — into a configurable
//! order, optionally wrapping groups in `// #region` markers, while
//! preserving every byte of original code, comments and decorators.
//!
//! ## Module Structure (dependency order)
//!
//! ```text
//! project   → file and directory operations
//!   ↓
//! organize  → three-pass reorganization orchestrator
//!   ↓
//! rewrite   → span rendering, region and line passes
//!   ↓
//! ordering  → order resolution, group construction
//!   ↓
//! members   → fine-grained member taxonomy
//! config    → configuration model
//!   ↓
//! syntax    → parse seam + typed declaration model
//!   ↓
//! base      → span primitives
//! ```
//!
//! ## Usage
//!
//! ```ignore
//! use tidyts::{Configuration, organize_source};
//!
//! let organized = organize_source(&source_text, &Configuration::default());
//! ```
//!
//! The engine never fails: a file it cannot analyze is returned unchanged.

/// Span primitives
pub mod base;

/// Configuration model, JSON-encoded
pub mod config;

/// Member taxonomy: category table and classification
pub mod members;

/// Ordering resolution and group construction
pub mod ordering;

/// Reorganization orchestrator
pub mod organize;

/// File and directory operations
pub mod project;

/// Span rendering and line passes
pub mod rewrite;

/// Parse seam and typed declaration model
pub mod syntax;

// Re-export the public surface
pub use config::{ConfigError, Configuration, MemberOrderEntry};
pub use members::MemberType;
pub use organize::organize_source;
pub use project::{ProjectError, ProjectReport, organize_file, organize_project};
pub use syntax::ParseError;
