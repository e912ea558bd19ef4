//! Common types and utilities for the esdown JavaScript downleveler.
//!
//! This crate provides foundational types used across all esdown crates:
//! - Source ranges (`TextRange`) expressed in byte offsets
//! - Line/column mapping for diagnostics (`LineMap`, `Position`)
//! - Diagnostics (`Diagnostic`, `DiagnosticCategory`, message table)
//! - Comment ranges collected by the scanner
//! - Centralized limits and thresholds

// Span - Source location tracking (byte offsets)
pub mod span;
pub use span::TextRange;

// Position/line-column types for source locations
pub mod position;
pub use position::{LineMap, Position};

// Diagnostics and message templates
pub mod diagnostics;
pub use diagnostics::{Diagnostic, DiagnosticCategory, DiagnosticMessage};

// Comment ranges
pub mod comments;
pub use comments::CommentRange;

// Centralized limits and thresholds
pub mod limits;
