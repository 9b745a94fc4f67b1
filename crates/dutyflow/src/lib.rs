//! DutyFlow core: duty drawback eligibility analysis for import/export
//! shipment records.
//!
//! The pipeline is a single deterministic pass over in-memory tabular data:
//! parse and normalize the uploaded rows, classify each import against the
//! statutory eligibility window, pair eligible imports with qualifying
//! exports, compute refund amounts, and aggregate the results into a
//! summary. The core never touches the filesystem or a database; callers
//! hand it rows and receive fresh records plus a summary back.

pub mod config;
pub mod error;
pub mod telemetry;
pub mod workflows;
