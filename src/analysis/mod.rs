//! Analysis and result aggregation modules
//!
//! Combines the three feature scores into the final report:
//! - Score fusion (weighted score, verdict, confidence, anomalies)
//! - The `Scorer` entry point
//! - Result types
//! - Metadata

pub mod fusion;
pub mod metadata;
pub mod result;
pub mod scorer;
