//! Weighted scoring, adaptive cutoff moderation, and letter grading for a
//! single course batch.

pub mod config;
pub mod error;
pub mod grading;
pub mod ingest;
pub mod telemetry;
