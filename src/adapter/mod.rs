// src/adapter/mod.rs
pub mod coordinator;
pub mod report;

pub use coordinator::{AnalysisCoordinator, Dashboard};
