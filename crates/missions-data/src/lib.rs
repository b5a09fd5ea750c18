//! Data layer for Space Missions.
//!
//! Loads the launch CSV into the canonical [`LaunchTable`], provides the
//! generic aggregation views over it, and assembles the per-section reports
//! consumed by the dashboard and the JSON export.
//!
//! [`LaunchTable`]: missions_core::models::LaunchTable

pub mod analysis;
pub mod reader;
pub mod sections;
pub mod views;

pub use missions_core as core;
