//! Terminal UI layer for Space Missions.
//!
//! Provides themes, the header and sidebar components, chart and table
//! renderers for section reports, and the main application event loop built
//! on top of [`ratatui`].

pub mod app;
pub mod chart_view;
pub mod components;
pub mod table_view;
pub mod themes;

pub use missions_core as core;
