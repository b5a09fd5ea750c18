//! Reusable widgets shared by the dashboard views.

pub mod header;
pub mod sidebar;
