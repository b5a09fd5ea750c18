//! Core types shared by every Space Missions crate.
//!
//! Holds the launch-record model, the error type, command-line settings,
//! the country reference tables and the field normalizers used while
//! loading the dataset.

pub mod error;
pub mod formatting;
pub mod geography;
pub mod models;
pub mod normalize;
pub mod settings;

pub use error::{MissionsError, Result};
