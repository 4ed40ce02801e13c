//! papernet Settings Crate
//!
//! Net job files: everything needed to generate one dieline, stored as TOML
//! or JSON with angles in degrees.

pub mod config;
pub mod error;

pub use config::{
    AscendantTabSettings, BaseTabSettings, BendGuideValleySettings, DashSelector, NetJob,
};
pub use error::{Result, SettingsError};
