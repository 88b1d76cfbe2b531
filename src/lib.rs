pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::CliConfig;

pub use crate::config::toml_config::TomlConfig;
pub use crate::core::{engine::EstimationEngine, form::RawForm};
pub use crate::domain::model::{
    CalendarDate, EstimationInput, EstimationResult, GestationalAge, Report, TransferProtocol,
    Trimester, UltrasoundMeasurement,
};
pub use crate::utils::error::{EstimatorError, Result};
