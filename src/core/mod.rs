pub mod date_math;
pub mod engine;
pub mod estimator;
pub mod form;
pub mod reporter;
pub mod summary;

pub use crate::domain::model::{CalendarDate, EstimationInput, EstimationResult, Report};
pub use crate::domain::ports::InputProvider;
pub use crate::utils::error::Result;
