use crate::domain::model::{CalendarDate, EstimationInput};
use crate::utils::error::Result;

/// Anything that can hand the engine one estimation request.
pub trait InputProvider {
    fn estimation_input(&self) -> Result<EstimationInput>;

    /// Overrides the clock when set.
    fn today(&self) -> Result<Option<CalendarDate>> {
        Ok(None)
    }
}
