//! Raw field values as a form would submit them, and their resolution into
//! an [`EstimationInput`].

use crate::core::date_math;
use crate::domain::model::{EstimationInput, TransferProtocol, UltrasoundMeasurement};
use crate::utils::error::{EstimatorError, Result};
use crate::utils::validation::{non_blank, parse_count};

pub const MSG_MISSING_TRANSFER: &str = "Please enter the embryo transfer date.";
pub const MSG_NO_LMP_NO_ULTRASOUND: &str =
    "Cannot calculate due date without LMP or ultrasound data.";
pub const MSG_INCOMPLETE_ULTRASOUND: &str = "Enter ultrasound date and gestational age.";
pub const MSG_MISSING_LMP: &str =
    "Enter LMP date or check 'Last menstrual period unknown or cycles irregular'.";

/// Blank strings count as unanswered.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawForm {
    pub ivf: bool,
    pub transfer_date: Option<String>,
    pub transfer_day: Option<String>,
    pub lmp: Option<String>,
    pub lmp_unknown: bool,
    pub no_ultrasound: bool,
    pub ultrasound_date: Option<String>,
    pub ultrasound_weeks: Option<String>,
    pub ultrasound_days: Option<String>,
}

impl RawForm {
    pub fn to_input(&self) -> Result<EstimationInput> {
        if self.ivf {
            return self.ivf_input();
        }
        if self.lmp_unknown {
            return self.unknown_lmp_input();
        }

        let lmp = non_blank(self.lmp.as_deref())
            .ok_or_else(|| EstimatorError::missing("lmp", MSG_MISSING_LMP))?;
        let lmp = date_math::parse(lmp)?;

        let ultrasound = if self.no_ultrasound {
            None
        } else {
            self.complete_ultrasound()?
        };
        if ultrasound.is_none() && !self.no_ultrasound && self.any_ultrasound_field() {
            tracing::warn!("⚠️ Ultrasound fields partially filled, ignoring ultrasound");
        }

        Ok(EstimationInput::Natural {
            lmp: Some(lmp),
            ultrasound,
        })
    }

    fn ivf_input(&self) -> Result<EstimationInput> {
        let transfer_date = non_blank(self.transfer_date.as_deref())
            .ok_or_else(|| EstimatorError::missing("transfer_date", MSG_MISSING_TRANSFER))?;
        let protocol = non_blank(self.transfer_day.as_deref())
            .map(TransferProtocol::from_selector)
            .unwrap_or_default();

        Ok(EstimationInput::Ivf {
            transfer_date: Some(date_math::parse(transfer_date)?),
            protocol,
        })
    }

    fn unknown_lmp_input(&self) -> Result<EstimationInput> {
        if self.no_ultrasound {
            return Err(EstimatorError::missing("ultrasound", MSG_NO_LMP_NO_ULTRASOUND));
        }
        let ultrasound = self
            .complete_ultrasound()?
            .ok_or_else(|| EstimatorError::missing("ultrasound", MSG_INCOMPLETE_ULTRASOUND))?;

        Ok(EstimationInput::Natural {
            lmp: None,
            ultrasound: Some(ultrasound),
        })
    }

    /// `Some` only when date, weeks and days are all filled in.
    fn complete_ultrasound(&self) -> Result<Option<UltrasoundMeasurement>> {
        let (Some(date), Some(weeks), Some(days)) = (
            non_blank(self.ultrasound_date.as_deref()),
            non_blank(self.ultrasound_weeks.as_deref()),
            non_blank(self.ultrasound_days.as_deref()),
        ) else {
            return Ok(None);
        };

        let measurement = UltrasoundMeasurement::new(
            date_math::parse(date)?,
            parse_count("ultrasound.weeks", weeks)?,
            parse_count("ultrasound.days", days)?,
        )?;
        Ok(Some(measurement))
    }

    fn any_ultrasound_field(&self) -> bool {
        [
            &self.ultrasound_date,
            &self.ultrasound_weeks,
            &self.ultrasound_days,
        ]
        .iter()
        .any(|f| non_blank(f.as_deref()).is_some())
    }
}
