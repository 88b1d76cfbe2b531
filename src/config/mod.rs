pub mod toml_config;

#[cfg(feature = "cli")]
use crate::core::date_math;
#[cfg(feature = "cli")]
use crate::core::form::RawForm;
#[cfg(feature = "cli")]
use crate::domain::model::{CalendarDate, EstimationInput};
#[cfg(feature = "cli")]
use crate::domain::ports::InputProvider;
#[cfg(feature = "cli")]
use crate::utils::error::Result;
#[cfg(feature = "cli")]
use clap::Parser;
#[cfg(feature = "cli")]
use serde::{Deserialize, Serialize};

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Default, Serialize, Deserialize, Parser)]
#[command(name = "edd-calc")]
#[command(about = "Estimate a due date from an embryo transfer or last menstrual period")]
pub struct CliConfig {
    #[arg(long, help = "Pregnancy conceived through IVF (use the transfer date)")]
    pub ivf: bool,

    #[arg(long, help = "Embryo transfer date, YYYY-MM-DD")]
    pub transfer_date: Option<String>,

    #[arg(long, help = "Embryo age at transfer: 3 or 5")]
    pub transfer_day: Option<String>,

    #[arg(long, help = "First day of the last menstrual period, YYYY-MM-DD")]
    pub lmp: Option<String>,

    #[arg(long, help = "Last menstrual period unknown or cycles irregular")]
    pub lmp_unknown: bool,

    #[arg(long, help = "No ultrasound available")]
    pub no_ultrasound: bool,

    #[arg(long, help = "Ultrasound scan date, YYYY-MM-DD")]
    pub ultrasound_date: Option<String>,

    #[arg(long, help = "Gestational age at scan: whole weeks")]
    pub ultrasound_weeks: Option<String>,

    #[arg(long, help = "Gestational age at scan: extra days (0-6)")]
    pub ultrasound_days: Option<String>,

    #[arg(long, help = "Report gestational age as of this date instead of today")]
    pub today: Option<String>,

    #[arg(long, help = "Print the report as JSON")]
    pub json: bool,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON")]
    pub log_json: bool,
}

#[cfg(feature = "cli")]
impl CliConfig {
    pub fn to_form(&self) -> RawForm {
        RawForm {
            ivf: self.ivf,
            transfer_date: self.transfer_date.clone(),
            transfer_day: self.transfer_day.clone(),
            lmp: self.lmp.clone(),
            lmp_unknown: self.lmp_unknown,
            no_ultrasound: self.no_ultrasound,
            ultrasound_date: self.ultrasound_date.clone(),
            ultrasound_weeks: self.ultrasound_weeks.clone(),
            ultrasound_days: self.ultrasound_days.clone(),
        }
    }
}

#[cfg(feature = "cli")]
impl InputProvider for CliConfig {
    fn estimation_input(&self) -> Result<EstimationInput> {
        self.to_form().to_input()
    }

    fn today(&self) -> Result<Option<CalendarDate>> {
        self.today.as_deref().map(date_math::parse).transpose()
    }
}
