use crate::core::{estimator, reporter};
use crate::domain::model::{CalendarDate, Report};
use crate::domain::ports::InputProvider;
use crate::utils::error::Result;

pub struct EstimationEngine<P: InputProvider> {
    provider: P,
}

impl<P: InputProvider> EstimationEngine<P> {
    pub fn new(provider: P) -> Self {
        Self { provider }
    }

    /// 估算預產期並附上今天的孕週; 提供者指定的日期優先於 `today`
    pub fn run(&self, today: CalendarDate) -> Result<Report> {
        let input = self.provider.estimation_input()?;
        tracing::debug!("Estimation input: {:?}", input);

        let today = self.provider.today()?.unwrap_or(today);
        let result = estimator::estimate(&input)?;
        tracing::info!(
            "📅 Due date {} (reference start {}, redated: {})",
            result.due_date,
            result.reference_start_date,
            result.redated
        );

        let gestational_age = reporter::current_age(result.reference_start_date, today);
        if let Some(ga) = &gestational_age {
            tracing::info!("🤰 Gestational age on {}: {}w{}d", today, ga.weeks, ga.days);
        }

        Ok(Report {
            result,
            gestational_age,
        })
    }
}
