use crate::domain::model::{CalendarDate, GestationalAge, Report};
use crate::utils::error::Result;

/// e.g. `October 7, 2024`
pub fn long_date(date: CalendarDate) -> String {
    date.naive().format("%B %-d, %Y").to_string()
}

pub fn gestational_age_line(ga: &GestationalAge) -> String {
    format!(
        "(Current Gestational Age: {}w{}d, {} trimester)",
        ga.weeks, ga.days, ga.trimester
    )
}

pub fn render_text(report: &Report) -> String {
    let mut text = format!("Estimated Due Date: {}", long_date(report.result.due_date));
    if let Some(ga) = &report.gestational_age {
        text.push('\n');
        text.push_str(&gestational_age_line(ga));
    }
    text
}

pub fn render_json(report: &Report) -> Result<String> {
    Ok(serde_json::to_string_pretty(report)?)
}
