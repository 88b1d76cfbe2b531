use crate::core::date_math;
use crate::core::form::RawForm;
use crate::domain::model::{CalendarDate, EstimationInput};
use crate::domain::ports::InputProvider;
use crate::utils::error::{EstimatorError, Result};
use crate::utils::validation::{validate_one_of, validate_range, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;

const VALID_MODES: [&str; 2] = ["ivf", "natural"];
const VALID_FORMATS: [&str; 2] = ["text", "json"];

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub case: CaseConfig,
    pub ivf: Option<IvfConfig>,
    pub natural: Option<NaturalConfig>,
    pub ultrasound: Option<UltrasoundConfig>,
    pub output: Option<OutputConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaseConfig {
    pub mode: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IvfConfig {
    pub transfer_date: Option<String>,
    pub protocol: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NaturalConfig {
    pub lmp: Option<String>,
    pub lmp_unknown: Option<bool>,
    pub no_ultrasound: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UltrasoundConfig {
    pub date: Option<String>,
    pub weeks: Option<u32>,
    pub days: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub format: Option<String>,
    pub today: Option<String>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| EstimatorError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${LMP_DATE})，未設定的保留原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| EstimatorError::ConfigError {
            message: format!("Invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn is_ivf(&self) -> bool {
        self.case.mode.eq_ignore_ascii_case("ivf")
    }

    /// 是否輸出 JSON
    pub fn json_output(&self) -> bool {
        self.output
            .as_ref()
            .and_then(|o| o.format.as_deref())
            .map(|f| f.eq_ignore_ascii_case("json"))
            .unwrap_or(false)
    }

    pub fn to_form(&self) -> RawForm {
        let natural = self.natural.as_ref();
        let ultrasound = self.ultrasound.as_ref();

        RawForm {
            ivf: self.is_ivf(),
            transfer_date: self.ivf.as_ref().and_then(|i| i.transfer_date.clone()),
            transfer_day: self.ivf.as_ref().and_then(|i| i.protocol.clone()),
            lmp: natural.and_then(|n| n.lmp.clone()),
            lmp_unknown: natural.and_then(|n| n.lmp_unknown).unwrap_or(false),
            no_ultrasound: natural.and_then(|n| n.no_ultrasound).unwrap_or(false),
            ultrasound_date: ultrasound.and_then(|u| u.date.clone()),
            ultrasound_weeks: ultrasound.and_then(|u| u.weeks).map(|w| w.to_string()),
            ultrasound_days: ultrasound.and_then(|u| u.days).map(|d| d.to_string()),
        }
    }

    /// 驗證配置的合理性
    pub fn validate_config(&self) -> Result<()> {
        validate_one_of("case.mode", &self.case.mode.to_ascii_lowercase(), &VALID_MODES)?;

        if let Some(format) = self.output.as_ref().and_then(|o| o.format.as_deref()) {
            validate_one_of("output.format", &format.to_ascii_lowercase(), &VALID_FORMATS)?;
        }

        if let Some(days) = self.ultrasound.as_ref().and_then(|u| u.days) {
            validate_range("ultrasound.days", days, 0, 6)?;
        }

        self.today()?;
        Ok(())
    }
}

impl InputProvider for TomlConfig {
    fn estimation_input(&self) -> Result<EstimationInput> {
        self.to_form().to_input()
    }

    fn today(&self) -> Result<Option<CalendarDate>> {
        self.output
            .as_ref()
            .and_then(|o| o.today.as_deref())
            .map(date_math::parse)
            .transpose()
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
