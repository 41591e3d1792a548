//! Runtime engine settings.
//!
//! Settings arrive as a list of typed parameters, the way an accounting
//! back-office stores them:
//!
//! ```json
//! [
//!   {"key": "capitalization_threshold", "type": "number", "value": 500, "min": 0},
//!   {"key": "prorata_temporis", "type": "boolean", "value": true},
//!   {"key": "default_depreciation_method", "type": "select",
//!    "value": "lineaire", "options": ["lineaire", "degressif"]}
//! ]
//! ```
//!
//! Keys not listed here are rejected; absent keys keep their defaults.

use std::io::Read;
use std::path::Path;

use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{SettingsError, SettingsResult};
use crate::thresholds::{
    DEFAULT_CAPITALIZATION_THRESHOLD, DEGRESSIVE_COEFFICIENT_MAX, DEGRESSIVE_COEFFICIENT_MIN,
};
use crate::types::DepreciationMethod;

/// A parameter value, tagged by its `type` field.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ParameterValue {
    Boolean {
        value: bool,
    },
    Number {
        value: f64,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        min: Option<f64>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        max: Option<f64>,
    },
    Select {
        value: String,
        #[serde(default)]
        options: Vec<String>,
    },
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Parameter {
    pub key: String,
    #[serde(flatten)]
    pub value: ParameterValue,
}

/// The settings the engine understands.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum SettingKey {
    CapitalizationThreshold,
    DegressiveCoefficient,
    ProrataTemporis,
    DefaultDepreciationMethod,
    FiscalYearStartMonth,
}

impl SettingKey {
    fn parse(key: &str) -> Option<Self> {
        match key {
            "capitalization_threshold" => Some(SettingKey::CapitalizationThreshold),
            "degressive_coefficient" => Some(SettingKey::DegressiveCoefficient),
            "prorata_temporis" => Some(SettingKey::ProrataTemporis),
            "default_depreciation_method" => Some(SettingKey::DefaultDepreciationMethod),
            "fiscal_year_start_month" => Some(SettingKey::FiscalYearStartMonth),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct EngineSettings {
    /// Capitalization floor: amounts below it are expensed.
    pub capitalization_threshold: Decimal,
    /// Degressive coefficient; `None` applies the statutory coefficient
    /// for the asset's useful life.
    pub degressive_coefficient: Option<Decimal>,
    pub prorata_temporis: bool,
    pub default_depreciation_method: DepreciationMethod,
    /// First month (1-12) of the fiscal year.
    pub fiscal_year_start_month: u32,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            capitalization_threshold: Decimal::from(DEFAULT_CAPITALIZATION_THRESHOLD),
            degressive_coefficient: None,
            prorata_temporis: false,
            default_depreciation_method: DepreciationMethod::Linear,
            fiscal_year_start_month: 1,
        }
    }
}

impl EngineSettings {
    /// Apply a parameter list on top of the defaults.
    pub fn from_parameters(parameters: &[Parameter]) -> SettingsResult<Self> {
        let mut settings = Self::default();
        for parameter in parameters {
            settings.apply(parameter)?;
        }
        Ok(settings)
    }

    pub fn from_json_reader<R: Read>(reader: R) -> SettingsResult<Self> {
        let parameters: Vec<Parameter> = serde_json::from_reader(reader)?;
        Self::from_parameters(&parameters)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> SettingsResult<Self> {
        let file = std::fs::File::open(path)?;
        Self::from_json_reader(std::io::BufReader::new(file))
    }

    /// Apply one parameter, validating its type and bounds.
    pub fn apply(&mut self, parameter: &Parameter) -> SettingsResult<()> {
        let key = SettingKey::parse(&parameter.key)
            .ok_or_else(|| SettingsError::UnknownKey(parameter.key.clone()))?;

        match key {
            SettingKey::CapitalizationThreshold => {
                let value = number(parameter, 0.0, f64::MAX)?;
                self.capitalization_threshold = to_decimal(parameter, value)?;
            }
            SettingKey::DegressiveCoefficient => {
                let min = DEGRESSIVE_COEFFICIENT_MIN as f64 / 100.0;
                let max = DEGRESSIVE_COEFFICIENT_MAX as f64 / 100.0;
                let value = number(parameter, min, max)?;
                self.degressive_coefficient = Some(to_decimal(parameter, value)?);
            }
            SettingKey::ProrataTemporis => match &parameter.value {
                ParameterValue::Boolean { value } => self.prorata_temporis = *value,
                _ => return Err(mismatch(parameter, "boolean")),
            },
            SettingKey::DefaultDepreciationMethod => {
                let value = select(parameter)?;
                self.default_depreciation_method = DepreciationMethod::parse(value)
                    .ok_or_else(|| SettingsError::InvalidOption {
                        key: parameter.key.clone(),
                        value: value.to_string(),
                    })?;
            }
            SettingKey::FiscalYearStartMonth => {
                let value = number(parameter, 1.0, 12.0)?;
                if value.fract() != 0.0 {
                    return Err(mismatch(parameter, "whole number"));
                }
                self.fiscal_year_start_month = value as u32;
            }
        }
        Ok(())
    }
}

fn mismatch(parameter: &Parameter, expected: &'static str) -> SettingsError {
    SettingsError::TypeMismatch {
        key: parameter.key.clone(),
        expected,
    }
}

/// Extract a number, enforcing both the engine bounds and any bounds the
/// parameter itself declares.
fn number(parameter: &Parameter, min: f64, max: f64) -> SettingsResult<f64> {
    let ParameterValue::Number {
        value,
        min: declared_min,
        max: declared_max,
    } = &parameter.value
    else {
        return Err(mismatch(parameter, "number"));
    };

    let lower = declared_min.map_or(min, |m| m.max(min));
    let upper = declared_max.map_or(max, |m| m.min(max));
    if !value.is_finite() || *value < lower || *value > upper {
        return Err(SettingsError::OutOfBounds {
            key: parameter.key.clone(),
            value: *value,
            min: lower,
            max: upper,
        });
    }
    Ok(*value)
}

fn select(parameter: &Parameter) -> SettingsResult<&str> {
    let ParameterValue::Select { value, options } = &parameter.value else {
        return Err(mismatch(parameter, "select"));
    };
    if !options.is_empty() && !options.iter().any(|o| o == value) {
        return Err(SettingsError::InvalidOption {
            key: parameter.key.clone(),
            value: value.clone(),
        });
    }
    Ok(value)
}

fn to_decimal(parameter: &Parameter, value: f64) -> SettingsResult<Decimal> {
    Decimal::from_f64(value)
        .map(|d| d.round_dp(2))
        .ok_or_else(|| mismatch(parameter, "decimal"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> SettingsResult<EngineSettings> {
        EngineSettings::from_json_reader(json.as_bytes())
    }

    #[test]
    fn defaults_without_parameters() {
        let settings = parse("[]").unwrap();
        assert_eq!(settings, EngineSettings::default());
        assert_eq!(settings.capitalization_threshold, Decimal::from(500));
        assert!(!settings.prorata_temporis);
        assert_eq!(settings.fiscal_year_start_month, 1);
    }

    #[test]
    fn all_known_keys_apply() {
        let settings = parse(
            r#"[
            {"key": "capitalization_threshold", "type": "number", "value": 1000},
            {"key": "degressive_coefficient", "type": "number", "value": 2.25},
            {"key": "prorata_temporis", "type": "boolean", "value": true},
            {"key": "default_depreciation_method", "type": "select",
             "value": "degressif", "options": ["lineaire", "degressif"]},
            {"key": "fiscal_year_start_month", "type": "number", "value": 7}
        ]"#,
        )
        .unwrap();
        assert_eq!(settings.capitalization_threshold, Decimal::from(1000));
        assert_eq!(settings.degressive_coefficient, Some(Decimal::new(225, 2)));
        assert!(settings.prorata_temporis);
        assert_eq!(settings.default_depreciation_method, DepreciationMethod::Degressive);
        assert_eq!(settings.fiscal_year_start_month, 7);
    }

    #[test]
    fn coefficient_outside_bounds_is_rejected() {
        let err = parse(r#"[{"key": "degressive_coefficient", "type": "number", "value": 4}]"#)
            .unwrap_err();
        assert!(matches!(err, SettingsError::OutOfBounds { .. }));
    }

    #[test]
    fn declared_bounds_are_enforced() {
        let err = parse(
            r#"[{"key": "capitalization_threshold", "type": "number", "value": 100, "min": 200}]"#,
        )
        .unwrap_err();
        assert!(matches!(err, SettingsError::OutOfBounds { .. }));
    }

    #[test]
    fn wrong_type_is_rejected() {
        let err = parse(r#"[{"key": "prorata_temporis", "type": "number", "value": 1}]"#)
            .unwrap_err();
        assert!(matches!(
            err,
            SettingsError::TypeMismatch { expected: "boolean", .. }
        ));
    }

    #[test]
    fn unknown_key_is_rejected() {
        let err = parse(r#"[{"key": "amortissement_exceptionnel", "type": "boolean", "value": true}]"#)
            .unwrap_err();
        assert!(matches!(err, SettingsError::UnknownKey(k) if k == "amortissement_exceptionnel"));
    }

    #[test]
    fn select_value_must_be_an_option() {
        let err = parse(
            r#"[{"key": "default_depreciation_method", "type": "select",
                 "value": "exceptionnel", "options": ["lineaire", "degressif"]}]"#,
        )
        .unwrap_err();
        assert!(matches!(err, SettingsError::InvalidOption { .. }));
    }

    #[test]
    fn fractional_month_is_rejected() {
        let err = parse(r#"[{"key": "fiscal_year_start_month", "type": "number", "value": 6.5}]"#)
            .unwrap_err();
        assert!(matches!(err, SettingsError::TypeMismatch { .. }));
    }
}
