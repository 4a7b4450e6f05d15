//! Contract domain models and expected-total resolution.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::professionals::professionals_errors::ContractError;
use crate::utils::decimal::saturating_sum;

/// A named installment of a staged contract.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stage {
    pub name: String,
    pub value: Decimal,
}

/// Pricing model tag as stored, before its fields are read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PricingModelKind {
    LumpSum,
    DailyRate,
    AreaRate,
    Staged,
    Unrecognized,
}

impl PricingModelKind {
    /// Parses a stored model tag, accepting the legacy Portuguese names.
    pub fn parse(tag: &str) -> Self {
        match tag.trim().to_lowercase().as_str() {
            "lump_sum" | "empreitada" => PricingModelKind::LumpSum,
            "daily_rate" | "diaria" => PricingModelKind::DailyRate,
            "area_rate" | "por_m2" => PricingModelKind::AreaRate,
            "staged" | "por_etapa" => PricingModelKind::Staged,
            _ => PricingModelKind::Unrecognized,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PricingModelKind::LumpSum => "lump_sum",
            PricingModelKind::DailyRate => "daily_rate",
            PricingModelKind::AreaRate => "area_rate",
            PricingModelKind::Staged => "staged",
            PricingModelKind::Unrecognized => "unrecognized",
        }
    }
}

/// How a professional's work is priced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "model", rename_all = "snake_case")]
pub enum PricingModel {
    LumpSum {
        #[serde(rename = "agreedAmount")]
        agreed_amount: Decimal,
    },
    DailyRate {
        #[serde(rename = "dailyRate")]
        daily_rate: Decimal,
        #[serde(rename = "dayCount")]
        day_count: Decimal,
    },
    AreaRate {
        #[serde(rename = "ratePerArea")]
        rate_per_area: Decimal,
        area: Decimal,
    },
    Staged {
        stages: Vec<Stage>,
    },
    #[serde(other)]
    Unrecognized,
}

impl PricingModel {
    pub fn kind(&self) -> PricingModelKind {
        match self {
            PricingModel::LumpSum { .. } => PricingModelKind::LumpSum,
            PricingModel::DailyRate { .. } => PricingModelKind::DailyRate,
            PricingModel::AreaRate { .. } => PricingModelKind::AreaRate,
            PricingModel::Staged { .. } => PricingModelKind::Staged,
            PricingModel::Unrecognized => PricingModelKind::Unrecognized,
        }
    }

    /// Expected contract total, clamped at `Decimal::MAX`. Unrecognized models
    /// resolve to zero.
    pub fn expected_total(&self) -> Decimal {
        match self {
            PricingModel::LumpSum { agreed_amount } => *agreed_amount,
            PricingModel::DailyRate {
                daily_rate,
                day_count,
            } => daily_rate.saturating_mul(*day_count),
            PricingModel::AreaRate {
                rate_per_area,
                area,
            } => rate_per_area.saturating_mul(*area),
            PricingModel::Staged { stages } => saturating_sum(stages.iter().map(|stage| stage.value)),
            PricingModel::Unrecognized => Decimal::ZERO,
        }
    }

    pub fn validate(&self) -> Result<(), ContractError> {
        match self {
            PricingModel::LumpSum { agreed_amount } => {
                if *agreed_amount <= Decimal::ZERO {
                    return Err(ContractError::NonPositiveAgreedAmount(*agreed_amount));
                }
            }
            PricingModel::DailyRate {
                daily_rate,
                day_count,
            } => {
                if *daily_rate <= Decimal::ZERO {
                    return Err(ContractError::NonPositiveDailyRate(*daily_rate));
                }
                if *day_count <= Decimal::ZERO {
                    return Err(ContractError::NonPositiveDayCount(*day_count));
                }
            }
            PricingModel::AreaRate {
                rate_per_area,
                area,
            } => {
                if *rate_per_area <= Decimal::ZERO {
                    return Err(ContractError::NonPositiveAreaRate(*rate_per_area));
                }
                if *area <= Decimal::ZERO {
                    return Err(ContractError::NonPositiveArea(*area));
                }
            }
            PricingModel::Staged { stages } => {
                if stages.is_empty() {
                    return Err(ContractError::NoStages);
                }
                if let Some(stage) = stages
                    .iter()
                    .find(|stage| stage.name.trim().is_empty() || stage.value <= Decimal::ZERO)
                {
                    return Err(ContractError::InvalidStage(stage.name.clone()));
                }
            }
            PricingModel::Unrecognized => {
                return Err(ContractError::UnrecognizedPricingModel(
                    PricingModelKind::Unrecognized.as_str().to_string(),
                ));
            }
        }
        Ok(())
    }
}

/// Domain model representing a professional's contract
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contract {
    pub pricing: PricingModel,
    /// Resolved expected total, written when the contract is saved.
    pub expected_value: Option<Decimal>,
    /// Older name for the expected total, still honored when reading.
    pub total_expected_value: Option<Decimal>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub notes: Option<String>,
    pub attachment: Option<String>,
}

impl Contract {
    pub fn new(pricing: PricingModel) -> Self {
        Contract {
            pricing,
            expected_value: None,
            total_expected_value: None,
            start_date: None,
            end_date: None,
            notes: None,
            attachment: None,
        }
    }

    pub fn validate(&self) -> Result<(), ContractError> {
        self.pricing.validate()?;
        if let (Some(start), Some(end)) = (self.start_date, self.end_date) {
            if end < start {
                return Err(ContractError::EndBeforeStart { start, end });
            }
        }
        Ok(())
    }

    /// Expected total computed from the pricing model.
    pub fn resolve_expected_total(&self) -> Decimal {
        self.pricing.expected_total()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn stage(name: &str, value: Decimal) -> Stage {
        Stage {
            name: name.to_string(),
            value,
        }
    }

    #[test]
    fn test_expected_total_per_model() {
        assert_eq!(
            PricingModel::LumpSum {
                agreed_amount: dec!(15000)
            }
            .expected_total(),
            dec!(15000)
        );
        assert_eq!(
            PricingModel::DailyRate {
                daily_rate: dec!(250),
                day_count: dec!(12)
            }
            .expected_total(),
            dec!(3000)
        );
        assert_eq!(
            PricingModel::AreaRate {
                rate_per_area: dec!(45.5),
                area: dec!(80)
            }
            .expected_total(),
            dec!(3640)
        );
        assert_eq!(
            PricingModel::Staged {
                stages: vec![stage("Fundação", dec!(4000)), stage("Alvenaria", dec!(6500))]
            }
            .expected_total(),
            dec!(10500)
        );
        assert_eq!(PricingModel::Unrecognized.expected_total(), Decimal::ZERO);
    }

    #[test]
    fn test_expected_total_documented_scenarios() {
        assert_eq!(
            PricingModel::DailyRate {
                daily_rate: dec!(150),
                day_count: dec!(10)
            }
            .expected_total(),
            dec!(1500)
        );
        assert_eq!(
            PricingModel::AreaRate {
                rate_per_area: dec!(80),
                area: dec!(60)
            }
            .expected_total(),
            dec!(4800)
        );
        assert_eq!(
            PricingModel::Staged {
                stages: vec![
                    stage("Fundação", dec!(1000)),
                    stage("Estrutura", dec!(2500)),
                    stage("Acabamento", dec!(1500)),
                ]
            }
            .expected_total(),
            dec!(5000)
        );
    }

    #[test]
    fn test_expected_total_clamps_instead_of_overflowing() {
        let huge = Decimal::from_scientific("1e22").unwrap();
        assert_eq!(
            PricingModel::DailyRate {
                daily_rate: huge,
                day_count: huge
            }
            .expected_total(),
            Decimal::MAX
        );
        assert_eq!(
            PricingModel::AreaRate {
                rate_per_area: huge,
                area: huge
            }
            .expected_total(),
            Decimal::MAX
        );
        assert_eq!(
            PricingModel::Staged {
                stages: vec![stage("A", Decimal::MAX), stage("B", dec!(1))]
            }
            .expected_total(),
            Decimal::MAX
        );
    }

    #[test]
    fn test_kind_parse_legacy_tags() {
        assert_eq!(PricingModelKind::parse("empreitada"), PricingModelKind::LumpSum);
        assert_eq!(PricingModelKind::parse("diaria"), PricingModelKind::DailyRate);
        assert_eq!(PricingModelKind::parse("por_m2"), PricingModelKind::AreaRate);
        assert_eq!(PricingModelKind::parse("POR_ETAPA"), PricingModelKind::Staged);
        assert_eq!(PricingModelKind::parse("hourly"), PricingModelKind::Unrecognized);
        assert_eq!(PricingModelKind::parse(""), PricingModelKind::Unrecognized);
    }

    #[test]
    fn test_validate_rejects_unrecognized_and_non_positive_fields() {
        assert!(matches!(
            Contract::new(PricingModel::Unrecognized).validate(),
            Err(ContractError::UnrecognizedPricingModel(_))
        ));
        assert_eq!(
            Contract::new(PricingModel::DailyRate {
                daily_rate: dec!(200),
                day_count: dec!(0)
            })
            .validate(),
            Err(ContractError::NonPositiveDayCount(dec!(0)))
        );
        assert_eq!(
            Contract::new(PricingModel::Staged { stages: vec![] }).validate(),
            Err(ContractError::NoStages)
        );
        assert!(matches!(
            Contract::new(PricingModel::Staged {
                stages: vec![stage("", dec!(10))]
            })
            .validate(),
            Err(ContractError::InvalidStage(_))
        ));
    }

    #[test]
    fn test_validate_contract_dates() {
        let mut contract = Contract::new(PricingModel::LumpSum {
            agreed_amount: dec!(100),
        });
        contract.start_date = NaiveDate::from_ymd_opt(2024, 5, 1);
        contract.end_date = NaiveDate::from_ymd_opt(2024, 4, 1);
        assert!(matches!(
            contract.validate(),
            Err(ContractError::EndBeforeStart { .. })
        ));
    }

    #[test]
    fn test_pricing_model_serde_shape() {
        let json = serde_json::to_value(PricingModel::DailyRate {
            daily_rate: dec!(200),
            day_count: dec!(5),
        })
        .unwrap();
        assert_eq!(json["model"], "daily_rate");
        assert_eq!(json["dailyRate"], 200.0);
        assert_eq!(json["dayCount"], 5.0);

        let model: PricingModel = serde_json::from_str(r#"{"model":"piecework"}"#).unwrap();
        assert_eq!(model, PricingModel::Unrecognized);
    }
}
