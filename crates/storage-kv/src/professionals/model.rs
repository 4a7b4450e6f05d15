//! Stored shape of professionals and contracts.

use obra_core::professionals::{Contract, PricingModel, PricingModelKind, Professional, Stage};
use obra_core::utils::time_utils::format_calendar_date;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::utils::{de_id, de_opt_decimal, read_date};

/// Professional as persisted under the `professionals` key.
///
/// A `payments` list found on older records is ignored: what was paid is
/// always recomputed from the expenses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfessionalRecord {
    #[serde(deserialize_with = "de_id")]
    pub id: String,
    #[serde(alias = "obraId", deserialize_with = "de_id")]
    pub project_id: String,
    #[serde(alias = "nome")]
    pub name: String,
    #[serde(alias = "funcao", default)]
    pub role: String,
    #[serde(alias = "telefone", default)]
    pub phone: Option<String>,
    #[serde(alias = "observacoes", default)]
    pub notes: Option<String>,
    #[serde(alias = "valorPrevisto", default, deserialize_with = "de_opt_decimal")]
    pub expected_value: Option<Decimal>,
    #[serde(alias = "contrato", default)]
    pub contract: Option<ContractRecord>,
}

/// Contract stored flat, with the pricing fields of every model side by side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ContractRecord {
    #[serde(alias = "tipoContrato", default)]
    pub model: Option<String>,
    #[serde(
        alias = "valorCombinado",
        default,
        deserialize_with = "de_opt_decimal",
        skip_serializing_if = "Option::is_none"
    )]
    pub agreed_amount: Option<Decimal>,
    #[serde(
        alias = "diaria",
        default,
        deserialize_with = "de_opt_decimal",
        skip_serializing_if = "Option::is_none"
    )]
    pub daily_rate: Option<Decimal>,
    #[serde(
        alias = "qtdDiarias",
        default,
        deserialize_with = "de_opt_decimal",
        skip_serializing_if = "Option::is_none"
    )]
    pub day_count: Option<Decimal>,
    #[serde(
        alias = "valorM2",
        default,
        deserialize_with = "de_opt_decimal",
        skip_serializing_if = "Option::is_none"
    )]
    pub rate_per_area: Option<Decimal>,
    #[serde(
        alias = "areaM2",
        default,
        deserialize_with = "de_opt_decimal",
        skip_serializing_if = "Option::is_none"
    )]
    pub area: Option<Decimal>,
    #[serde(alias = "etapas", default, skip_serializing_if = "Vec::is_empty")]
    pub stages: Vec<StageRecord>,
    #[serde(alias = "valorPrevisto", default, deserialize_with = "de_opt_decimal")]
    pub expected_value: Option<Decimal>,
    #[serde(
        alias = "valorTotalPrevisto",
        default,
        deserialize_with = "de_opt_decimal",
        skip_serializing_if = "Option::is_none"
    )]
    pub total_expected_value: Option<Decimal>,
    #[serde(alias = "dataInicio", default)]
    pub start_date: Option<String>,
    #[serde(alias = "dataTermino", default)]
    pub end_date: Option<String>,
    #[serde(alias = "observacoes", default)]
    pub notes: Option<String>,
    #[serde(alias = "anexo", default)]
    pub attachment: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct StageRecord {
    #[serde(alias = "nome", default)]
    pub name: String,
    #[serde(alias = "valor", default, deserialize_with = "de_opt_decimal")]
    pub value: Option<Decimal>,
}

impl ContractRecord {
    fn pricing(&self) -> PricingModel {
        let kind = self
            .model
            .as_deref()
            .map(PricingModelKind::parse)
            .unwrap_or(PricingModelKind::Unrecognized);
        let or_zero = |value: Option<Decimal>| value.unwrap_or(Decimal::ZERO);

        match kind {
            PricingModelKind::LumpSum => PricingModel::LumpSum {
                agreed_amount: or_zero(self.agreed_amount),
            },
            PricingModelKind::DailyRate => PricingModel::DailyRate {
                daily_rate: or_zero(self.daily_rate),
                day_count: or_zero(self.day_count),
            },
            PricingModelKind::AreaRate => PricingModel::AreaRate {
                rate_per_area: or_zero(self.rate_per_area),
                area: or_zero(self.area),
            },
            PricingModelKind::Staged => PricingModel::Staged {
                stages: self
                    .stages
                    .iter()
                    .map(|stage| Stage {
                        name: stage.name.clone(),
                        value: or_zero(stage.value),
                    })
                    .collect(),
            },
            PricingModelKind::Unrecognized => PricingModel::Unrecognized,
        }
    }

    fn into_contract(self, professional_id: &str) -> Contract {
        let pricing = self.pricing();
        Contract {
            pricing,
            expected_value: self.expected_value,
            total_expected_value: self.total_expected_value,
            start_date: read_date(professional_id, "contract.startDate", self.start_date.as_deref()),
            end_date: read_date(professional_id, "contract.endDate", self.end_date.as_deref()),
            notes: self.notes,
            attachment: self.attachment,
        }
    }
}

impl From<Contract> for ContractRecord {
    fn from(contract: Contract) -> Self {
        let mut record = ContractRecord {
            model: Some(contract.pricing.kind().as_str().to_string()),
            expected_value: contract.expected_value,
            total_expected_value: contract.total_expected_value,
            start_date: contract.start_date.map(format_calendar_date),
            end_date: contract.end_date.map(format_calendar_date),
            notes: contract.notes,
            attachment: contract.attachment,
            ..Default::default()
        };
        match contract.pricing {
            PricingModel::LumpSum { agreed_amount } => {
                record.agreed_amount = Some(agreed_amount);
            }
            PricingModel::DailyRate {
                daily_rate,
                day_count,
            } => {
                record.daily_rate = Some(daily_rate);
                record.day_count = Some(day_count);
            }
            PricingModel::AreaRate {
                rate_per_area,
                area,
            } => {
                record.rate_per_area = Some(rate_per_area);
                record.area = Some(area);
            }
            PricingModel::Staged { stages } => {
                record.stages = stages
                    .into_iter()
                    .map(|stage| StageRecord {
                        name: stage.name,
                        value: Some(stage.value),
                    })
                    .collect();
            }
            PricingModel::Unrecognized => {}
        }
        record
    }
}

impl From<ProfessionalRecord> for Professional {
    fn from(record: ProfessionalRecord) -> Self {
        let contract = record
            .contract
            .map(|contract| contract.into_contract(&record.id));
        Professional {
            id: record.id,
            project_id: record.project_id,
            name: record.name,
            role: record.role,
            phone: record.phone.filter(|p| !p.trim().is_empty()),
            notes: record.notes.filter(|n| !n.trim().is_empty()),
            expected_value: record.expected_value,
            contract,
        }
    }
}

impl From<Professional> for ProfessionalRecord {
    fn from(professional: Professional) -> Self {
        ProfessionalRecord {
            id: professional.id,
            project_id: professional.project_id,
            name: professional.name,
            role: professional.role,
            phone: professional.phone,
            notes: professional.notes,
            expected_value: professional.expected_value,
            contract: professional.contract.map(ContractRecord::from),
        }
    }
}
