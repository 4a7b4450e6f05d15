//! Stored shape of expenses and the unification of their legacy fields.

use obra_core::errors::{Error, ValidationError};
use obra_core::expenses::{resolve_professional_reference, CategoryTag, Expense};
use obra_core::utils::time_utils::format_calendar_date;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::utils::{de_id, de_opt_decimal, de_opt_id, first_non_blank, read_date};

/// Expense as persisted under the `expenses` key.
///
/// Older records carry the category under `category`, `categoria` or `tipo`
/// and the professional under `professionalId` or `profissionalId`. Those are
/// folded into one field when the record is read; the legacy spellings are
/// never written back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseRecord {
    #[serde(deserialize_with = "de_id")]
    pub id: String,
    #[serde(alias = "obraId", deserialize_with = "de_id")]
    pub project_id: String,
    #[serde(alias = "data", default)]
    pub date: Option<String>,
    #[serde(alias = "valor", default, deserialize_with = "de_opt_decimal")]
    pub amount: Option<Decimal>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default, skip_serializing)]
    pub categoria: Option<String>,
    #[serde(default, skip_serializing)]
    pub tipo: Option<String>,
    #[serde(alias = "descricao", default)]
    pub description: Option<String>,
    #[serde(alias = "formaPagamento", default)]
    pub payment_method: Option<String>,
    #[serde(default, deserialize_with = "de_opt_id")]
    pub professional_id: Option<String>,
    #[serde(default, deserialize_with = "de_opt_id", skip_serializing)]
    pub profissional_id: Option<String>,
    #[serde(alias = "fornecedor", default)]
    pub supplier: Option<String>,
    #[serde(alias = "observacao", default)]
    pub notes: Option<String>,
    #[serde(default, skip_serializing)]
    pub observacoes: Option<String>,
    #[serde(alias = "anexo", default)]
    pub attachment: Option<String>,
    #[serde(default, skip_serializing)]
    pub comprovante_anexo: Option<String>,
}

impl TryFrom<ExpenseRecord> for Expense {
    type Error = Error;

    fn try_from(record: ExpenseRecord) -> Result<Self, Self::Error> {
        let amount = record.amount.ok_or_else(|| {
            Error::Validation(ValidationError::MissingField("amount".to_string()))
        })?;
        if amount < Decimal::ZERO {
            return Err(Error::Validation(ValidationError::NegativeAmount(amount)));
        }

        let category = CategoryTag::from_legacy_fields(
            record.category.as_deref(),
            record.categoria.as_deref(),
            record.tipo.as_deref(),
        );
        let professional_id = resolve_professional_reference(&[
            record.professional_id.as_deref(),
            record.profissional_id.as_deref(),
        ]);
        let date = read_date(&record.id, "date", record.date.as_deref());

        Ok(Expense {
            id: record.id,
            project_id: record.project_id,
            date,
            amount,
            category,
            description: record.description.filter(|d| !d.trim().is_empty()),
            payment_method: record.payment_method.filter(|m| !m.trim().is_empty()),
            professional_id,
            supplier: record.supplier.filter(|s| !s.trim().is_empty()),
            notes: first_non_blank([record.notes, record.observacoes]),
            attachment: first_non_blank([record.attachment, record.comprovante_anexo]),
        })
    }
}

impl From<Expense> for ExpenseRecord {
    fn from(expense: Expense) -> Self {
        let category = (!expense.category.is_unspecified()).then(|| expense.category.to_string());
        ExpenseRecord {
            id: expense.id,
            project_id: expense.project_id,
            date: expense.date.map(format_calendar_date),
            amount: Some(expense.amount),
            category,
            categoria: None,
            tipo: None,
            description: expense.description,
            payment_method: expense.payment_method,
            professional_id: expense.professional_id,
            profissional_id: None,
            supplier: expense.supplier,
            notes: expense.notes,
            observacoes: None,
            attachment: expense.attachment,
            comprovante_anexo: None,
        }
    }
}
