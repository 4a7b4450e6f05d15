use crate::expenses::expenses_model::{CategoryTag, ExpenseCategory};

/// Classifies an expense from its category tag and professional reference.
///
/// An expense tied to a professional is always labor, whatever its tag says.
pub fn classify_expense(category: &CategoryTag, professional_id: Option<&str>) -> ExpenseCategory {
    let has_professional = professional_id
        .map(|id| !id.trim().is_empty())
        .unwrap_or(false);

    match category {
        CategoryTag::Labor => ExpenseCategory::Labor,
        _ if has_professional => ExpenseCategory::Labor,
        CategoryTag::Material => ExpenseCategory::Material,
        CategoryTag::Other(_) => ExpenseCategory::Other,
    }
}

/// Picks the first non-blank professional reference among the stored spellings.
pub fn resolve_professional_reference(candidates: &[Option<&str>]) -> Option<String> {
    candidates
        .iter()
        .flatten()
        .map(|id| id.trim())
        .find(|id| !id.is_empty())
        .map(str::to_string)
}
