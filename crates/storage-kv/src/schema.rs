//! Logical keys of the key-value store and the record fields shared across areas.

pub const PROJECTS_KEY: &str = "projects";
pub const EXPENSES_KEY: &str = "expenses";
pub const PROFESSIONALS_KEY: &str = "professionals";
pub const ALERTS_KEY: &str = "alerts";
pub const ACTIVE_PROJECT_KEY: &str = "activeProjectId";

/// Keys written by earlier versions of the app, read when the canonical key is absent.
pub const LEGACY_KEYS: [(&str, &str); 5] = [
    (PROJECTS_KEY, "obras"),
    (EXPENSES_KEY, "despesas"),
    (PROFESSIONALS_KEY, "profissionais"),
    (ALERTS_KEY, "alertas"),
    (ACTIVE_PROJECT_KEY, "activeObraId"),
];

/// Fields holding a record's owning project, canonical spelling first.
pub const PROJECT_REFERENCE_FIELDS: [&str; 2] = ["projectId", "obraId"];

pub fn legacy_key(key: &str) -> Option<&'static str> {
    LEGACY_KEYS
        .iter()
        .find(|(canonical, _)| *canonical == key)
        .map(|(_, legacy)| *legacy)
}
