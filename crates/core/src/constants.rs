/// Category literals that mean "labor", compared after lower-casing.
pub const LABOR_CATEGORY_TOKENS: [&str; 2] = ["mao_obra", "mão de obra"];

/// Category literal that means "material", compared after lower-casing.
pub const MATERIAL_CATEGORY_TOKEN: &str = "material";

/// Canonical literal written back for labor-tagged expenses.
pub const LABOR_CATEGORY_CANONICAL: &str = "mao_obra";

/// Decimal precision for displayed percentages
pub const DISPLAY_PERCENT_PRECISION: u32 = 1;

/// Decimal precision for displayed currency amounts
pub const DISPLAY_DECIMAL_PRECISION: u32 = 2;

/// Description prefix used for payments registered against a professional
pub const PAYMENT_DESCRIPTION_PREFIX: &str = "Payment - ";
