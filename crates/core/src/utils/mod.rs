//! Shared helpers for date handling, display formatting and amount arithmetic.

pub mod decimal;
pub mod format;
pub mod time_utils;
