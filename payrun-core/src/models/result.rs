use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which regime the back-end judged cheaper for this employee.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RegimeSuggestion {
    #[serde(rename = "OLD")]
    Old,
    #[serde(rename = "NEW")]
    New,
}

impl fmt::Display for RegimeSuggestion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegimeSuggestion::Old => write!(f, "Old Regime"),
            RegimeSuggestion::New => write!(f, "New Regime"),
        }
    }
}

/// One row of the slab-wise breakdown shown in the breakup dialog.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TaxSlab {
    pub range: String,
    #[serde(with = "rust_decimal::serde::float", default)]
    pub tax: Decimal,
}

/// Per-regime figures computed by the back-end. Read-only on this side.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegimeBreakup {
    #[serde(with = "rust_decimal::serde::float", default)]
    pub gross_income: Decimal,

    #[serde(with = "rust_decimal::serde::float", default)]
    pub hra: Decimal,

    /// Professional tax.
    #[serde(with = "rust_decimal::serde::float", default)]
    pub pt: Decimal,

    // The back-end sends this key misspelled; match it verbatim.
    #[serde(rename = "chpaterVIOther", with = "rust_decimal::serde::float", default)]
    pub chapter_vi_other: Decimal,

    #[serde(with = "rust_decimal::serde::float", default)]
    pub fbp: Decimal,

    #[serde(with = "rust_decimal::serde::float", default)]
    pub taxable_income: Decimal,

    #[serde(with = "rust_decimal::serde::float", default)]
    pub rebate: Decimal,

    #[serde(with = "rust_decimal::serde::float", default)]
    pub surcharge_income: Decimal,

    #[serde(with = "rust_decimal::serde::float", default)]
    pub tax_including_surcharge_income: Decimal,

    #[serde(with = "rust_decimal::serde::float", default)]
    pub cess: Decimal,

    #[serde(with = "rust_decimal::serde::float", default)]
    pub total_tax_with_cess: Decimal,

    #[serde(default)]
    pub tax_slabs: Vec<TaxSlab>,
}

/// Full response of one tax computation: both regimes, the cheaper one,
/// and what switching saves. Replaced wholesale on every successful
/// submission; cleared by the form's clear action.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaxResult {
    pub old_regime: RegimeBreakup,
    pub new_regime: RegimeBreakup,
    pub suggestion: RegimeSuggestion,
    #[serde(with = "rust_decimal::serde::float", default)]
    pub savings: Decimal,
}

impl TaxResult {
    /// Breakup of the regime the back-end recommends.
    pub fn suggested_breakup(&self) -> &RegimeBreakup {
        match self.suggestion {
            RegimeSuggestion::Old => &self.old_regime,
            RegimeSuggestion::New => &self.new_regime,
        }
    }
}
