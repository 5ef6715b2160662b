use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::fbp::AdjustedFbpItem;

/// Body of the `POST /income-tax` call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComputeRequest {
    /// `"YYYY-YYYY"`, e.g. `"2025-2026"`.
    pub financial_year: String,
    pub income_details: IncomeDetails,
}

/// The income figures the tax-compute back-end works from.
///
/// `section80C` and `chapterVIOthers` carry the *derived* aggregates, and
/// `fbp` carries the reduced FBP total — never the raw list, which travels
/// separately (and pre-capped) in `fbpDetails`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IncomeDetails {
    #[serde(with = "rust_decimal::serde::float")]
    pub total_earnings: Decimal,

    #[serde(with = "rust_decimal::serde::float")]
    pub hra_paid: Decimal,

    #[serde(rename = "section80C", with = "rust_decimal::serde::float")]
    pub section_80c: Decimal,

    #[serde(with = "rust_decimal::serde::float")]
    pub housing_loan: Decimal,

    #[serde(rename = "chapterVIOthers", with = "rust_decimal::serde::float")]
    pub chapter_vi_others: Decimal,

    #[serde(with = "rust_decimal::serde::float")]
    pub other_income: Decimal,

    #[serde(rename = "employernps80ccd1b", with = "rust_decimal::serde::float")]
    pub employer_nps_80ccd1b: Decimal,

    /// Reduced FBP total (`round(Σ min(amount, maxLimit))`).
    #[serde(with = "rust_decimal::serde::float")]
    pub fbp: Decimal,

    /// Opaque user identifier the back-end keys the estimate on.
    #[serde(rename = "userids")]
    pub user_ref: String,

    #[serde(with = "rust_decimal::serde::float_option", default)]
    pub nps_max_limit_old: Option<Decimal>,

    #[serde(with = "rust_decimal::serde::float_option", default)]
    pub nps_max_limit_new: Option<Decimal>,

    pub fbp_details: Vec<AdjustedFbpItem>,
}
