use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Regime-eligibility code attached to every FBP pay head by the payroll
/// back-end: `1` old regime only, `2` new regime only, `0` or `3` both.
///
/// The raw code is preserved so items echoed back in the submission payload
/// are byte-for-byte what the back-end handed out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RegimeEligibility(pub i64);

impl RegimeEligibility {
    pub fn allows_old(self) -> bool {
        matches!(self.0, 0 | 1 | 3)
    }

    pub fn allows_new(self) -> bool {
        matches!(self.0, 0 | 2 | 3)
    }

    pub fn label(self) -> &'static str {
        match self.0 {
            1 => "Old Regime",
            2 => "New Regime",
            _ => "Both",
        }
    }
}

/// One Flexible Benefit Plan line item.
///
/// Everything except `amount` is fixed by the employee-details response and
/// never mutated; `amount` is the user's declaration and is *not* clamped at
/// write time — the effective contribution `min(amount, max_limit)` is
/// computed lazily at aggregation time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FbpItem {
    #[serde(rename = "payHeadID")]
    pub pay_head_id: i64,

    pub pay_head_name: String,

    #[serde(with = "rust_decimal::serde::float", default)]
    pub amount: Decimal,

    /// Per-item ceiling; `None` means the pay head is unbounded.
    #[serde(with = "rust_decimal::serde::float_option", default)]
    pub max_limit: Option<Decimal>,

    pub allowed_tax_regime: RegimeEligibility,

    #[serde(default)]
    pub criteria_option: Option<String>,
}

/// An [`FbpItem`] annotated with its effective (capped) amount, exactly as
/// the compute endpoint expects it in `fbpDetails`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdjustedFbpItem {
    #[serde(flatten)]
    pub item: FbpItem,

    #[serde(with = "rust_decimal::serde::float")]
    pub adjusted_amount: Decimal,
}
