use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::fbp::FbpItem;

/// Employee record returned by the payroll back-end's
/// `get-employee-details-ency` endpoint.
///
/// Seeds the form once at session start (earnings, PF/VPF, employer-NPS
/// figure, FBP list) and carries the computation-window gate for the
/// current payroll cycle.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeDetails {
    #[serde(default)]
    pub employee_name: String,

    #[serde(default)]
    pub employee_number: String,

    #[serde(with = "rust_decimal::serde::float", default)]
    pub total_earnings: Decimal,

    #[serde(with = "rust_decimal::serde::float", default)]
    pub pf: Decimal,

    #[serde(with = "rust_decimal::serde::float", default)]
    pub vpf: Decimal,

    /// Employer NPS contribution figure shown (and submitted) as the
    /// 80CCD(2) amount.
    #[serde(with = "rust_decimal::serde::float_option", default)]
    pub nps_max_limit: Option<Decimal>,

    #[serde(with = "rust_decimal::serde::float_option", default)]
    pub nps_max_limit_old: Option<Decimal>,

    #[serde(with = "rust_decimal::serde::float_option", default)]
    pub nps_max_limit_new: Option<Decimal>,

    #[serde(default)]
    pub fbp: Vec<FbpItem>,

    /// `1` while the computation window for the current cycle is open.
    #[serde(default)]
    pub is_fy_switch: i64,

    /// Back-end supplied notice shown when the window is closed.
    #[serde(default)]
    pub message: Option<String>,
}

impl EmployeeDetails {
    pub fn computation_window_open(&self) -> bool {
        self.is_fy_switch == 1
    }

    /// Notice to show when the computation window is closed.
    pub fn window_closed_notice(&self) -> &str {
        self.message
            .as_deref()
            .unwrap_or("Payroll cut-off date is crossed, please check next month.")
    }
}
