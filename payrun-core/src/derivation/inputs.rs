//! The form's input state and its synchronous re-derivation rules.
//!
//! Every mutating operation clamps the incoming value against the field
//! constraint table and then recomputes the two derived aggregates before
//! returning, so readers never observe a stale `section80C` or
//! `chapterVIOthers`.

use rust_decimal::Decimal;

use super::fbp;
use super::limits::{self, InputField, clamp};
use crate::models::{AdjustedFbpItem, ComputeRequest, EmployeeDetails, FbpItem, IncomeDetails};

/// All user-entered figures plus the two derived aggregates.
///
/// Created zeroed at session start, optionally seeded once from the
/// employee record, edited field-by-field, and wiped by the clear action.
/// Never persisted.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct InputState {
    total_earnings: Decimal,
    hra_paid: Decimal,
    pf: Decimal,
    vpf: Decimal,
    others_80c: Decimal,
    housing_loan: Decimal,
    section_80d: Decimal,
    section_80dd: Decimal,
    section_80u: Decimal,
    section_80ddb: Decimal,
    section_80eea: Decimal,
    section_80eeb: Decimal,
    section_80e: Decimal,
    section_80ccd1b: Decimal,
    employer_nps_80ccd1b: Decimal,
    other_income: Decimal,

    // Derived, never directly editable.
    section_80c: Decimal,
    chapter_vi_others: Decimal,

    fbp: Vec<FbpItem>,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the state from the employee record: earnings, PF/VPF, the
    /// employer NPS figure, and the FBP list. Everything else stays zero.
    pub fn prefill(&mut self, employee: &EmployeeDetails) {
        self.total_earnings = clamp(InputField::TotalEarnings, employee.total_earnings);
        self.pf = clamp(InputField::Pf, employee.pf);
        self.vpf = clamp(InputField::Vpf, employee.vpf);
        self.employer_nps_80ccd1b = clamp(
            InputField::EmployerNps,
            employee.nps_max_limit.unwrap_or_default(),
        );
        self.fbp = employee.fbp.clone();
        self.rederive();
    }

    /// Apply one user edit: clamp, store, re-derive the aggregates.
    pub fn set(&mut self, field: InputField, value: Decimal) {
        let clamped = clamp(field, value);
        if clamped != value {
            tracing::debug!(?field, %value, %clamped, "edit clamped against the constraint table");
        }
        *self.slot(field) = clamped;
        self.rederive();
    }

    pub fn get(&self, field: InputField) -> Decimal {
        match field {
            InputField::TotalEarnings => self.total_earnings,
            InputField::HraPaid => self.hra_paid,
            InputField::Pf => self.pf,
            InputField::Vpf => self.vpf,
            InputField::Others80C => self.others_80c,
            InputField::HousingLoan => self.housing_loan,
            InputField::Section80D => self.section_80d,
            InputField::Section80Dd => self.section_80dd,
            InputField::Section80U => self.section_80u,
            InputField::Section80Ddb => self.section_80ddb,
            InputField::Section80Eea => self.section_80eea,
            InputField::Section80Eeb => self.section_80eeb,
            InputField::Section80E => self.section_80e,
            InputField::Section80Ccd1b => self.section_80ccd1b,
            InputField::EmployerNps => self.employer_nps_80ccd1b,
            InputField::OtherIncome => self.other_income,
        }
    }

    /// Derived: `min(pf + vpf + others80C, 150000)`.
    pub fn section_80c(&self) -> Decimal {
        self.section_80c
    }

    /// Derived: the unclamped sum of the nine Chapter VI-A constituents
    /// (each individually pre-clamped at write time).
    pub fn chapter_vi_others(&self) -> Decimal {
        self.chapter_vi_others
    }

    pub fn fbp(&self) -> &[FbpItem] {
        &self.fbp
    }

    /// Update one FBP line's declared amount. The amount is not capped
    /// here; the item ceiling applies at aggregation time.
    pub fn set_fbp_amount(&mut self, index: usize, amount: Decimal) {
        if let Some(item) = self.fbp.get_mut(index) {
            item.amount = amount.max(Decimal::ZERO);
        }
    }

    /// The "Max" affordance: set the declared amount to the item ceiling.
    /// No-op for unbounded pay heads.
    pub fn set_fbp_to_max(&mut self, index: usize) {
        if let Some(item) = self.fbp.get_mut(index)
            && let Some(cap) = item.max_limit
        {
            item.amount = cap;
        }
    }

    pub fn total_fbp(&self) -> Decimal {
        fbp::total_fbp(&self.fbp)
    }

    pub fn adjusted_fbp(&self) -> Vec<AdjustedFbpItem> {
        fbp::adjusted_details(&self.fbp)
    }

    /// Whether the scheduler may auto-submit this state.
    pub fn has_earnings(&self) -> bool {
        self.total_earnings > Decimal::ZERO
    }

    /// Hard reset: every scalar back to zero, FBP list emptied.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Build the compute payload from the current state. The `fbp` figure
    /// is always the reduction output, never the raw list.
    pub fn build_request(
        &self,
        financial_year: &str,
        user_ref: &str,
        employee: &EmployeeDetails,
    ) -> ComputeRequest {
        ComputeRequest {
            financial_year: financial_year.to_string(),
            income_details: IncomeDetails {
                total_earnings: self.total_earnings,
                hra_paid: self.hra_paid,
                section_80c: self.section_80c,
                housing_loan: self.housing_loan,
                chapter_vi_others: self.chapter_vi_others,
                other_income: self.other_income,
                employer_nps_80ccd1b: self.employer_nps_80ccd1b,
                fbp: self.total_fbp(),
                user_ref: user_ref.to_string(),
                nps_max_limit_old: employee.nps_max_limit_old,
                nps_max_limit_new: employee.nps_max_limit_new,
                fbp_details: self.adjusted_fbp(),
            },
        }
    }

    fn slot(&mut self, field: InputField) -> &mut Decimal {
        match field {
            InputField::TotalEarnings => &mut self.total_earnings,
            InputField::HraPaid => &mut self.hra_paid,
            InputField::Pf => &mut self.pf,
            InputField::Vpf => &mut self.vpf,
            InputField::Others80C => &mut self.others_80c,
            InputField::HousingLoan => &mut self.housing_loan,
            InputField::Section80D => &mut self.section_80d,
            InputField::Section80Dd => &mut self.section_80dd,
            InputField::Section80U => &mut self.section_80u,
            InputField::Section80Ddb => &mut self.section_80ddb,
            InputField::Section80Eea => &mut self.section_80eea,
            InputField::Section80Eeb => &mut self.section_80eeb,
            InputField::Section80E => &mut self.section_80e,
            InputField::Section80Ccd1b => &mut self.section_80ccd1b,
            InputField::EmployerNps => &mut self.employer_nps_80ccd1b,
            InputField::OtherIncome => &mut self.other_income,
        }
    }

    fn rederive(&mut self) {
        self.section_80c =
            (self.pf + self.vpf + self.others_80c).min(limits::section_80c_cap());
        self.chapter_vi_others = self.section_80d
            + self.section_80dd
            + self.section_80u
            + self.section_80ddb
            + self.section_80eea
            + self.section_80eeb
            + self.section_80e
            + self.section_80ccd1b
            + self.employer_nps_80ccd1b;
    }
}
