//! The field constraint table: statutory ceilings for FY 2025-26 and the
//! write-time clamp applied to every user edit.

use rust_decimal::Decimal;

/// Aggregate ceiling on the Section 80C bucket (PF + VPF + other 80C
/// investments combined).
pub fn section_80c_cap() -> Decimal {
    Decimal::from(150_000)
}

/// Every directly editable scalar field of the form.
///
/// The two derived aggregates (`section80C`, `chapterVIOthers`) are not
/// listed here on purpose: they are recomputed by [`super::InputState`] and
/// can never be written to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputField {
    TotalEarnings,
    HraPaid,
    Pf,
    Vpf,
    Others80C,
    HousingLoan,
    /// 80D — health insurance premium.
    Section80D,
    /// 80DD — maintenance of a disabled dependent.
    Section80Dd,
    /// 80U — the taxpayer's own disability.
    Section80U,
    /// 80DDB — treatment of specified illnesses.
    Section80Ddb,
    /// 80EEA — first-home loan interest.
    Section80Eea,
    /// 80EEB — electric-vehicle loan interest.
    Section80Eeb,
    /// 80E — education loan interest. Unbounded.
    Section80E,
    /// 80CCD(1B) — the employee's own NPS contribution.
    Section80Ccd1b,
    /// 80CCD(2) — employer NPS contribution. Unbounded, sourced from the
    /// employee record.
    EmployerNps,
    OtherIncome,
}

impl InputField {
    /// Statutory ceiling for this field, or `None` when it is unbounded.
    pub fn ceiling(self) -> Option<Decimal> {
        let rupees: i64 = match self {
            InputField::HousingLoan => 200_000,
            InputField::Section80D => 75_000,
            InputField::Section80Dd | InputField::Section80U => 125_000,
            InputField::Section80Ddb => 140_000,
            InputField::Section80Eea | InputField::Section80Eeb => 150_000,
            InputField::Section80Ccd1b => 50_000,
            _ => return None,
        };
        Some(Decimal::from(rupees))
    }

    pub fn label(self) -> &'static str {
        match self {
            InputField::TotalEarnings => "Total Earnings",
            InputField::HraPaid => "Rent Paid Annually",
            InputField::Pf => "PF",
            InputField::Vpf => "VPF",
            InputField::Others80C => "Other 80C Investments",
            InputField::HousingLoan => "Housing Loan Interest",
            InputField::Section80D => "80D - Health Insurance",
            InputField::Section80Dd => "80DD - Handicapped Dependents",
            InputField::Section80U => "80U - Permanent Disability",
            InputField::Section80Ddb => "80DDB - Terminal Disease",
            InputField::Section80Eea => "80EEA - First Home Buyers",
            InputField::Section80Eeb => "80EEB - Electric Vehicle",
            InputField::Section80E => "80E - Education Loan",
            InputField::Section80Ccd1b => "80CCD(1B) - NPS",
            InputField::EmployerNps => "Employer NPS 80CCD(2)",
            InputField::OtherIncome => "Other Sources Income",
        }
    }
}

/// Write-time clamp for a raw numeric edit.
///
/// Returns `min(value, ceiling)` for capped fields and the value itself for
/// unbounded ones. Negative candidates are floored to zero before the cap
/// is applied; out-of-range edits are silently clamped, never rejected.
pub fn clamp(field: InputField, value: Decimal) -> Decimal {
    let floored = value.max(Decimal::ZERO);
    match field.ceiling() {
        Some(cap) => floored.min(cap),
        None => floored,
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    const CAPPED: &[(InputField, i64)] = &[
        (InputField::HousingLoan, 200_000),
        (InputField::Section80D, 75_000),
        (InputField::Section80Dd, 125_000),
        (InputField::Section80U, 125_000),
        (InputField::Section80Ddb, 140_000),
        (InputField::Section80Eea, 150_000),
        (InputField::Section80Eeb, 150_000),
        (InputField::Section80Ccd1b, 50_000),
    ];

    const UNBOUNDED: &[InputField] = &[
        InputField::TotalEarnings,
        InputField::HraPaid,
        InputField::Pf,
        InputField::Vpf,
        InputField::Others80C,
        InputField::Section80E,
        InputField::EmployerNps,
        InputField::OtherIncome,
    ];

    #[test]
    fn every_capped_field_has_its_statutory_ceiling() {
        for &(field, rupees) in CAPPED {
            assert_eq!(
                field.ceiling(),
                Some(Decimal::from(rupees)),
                "ceiling mismatch for {field:?}"
            );
        }
    }

    #[test]
    fn unbounded_fields_have_no_ceiling() {
        for &field in UNBOUNDED {
            assert_eq!(field.ceiling(), None, "{field:?} should be unbounded");
        }
    }

    #[test]
    fn clamp_caps_values_above_the_ceiling() {
        for &(field, rupees) in CAPPED {
            let over = Decimal::from(rupees) + dec!(1);
            assert_eq!(clamp(field, over), Decimal::from(rupees));
        }
    }

    #[test]
    fn clamp_is_identity_below_the_ceiling() {
        assert_eq!(clamp(InputField::Section80D, dec!(74999)), dec!(74999));
        assert_eq!(clamp(InputField::HousingLoan, dec!(0)), dec!(0));
    }

    #[test]
    fn clamp_is_identity_at_the_ceiling() {
        assert_eq!(clamp(InputField::Section80Ccd1b, dec!(50000)), dec!(50000));
    }

    #[test]
    fn clamp_leaves_unbounded_fields_alone() {
        assert_eq!(
            clamp(InputField::Section80E, dec!(12345678)),
            dec!(12345678)
        );
    }

    #[test]
    fn clamp_floors_negative_values_to_zero() {
        assert_eq!(clamp(InputField::Section80D, dec!(-100)), dec!(0));
        assert_eq!(clamp(InputField::OtherIncome, dec!(-1)), dec!(0));
    }
}
