//! Plain-text rendering of a computation result for the CLI.

use std::fmt::Write;

use chrono::{DateTime, FixedOffset};

use payrun_core::{EmployeeDetails, RegimeBreakup, TaxResult};

/// Render both regimes, the suggestion, and the savings figure, stamped
/// with the IST generation time the results panel shows.
pub fn comparison_report(
    employee: &EmployeeDetails,
    result: &TaxResult,
    when: DateTime<FixedOffset>,
) -> String {
    let mut out = String::new();

    let _ = writeln!(
        out,
        "Tax regime comparison — {} ({})",
        employee.employee_name, employee.employee_number
    );
    let _ = writeln!(out, "Generated {} IST", when.format("%d/%m/%Y %I:%M:%S %p"));
    let _ = writeln!(out);

    let _ = writeln!(
        out,
        "  Old regime total tax (with cess): ₹{}",
        result.old_regime.total_tax_with_cess
    );
    let _ = writeln!(
        out,
        "  New regime total tax (with cess): ₹{}",
        result.new_regime.total_tax_with_cess
    );
    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "Suggested: {} (saves ₹{})",
        result.suggestion, result.savings
    );

    let _ = writeln!(out);
    let _ = writeln!(out, "Old regime breakup:");
    write_breakup(&mut out, &result.old_regime);
    let _ = writeln!(out);
    let _ = writeln!(out, "New regime breakup:");
    write_breakup(&mut out, &result.new_regime);

    out
}

fn write_breakup(out: &mut String, breakup: &RegimeBreakup) {
    let rows = [
        ("Gross income", breakup.gross_income),
        ("HRA exemption", breakup.hra),
        ("Professional tax", breakup.pt),
        ("Chapter VI-A", breakup.chapter_vi_other),
        ("FBP", breakup.fbp),
        ("Taxable income", breakup.taxable_income),
        ("Rebate", breakup.rebate),
        ("Surcharge income", breakup.surcharge_income),
        ("Tax incl. surcharge", breakup.tax_including_surcharge_income),
        ("Cess", breakup.cess),
        ("Total tax with cess", breakup.total_tax_with_cess),
    ];
    for (label, amount) in rows {
        let _ = writeln!(out, "  {label:<22} ₹{amount}");
    }
    for slab in &breakup.tax_slabs {
        let _ = writeln!(out, "    {:<20} ₹{}", slab.range, slab.tax);
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use rust_decimal_macros::dec;

    use payrun_core::{RegimeSuggestion, TaxSlab};

    use crate::export::ist;

    use super::*;

    fn sample() -> (EmployeeDetails, TaxResult) {
        let employee = EmployeeDetails {
            employee_name: "Asha Rao".to_string(),
            employee_number: "E1042".to_string(),
            ..Default::default()
        };
        let result = TaxResult {
            old_regime: RegimeBreakup {
                total_tax_with_cess: dec!(130291.2),
                tax_slabs: vec![TaxSlab {
                    range: "Up to ₹2,50,000".to_string(),
                    tax: dec!(0),
                }],
                ..Default::default()
            },
            new_regime: RegimeBreakup {
                total_tax_with_cess: dec!(117000),
                ..Default::default()
            },
            suggestion: RegimeSuggestion::New,
            savings: dec!(13291.2),
        };
        (employee, result)
    }

    #[test]
    fn report_names_the_employee_and_the_suggestion() {
        let (employee, result) = sample();
        let when = ist().with_ymd_and_hms(2025, 8, 7, 14, 5, 9).unwrap();

        let report = comparison_report(&employee, &result, when);

        assert!(report.contains("Asha Rao (E1042)"));
        assert!(report.contains("Generated 07/08/2025 02:05:09 PM IST"));
        assert!(report.contains("Suggested: New Regime (saves ₹13291.2)"));
        assert!(report.contains("₹130291.2"));
        assert!(report.contains("Up to ₹2,50,000"));
    }
}
