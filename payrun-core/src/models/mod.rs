mod employee;
mod fbp;
mod request;
mod result;

pub use employee::EmployeeDetails;
pub use fbp::{AdjustedFbpItem, FbpItem, RegimeEligibility};
pub use request::{ComputeRequest, IncomeDetails};
pub use result::{RegimeBreakup, RegimeSuggestion, TaxResult, TaxSlab};
