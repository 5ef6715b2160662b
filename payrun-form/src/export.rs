//! Naming contract for the results-panel download.
//!
//! Rasterizing the panel belongs to the presentation layer; what is fixed
//! here is the file name it must produce: the employee's display name with
//! whitespace removed, followed by an IST-localized 12-hour timestamp.

use chrono::{DateTime, FixedOffset, Utc};

/// Indian Standard Time, +05:30. The export is stamped in IST no matter
/// where the form runs.
pub fn ist() -> FixedOffset {
    FixedOffset::east_opt(5 * 3600 + 30 * 60).expect("IST offset is in range")
}

pub fn ist_now() -> DateTime<FixedOffset> {
    Utc::now().with_timezone(&ist())
}

/// `<NameWithoutSpaces>_<YYYY_MM_DD_HH_MM_AMPM>`, e.g.
/// `AshaRao_2025_08_07_02_05_PM`.
pub fn export_file_name(employee_name: &str, when: DateTime<FixedOffset>) -> String {
    let compact_name: String = employee_name.split_whitespace().collect();
    format!("{}_{}", compact_name, when.format("%Y_%m_%d_%I_%M_%p"))
}
