pub mod export;
pub mod identity;
pub mod report;
pub mod scheduler;
pub mod session;

pub use identity::UserRef;
pub use scheduler::{DEBOUNCE_QUIET_PERIOD, MIN_LOADING_FLOOR, SubmissionScheduler};
pub use session::{FormEvent, FormHandle, FormSession, FormSnapshot};
