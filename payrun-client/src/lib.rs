//! HTTP binding of the [`payrun_core::PayrunService`] seam against the
//! payrun back-end.

mod client;

pub use client::HttpPayrunService;
