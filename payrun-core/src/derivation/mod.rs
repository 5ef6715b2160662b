//! The derived-input engine: write-time clamping against statutory
//! ceilings, synchronous re-derivation of the aggregate deduction fields,
//! and the FBP cap-then-sum reduction.

pub mod common;
pub mod fbp;
pub mod inputs;
pub mod limits;

pub use inputs::InputState;
pub use limits::{InputField, clamp};
