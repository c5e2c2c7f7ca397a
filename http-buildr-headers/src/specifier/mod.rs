//! Specifiers that can be used as part of header values.
//!
//! An example is the [`QualityValue`] used by the `Accept` header.

mod quality_value;
pub use quality_value::{InvalidQuality, Quality, QualityValue};
