//! Per-student aggregation and view-model shaping.
//!
//! [`aggregate`] derives summary statistics from a [`StudentView`], and
//! [`view`] turns those statistics plus the raw filtered records into the
//! cards, chart series and table rows a presenter draws.
//!
//! [`StudentView`]: crate::filter::StudentView

pub mod aggregate;
pub mod types;
pub mod utility;
pub mod view;
