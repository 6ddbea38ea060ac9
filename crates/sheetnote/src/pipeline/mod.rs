//! Recognition pipeline.
//!
//! Glue layer that sequences the stages: preprocess -> staff detection ->
//! notehead detection -> result packaging. Stage algorithms live in
//! `crate::preprocess` and `crate::detector`; this module owns call order,
//! failure propagation and timing.

mod result;
mod run;

pub use result::OmrResult;

pub(crate) use run::run;
