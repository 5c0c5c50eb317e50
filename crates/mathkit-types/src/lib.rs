//! Mathkit Types
//!
//! This crate defines the data structures shared between the calculation engine
//! (`mathkit-calculator`) and the front ends that consume it. It provides the raw
//! input value type `FieldValue` and the uniform answer structure
//! `CalculationResult` together with its optional plot description.

#![deny(clippy::all)]
#![warn(missing_docs)]

mod result;
mod types;

pub use result::{CalculationResult, DataPoint, Dataset, PlotSpec, PlotType};
pub use types::{FieldMap, FieldValue};
