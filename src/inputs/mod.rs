//! Solve inputs: typed variables, form field parsing and CSV loading

mod data;
mod fields;
pub mod loader;

pub use data::{field_name, SolveRequest, TvmInputs, Unknown};
pub use fields::{parse_frequency, parse_number, FieldValues};
pub use loader::{load_requests, load_requests_from_reader, BatchRow};
