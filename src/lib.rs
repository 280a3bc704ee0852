//! D'Hondt highest-averages seat allocation, with the readers, exporters and
//! reports that sit around it.

pub mod config;
pub mod formats;
pub mod logging;
pub mod model;
pub mod normalizers;
pub mod reports;
pub mod simulator;
pub mod tabulator;
pub mod util;

pub use model::Party;
pub use tabulator::{allocate, Allocation, AllocationError, QuotientEntry};
