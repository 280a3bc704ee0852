pub mod party;
pub mod table;

pub use party::Party;
pub use table::{RawTable, RawValue};
