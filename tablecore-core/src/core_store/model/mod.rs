/*
    Model subsystem - Schema types and cell values
*/

pub mod types;
pub mod value;

pub use types::*;
pub use value::*;
