mod data;
mod data_key;

pub use data::*;
pub use data_key::*;

/// Max serialized bytes for a single row to keep value loads bounded.
pub const MAX_ROW_BYTES: u32 = 4 * 1024 * 1024;
