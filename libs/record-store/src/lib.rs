mod atomic;
mod store;
mod table;
mod token;

pub use atomic::replace_file_atomic;
pub use store::RecordStore;
pub use table::{read_table, write_table};
pub use token::RowToken;
