mod error;
mod record;
mod table;

pub use error::{ErrorKind, StoreError};
pub use record::{
    ClientRecord, PaymentMode, SaleRecord, SalespersonRecord, UnknownPaymentMode,
};
pub use table::TableRecord;

pub use rust_decimal::Decimal;
