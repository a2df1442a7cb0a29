mod clients;
mod directory;
mod ledger;
mod shop;
mod summary;

pub use clients::ClientBook;
pub use directory::SalespersonDirectory;
pub use ledger::{SaleDraft, SalesLedger, build_sale};
pub use shop::{Shop, ShopPaths};
pub use summary::{Summary, summarize};
