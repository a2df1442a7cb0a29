use std::path::{Path, PathBuf};

use shop_api::{SaleRecord, StoreError};

use crate::clients::ClientBook;
use crate::directory::SalespersonDirectory;
use crate::ledger::{SaleDraft, SalesLedger};

/// Where the two table files live.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShopPaths {
    pub salespeople: PathBuf,
    pub sales: PathBuf,
}

impl ShopPaths {
    pub fn in_dir(dir: &Path, salespeople_file: &str, sales_file: &str) -> Self {
        Self {
            salespeople: dir.join(salespeople_file),
            sales: dir.join(sales_file),
        }
    }
}

// ════════════════════════════════════════════════════════════════
//  Shop
// ════════════════════════════════════════════════════════════════

/// Everything one session works on. Created once at startup and passed by
/// reference to whatever handles user actions.
#[derive(Debug)]
pub struct Shop {
    pub salespeople: SalespersonDirectory,
    pub ledger: SalesLedger,
    pub clients: ClientBook,
}

impl Shop {
    /// Load both collections. Read problems do not stop the session; they
    /// come back alongside the shop so they can be shown once.
    pub fn open(paths: &ShopPaths) -> (Self, Vec<StoreError>) {
        let (salespeople, salespeople_notice) = SalespersonDirectory::open(&paths.salespeople);
        let (ledger, sales_notice) = SalesLedger::open(&paths.sales);
        tracing::info!(
            salespeople = salespeople.store().len(),
            sales = ledger.sales().len(),
            "shop opened"
        );

        let shop = Self {
            salespeople,
            ledger,
            clients: ClientBook::new(),
        };
        let notices = salespeople_notice.into_iter().chain(sales_notice).collect();
        (shop, notices)
    }

    /// Record a sale against the current salespeople.
    pub fn record_sale(&mut self, draft: &SaleDraft) -> Result<SaleRecord, StoreError> {
        self.ledger.record(draft, &self.salespeople)
    }

    /// Like [`Self::record_sale`], but the client must have been registered in
    /// this session first.
    pub fn record_sale_for_registered_client(
        &mut self,
        draft: &SaleDraft,
    ) -> Result<SaleRecord, StoreError> {
        if self.clients.find(draft.client.trim()).is_none() {
            return Err(StoreError::UnknownClient(draft.client.trim().to_string()));
        }
        self.record_sale(draft)
    }
}
