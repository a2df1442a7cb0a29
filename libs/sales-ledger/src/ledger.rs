use std::collections::BTreeSet;
use std::path::PathBuf;

use record_store::{RecordStore, RowToken};
use shop_api::{Decimal, PaymentMode, SaleRecord, StoreError};

use crate::directory::SalespersonDirectory;
use crate::summary::{Summary, summarize};

// ════════════════════════════════════════════════════════════════
//  Sale construction
// ════════════════════════════════════════════════════════════════

/// Build a sale with its payment split.
///
/// [`PaymentMode::Full`] ignores `amount_paid` and records the whole total as
/// paid. [`PaymentMode::Installment`] records `amount_paid` as given and the
/// rest as receivable.
///
/// Nothing is checked here. The caller must make sure `client` and `product`
/// are non-empty, `salesperson` came from the directory, `total_amount >= 0`
/// and, for installments, `0 <= amount_paid <= total_amount`
/// (see [`SaleDraft::validate`]).
pub fn build_sale(
    salesperson: impl Into<String>,
    client: impl Into<String>,
    product: impl Into<String>,
    total_amount: Decimal,
    payment_mode: PaymentMode,
    amount_paid: Decimal,
) -> SaleRecord {
    let amount_paid = match payment_mode {
        PaymentMode::Full => total_amount,
        PaymentMode::Installment => amount_paid,
    };
    SaleRecord {
        salesperson: salesperson.into(),
        client: client.into(),
        product: product.into(),
        total_amount,
        payment_mode,
        amount_paid,
        amount_receivable: total_amount - amount_paid,
    }
}

/// Field values collected by a sale form, before any checks.
#[derive(Debug, Clone, Default)]
pub struct SaleDraft {
    /// `None` when no salesperson was picked.
    pub salesperson: Option<String>,
    pub client: String,
    pub product: String,
    pub total_amount: Decimal,
    pub payment_mode: PaymentMode,
    /// Only read for installments.
    pub amount_paid: Decimal,
}

impl SaleDraft {
    /// Check everything [`build_sale`] relies on. Returns the salesperson as
    /// resolved by the directory.
    pub fn validate<'d>(&self, directory: &'d SalespersonDirectory) -> Result<&'d str, StoreError> {
        if self.client.trim().is_empty() {
            return Err(StoreError::MissingField("client"));
        }
        if self.product.trim().is_empty() {
            return Err(StoreError::MissingField("product"));
        }
        let name = match self.salesperson.as_deref().map(str::trim) {
            Some(name) if !name.is_empty() => name,
            _ => return Err(StoreError::NoSalesperson),
        };
        let salesperson = directory
            .lookup(name)
            .ok_or_else(|| StoreError::UnknownSalesperson(name.to_string()))?;

        if self.total_amount < Decimal::ZERO {
            return Err(StoreError::NegativeAmount("total amount"));
        }
        if self.payment_mode == PaymentMode::Installment
            && (self.amount_paid < Decimal::ZERO || self.amount_paid > self.total_amount)
        {
            return Err(StoreError::PaidOutOfRange {
                paid: self.amount_paid,
                total: self.total_amount,
            });
        }
        Ok(salesperson.name.as_str())
    }
}

// ════════════════════════════════════════════════════════════════
//  SalesLedger
// ════════════════════════════════════════════════════════════════

/// The sales collection plus the rules for adding to it and summing it up.
#[derive(Debug)]
pub struct SalesLedger {
    sales: RecordStore<SaleRecord>,
}

impl SalesLedger {
    pub fn open(path: impl Into<PathBuf>) -> (Self, Option<StoreError>) {
        let (sales, notice) = RecordStore::open(path);
        (Self { sales }, notice)
    }

    pub fn sales(&self) -> &RecordStore<SaleRecord> {
        &self.sales
    }

    /// Validate `draft`, build the sale and append it.
    ///
    /// Validation failures change nothing. A write failure keeps the sale in
    /// memory and is returned so the user can retry the save.
    pub fn record(
        &mut self,
        draft: &SaleDraft,
        directory: &SalespersonDirectory,
    ) -> Result<SaleRecord, StoreError> {
        let salesperson = draft.validate(directory)?;
        let sale = build_sale(
            salesperson,
            draft.client.trim(),
            draft.product.trim(),
            draft.total_amount,
            draft.payment_mode,
            draft.amount_paid,
        );
        self.sales.append(sale.clone())?;
        tracing::info!(
            client = %sale.client,
            salesperson = %sale.salesperson,
            total = %sale.total_amount,
            mode = %sale.payment_mode,
            "sale recorded"
        );
        Ok(sale)
    }

    pub fn delete_by_indices(
        &mut self,
        indices: &BTreeSet<usize>,
    ) -> Result<&[SaleRecord], StoreError> {
        self.sales.delete_by_indices(indices)
    }

    pub fn delete_rows(&mut self, tokens: &[RowToken]) -> Result<usize, StoreError> {
        self.sales.delete_rows(tokens)
    }

    pub fn summary(&self) -> Result<Summary, StoreError> {
        summarize(self.sales.records())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn directory_with(names: &[&str]) -> (tempfile::TempDir, SalespersonDirectory) {
        let tmp = tempfile::tempdir().unwrap();
        let (mut dir, _) = SalespersonDirectory::open(tmp.path().join("salespeople.csv"));
        for name in names {
            dir.add(name).unwrap();
        }
        (tmp, dir)
    }

    fn draft() -> SaleDraft {
        SaleDraft {
            salesperson: Some("Ana".into()),
            client: "Bob".into(),
            product: "Widget".into(),
            total_amount: Decimal::from(200),
            payment_mode: PaymentMode::Full,
            amount_paid: Decimal::ZERO,
        }
    }

    #[test]
    fn full_payment_ignores_amount_paid() {
        let sale = build_sale(
            "Ana",
            "Bob",
            "Widget",
            Decimal::from(80),
            PaymentMode::Full,
            Decimal::from(5),
        );
        assert_eq!(sale.amount_paid, Decimal::from(80));
        assert_eq!(sale.amount_receivable, Decimal::ZERO);
    }

    #[test]
    fn installment_does_not_recheck_bounds() {
        let sale = build_sale(
            "Ana",
            "Bob",
            "Widget",
            Decimal::from(10),
            PaymentMode::Installment,
            Decimal::from(15),
        );
        assert_eq!(sale.amount_receivable, Decimal::from(-5));
    }

    #[test]
    fn validate_reports_first_missing_field() {
        let (_tmp, dir) = directory_with(&["Ana"]);

        let mut d = draft();
        d.client = "  ".into();
        assert!(matches!(d.validate(&dir), Err(StoreError::MissingField("client"))));

        let mut d = draft();
        d.product.clear();
        assert!(matches!(d.validate(&dir), Err(StoreError::MissingField("product"))));

        let mut d = draft();
        d.salesperson = None;
        assert!(matches!(d.validate(&dir), Err(StoreError::NoSalesperson)));

        let mut d = draft();
        d.salesperson = Some("Zed".into());
        assert!(matches!(d.validate(&dir), Err(StoreError::UnknownSalesperson(n)) if n == "Zed"));

        assert_eq!(draft().validate(&dir).unwrap(), "Ana");
    }

    #[test]
    fn validate_checks_amounts() {
        let (_tmp, dir) = directory_with(&["Ana"]);

        let mut d = draft();
        d.total_amount = Decimal::from(-1);
        assert!(matches!(d.validate(&dir), Err(StoreError::NegativeAmount(_))));

        let mut d = draft();
        d.payment_mode = PaymentMode::Installment;
        d.amount_paid = Decimal::from(201);
        assert!(matches!(d.validate(&dir), Err(StoreError::PaidOutOfRange { .. })));

        d.amount_paid = Decimal::from(200);
        assert!(d.validate(&dir).is_ok());

        // Full payment never looks at amount_paid.
        let mut d = draft();
        d.amount_paid = Decimal::from(-3);
        assert!(d.validate(&dir).is_ok());
    }

    #[test]
    fn refused_sale_leaves_ledger_untouched() {
        let (tmp, dir) = directory_with(&["Ana"]);
        let path = tmp.path().join("sales.csv");
        let (mut ledger, _) = SalesLedger::open(&path);

        let mut d = draft();
        d.salesperson = None;
        assert!(ledger.record(&d, &dir).is_err());
        assert!(ledger.sales().is_empty());
        assert!(!path.exists());
    }

    #[test]
    fn record_trims_and_persists() {
        let (tmp, dir) = directory_with(&["Ana"]);
        let path = tmp.path().join("sales.csv");
        let (mut ledger, _) = SalesLedger::open(&path);

        let mut d = draft();
        d.client = " Bob ".into();
        d.payment_mode = PaymentMode::Installment;
        d.amount_paid = Decimal::new(5050, 2);
        let sale = ledger.record(&d, &dir).unwrap();

        assert_eq!(sale.client, "Bob");
        assert_eq!(sale.amount_receivable, Decimal::new(14950, 2));
        assert_eq!(RecordStore::<SaleRecord>::load(&path).unwrap(), vec![sale]);
    }

    proptest! {
        #[test]
        fn full_always_settles(cents in 0i64..1_000_000_000, paid in any::<i64>()) {
            let total = Decimal::new(cents, 2);
            let paid = Decimal::new(paid, 2);
            let sale = build_sale("Ana", "Bob", "Widget", total, PaymentMode::Full, paid);
            prop_assert_eq!(sale.amount_paid, total);
            prop_assert_eq!(sale.amount_receivable, Decimal::ZERO);
        }

        #[test]
        fn installment_splits_total(
            (total, paid) in (0i64..1_000_000_000).prop_flat_map(|t| (Just(t), 0..=t))
        ) {
            let total = Decimal::new(total, 2);
            let paid = Decimal::new(paid, 2);
            let sale = build_sale("Ana", "Bob", "Widget", total, PaymentMode::Installment, paid);
            prop_assert_eq!(sale.amount_paid, paid);
            prop_assert_eq!(sale.amount_receivable, total - paid);
            prop_assert_eq!(sale.amount_paid + sale.amount_receivable, total);
        }
    }
}
