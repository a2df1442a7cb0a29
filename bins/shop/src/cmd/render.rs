use std::io::Write;

use serde::Serialize;

use record_store::RowToken;
use sales_ledger::Summary;
use shop_api::{Decimal, ErrorKind, SaleRecord, StoreError};

use crate::error::ShopError;

/// Amount with currency prefix and two decimals: `R$ 12.50`.
pub struct Money<'a> {
    pub currency: &'a str,
    pub amount: Decimal,
}

impl std::fmt::Display for Money<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {:.2}", self.currency, self.amount)
    }
}

/// One listed row in `--json` output.
#[derive(Serialize)]
pub struct Row<'a, T> {
    pub token: RowToken,
    #[serde(flatten)]
    pub record: &'a T,
}

pub fn notice(out: &mut dyn Write, err: &StoreError) -> Result<(), ShopError> {
    let level = match err.kind() {
        ErrorKind::Write => "error",
        ErrorKind::Read | ErrorKind::Validation => "warning",
    };
    writeln!(out, "{level}: {err}")?;
    Ok(())
}

/// Selection label for a sale: `{token} - {client} | {product} | {total}`.
/// Anything that parses a [`RowToken`] accepts it back.
pub fn sale_label(token: RowToken, sale: &SaleRecord, currency: &str) -> String {
    format!(
        "{token} - {} | {} | {}",
        sale.client,
        sale.product,
        Money { currency, amount: sale.total_amount }
    )
}

pub fn sale_line(token: RowToken, sale: &SaleRecord, currency: &str) -> String {
    format!(
        "{} | by {} | {} | paid {} | due {}",
        sale_label(token, sale, currency),
        sale.salesperson,
        sale.payment_mode,
        Money { currency, amount: sale.amount_paid },
        Money { currency, amount: sale.amount_receivable },
    )
}

pub fn summary(out: &mut dyn Write, summary: &Summary, currency: &str) -> Result<(), ShopError> {
    writeln!(out, "Total sold: {}", Money { currency, amount: summary.total_sold })?;
    writeln!(out, "Total received: {}", Money { currency, amount: summary.total_paid })?;
    writeln!(out, "Total receivable: {}", Money { currency, amount: summary.total_receivable })?;
    Ok(())
}

pub fn json<T: Serialize + ?Sized>(out: &mut dyn Write, value: &T) -> Result<(), ShopError> {
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out)?;
    Ok(())
}
