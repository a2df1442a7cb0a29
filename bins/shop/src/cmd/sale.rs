use std::io::Write;

use sales_ledger::Shop;

use super::render;
use crate::config::{Effective, SaleCmd};
use crate::error::ShopError;

/// Whether a sale's client must already be registered in the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientCheck {
    Off,
    Registered,
}

pub fn run(
    shop: &mut Shop,
    cmd: &SaleCmd,
    clients: ClientCheck,
    settings: &Effective,
    out: &mut dyn Write,
) -> Result<(), ShopError> {
    let currency = settings.currency.as_str();
    match cmd {
        SaleCmd::Add(args) => {
            if shop.salespeople.is_empty() {
                writeln!(out, "No salesperson registered. Add one with `salesperson add`.")?;
            }
            let draft = args.to_draft();
            let sale = match clients {
                ClientCheck::Off => shop.record_sale(&draft)?,
                ClientCheck::Registered => shop.record_sale_for_registered_client(&draft)?,
            };
            writeln!(
                out,
                "Sale recorded for {} and saved to {}.",
                sale.client,
                shop.ledger.sales().path().display()
            )?;
        }
        SaleCmd::List { json } => {
            let store = shop.ledger.sales();
            if *json {
                let rows: Vec<_> = store
                    .rows()
                    .map(|(token, record)| render::Row { token, record })
                    .collect();
                return render::json(out, &rows);
            }

            let names: Vec<&str> = shop.salespeople.names().collect();
            let names = if names.is_empty() { "none".to_string() } else { names.join(", ") };
            writeln!(out, "Salespeople: {names}")?;

            if store.is_empty() {
                writeln!(out, "No sales recorded yet.")?;
                return Ok(());
            }
            for (token, sale) in store.rows() {
                writeln!(out, "{}", render::sale_line(token, sale, currency))?;
            }
            // The rows are already out; a bad total only costs the footer.
            match shop.ledger.summary() {
                Ok(summary) => render::summary(out, &summary, currency)?,
                Err(e) => render::notice(out, &e)?,
            }
        }
        SaleCmd::Delete { tokens } => {
            let removed = shop.ledger.delete_rows(tokens)?;
            writeln!(out, "{removed} sale(s) removed.")?;
        }
        SaleCmd::Summary { json } => {
            let summary = shop.ledger.summary()?;
            if *json {
                render::json(out, &summary)?;
            } else {
                render::summary(out, &summary, currency)?;
            }
        }
    }
    Ok(())
}
