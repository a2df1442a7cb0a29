use std::io::Write;

use sales_ledger::Shop;

use super::render;
use crate::config::SalespersonCmd;
use crate::error::ShopError;

pub fn run(shop: &mut Shop, cmd: &SalespersonCmd, out: &mut dyn Write) -> Result<(), ShopError> {
    match cmd {
        SalespersonCmd::Add { name } => {
            shop.salespeople.add(name)?;
            writeln!(out, "Salesperson {} registered.", name.trim())?;
        }
        SalespersonCmd::List { json } => {
            let store = shop.salespeople.store();
            if *json {
                let rows: Vec<_> = store
                    .rows()
                    .map(|(token, record)| render::Row { token, record })
                    .collect();
                render::json(out, &rows)?;
            } else if store.is_empty() {
                writeln!(out, "No salespeople registered yet.")?;
            } else {
                for (token, s) in store.rows() {
                    writeln!(out, "{token} - {}", s.name)?;
                }
            }
        }
        SalespersonCmd::Delete { tokens } => {
            let removed = shop.salespeople.delete_rows(tokens)?;
            writeln!(out, "{removed} salesperson(s) removed.")?;
        }
    }
    Ok(())
}
