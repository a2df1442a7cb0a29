pub mod render;
pub mod sale;
pub mod salesperson;
pub mod session;

use std::io::Write;

use sales_ledger::Shop;

use crate::config::{Commands, Effective};
use crate::error::ShopError;

/// Open the shop, show any load notices, then run one command.
pub fn run(command: Commands, settings: &Effective) -> Result<(), ShopError> {
    let (mut shop, notices) = Shop::open(&settings.paths);

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    for notice in &notices {
        render::notice(&mut out, notice)?;
    }

    match command {
        Commands::Salesperson(cmd) => salesperson::run(&mut shop, &cmd, &mut out),
        Commands::Sale(cmd) => {
            sale::run(&mut shop, &cmd, sale::ClientCheck::Off, settings, &mut out)
        }
        Commands::Session => {
            let stdin = std::io::stdin();
            session::run(&mut shop, settings, stdin.lock(), &mut out)
        }
    }?;
    out.flush()?;
    Ok(())
}
