use std::io::{BufRead, Write};

use clap::{Parser, Subcommand};

use sales_ledger::Shop;

use super::{render, sale, salesperson};
use crate::config::{Effective, SaleCmd, SalespersonCmd};
use crate::error::ShopError;

// ═══════════════════════════════════════════════════════════════
//  Session commands
// ═══════════════════════════════════════════════════════════════

#[derive(Parser, Debug)]
#[command(name = "shop", no_binary_name = true, disable_version_flag = true)]
struct SessionLine {
    #[command(subcommand)]
    command: SessionCommand,
}

#[derive(Subcommand, Debug)]
enum SessionCommand {
    /// Register a client for this session
    #[command(subcommand)]
    Client(ClientCmd),

    /// List clients registered in this session
    Clients,

    /// Register, list and delete salespeople
    #[command(subcommand)]
    Salesperson(SalespersonCmd),

    /// Record, list and delete sales
    #[command(subcommand)]
    Sale(SaleCmd),

    /// End the session
    #[command(alias = "exit")]
    Quit,
}

#[derive(Subcommand, Debug)]
enum ClientCmd {
    /// Register a client (phone is optional)
    Add { name: String, phone: Option<String> },
}

enum Flow {
    Continue,
    Quit,
}

// ═══════════════════════════════════════════════════════════════
//  Loop
// ═══════════════════════════════════════════════════════════════

/// Read one command per line until `quit` or end of input.
///
/// Store notices are printed and the session goes on; only a failure to
/// write the output itself ends it.
pub fn run<R: BufRead>(
    shop: &mut Shop,
    settings: &Effective,
    mut input: R,
    out: &mut dyn Write,
) -> Result<(), ShopError> {
    writeln!(out, "shop session, type `help` for commands")?;

    let mut line = String::new();
    loop {
        write!(out, "> ")?;
        out.flush()?;

        line.clear();
        if input.read_line(&mut line)? == 0 {
            writeln!(out)?;
            break;
        }

        let args = split_args(line.trim_end_matches(['\r', '\n']));
        if args.is_empty() {
            continue;
        }

        let parsed = match SessionLine::try_parse_from(args) {
            Ok(p) => p,
            Err(e) => {
                write!(out, "{e}")?;
                continue;
            }
        };

        match handle(shop, parsed.command, settings, out) {
            Ok(Flow::Continue) => {}
            Ok(Flow::Quit) => break,
            Err(ShopError::Store(e)) => render::notice(out, &e)?,
            Err(e) => return Err(e),
        }
    }

    tracing::debug!("session ended");
    Ok(())
}

fn handle(
    shop: &mut Shop,
    command: SessionCommand,
    settings: &Effective,
    out: &mut dyn Write,
) -> Result<Flow, ShopError> {
    match command {
        SessionCommand::Client(ClientCmd::Add { name, phone }) => {
            let client = shop.clients.register(&name, phone.as_deref())?;
            writeln!(out, "Client {} registered.", client.name)?;
        }
        SessionCommand::Clients => {
            if shop.clients.is_empty() {
                writeln!(out, "No clients registered in this session.")?;
            }
            for c in shop.clients.clients() {
                writeln!(out, "{} ({})", c.name, c.phone.as_deref().unwrap_or("-"))?;
            }
        }
        SessionCommand::Salesperson(cmd) => salesperson::run(shop, &cmd, out)?,
        SessionCommand::Sale(cmd) => {
            // Salespeople may have been added by another session.
            if let Some(notice) = shop.salespeople.refresh() {
                render::notice(out, &notice)?;
            }
            if matches!(cmd, SaleCmd::Add(_)) && shop.clients.is_empty() {
                writeln!(out, "Register a client before recording sales.")?;
                return Ok(Flow::Continue);
            }
            sale::run(shop, &cmd, sale::ClientCheck::Registered, settings, out)?;
        }
        SessionCommand::Quit => return Ok(Flow::Quit),
    }
    Ok(Flow::Continue)
}

// ═══════════════════════════════════════════════════════════════
//  Argument splitting
// ═══════════════════════════════════════════════════════════════

/// Split a session line into arguments. Whitespace separates arguments,
/// double quotes group words, and `""` inside quotes is a literal quote.
fn split_args(line: &str) -> Vec<String> {
    let mut args = Vec::new();
    let mut chars = line.chars().peekable();
    let mut arg = String::new();

    loop {
        while chars.peek().is_some_and(|c| c.is_whitespace()) {
            chars.next();
        }
        if chars.peek().is_none() {
            break;
        }

        loop {
            match chars.peek() {
                Some(&'"') => {
                    chars.next(); // consume opening quote
                    loop {
                        match chars.next() {
                            Some('"') => {
                                if chars.peek() == Some(&'"') {
                                    chars.next();
                                    arg.push('"');
                                } else {
                                    break;
                                }
                            }
                            Some(c) => arg.push(c),
                            None => break, // unterminated quote, take the rest
                        }
                    }
                }
                Some(&c) if c.is_whitespace() => break,
                Some(&c) => {
                    arg.push(c);
                    chars.next();
                }
                None => break,
            }
        }

        args.push(std::mem::take(&mut arg));
    }

    args
}
