use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use serde::Deserialize;

use record_store::RowToken;
use sales_ledger::{SaleDraft, ShopPaths};
use shop_api::{Decimal, PaymentMode};

use crate::error::ShopError;

// ═══════════════════════════════════════════════════════════════
//  CLI
// ═══════════════════════════════════════════════════════════════

#[derive(Parser)]
#[command(name = "shop", about = "Sales and salespeople ledger for a small shop")]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Args, Clone, Debug)]
pub struct GlobalArgs {
    /// Path to shop.toml
    #[arg(long, global = true, default_value = "shop.toml", env = "SHOP_CONFIG")]
    pub config: String,

    /// Directory holding the table files (overrides data_dir in the config)
    #[arg(long, global = true, env = "SHOP_DATA_DIR")]
    pub data_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Register, list and delete salespeople
    #[command(subcommand)]
    Salesperson(SalespersonCmd),

    /// Record, list and delete sales
    #[command(subcommand)]
    Sale(SaleCmd),

    /// Read commands from stdin, keeping registered clients for the session
    Session,
}

#[derive(Subcommand, Debug)]
pub enum SalespersonCmd {
    /// Register a salesperson
    Add { name: String },

    /// List salespeople with their row tokens
    List {
        #[arg(long)]
        json: bool,
    },

    /// Delete salespeople by row token (as shown by `list`)
    Delete { tokens: Vec<RowToken> },
}

#[derive(Subcommand, Debug)]
pub enum SaleCmd {
    /// Record a sale
    Add(SaleAddArgs),

    /// List sales with their row tokens and totals
    List {
        #[arg(long)]
        json: bool,
    },

    /// Delete sales by row token (as shown by `list`)
    Delete { tokens: Vec<RowToken> },

    /// Total sold, received and receivable
    Summary {
        #[arg(long)]
        json: bool,
    },
}

#[derive(Args, Debug)]
pub struct SaleAddArgs {
    /// Salesperson name, must be registered
    #[arg(long)]
    pub salesperson: Option<String>,

    #[arg(long)]
    pub client: String,

    /// Product or service sold
    #[arg(long)]
    pub product: String,

    /// Total amount
    #[arg(long, allow_hyphen_values = true)]
    pub total: Decimal,

    /// Paid in installments instead of in full
    #[arg(long)]
    pub installment: bool,

    /// Amount already paid (installments only, defaults to 0)
    #[arg(long, requires = "installment", allow_hyphen_values = true)]
    pub paid: Option<Decimal>,
}

impl SaleAddArgs {
    pub fn to_draft(&self) -> SaleDraft {
        SaleDraft {
            salesperson: self.salesperson.clone(),
            client: self.client.clone(),
            product: self.product.clone(),
            total_amount: self.total,
            payment_mode: if self.installment {
                PaymentMode::Installment
            } else {
                PaymentMode::Full
            },
            amount_paid: self.paid.unwrap_or(Decimal::ZERO),
        }
    }
}

// ═══════════════════════════════════════════════════════════════
//  Config file (TOML)
// ═══════════════════════════════════════════════════════════════

#[derive(Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ShopConfig {
    pub data_dir: PathBuf,
    pub salespeople_file: String,
    pub sales_file: String,
    /// Prefix for amounts in listings.
    pub currency: String,
}

impl Default for ShopConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("planilha"),
            salespeople_file: "salespeople.csv".into(),
            sales_file: "sales.csv".into(),
            currency: "R$".into(),
        }
    }
}

impl ShopConfig {
    pub fn load(path: &str) -> Result<Self, ShopError> {
        let content = std::fs::read_to_string(path).map_err(|e| ShopError::Config {
            context: "read",
            detail: format!("'{path}': {e}"),
        })?;
        toml::from_str(&content).map_err(|e| ShopError::Config {
            context: "parse",
            detail: format!("'{path}': {e}"),
        })
    }
}

// ═══════════════════════════════════════════════════════════════
//  Effective — merged config
// ═══════════════════════════════════════════════════════════════

/// Settings after merging: shop.toml < env/CLI.
#[derive(Debug, Clone)]
pub struct Effective {
    pub paths: ShopPaths,
    pub currency: String,
}

impl Effective {
    pub fn new(args: &GlobalArgs) -> Result<Self, ShopError> {
        let cfg = if Path::new(&args.config).exists() {
            ShopConfig::load(&args.config)?
        } else {
            tracing::debug!(config = %args.config, "no config file, using defaults");
            ShopConfig::default()
        };

        let data_dir = args.data_dir.clone().unwrap_or(cfg.data_dir);
        Ok(Self {
            paths: ShopPaths::in_dir(&data_dir, &cfg.salespeople_file, &cfg.sales_file),
            currency: cfg.currency,
        })
    }
}
