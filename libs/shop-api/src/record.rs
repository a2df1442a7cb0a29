use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::table::TableRecord;

// ════════════════════════════════════════════════════════════════
//  Salesperson
// ════════════════════════════════════════════════════════════════

/// One salesperson. Identity is the position in the collection; the name
/// is what sales refer to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalespersonRecord {
    pub name: String,
}

impl SalespersonRecord {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl TableRecord for SalespersonRecord {
    const KIND: &'static str = "salespeople";
    const COLUMNS: &'static [&'static str] = &["name"];
}

// ════════════════════════════════════════════════════════════════
//  Client
// ════════════════════════════════════════════════════════════════

/// Client registered during a session. Never written to disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientRecord {
    pub name: String,
    pub phone: Option<String>,
}

// ════════════════════════════════════════════════════════════════
//  Payment mode
// ════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(try_from = "String")]
pub enum PaymentMode {
    /// Paid in full at the time of sale.
    #[default]
    Full,
    /// Partially paid; the remainder is receivable.
    Installment,
}

impl PaymentMode {
    /// Label written to the sales file.
    pub fn label(self) -> &'static str {
        match self {
            PaymentMode::Full => "full",
            PaymentMode::Installment => "installment",
        }
    }
}

impl std::fmt::Display for PaymentMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown payment mode '{0}'")]
pub struct UnknownPaymentMode(pub String);

impl std::str::FromStr for PaymentMode {
    type Err = UnknownPaymentMode;

    /// Accepts the canonical labels and the Portuguese display labels
    /// ("À Vista" / "A Prazo") used by older sheets.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "full" | "à vista" | "a vista" => Ok(PaymentMode::Full),
            "installment" | "a prazo" => Ok(PaymentMode::Installment),
            _ => Err(UnknownPaymentMode(s.to_string())),
        }
    }
}

impl TryFrom<String> for PaymentMode {
    type Error = UnknownPaymentMode;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl Serialize for PaymentMode {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

// ════════════════════════════════════════════════════════════════
//  Sale
// ════════════════════════════════════════════════════════════════

/// One sale row.
///
/// At creation `amount_paid + amount_receivable == total_amount` and
/// `amount_receivable == 0` for [`PaymentMode::Full`]. Rows read back from
/// disk are taken as they are and are not re-checked.
///
/// Field order matches [`SaleRecord::COLUMNS`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaleRecord {
    pub salesperson: String,
    pub client: String,
    pub product: String,
    #[serde(with = "rust_decimal::serde::str")]
    pub total_amount: Decimal,
    pub payment_mode: PaymentMode,
    #[serde(with = "rust_decimal::serde::str")]
    pub amount_paid: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub amount_receivable: Decimal,
}

impl TableRecord for SaleRecord {
    const KIND: &'static str = "sales";
    const COLUMNS: &'static [&'static str] = &[
        "salesperson",
        "client",
        "product",
        "total_amount",
        "payment_mode",
        "amount_paid",
        "amount_receivable",
    ];
}
