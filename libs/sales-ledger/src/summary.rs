use serde::Serialize;
use shop_api::{Decimal, SaleRecord, StoreError};

/// Totals over a set of sales.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Summary {
    #[serde(with = "rust_decimal::serde::str")]
    pub total_sold: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub total_paid: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub total_receivable: Decimal,
}

/// Sum totals and payments. The receivable is derived from the two sums,
/// not from each row's `amount_receivable`, so a hand-edited row cannot make
/// the three figures disagree.
///
/// Sums that leave the `Decimal` range return [`StoreError::AmountOverflow`].
pub fn summarize(sales: &[SaleRecord]) -> Result<Summary, StoreError> {
    let overflow = || StoreError::AmountOverflow("sales");
    let (total_sold, total_paid) =
        sales
            .iter()
            .try_fold((Decimal::ZERO, Decimal::ZERO), |(sold, paid), s| {
                Some((
                    sold.checked_add(s.total_amount)?,
                    paid.checked_add(s.amount_paid)?,
                ))
            })
            .ok_or_else(overflow)?;
    let total_receivable = total_sold.checked_sub(total_paid).ok_or_else(overflow)?;
    Ok(Summary {
        total_sold,
        total_paid,
        total_receivable,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use shop_api::PaymentMode;

    fn row(total: i64, paid: i64, receivable: i64) -> SaleRecord {
        SaleRecord {
            salesperson: "Ana".into(),
            client: "Bob".into(),
            product: "Widget".into(),
            total_amount: Decimal::from(total),
            payment_mode: PaymentMode::Installment,
            amount_paid: Decimal::from(paid),
            amount_receivable: Decimal::from(receivable),
        }
    }

    #[test]
    fn empty_is_zero() {
        assert_eq!(summarize(&[]).unwrap(), Summary::default());
    }

    #[test]
    fn sums_totals_and_payments() {
        let s = summarize(&[row(100, 100, 0), row(50, 20, 30)]).unwrap();
        assert_eq!(s.total_sold, Decimal::from(150));
        assert_eq!(s.total_paid, Decimal::from(120));
        assert_eq!(s.total_receivable, Decimal::from(30));
    }

    #[test]
    fn receivable_ignores_corrupted_rows() {
        let s = summarize(&[row(100, 40, 999)]).unwrap();
        assert_eq!(s.total_receivable, Decimal::from(60));
    }

    #[test]
    fn cents_stay_exact() {
        let mut a = row(0, 0, 0);
        a.total_amount = Decimal::new(10, 2);
        a.amount_paid = Decimal::new(10, 2);
        let mut b = a.clone();
        b.total_amount = Decimal::new(20, 2);
        let s = summarize(&[a, b]).unwrap();
        assert_eq!(s.total_sold, Decimal::new(30, 2));
        assert_eq!(s.total_receivable, Decimal::new(10, 2));
    }

    #[test]
    fn overflowing_totals_are_an_error() {
        let mut big = row(0, 0, 0);
        big.total_amount = Decimal::MAX;
        big.amount_paid = Decimal::MAX;
        let err = summarize(&[big.clone(), big.clone()]).unwrap_err();
        assert!(matches!(err, StoreError::AmountOverflow(_)));
        assert_eq!(err.kind(), shop_api::ErrorKind::Read);

        // Each sum fits, the difference does not.
        big.amount_paid = Decimal::MIN;
        assert!(matches!(summarize(&[big]), Err(StoreError::AmountOverflow(_))));
    }
}
