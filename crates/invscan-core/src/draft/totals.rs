use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::DraftError;
use crate::models::draft::InvoiceDraft;

/// Computed amounts of a draft.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvoiceTotals {
    #[serde(with = "rust_decimal::serde::float")]
    pub subtotal: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub tax: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub total: Decimal,
}

impl InvoiceDraft {
    /// Sum of all line totals plus tax at the draft's rate (percent).
    ///
    /// Every row counts, billable or not. Amounts too large for a
    /// `Decimal` yield [`DraftError::Overflow`].
    pub fn totals(&self) -> Result<InvoiceTotals, DraftError> {
        let subtotal = self.items.iter().try_fold(Decimal::ZERO, |sum, item| {
            item.line_total()
                .and_then(|line| sum.checked_add(line))
                .ok_or(DraftError::Overflow("subtotal"))
        })?;
        let tax = subtotal
            .checked_mul(self.tax_rate)
            .and_then(|amount| amount.checked_div(Decimal::ONE_HUNDRED))
            .ok_or(DraftError::Overflow("tax"))?;
        let total = subtotal
            .checked_add(tax)
            .ok_or(DraftError::Overflow("total"))?;

        Ok(InvoiceTotals {
            subtotal,
            tax,
            total,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::config::DraftConfig;
    use crate::models::draft::DraftItem;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;

    fn draft_with(items: &[(i64, i64)], tax_rate: Decimal) -> InvoiceDraft {
        let mut draft = InvoiceDraft::new(
            &DraftConfig::default(),
            NaiveDate::from_ymd_opt(2024, 3, 15).unwrap(),
        );
        draft.tax_rate = tax_rate;
        draft.items = items
            .iter()
            .map(|&(quantity, cents)| DraftItem {
                id: String::new(),
                description: "Row".to_string(),
                quantity: Decimal::from(quantity),
                unit_price: Decimal::new(cents, 2),
            })
            .collect();
        draft
    }

    #[test]
    fn test_totals_without_tax() {
        let totals = draft_with(&[(5, 10000), (1, 24050)], Decimal::ZERO).totals().unwrap();

        assert_eq!(
            totals,
            InvoiceTotals {
                subtotal: Decimal::new(74050, 2),
                tax: Decimal::ZERO,
                total: Decimal::new(74050, 2),
            }
        );
    }

    #[test]
    fn test_totals_with_tax() {
        let totals = draft_with(&[(2, 5000)], Decimal::new(825, 2)).totals().unwrap();

        assert_eq!(totals.subtotal, Decimal::from(100));
        assert_eq!(totals.tax, Decimal::new(825, 2));
        assert_eq!(totals.total, Decimal::new(10825, 2));
    }

    #[test]
    fn test_no_items() {
        let totals = draft_with(&[], Decimal::from(10)).totals().unwrap();
        assert_eq!(totals.total, Decimal::ZERO);
    }

    #[test]
    fn test_oversized_row_reports_overflow() {
        let text = "Widget 4000000000 x 79228162514264337593543950335";
        let mut draft = draft_with(&[], Decimal::ZERO);
        draft.apply_extraction(&crate::extract_invoice_data(text));
        assert_eq!(draft.items[0].quantity, Decimal::from(4_000_000_000u32));

        assert!(matches!(
            draft.totals(),
            Err(DraftError::Overflow("subtotal"))
        ));
    }

    #[test]
    fn test_subtotal_sum_overflow() {
        let mut draft = draft_with(&[], Decimal::ZERO);
        let row = DraftItem {
            id: String::new(),
            description: "Row".to_string(),
            quantity: Decimal::ONE,
            unit_price: Decimal::MAX,
        };
        draft.items = vec![row.clone(), row];

        assert!(matches!(
            draft.totals(),
            Err(DraftError::Overflow("subtotal"))
        ));
    }

    #[test]
    fn test_tax_overflow() {
        let mut draft = draft_with(&[], Decimal::from(200));
        draft.items = vec![DraftItem {
            id: String::new(),
            description: "Row".to_string(),
            quantity: Decimal::ONE,
            unit_price: Decimal::MAX,
        }];

        assert!(matches!(draft.totals(), Err(DraftError::Overflow("tax"))));
    }
}
