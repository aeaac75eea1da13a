//! Construction of auditable calculation breakdowns.

use rust_decimal::Decimal;

use crate::models::{BreakdownStep, CalculationBreakdown, PaymentMilestone};

/// Accumulates numbered steps and closes them with a final total.
///
/// [`finish`](Self::finish) appends the final step itself, so the last
/// step's result always equals `base + incentive`.
///
/// # Examples
///
/// ```
/// use subsidy_engine::calculation::BreakdownBuilder;
/// use rust_decimal::Decimal;
///
/// let mut builder = BreakdownBuilder::new();
/// builder.step("Monthly rate lookup", None, serde_json::json!({}), Decimal::from(600_000));
/// let breakdown = builder.finish(Decimal::from(7_200_000), Decimal::ZERO, vec![]);
///
/// assert_eq!(breakdown.steps.len(), 2);
/// assert_eq!(breakdown.final_result(), Decimal::from(7_200_000));
/// assert!(breakdown.is_consistent());
/// ```
#[derive(Debug, Default)]
pub struct BreakdownBuilder {
    steps: Vec<BreakdownStep>,
}

impl BreakdownBuilder {
    /// Creates an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a step and returns its result.
    pub fn step(
        &mut self,
        description: impl Into<String>,
        formula: Option<&str>,
        inputs: serde_json::Value,
        result: Decimal,
    ) -> Decimal {
        self.steps.push(BreakdownStep {
            step_number: self.steps.len() as u32 + 1,
            description: description.into(),
            formula: formula.map(str::to_string),
            inputs,
            result,
        });
        result
    }

    /// Appends the final total step and builds the breakdown.
    pub fn finish(
        mut self,
        base_amount: Decimal,
        incentive_amount: Decimal,
        payment_schedule: Vec<PaymentMilestone>,
    ) -> CalculationBreakdown {
        let total_amount = base_amount + incentive_amount;
        self.step(
            "Final total",
            Some("base_amount + incentive_amount"),
            serde_json::json!({
                "base_amount": base_amount.normalize().to_string(),
                "incentive_amount": incentive_amount.normalize().to_string(),
            }),
            total_amount,
        );

        CalculationBreakdown {
            steps: self.steps,
            base_amount,
            incentive_amount,
            total_amount,
            payment_schedule,
        }
    }
}

/// Splits `amount` into equal instalments paid after each of `months`.
///
/// The last instalment absorbs any remainder so the milestones sum exactly.
pub fn split_payments(amount: Decimal, months: &[u32]) -> Vec<PaymentMilestone> {
    if months.is_empty() || amount.is_zero() {
        return Vec::new();
    }
    let share = (amount / Decimal::from(months.len() as u32)).round_dp(0);
    let mut paid = Decimal::ZERO;
    months
        .iter()
        .enumerate()
        .map(|(i, month)| {
            let value = if i + 1 == months.len() {
                amount - paid
            } else {
                share
            };
            paid += value;
            PaymentMilestone {
                timing: format!("after {} months retained", month),
                amount: value,
            }
        })
        .collect()
}

/// One milestone per year of quarterly payments.
pub fn yearly_quarter_payments(per_quarter: Decimal, quarters: u32) -> Vec<PaymentMilestone> {
    (0..quarters)
        .step_by(4)
        .map(|first| {
            let last = (first + 4).min(quarters);
            PaymentMilestone {
                timing: format!("year {} (quarters {}-{})", first / 4 + 1, first + 1, last),
                amount: per_quarter * Decimal::from(last - first),
            }
        })
        .collect()
}
