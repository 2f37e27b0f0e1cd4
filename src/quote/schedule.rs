//! Month-by-month amortization schedule for a quoted loan

use chrono::{Months, NaiveDate};
use serde::{Deserialize, Serialize};

use super::calculator::{annuity_payment, LoanQuoteInput};
use super::validation::{validate, OutOfRange};

/// One payment period
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleRow {
    /// Payment number, starting at 1
    pub period: u32,

    /// Due date, when a first due date was supplied
    pub due_date: Option<NaiveDate>,

    pub opening_balance: f64,
    pub payment: f64,
    pub interest: f64,
    pub principal: f64,
    pub closing_balance: f64,
}

/// Full repayment schedule
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AmortizationSchedule {
    pub input: LoanQuoteInput,

    /// Unrounded level payment
    pub monthly_payment: f64,

    pub rows: Vec<ScheduleRow>,
}

impl AmortizationSchedule {
    /// Build the schedule, or report why the input cannot be quoted.
    ///
    /// The last period absorbs the floating-point residual so the loan
    /// closes at exactly zero.
    pub fn build(input: &LoanQuoteInput, first_due: Option<NaiveDate>) -> Result<Self, OutOfRange> {
        validate(input)?;

        let n = input.duration_months;
        let m = input.monthly_rate();
        let payment = annuity_payment(input.principal, n, input.annual_rate);

        let mut rows = Vec::with_capacity(n as usize);
        let mut balance = input.principal;

        for period in 1..=n {
            let interest = balance * m;
            let (paid, principal) = if period == n {
                (balance + interest, balance)
            } else {
                (payment, payment - interest)
            };

            let due_date = first_due.and_then(|d| d.checked_add_months(Months::new(period - 1)));
            let closing = if period == n { 0.0 } else { balance - principal };

            rows.push(ScheduleRow {
                period,
                due_date,
                opening_balance: balance,
                payment: paid,
                interest,
                principal,
                closing_balance: closing,
            });

            balance = closing;
        }

        Ok(Self {
            input: *input,
            monthly_payment: payment,
            rows,
        })
    }

    /// Totals over the whole schedule
    pub fn summary(&self) -> ScheduleSummary {
        let total_paid: f64 = self.rows.iter().map(|r| r.payment).sum();
        let total_interest: f64 = self.rows.iter().map(|r| r.interest).sum();
        let final_balance = self.rows.last().map(|r| r.closing_balance).unwrap_or(0.0);

        ScheduleSummary {
            periods: self.rows.len() as u32,
            total_paid,
            total_interest,
            final_balance,
        }
    }

    /// Rows falling due on or after `from`, at most `limit` of them
    pub fn upcoming(&self, from: NaiveDate, limit: usize) -> Vec<&ScheduleRow> {
        self.rows
            .iter()
            .filter(|r| r.due_date.is_some_and(|d| d >= from))
            .take(limit)
            .collect()
    }
}

/// Summary statistics for a schedule
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleSummary {
    pub periods: u32,
    pub total_paid: f64,
    pub total_interest: f64,
    pub final_balance: f64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_schedule_closes_at_zero() {
        let input = LoanQuoteInput::indicative(1_000_000.0, 84);
        let schedule = AmortizationSchedule::build(&input, None).unwrap();

        assert_eq!(schedule.rows.len(), 84);
        let summary = schedule.summary();
        assert_eq!(summary.final_balance, 0.0);

        // Interest collected equals payments minus principal
        assert_abs_diff_eq!(summary.total_interest, summary.total_paid - 1_000_000.0, epsilon = 1e-6);
        assert_abs_diff_eq!(summary.total_paid, schedule.monthly_payment * 84.0, epsilon = 1e-4);
    }

    #[test]
    fn test_interest_shrinks_each_period() {
        let input = LoanQuoteInput::indicative(5_000_000.0, 60);
        let schedule = AmortizationSchedule::build(&input, None).unwrap();

        for pair in schedule.rows.windows(2) {
            assert!(pair[1].interest < pair[0].interest);
            assert!(pair[1].principal > pair[0].principal);
        }
    }

    #[test]
    fn test_zero_rate_has_no_interest() {
        let input = LoanQuoteInput::new(120_000.0, 12, 0.0);
        let schedule = AmortizationSchedule::build(&input, None).unwrap();
        let summary = schedule.summary();

        assert_eq!(summary.total_interest, 0.0);
        assert_abs_diff_eq!(summary.total_paid, 120_000.0, epsilon = 1e-9);
    }

    #[test]
    fn test_due_dates_clamp_to_month_end() {
        let first = NaiveDate::from_ymd_opt(2025, 1, 31).unwrap();
        let input = LoanQuoteInput::indicative(100_000.0, 3);
        let schedule = AmortizationSchedule::build(&input, Some(first)).unwrap();

        let dates: Vec<_> = schedule.rows.iter().map(|r| r.due_date.unwrap()).collect();
        assert_eq!(dates[0], first);
        assert_eq!(dates[1], NaiveDate::from_ymd_opt(2025, 2, 28).unwrap());
        assert_eq!(dates[2], NaiveDate::from_ymd_opt(2025, 3, 31).unwrap());
    }

    #[test]
    fn test_upcoming_payments() {
        let first = NaiveDate::from_ymd_opt(2025, 9, 15).unwrap();
        let input = LoanQuoteInput::indicative(4_500_000.0, 72);
        let schedule = AmortizationSchedule::build(&input, Some(first)).unwrap();

        let today = NaiveDate::from_ymd_opt(2025, 10, 1).unwrap();
        let next = schedule.upcoming(today, 2);
        assert_eq!(next.len(), 2);
        assert_eq!(next[0].due_date, NaiveDate::from_ymd_opt(2025, 10, 15));
        assert_eq!(next[1].period, 3);
    }

    #[test]
    fn test_out_of_range_has_no_schedule() {
        let input = LoanQuoteInput::indicative(1_000_000.0, 2);
        assert!(AmortizationSchedule::build(&input, None).is_err());
    }
}
