//! Derives the month report from the ledger.
//!
//! Everything in this module is a pure function of `(expenses, period,
//! today)`. Handlers take a snapshot of the ledger, derive a report, and
//! render it; nothing here touches the clock, the store, or shared state.

use serde::Serialize;
use time::{Date, Duration};

use crate::{expense::Expense, period::Period};

/// The days of a period that have no recorded expense.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MissingDays {
    /// Days with no expense, ascending, never later than today.
    pub days: Vec<Date>,
    /// True when the whole period is after today.
    ///
    /// A future period reports no missing days, and this flag lets callers
    /// tell "the period has not started" apart from "every day is covered".
    pub future_period: bool,
}

/// The selected period's spending next to the previous period's.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Comparison {
    /// Total spent in the period before the selected one.
    pub previous_total: f64,
    /// Total spent in the selected period.
    pub current_total: f64,
    /// `current_total - previous_total`.
    pub difference: f64,
    /// The difference as a percentage of `previous_total`, rounded to one
    /// decimal place. Exactly 0 when `previous_total` is zero.
    pub percent_change: f64,
}

/// Everything the dashboard shows for one period, derived from the ledger.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthReport {
    /// The period the report covers.
    pub period: Period,
    /// The expenses dated within the period, in ledger order.
    pub expenses: Vec<Expense>,
    /// The sum of amounts over [MonthReport::expenses].
    pub total: f64,
    /// Per-category sums, in first-seen order.
    pub category_totals: Vec<(String, f64)>,
    /// Per-day sums, in first-seen order.
    pub daily_totals: Vec<(Date, f64)>,
    /// The days of the period with nothing recorded.
    pub missing_days: MissingDays,
    /// This period's spending next to the previous period's.
    pub comparison: Comparison,
}

impl MonthReport {
    /// Derive the report for `period` from the full ledger.
    ///
    /// `today` should be the current date in the server's local timezone.
    pub fn derive(expenses: &[Expense], period: Period, today: Date) -> Self {
        let in_period = expenses_in_period(expenses, period);
        let total = sum_amounts(&in_period);
        let category_totals = totals_by_key(&in_period, |expense| expense.category.clone());
        let daily_totals = totals_by_key(&in_period, |expense| expense.date);
        let missing_days = missing_days(&daily_totals, period, today);
        let comparison = compare_with_previous(expenses, period, total);

        Self {
            period,
            expenses: in_period,
            total,
            category_totals,
            daily_totals,
            missing_days,
            comparison,
        }
    }
}

/// Select the expenses whose date falls within `period`, in ledger order.
///
/// Dates are compared on their calendar month and year, so the result is
/// independent of how dates were formatted on disk.
pub fn expenses_in_period(expenses: &[Expense], period: Period) -> Vec<Expense> {
    expenses
        .iter()
        .filter(|expense| period.contains(expense.date))
        .cloned()
        .collect()
}

/// Sum the amounts of `expenses`.
pub fn sum_amounts(expenses: &[Expense]) -> f64 {
    expenses.iter().map(|expense| expense.amount).sum()
}

/// Sum expense amounts grouped by `key`, in first-seen key order.
///
/// The ordered pairs make chart label order explicit: two runs over the same
/// ledger always produce the same series.
pub fn totals_by_key<K, F>(expenses: &[Expense], key: F) -> Vec<(K, f64)>
where
    K: PartialEq,
    F: Fn(&Expense) -> K,
{
    let mut totals: Vec<(K, f64)> = Vec::new();

    for expense in expenses {
        let expense_key = key(expense);

        match totals.iter_mut().find(|(seen, _)| *seen == expense_key) {
            Some((_, total)) => *total += expense.amount,
            None => totals.push((expense_key, expense.amount)),
        }
    }

    totals
}

/// Find the days of `period`, from day one through the earlier of the
/// period's last day and `today`, that have no entry in `daily_totals`.
pub fn missing_days(daily_totals: &[(Date, f64)], period: Period, today: Date) -> MissingDays {
    if period.starts_after(today) {
        return MissingDays {
            days: Vec::new(),
            future_period: true,
        };
    }

    let first_day = period.first_day();
    let days = (0..i64::from(period.day_count()))
        .filter_map(|offset| first_day.checked_add(Duration::days(offset)))
        .take_while(|date| *date <= today)
        .filter(|date| !daily_totals.iter().any(|(day, _)| day == date))
        .collect();

    MissingDays {
        days,
        future_period: false,
    }
}

/// Compare spending in `period` against the period before it.
///
/// The previous period follows calendar rules: the month before January 2024
/// is December 2023.
pub fn compare_with_previous(
    expenses: &[Expense],
    period: Period,
    current_total: f64,
) -> Comparison {
    let previous_period = period.previous();
    let previous_total = expenses
        .iter()
        .filter(|expense| previous_period.contains(expense.date))
        .map(|expense| expense.amount)
        .sum();

    let difference = current_total - previous_total;
    let percent_change = if previous_total == 0.0 {
        0.0
    } else {
        round_to_tenth(difference / previous_total * 100.0)
    };

    Comparison {
        previous_total,
        current_total,
        difference,
        percent_change,
    }
}

fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod report_tests {
    use time::{Date, macros::date};

    use crate::{
        expense::Expense,
        period::{Period, month_from_number},
    };

    use super::{
        MonthReport, compare_with_previous, expenses_in_period, missing_days, sum_amounts,
        totals_by_key,
    };

    fn expense(id: i64, amount: f64, category: &str, date: Date) -> Expense {
        Expense {
            id,
            amount,
            category: category.to_owned(),
            date,
            note: String::new(),
        }
    }

    fn period(month: u8, year: i32) -> Period {
        Period::from_numbers(year, month).expect("test period should be valid")
    }

    /// The worked example: two January records and one December record.
    fn sample_ledger() -> Vec<Expense> {
        vec![
            expense(1, 100.0, "Food", date!(2024 - 01 - 05)),
            expense(2, 50.0, "Rent", date!(2024 - 01 - 05)),
            expense(3, 200.0, "Food", date!(2023 - 12 - 20)),
        ]
    }

    #[test]
    fn filter_selects_only_records_in_period() {
        let ledger = sample_ledger();

        let filtered = expenses_in_period(&ledger, period(1, 2024));

        assert_eq!(filtered.len(), 2);
        assert!(filtered.iter().all(|expense| {
            expense.date.month() == time::Month::January && expense.date.year() == 2024
        }));
    }

    #[test]
    fn filter_complement_holds_no_period_records() {
        let ledger = sample_ledger();
        let selected = period(1, 2024);

        let filtered = expenses_in_period(&ledger, selected);
        let complement: Vec<_> = ledger
            .iter()
            .filter(|expense| !filtered.contains(expense))
            .collect();

        assert_eq!(filtered.len() + complement.len(), ledger.len());
        assert!(complement.iter().all(|expense| !selected.contains(expense.date)));
    }

    #[test]
    fn filter_preserves_ledger_order() {
        let ledger = vec![
            expense(1, 1.0, "Food", date!(2024 - 01 - 20)),
            expense(2, 2.0, "Rent", date!(2024 - 01 - 05)),
            expense(3, 3.0, "Food", date!(2024 - 01 - 10)),
        ];

        let filtered = expenses_in_period(&ledger, period(1, 2024));

        let ids: Vec<_> = filtered.iter().map(|expense| expense.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn totals_by_key_uses_first_seen_order() {
        let ledger = vec![
            expense(1, 100.0, "Food", date!(2024 - 01 - 05)),
            expense(2, 50.0, "Rent", date!(2024 - 01 - 06)),
            expense(3, 25.0, "Food", date!(2024 - 01 - 07)),
        ];

        let totals = totals_by_key(&ledger, |expense| expense.category.clone());

        assert_eq!(
            totals,
            vec![("Food".to_owned(), 125.0), ("Rent".to_owned(), 50.0)]
        );
    }

    #[test]
    fn totals_by_key_preserves_grand_total() {
        let ledger = sample_ledger();
        let filtered = expenses_in_period(&ledger, period(1, 2024));

        let by_category = totals_by_key(&filtered, |expense| expense.category.clone());
        let by_date = totals_by_key(&filtered, |expense| expense.date);

        let grand_total = sum_amounts(&filtered);
        let category_sum: f64 = by_category.iter().map(|(_, total)| total).sum();
        let date_sum: f64 = by_date.iter().map(|(_, total)| total).sum();
        assert_eq!(category_sum, grand_total);
        assert_eq!(date_sum, grand_total);
    }

    #[test]
    fn missing_days_stop_at_today() {
        let today = date!(2024 - 01 - 15);
        let daily_totals = vec![(date!(2024 - 01 - 05), 100.0), (date!(2024 - 01 - 10), 50.0)];

        let missing = missing_days(&daily_totals, period(1, 2024), today);

        assert!(!missing.future_period);
        assert_eq!(missing.days.len(), 13);
        assert_eq!(missing.days.first(), Some(&date!(2024 - 01 - 01)));
        assert_eq!(missing.days.last(), Some(&date!(2024 - 01 - 15)));
        assert!(!missing.days.contains(&date!(2024 - 01 - 05)));
        assert!(!missing.days.contains(&date!(2024 - 01 - 10)));
    }

    #[test]
    fn missing_days_cover_whole_month_once_it_has_passed() {
        let today = date!(2024 - 02 - 10);
        let daily_totals = vec![(date!(2024 - 01 - 05), 100.0)];

        let missing = missing_days(&daily_totals, period(1, 2024), today);

        assert_eq!(missing.days.len(), 30);
        assert_eq!(missing.days.last(), Some(&date!(2024 - 01 - 31)));
    }

    #[test]
    fn missing_days_partition_the_examined_days() {
        let today = date!(2024 - 01 - 15);
        let daily_totals = vec![(date!(2024 - 01 - 05), 100.0), (date!(2024 - 01 - 10), 50.0)];

        let missing = missing_days(&daily_totals, period(1, 2024), today);

        // Missing and recorded days together cover days 1 through 15 exactly.
        assert_eq!(missing.days.len() + daily_totals.len(), 15);
        assert!(missing.days.iter().all(|day| {
            !daily_totals.iter().any(|(recorded, _)| recorded == day)
        }));
    }

    #[test]
    fn leap_year_february_has_29_days() {
        let missing = missing_days(&[], period(2, 2024), date!(2024 - 12 - 31));

        assert_eq!(missing.days.len(), 29);
        assert_eq!(missing.days.last(), Some(&date!(2024 - 02 - 29)));
    }

    #[test]
    fn non_leap_year_february_has_28_days() {
        let missing = missing_days(&[], period(2, 2023), date!(2023 - 12 - 31));

        assert_eq!(missing.days.len(), 28);
        assert_eq!(missing.days.last(), Some(&date!(2023 - 02 - 28)));
    }

    #[test]
    fn future_period_reports_no_missing_days() {
        let missing = missing_days(&[], period(2, 2024), date!(2024 - 01 - 15));

        assert!(missing.future_period);
        assert!(missing.days.is_empty());
    }

    #[test]
    fn current_period_is_not_future_on_its_first_day() {
        let missing = missing_days(&[], period(1, 2024), date!(2024 - 01 - 01));

        assert!(!missing.future_period);
        assert_eq!(missing.days, vec![date!(2024 - 01 - 01)]);
    }

    #[test]
    fn previous_period_of_january_is_december_last_year() {
        let comparison = compare_with_previous(&sample_ledger(), period(1, 2024), 150.0);

        assert_eq!(comparison.previous_total, 200.0);
    }

    #[test]
    fn percent_change_is_zero_when_previous_total_is_zero() {
        let ledger = vec![expense(1, 500.0, "Rent", date!(2024 - 01 - 05))];

        let comparison = compare_with_previous(&ledger, period(1, 2024), 500.0);

        assert_eq!(comparison.previous_total, 0.0);
        assert_eq!(comparison.difference, 500.0);
        assert_eq!(comparison.percent_change, 0.0);
    }

    #[test]
    fn percent_change_rounds_to_one_decimal_place() {
        let ledger = vec![
            expense(1, 300.0, "Rent", date!(2023 - 12 - 05)),
            expense(2, 400.0, "Rent", date!(2024 - 01 - 05)),
        ];

        let comparison = compare_with_previous(&ledger, period(1, 2024), 400.0);

        assert_eq!(comparison.difference, 100.0);
        assert_eq!(comparison.percent_change, 33.3);
    }

    #[test]
    fn report_matches_worked_scenario() {
        let today = date!(2024 - 01 - 15);

        let report = MonthReport::derive(&sample_ledger(), period(1, 2024), today);

        assert_eq!(report.expenses.len(), 2);
        assert_eq!(report.total, 150.0);
        assert_eq!(
            report.category_totals,
            vec![("Food".to_owned(), 100.0), ("Rent".to_owned(), 50.0)]
        );
        assert_eq!(report.daily_totals, vec![(date!(2024 - 01 - 05), 150.0)]);
        assert_eq!(report.comparison.previous_total, 200.0);
        assert_eq!(report.comparison.difference, -50.0);
        assert_eq!(report.comparison.percent_change, -25.0);
    }

    #[test]
    fn report_for_empty_ledger_is_empty() {
        let today = date!(2024 - 01 - 15);

        let report = MonthReport::derive(&[], period(1, 2024), today);

        assert!(report.expenses.is_empty());
        assert_eq!(report.total, 0.0);
        assert!(report.category_totals.is_empty());
        assert!(report.daily_totals.is_empty());
        // Every day up to today counts as missing.
        assert_eq!(report.missing_days.days.len(), 15);
        assert_eq!(report.comparison.previous_total, 0.0);
        assert_eq!(report.comparison.percent_change, 0.0);
    }

    #[test]
    fn report_for_future_period_of_empty_ledger_sets_flag() {
        let today = date!(2024 - 01 - 15);

        let report = MonthReport::derive(&[], period(3, 2024), today);

        assert!(report.missing_days.future_period);
        assert!(report.missing_days.days.is_empty());
    }

    #[test]
    fn deriving_twice_yields_identical_reports() {
        let ledger = sample_ledger();
        let today = date!(2024 - 01 - 15);

        let first = MonthReport::derive(&ledger, period(1, 2024), today);
        let second = MonthReport::derive(&ledger, period(1, 2024), today);

        assert_eq!(first, second);
    }

    #[test]
    fn month_from_number_matches_period_months() {
        for month in 1..=12 {
            let selected = period(month, 2024);
            assert_eq!(Some(selected.month), month_from_number(month));
        }
    }
}
