//! Calendar-month periods used to filter and compare expenses.

use serde::{Serialize, Serializer, ser::SerializeStruct};
use time::{Date, Month};

/// A calendar month selected for analysis.
///
/// The selected period only ever changes through explicit user input; it is
/// never inferred from the recorded data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Period {
    /// The calendar year.
    pub year: i32,
    /// The calendar month.
    pub month: Month,
}

impl Period {
    /// Create a period from a calendar year and a 1-based month number.
    ///
    /// Returns `None` when `month` is outside `1..=12` or `year` is outside
    /// `1..=9999`, the range where every day of the period is a
    /// representable [Date].
    pub fn from_numbers(year: i32, month: u8) -> Option<Self> {
        if !(1..=9999).contains(&year) {
            return None;
        }

        month_from_number(month).map(|month| Self { year, month })
    }

    /// The period that `date` falls in.
    pub fn containing(date: Date) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// The immediately preceding calendar month, rolling over to December of
    /// the previous year when the current month is January.
    pub fn previous(self) -> Self {
        match self.month {
            Month::January => Self {
                year: self.year - 1,
                month: Month::December,
            },
            month => Self {
                year: self.year,
                month: month.previous(),
            },
        }
    }

    /// The immediately following calendar month, rolling over to January of
    /// the next year when the current month is December.
    pub fn next(self) -> Self {
        match self.month {
            Month::December => Self {
                year: self.year + 1,
                month: Month::January,
            },
            month => Self {
                year: self.year,
                month: month.next(),
            },
        }
    }

    /// The first day of the period.
    pub fn first_day(self) -> Date {
        Date::from_calendar_date(self.year, self.month, 1).expect("invalid period start date")
    }

    /// The last day of the period.
    pub fn last_day(self) -> Date {
        Date::from_calendar_date(self.year, self.month, self.day_count())
            .expect("invalid period end date")
    }

    /// The number of days in the period, accounting for leap years.
    pub fn day_count(self) -> u8 {
        last_day_of_month(self.year, self.month)
    }

    /// Whether `date` falls within the period.
    ///
    /// The comparison is on calendar fields, so it holds for any date value
    /// regardless of how it was originally written down.
    pub fn contains(self, date: Date) -> bool {
        date.year() == self.year && date.month() == self.month
    }

    /// Whether every day of the period is strictly after `today`.
    pub fn starts_after(self, today: Date) -> bool {
        self.first_day() > today
    }

    /// The 1-based month number.
    pub fn month_number(self) -> u8 {
        month_number(self.month)
    }

    /// A human-readable label such as "January 2024".
    pub fn label(self) -> String {
        format!("{} {}", month_name(self.month), self.year)
    }
}

impl Serialize for Period {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut state = serializer.serialize_struct("Period", 2)?;
        state.serialize_field("year", &self.year)?;
        state.serialize_field("month", &self.month_number())?;
        state.end()
    }
}

fn last_day_of_month(year: i32, month: Month) -> u8 {
    match month {
        Month::January
        | Month::March
        | Month::May
        | Month::July
        | Month::August
        | Month::October
        | Month::December => 31,
        Month::April | Month::June | Month::September | Month::November => 30,
        Month::February => {
            if is_leap_year(year) {
                29
            } else {
                28
            }
        }
    }
}

fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || (year % 400 == 0)
}

fn month_number(month: Month) -> u8 {
    match month {
        Month::January => 1,
        Month::February => 2,
        Month::March => 3,
        Month::April => 4,
        Month::May => 5,
        Month::June => 6,
        Month::July => 7,
        Month::August => 8,
        Month::September => 9,
        Month::October => 10,
        Month::November => 11,
        Month::December => 12,
    }
}

/// Convert a 1-based month number into a [Month], if valid.
pub fn month_from_number(month: u8) -> Option<Month> {
    let month = match month {
        1 => Month::January,
        2 => Month::February,
        3 => Month::March,
        4 => Month::April,
        5 => Month::May,
        6 => Month::June,
        7 => Month::July,
        8 => Month::August,
        9 => Month::September,
        10 => Month::October,
        11 => Month::November,
        12 => Month::December,
        _ => return None,
    };

    Some(month)
}

/// The full English name of `month`, used for selector options and labels.
pub fn month_name(month: Month) -> &'static str {
    match month {
        Month::January => "January",
        Month::February => "February",
        Month::March => "March",
        Month::April => "April",
        Month::May => "May",
        Month::June => "June",
        Month::July => "July",
        Month::August => "August",
        Month::September => "September",
        Month::October => "October",
        Month::November => "November",
        Month::December => "December",
    }
}

#[cfg(test)]
mod period_tests {
    use time::{Month, macros::date};

    use crate::period::{Period, month_from_number};

    #[test]
    fn previous_wraps_january_to_december_of_previous_year() {
        let period = Period {
            year: 2024,
            month: Month::January,
        };

        let previous = period.previous();

        assert_eq!(previous.year, 2023);
        assert_eq!(previous.month, Month::December);
    }

    #[test]
    fn previous_stays_in_year_for_other_months() {
        let period = Period {
            year: 2024,
            month: Month::July,
        };

        let previous = period.previous();

        assert_eq!(previous.year, 2024);
        assert_eq!(previous.month, Month::June);
    }

    #[test]
    fn next_wraps_december_to_january_of_next_year() {
        let period = Period {
            year: 2023,
            month: Month::December,
        };

        let next = period.next();

        assert_eq!(next.year, 2024);
        assert_eq!(next.month, Month::January);
    }

    #[test]
    fn day_count_handles_leap_years() {
        let leap_february = Period {
            year: 2024,
            month: Month::February,
        };
        let common_february = Period {
            year: 2023,
            month: Month::February,
        };
        // Century years are only leap years when divisible by 400.
        let century = Period {
            year: 1900,
            month: Month::February,
        };
        let quadricentennial = Period {
            year: 2000,
            month: Month::February,
        };

        assert_eq!(leap_february.day_count(), 29);
        assert_eq!(common_february.day_count(), 28);
        assert_eq!(century.day_count(), 28);
        assert_eq!(quadricentennial.day_count(), 29);
    }

    #[test]
    fn contains_matches_calendar_fields() {
        let period = Period {
            year: 2024,
            month: Month::January,
        };

        assert!(period.contains(date!(2024 - 01 - 01)));
        assert!(period.contains(date!(2024 - 01 - 31)));
        assert!(!period.contains(date!(2024 - 02 - 01)));
        assert!(!period.contains(date!(2023 - 01 - 15)));
    }

    #[test]
    fn starts_after_is_false_for_current_and_past_periods() {
        let today = date!(2024 - 06 - 15);

        let current = Period::containing(today);
        let past = current.previous();
        let future = current.next();

        assert!(!current.starts_after(today));
        assert!(!past.starts_after(today));
        assert!(future.starts_after(today));
    }

    #[test]
    fn from_numbers_rejects_out_of_range_months() {
        assert!(Period::from_numbers(2024, 0).is_none());
        assert!(Period::from_numbers(2024, 13).is_none());

        let period = Period::from_numbers(2024, 12).unwrap();
        assert_eq!(period.month, Month::December);
    }

    #[test]
    fn from_numbers_rejects_out_of_range_years() {
        assert!(Period::from_numbers(0, 1).is_none());
        assert!(Period::from_numbers(10_000, 1).is_none());

        assert!(Period::from_numbers(1, 1).is_some());
        assert!(Period::from_numbers(9999, 12).is_some());
    }

    #[test]
    fn label_spells_out_month_and_year() {
        let period = Period {
            year: 2024,
            month: Month::January,
        };

        assert_eq!(period.label(), "January 2024");
    }

    #[test]
    fn first_and_last_day_span_the_month() {
        let period = Period {
            year: 2024,
            month: Month::February,
        };

        assert_eq!(period.first_day(), date!(2024 - 02 - 01));
        assert_eq!(period.last_day(), date!(2024 - 02 - 29));
    }

    #[test]
    fn month_from_number_covers_the_calendar() {
        for number in 1..=12u8 {
            assert!(month_from_number(number).is_some());
        }
        assert!(month_from_number(0).is_none());
        assert!(month_from_number(13).is_none());
    }
}
