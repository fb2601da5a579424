use chrono::NaiveDate;

use crate::errors::AppError;
use crate::model::application::HalfDayType;

/// Outcome of the day-count calculation. By construction `half_day_type`
/// is set iff `days` is exactly 0.5.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LeaveDuration {
    pub days: f64,
    pub half_day_type: Option<HalfDayType>,
}

/// Derives the leave-day quantity from the requested range and half-day
/// intent. Both ends of the range are inclusive.
///
/// A half-day is only valid when the range is a single calendar day;
/// asking for one over a longer range is rejected rather than coerced.
/// A leftover `half_day_type` submitted without `half_day` is cleared.
pub fn leave_duration(
    start_date: NaiveDate,
    end_date: NaiveDate,
    half_day: bool,
    half_day_type: Option<HalfDayType>,
) -> Result<LeaveDuration, AppError> {
    if start_date > end_date {
        return Err(AppError::validation("start_date cannot be after end_date"));
    }

    if start_date == end_date {
        if half_day {
            let half_day_type = half_day_type.ok_or_else(|| {
                AppError::validation("half_day_type is required for a half-day leave")
            })?;
            return Ok(LeaveDuration {
                days: 0.5,
                half_day_type: Some(half_day_type),
            });
        }
        return Ok(LeaveDuration {
            days: 1.0,
            half_day_type: None,
        });
    }

    if half_day {
        return Err(AppError::validation(
            "half-day is only available when start and end dates are the same",
        ));
    }

    // Inclusive range: both the start and the end day count.
    let days = (end_date - start_date).num_days() + 1;

    Ok(LeaveDuration {
        days: days as f64,
        half_day_type: None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn multi_day_range_is_inclusive() {
        let duration = leave_duration(date(2024, 1, 10), date(2024, 1, 12), false, None).unwrap();
        assert_eq!(duration.days, 3.0);
        assert_eq!(duration.half_day_type, None);
    }

    #[test]
    fn single_day_without_half_day_is_one_day() {
        let duration = leave_duration(date(2024, 1, 10), date(2024, 1, 10), false, None).unwrap();
        assert_eq!(duration.days, 1.0);
        assert_eq!(duration.half_day_type, None);
    }

    #[test]
    fn same_day_half_day_is_half_with_type() {
        let duration = leave_duration(
            date(2024, 2, 1),
            date(2024, 2, 1),
            true,
            Some(HalfDayType::Second),
        )
        .unwrap();
        assert_eq!(duration.days, 0.5);
        assert_eq!(duration.half_day_type, Some(HalfDayType::Second));
    }

    #[test]
    fn half_day_requires_a_type() {
        let err = leave_duration(date(2024, 2, 1), date(2024, 2, 1), true, None).unwrap_err();
        assert!(matches!(err, AppError::Validation { .. }));
        assert!(err.to_string().contains("half_day_type"));
    }

    #[test]
    fn half_day_over_a_range_is_rejected() {
        let err = leave_duration(
            date(2024, 1, 10),
            date(2024, 1, 12),
            true,
            Some(HalfDayType::First),
        )
        .unwrap_err();
        assert!(matches!(err, AppError::Validation { .. }));
    }

    #[test]
    fn stale_half_day_type_is_cleared_on_a_range() {
        // The submitter toggled half-day off but the type field survived;
        // the calculator must not carry it over.
        let duration = leave_duration(
            date(2024, 1, 10),
            date(2024, 1, 12),
            false,
            Some(HalfDayType::First),
        )
        .unwrap();
        assert_eq!(duration.days, 3.0);
        assert_eq!(duration.half_day_type, None);
    }

    #[test]
    fn reversed_range_is_rejected() {
        let err = leave_duration(date(2024, 1, 12), date(2024, 1, 10), false, None).unwrap_err();
        assert_eq!(err.to_string(), "start_date cannot be after end_date");
    }

    #[test]
    fn range_spanning_a_month_boundary() {
        let duration = leave_duration(date(2024, 1, 30), date(2024, 2, 2), false, None).unwrap();
        assert_eq!(duration.days, 4.0);
    }
}
