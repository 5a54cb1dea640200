//! Input validation, run before any store mutation

use chrono::NaiveDate;
use tracker_types::{CreateExercise, NewExercise, NumberOrText, DATE_INPUT_FORMAT};

use crate::{Result, TrackerError};

/// Trimmed, non-empty username
pub fn username(raw: Option<&str>) -> Result<String> {
    required_text("username", raw)
}

/// Trimmed, non-empty description
pub fn description(raw: Option<&str>) -> Result<String> {
    required_text("description", raw)
}

/// Duration in whole minutes; must be a positive integer
pub fn duration(raw: Option<&NumberOrText>) -> Result<u32> {
    let value = match raw {
        None => return Err(TrackerError::validation("duration is required")),
        Some(NumberOrText::Number(n)) => *n,
        Some(NumberOrText::Text(text)) => {
            let text = text.trim();
            if text.is_empty() {
                return Err(TrackerError::validation("duration is required"));
            }
            text.parse::<i64>().map_err(|_| {
                TrackerError::validation(format!("duration must be an integer, got '{}'", text))
            })?
        }
    };

    match u32::try_from(value) {
        Ok(minutes) if minutes > 0 => Ok(minutes),
        _ => Err(TrackerError::validation(format!(
            "duration must be a positive number of minutes, got {}",
            value
        ))),
    }
}

/// Parse a `YYYY-MM-DD` date, naming `field` in the error
pub fn date(field: &str, raw: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), DATE_INPUT_FORMAT).map_err(|_| {
        TrackerError::validation(format!("{} must be a date in YYYY-MM-DD form, got '{}'", field, raw))
    })
}

/// An optional date parameter; blank counts as absent
pub fn optional_date(field: &str, raw: Option<&str>) -> Result<Option<NaiveDate>> {
    match raw.map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => date(field, value).map(Some),
    }
}

/// Exercise date: absent or blank resolves to `today`, anything else must parse
pub fn exercise_date(raw: Option<&str>, today: NaiveDate) -> Result<NaiveDate> {
    Ok(optional_date("date", raw)?.unwrap_or(today))
}

/// Validate a whole exercise request for `user_id`
pub fn new_exercise(user_id: &str, req: &CreateExercise, today: NaiveDate) -> Result<NewExercise> {
    Ok(NewExercise {
        user_id: user_id.to_string(),
        description: description(req.description.as_deref())?,
        duration: duration(req.duration.as_ref())?,
        date: exercise_date(req.date.as_deref(), today)?,
    })
}

fn required_text(field: &str, raw: Option<&str>) -> Result<String> {
    match raw.map(str::trim) {
        Some(value) if !value.is_empty() => Ok(value.to_string()),
        _ => Err(TrackerError::validation(format!("{} is required", field))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio_test::{assert_err, assert_ok};

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, 17).unwrap()
    }

    #[test]
    fn test_username_is_trimmed() {
        assert_eq!(username(Some("  alice ")).unwrap(), "alice");
        assert_err!(username(Some("   ")));
        assert_err!(username(None));
    }

    #[test]
    fn test_duration_forms() {
        assert_eq!(duration(Some(&NumberOrText::Number(30))).unwrap(), 30);
        assert_eq!(duration(Some(&NumberOrText::Text(" 45 ".into()))).unwrap(), 45);

        assert_err!(duration(None));
        assert_err!(duration(Some(&NumberOrText::Text("abc".into()))));
        assert_err!(duration(Some(&NumberOrText::Text("".into()))));
        assert_err!(duration(Some(&NumberOrText::Number(0))));
        assert_err!(duration(Some(&NumberOrText::Number(-5))));
        assert_err!(duration(Some(&NumberOrText::Number(i64::MAX))));
    }

    #[test]
    fn test_exercise_date_defaults_to_today() {
        assert_eq!(exercise_date(None, today()).unwrap(), today());
        assert_eq!(exercise_date(Some(""), today()).unwrap(), today());
        assert_eq!(
            exercise_date(Some("2023-12-31"), today()).unwrap(),
            NaiveDate::from_ymd_opt(2023, 12, 31).unwrap()
        );
    }

    #[test]
    fn test_invalid_exercise_date_is_rejected() {
        let err = exercise_date(Some("not-a-date"), today()).unwrap_err();
        assert!(matches!(err, TrackerError::Validation(_)));
        assert_err!(exercise_date(Some("2024-02-30"), today()));
    }

    #[test]
    fn test_new_exercise_collects_fields() {
        let req = CreateExercise {
            description: Some("pushups".into()),
            duration: Some(NumberOrText::Text("12".into())),
            date: None,
        };

        let exercise = assert_ok!(new_exercise("u1", &req, today()));
        assert_eq!(exercise.user_id, "u1");
        assert_eq!(exercise.description, "pushups");
        assert_eq!(exercise.duration, 12);
        assert_eq!(exercise.date, today());
    }

    #[test]
    fn test_new_exercise_requires_description() {
        let req = CreateExercise {
            description: None,
            duration: Some(NumberOrText::Number(10)),
            date: None,
        };

        let err = new_exercise("u1", &req, today()).unwrap_err();
        assert_eq!(err.to_string(), "description is required");
    }
}
