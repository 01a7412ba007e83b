use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{
    api::error::ValidationError,
    model::{DateRange, Exercise, ExerciseLogEntry, ValidateModel},
    types::{date::parse_date_strict, Uuid},
};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateExerciseRequest {
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub duration: Option<f64>,
    #[serde(default)]
    pub date: Option<String>,
}

impl CreateExerciseRequest {
    pub fn description(&self) -> Result<&str, ValidationError> {
        match self.description.as_deref() {
            Some(description) if !description.is_empty() => Ok(description),
            _ => Err(ValidationError::new("All exercise fields are required")),
        }
    }

    pub fn duration(&self) -> Result<f64, ValidationError> {
        self.duration
            .ok_or_else(|| ValidationError::new("All exercise fields are required"))
    }

    /// The exercise date when one was supplied; `None` means the caller wants
    /// the server-side default
    pub fn date(&self) -> Result<Option<NaiveDate>, ValidationError> {
        match self.date.as_deref() {
            None => Ok(None),
            Some(raw) => parse_date_strict(raw)
                .map(Some)
                .ok_or_else(|| ValidationError::new("Invalid date")),
        }
    }
}

impl ValidateModel for CreateExerciseRequest {
    fn validate(&self) -> Result<(), ValidationError> {
        self.description()?;
        self.duration()?;
        Ok(())
    }
}

/// Created exercise merged with the owning user's name
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExerciseResponse {
    pub id: Uuid,
    pub user_id: Uuid,
    pub username: String,
    pub description: String,
    pub duration: f64,
    pub date: NaiveDate,
}

impl ExerciseResponse {
    pub fn new(exercise: Exercise, username: String) -> Self {
        let Exercise {
            id,
            user_id,
            description,
            duration,
            date,
        } = exercise;
        Self {
            id,
            user_id,
            username,
            description,
            duration,
            date,
        }
    }
}

/// Raw log-listing query params; everything arrives as strings and gets
/// validated here before any storage work happens
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogsQuery {
    #[serde(default)]
    pub from: Option<String>,
    #[serde(default)]
    pub to: Option<String>,
    #[serde(default)]
    pub limit: Option<String>,
}

impl LogsQuery {
    pub fn parse(&self) -> Result<(DateRange, Option<u64>), ValidationError> {
        let mut date_range = DateRange::default();

        if let Some(from) = self.from.as_deref() {
            date_range.from = Some(
                parse_date_strict(from)
                    .ok_or_else(|| ValidationError::new("Invalid date query params"))?,
            );
        }

        if let Some(to) = self.to.as_deref() {
            date_range.to = Some(
                parse_date_strict(to)
                    .ok_or_else(|| ValidationError::new("Invalid date query params"))?,
            );
        }

        let limit = match self.limit.as_deref() {
            None => None,
            Some(raw) => match raw.parse::<u64>() {
                Ok(limit) if limit > 0 => Some(limit),
                _ => {
                    return Err(ValidationError::new(
                        "Limit query param should be positive integer",
                    ))
                },
            },
        };

        Ok((date_range, limit))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogsResponse {
    pub username: String,
    pub id: Uuid,
    pub count: i64,
    pub logs: Vec<ExerciseLogEntry>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(
        description: Option<&str>,
        duration: Option<f64>,
        date: Option<&str>,
    ) -> CreateExerciseRequest {
        CreateExerciseRequest {
            description: description.map(str::to_owned),
            duration,
            date: date.map(str::to_owned),
        }
    }

    #[test]
    fn missing_fields_are_rejected() {
        for req in [
            request(None, Some(30.0), None),
            request(Some(""), Some(30.0), None),
            request(Some("situps"), None, None),
            request(None, None, None),
        ] {
            assert_eq!(
                req.validate().unwrap_err().message,
                "All exercise fields are required"
            );
        }
    }

    #[test]
    fn complete_request_passes() {
        let req = request(Some("situps"), Some(30.0), None);
        assert!(req.validate().is_ok());
        assert_eq!(req.date().unwrap(), None);
    }

    #[test]
    fn malformed_date_is_rejected() {
        for date in ["2024-13-40", "not-a-date", "2024-1-5", ""] {
            let req = request(Some("situps"), Some(30.0), Some(date));
            assert_eq!(req.date().unwrap_err().message, "Invalid date");
        }
    }

    #[test]
    fn valid_date_is_parsed() {
        let req = request(Some("situps"), Some(30.0), Some("2024-01-15"));
        assert_eq!(
            req.date().unwrap(),
            NaiveDate::from_ymd_opt(2024, 1, 15)
        );
    }

    fn query(from: Option<&str>, to: Option<&str>, limit: Option<&str>) -> LogsQuery {
        LogsQuery {
            from: from.map(str::to_owned),
            to: to.map(str::to_owned),
            limit: limit.map(str::to_owned),
        }
    }

    #[test]
    fn empty_query_parses_to_no_filters() {
        let (date_range, limit) = query(None, None, None).parse().unwrap();
        assert_eq!(date_range, DateRange::default());
        assert_eq!(limit, None);
    }

    #[test]
    fn date_bounds_are_parsed() {
        let (date_range, _) = query(Some("2024-01-10"), Some("2024-01-31"), None)
            .parse()
            .unwrap();
        assert_eq!(date_range.from, NaiveDate::from_ymd_opt(2024, 1, 10));
        assert_eq!(date_range.to, NaiveDate::from_ymd_opt(2024, 1, 31));
    }

    #[test]
    fn malformed_date_bounds_are_rejected() {
        for query in [
            query(Some("2024-13-40"), None, None),
            query(None, Some("nope"), None),
        ] {
            assert_eq!(
                query.parse().unwrap_err().message,
                "Invalid date query params"
            );
        }
    }

    #[test]
    fn limit_must_be_a_positive_integer() {
        for limit in ["0", "-3", "2.5", "abc", ""] {
            let query = query(None, None, Some(limit));
            assert_eq!(
                query.parse().unwrap_err().message,
                "Limit query param should be positive integer"
            );
        }

        let (_, limit) = query(None, None, Some("2")).parse().unwrap();
        assert_eq!(limit, Some(2));
    }
}
