use crate::metrics::{self, MetricError, RawInputs};
use crate::models::{AppData, Entry, SubmissionRequest};
use chrono::{DateTime, NaiveDate, Utc};
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SubmissionError {
    #[error("Please select a date")]
    MissingDate,

    #[error("Invalid date '{0}', expected YYYY-MM-DD")]
    InvalidDate(String),

    #[error(transparent)]
    Metric(#[from] MetricError),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Submission {
    pub date: NaiveDate,
    pub raw: RawInputs,
    pub overwrite: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Created(Entry),
    Replaced { previous: Entry, entry: Entry },
    /// An entry already exists for the date and overwrite was not confirmed.
    Conflict(Entry),
}

impl TryFrom<SubmissionRequest> for Submission {
    type Error = SubmissionError;

    fn try_from(request: SubmissionRequest) -> Result<Self, Self::Error> {
        let date = request
            .date
            .as_deref()
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .ok_or(SubmissionError::MissingDate)?;
        let date = NaiveDate::parse_from_str(date, "%Y-%m-%d")
            .map_err(|_| SubmissionError::InvalidDate(date.to_string()))?;

        Ok(Self {
            date,
            raw: RawInputs {
                carried_over: request.carried_over,
                delivered: request.delivered,
                remaining: request.remaining,
                hours_worked: request.hours_worked,
                z_racks: request.z_racks,
                hours_hanging: request.hours_hanging,
            },
            overwrite: request.overwrite,
        })
    }
}

pub fn build_entry(submission: &Submission, now: DateTime<Utc>) -> Result<Entry, SubmissionError> {
    let derived = metrics::derive(&submission.raw)?;
    let raw = &submission.raw;

    Ok(Entry {
        id: Uuid::new_v4().to_string(),
        date: submission.date,
        carried_over: metrics::bounded(raw.carried_over.max(0.0), "Carried-over")?,
        pallets_delivered: metrics::bounded(raw.delivered.max(0.0), "Delivered")?,
        remaining_pallets: metrics::bounded(raw.remaining.max(0.0), "Remaining pallets")?,
        pallets_processed: derived.pallets_processed,
        cartons_processed: derived.cartons_processed,
        cph: derived.cph,
        zph: derived.zph,
        hours_worked: metrics::bounded(raw.hours_worked, "Hours worked")?,
        timestamp: now,
    })
}

/// Validates, derives and merges a submission into `data`.
///
/// On `Conflict` or error `data` is left untouched.
pub fn submit(
    data: &mut AppData,
    submission: &Submission,
    now: DateTime<Utc>,
) -> Result<Outcome, SubmissionError> {
    let entry = build_entry(submission, now)?;

    let existing = data
        .submission_history
        .iter()
        .position(|current| current.date == submission.date);

    match existing {
        Some(index) if !submission.overwrite => {
            Ok(Outcome::Conflict(data.submission_history[index].clone()))
        }
        Some(index) => {
            let previous = data.submission_history.remove(index);
            data.submission_history.push(entry.clone());
            Ok(Outcome::Replaced { previous, entry })
        }
        None => {
            data.submission_history.push(entry.clone());
            Ok(Outcome::Created(entry))
        }
    }
}
