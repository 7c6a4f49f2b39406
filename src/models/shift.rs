use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

use super::company::{DEFAULT_COLOR, HEX_COLOR_REGEX};

/// Input structure for creating or updating a shift.
///
/// `hours` is a display string such as `"09:00-17:00"`; the calendar and the
/// PDF report show it verbatim, nothing parses it.
#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct ShiftInput {
    pub date: NaiveDate,

    /// The company member this shift is assigned to.
    pub worker_id: i32,

    #[validate(length(min = 1, max = 50))]
    pub hours: String,

    #[validate(length(max = 500))]
    pub notes: Option<String>,

    #[validate(regex(path = "HEX_COLOR_REGEX", message = "Color must be a #RRGGBB hex value"))]
    pub color: Option<String>,
}

/// A shift entity as stored in the database.
#[derive(Debug, Serialize, Deserialize, FromRow)]
pub struct Shift {
    /// Unique identifier for the shift (UUID v4).
    pub id: Uuid,
    pub date: NaiveDate,
    pub hours: String,
    pub notes: String,
    pub color: String,
    pub worker_id: i32,
    /// Tenant the shift belongs to. Every query against shifts filters on it.
    pub company_id: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A shift joined with the assigned worker's display name, as returned by
/// the listing, reminder and export queries.
#[derive(Debug, Serialize, Deserialize, FromRow)]
pub struct ShiftWithWorker {
    pub id: Uuid,
    pub date: NaiveDate,
    pub hours: String,
    pub notes: String,
    pub color: String,
    pub worker_id: i32,
    pub company_id: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// `None` when the worker row no longer exists.
    pub worker_name: Option<String>,
}

/// Query parameters for filtering the shift list.
#[derive(Debug, Serialize, Deserialize)]
pub struct ShiftQuery {
    /// Only shifts assigned to this worker.
    pub worker_id: Option<i32>,
    /// Inclusive lower bound on the shift date.
    pub from: Option<NaiveDate>,
    /// Inclusive upper bound on the shift date.
    pub to: Option<NaiveDate>,
}

impl Shift {
    /// Creates a new `Shift` from `ShiftInput`, pinned to `company_id`.
    /// Sets `created_at`/`updated_at` to now and `id` to a fresh UUID;
    /// empty notes and the default color are filled in here.
    pub fn new(input: ShiftInput, company_id: i32) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            date: input.date,
            hours: input.hours,
            notes: input.notes.unwrap_or_default(),
            color: input.color.unwrap_or_else(|| DEFAULT_COLOR.to_string()),
            worker_id: input.worker_id,
            company_id,
            created_at: now,
            updated_at: now,
        }
    }
}
