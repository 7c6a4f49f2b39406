use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

/// Lifecycle of a vacation request.
/// Corresponds to the `vacation_status` SQL enum.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "vacation_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum VacationStatus {
    Pending,
    Approved,
    Rejected,
}

/// A worker's vacation request.
#[derive(Debug, Serialize, Deserialize, FromRow)]
pub struct Vacation {
    pub id: Uuid,
    pub worker_id: i32,
    pub company_id: i32,
    pub start_date: NaiveDate,
    /// Inclusive; never earlier than `start_date`.
    pub end_date: NaiveDate,
    pub status: VacationStatus,
    pub reason: String,
    pub created_at: DateTime<Utc>,
}

/// A vacation joined with the requesting worker's display name.
#[derive(Debug, Serialize, Deserialize, FromRow)]
pub struct VacationWithWorker {
    pub id: Uuid,
    pub worker_id: i32,
    pub company_id: i32,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub status: VacationStatus,
    pub reason: String,
    pub created_at: DateTime<Utc>,
    pub worker_name: Option<String>,
}

/// Payload for a member requesting their own vacation.
#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct VacationInput {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[validate(length(max = 500))]
    pub reason: Option<String>,
}

/// Payload for a manager deciding a pending request.
#[derive(Debug, Serialize, Deserialize)]
pub struct VacationDecision {
    /// Either `approved` or `rejected`; `pending` is not a decision.
    pub status: VacationStatus,
}

impl Vacation {
    /// Creates a new pending `Vacation` for `worker_id` in `company_id`.
    pub fn new(input: VacationInput, worker_id: i32, company_id: i32) -> Self {
        Self {
            id: Uuid::new_v4(),
            worker_id,
            company_id,
            start_date: input.start_date,
            end_date: input.end_date,
            status: VacationStatus::Pending,
            reason: input.reason.unwrap_or_default(),
            created_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vacation_starts_pending() {
        let input = VacationInput {
            start_date: "2026-09-01".parse().unwrap(),
            end_date: "2026-09-05".parse().unwrap(),
            reason: None,
        };
        let vacation = Vacation::new(input, 8, 3);
        assert_eq!(vacation.status, VacationStatus::Pending);
        assert_eq!(vacation.worker_id, 8);
        assert_eq!(vacation.company_id, 3);
        assert_eq!(vacation.reason, "");
    }

    #[test]
    fn test_vacation_input_validation() {
        let input = VacationInput {
            start_date: "2026-09-01".parse().unwrap(),
            end_date: "2026-09-05".parse().unwrap(),
            reason: Some("r".repeat(501)),
        };
        assert!(input.validate().is_err(), "reason too long");
    }

    #[test]
    fn test_status_serializes_snake_case() {
        assert_eq!(
            serde_json::to_string(&VacationStatus::Approved).unwrap(),
            "\"approved\""
        );
        let status: VacationStatus = serde_json::from_str("\"rejected\"").unwrap();
        assert_eq!(status, VacationStatus::Rejected);
    }
}
