use crate::{
    auth::CurrentUser,
    error::AppError,
    models::{Vacation, VacationDecision, VacationInput, VacationStatus, VacationWithWorker},
};
use actix_web::{get, post, put, web, HttpResponse, Responder};
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

const VACATION_COLUMNS: &str =
    "id, worker_id, company_id, start_date, end_date, status, reason, created_at";

/// Lists the pending and approved vacations of the caller's company, with
/// the requesting worker's display name. Rejected requests are not shown on
/// the calendar. Any company member.
#[get("")]
pub async fn list_vacations(
    pool: web::Data<PgPool>,
    user: CurrentUser,
) -> Result<impl Responder, AppError> {
    let company_id = user.company_id()?;

    let vacations = sqlx::query_as::<_, VacationWithWorker>(
        "SELECT v.id, v.worker_id, v.company_id, v.start_date, v.end_date, v.status, v.reason, \
         v.created_at, u.full_name AS worker_name \
         FROM vacations v LEFT JOIN users u ON u.id = v.worker_id \
         WHERE v.company_id = $1 AND (v.status = $2 OR v.status = $3) \
         ORDER BY v.start_date",
    )
    .bind(company_id)
    .bind(VacationStatus::Pending)
    .bind(VacationStatus::Approved)
    .fetch_all(&**pool)
    .await?;

    Ok(HttpResponse::Ok().json(vacations))
}

/// Files a vacation request for the caller themselves; it starts out
/// `pending` until a manager decides it. Any company member.
#[post("")]
pub async fn request_vacation(
    pool: web::Data<PgPool>,
    user: CurrentUser,
    vacation_data: web::Json<VacationInput>,
) -> Result<impl Responder, AppError> {
    let company_id = user.company_id()?;
    vacation_data.validate()?;

    if vacation_data.end_date < vacation_data.start_date {
        return Err(AppError::BadRequest(
            "End date must not be before start date".into(),
        ));
    }

    let vacation = Vacation::new(vacation_data.into_inner(), user.id(), company_id);

    let created = sqlx::query_as::<_, Vacation>(&format!(
        "INSERT INTO vacations (id, worker_id, company_id, start_date, end_date, status, reason, created_at)
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
         RETURNING {}",
        VACATION_COLUMNS
    ))
    .bind(vacation.id)
    .bind(vacation.worker_id)
    .bind(vacation.company_id)
    .bind(vacation.start_date)
    .bind(vacation.end_date)
    .bind(vacation.status)
    .bind(&vacation.reason)
    .bind(vacation.created_at)
    .fetch_one(&**pool)
    .await?;

    Ok(HttpResponse::Created().json(created))
}

/// Approves or rejects a pending vacation request of the caller's company.
/// Managers only.
///
/// ## Responses:
/// - `200 OK`: the updated request.
/// - `400 Bad Request`: `pending` is not a decision.
/// - `403 Forbidden`: the caller is not a manager.
/// - `404 Not Found`: unknown id, or a request of another company.
/// - `409 Conflict`: the request was already decided.
#[put("/{id}/status")]
pub async fn decide_vacation(
    pool: web::Data<PgPool>,
    user: CurrentUser,
    vacation_id: web::Path<Uuid>,
    decision: web::Json<VacationDecision>,
) -> Result<impl Responder, AppError> {
    user.require_manager()?;
    let company_id = user.company_id()?;

    if decision.status == VacationStatus::Pending {
        return Err(AppError::BadRequest(
            "Decision must be approved or rejected".into(),
        ));
    }

    let vacation_uuid = vacation_id.into_inner();

    let current = sqlx::query_as::<_, (VacationStatus,)>(
        "SELECT status FROM vacations WHERE id = $1 AND company_id = $2",
    )
    .bind(vacation_uuid)
    .bind(company_id)
    .fetch_optional(&**pool)
    .await?;

    match current {
        Some((VacationStatus::Pending,)) => {}
        Some(_) => {
            return Err(AppError::Conflict("Vacation request already decided".into()));
        }
        None => return Err(AppError::NotFound("Vacation request not found".into())),
    }

    let updated = sqlx::query_as::<_, Vacation>(&format!(
        "UPDATE vacations SET status = $1 WHERE id = $2 AND company_id = $3 RETURNING {}",
        VACATION_COLUMNS
    ))
    .bind(decision.status)
    .bind(vacation_uuid)
    .bind(company_id)
    .fetch_one(&**pool)
    .await?;

    Ok(HttpResponse::Ok().json(updated))
}
