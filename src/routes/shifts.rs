use crate::{
    auth::CurrentUser,
    error::AppError,
    models::{Role, Shift, ShiftInput, ShiftQuery, ShiftWithWorker},
};
use actix_web::{delete, get, post, put, web, HttpResponse, Responder};
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

const SHIFT_COLUMNS: &str =
    "id, date, hours, notes, color, worker_id, company_id, created_at, updated_at";

fn joined_select() -> String {
    "SELECT s.id, s.date, s.hours, s.notes, s.color, s.worker_id, s.company_id, \
     s.created_at, s.updated_at, u.full_name AS worker_name \
     FROM shifts s LEFT JOIN users u ON u.id = s.worker_id"
        .to_string()
}

/// A shift can only be assigned to a member of the same company; system
/// admins are not assignable. Cross-company worker ids look like missing
/// workers, same as everywhere else in the tenant model.
async fn ensure_worker_in_company(
    pool: &PgPool,
    worker_id: i32,
    company_id: i32,
) -> Result<(), AppError> {
    let worker = sqlx::query_as::<_, (i32,)>(
        "SELECT id FROM users WHERE id = $1 AND company_id = $2 AND role <> $3",
    )
    .bind(worker_id)
    .bind(company_id)
    .bind(Role::SystemAdmin)
    .fetch_optional(pool)
    .await?;

    match worker {
        Some(_) => Ok(()),
        None => Err(AppError::NotFound("Worker not found".into())),
    }
}

/// Retrieves the shift calendar of the caller's company.
///
/// Every row carries the assigned worker's display name. Supports optional
/// filters, appended dynamically to the company-scoped query:
///
/// ## Query Parameters:
/// - `worker_id` (optional): only shifts assigned to this worker.
/// - `from` (optional): inclusive lower bound on the shift date.
/// - `to` (optional): inclusive upper bound on the shift date.
///
/// ## Responses:
/// - `200 OK`: a JSON array of shifts with `worker_name`, ordered by date.
/// - `400 Bad Request`: the caller has no company.
/// - `401 Unauthorized`: missing or invalid token.
#[get("")]
pub async fn list_shifts(
    pool: web::Data<PgPool>,
    user: CurrentUser,
    query_params: web::Query<ShiftQuery>,
) -> Result<impl Responder, AppError> {
    let company_id = user.company_id()?;

    // Base query is scoped to the caller's company; filter conditions are
    // appended with incrementing placeholders, then bound in the same order.
    let mut sql = joined_select();
    sql.push_str(" WHERE s.company_id = $1");
    let mut param_count = 2;

    if query_params.worker_id.is_some() {
        sql.push_str(&format!(" AND s.worker_id = ${}", param_count));
        param_count += 1;
    }
    if query_params.from.is_some() {
        sql.push_str(&format!(" AND s.date >= ${}", param_count));
        param_count += 1;
    }
    if query_params.to.is_some() {
        sql.push_str(&format!(" AND s.date <= ${}", param_count));
    }

    sql.push_str(" ORDER BY s.date, s.hours");

    let mut query_builder = sqlx::query_as::<_, ShiftWithWorker>(&sql).bind(company_id);

    if let Some(worker_id) = query_params.worker_id {
        query_builder = query_builder.bind(worker_id);
    }
    if let Some(from) = query_params.from {
        query_builder = query_builder.bind(from);
    }
    if let Some(to) = query_params.to {
        query_builder = query_builder.bind(to);
    }

    let shifts = query_builder.fetch_all(&**pool).await?;

    Ok(HttpResponse::Ok().json(shifts))
}

/// Creates a shift in the caller's company. Managers only.
///
/// ## Request Body:
/// - `date`: the shift date (ISO `YYYY-MM-DD`).
/// - `worker_id`: a member of the same company.
/// - `hours`: display string such as `"09:00-17:00"`.
/// - `notes` (optional), `color` (optional `#RRGGBB`, defaults to the blue).
///
/// ## Responses:
/// - `201 Created`: the stored shift.
/// - `403 Forbidden`: the caller is not a manager.
/// - `404 Not Found`: `worker_id` is not a member of the company.
/// - `422 Unprocessable Entity`: validation failure.
#[post("")]
pub async fn create_shift(
    pool: web::Data<PgPool>,
    user: CurrentUser,
    shift_data: web::Json<ShiftInput>,
) -> Result<impl Responder, AppError> {
    user.require_manager()?;
    let company_id = user.company_id()?;
    shift_data.validate()?;

    ensure_worker_in_company(pool.get_ref(), shift_data.worker_id, company_id).await?;

    let shift = Shift::new(shift_data.into_inner(), company_id);

    let created = sqlx::query_as::<_, Shift>(&format!(
        "INSERT INTO shifts (id, date, hours, notes, color, worker_id, company_id, created_at, updated_at)
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
         RETURNING {}",
        SHIFT_COLUMNS
    ))
    .bind(shift.id)
    .bind(shift.date)
    .bind(&shift.hours)
    .bind(&shift.notes)
    .bind(&shift.color)
    .bind(shift.worker_id)
    .bind(shift.company_id)
    .bind(shift.created_at)
    .bind(shift.updated_at)
    .fetch_one(&**pool)
    .await?;

    Ok(HttpResponse::Created().json(created))
}

/// Updates a shift of the caller's company. Managers only.
///
/// The update is scoped to the company in SQL, so ids belonging to another
/// tenant produce the same 404 as ids that never existed.
#[put("/{id}")]
pub async fn update_shift(
    pool: web::Data<PgPool>,
    user: CurrentUser,
    shift_id: web::Path<Uuid>,
    shift_data: web::Json<ShiftInput>,
) -> Result<impl Responder, AppError> {
    user.require_manager()?;
    let company_id = user.company_id()?;
    shift_data.validate()?;

    ensure_worker_in_company(pool.get_ref(), shift_data.worker_id, company_id).await?;

    let input = shift_data.into_inner();
    let updated = sqlx::query_as::<_, Shift>(&format!(
        "UPDATE shifts
         SET date = $1, worker_id = $2, hours = $3, notes = $4, color = $5, updated_at = NOW()
         WHERE id = $6 AND company_id = $7
         RETURNING {}",
        SHIFT_COLUMNS
    ))
    .bind(input.date)
    .bind(input.worker_id)
    .bind(&input.hours)
    .bind(input.notes.as_deref().unwrap_or(""))
    .bind(
        input
            .color
            .as_deref()
            .unwrap_or(crate::models::DEFAULT_COLOR),
    )
    .bind(shift_id.into_inner())
    .bind(company_id)
    .fetch_optional(&**pool)
    .await?;

    match updated {
        Some(shift) => Ok(HttpResponse::Ok().json(shift)),
        None => Err(AppError::NotFound("Shift not found".into())),
    }
}

/// Deletes a shift of the caller's company. Managers only.
///
/// ## Responses:
/// - `204 No Content`: on successful deletion.
/// - `404 Not Found`: unknown id, or a shift of another company.
#[delete("/{id}")]
pub async fn delete_shift(
    pool: web::Data<PgPool>,
    user: CurrentUser,
    shift_id: web::Path<Uuid>,
) -> Result<impl Responder, AppError> {
    user.require_manager()?;
    let company_id = user.company_id()?;

    let result = sqlx::query("DELETE FROM shifts WHERE id = $1 AND company_id = $2")
        .bind(shift_id.into_inner())
        .bind(company_id)
        .execute(&**pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound("Shift not found".into()));
    }

    Ok(HttpResponse::NoContent().finish())
}

/// Returns the caller's own shifts dated tomorrow.
///
/// The calendar polls this once on load and pops a "shift tomorrow"
/// notification for each row.
#[get("/reminders/today")]
pub async fn today_reminders(
    pool: web::Data<PgPool>,
    user: CurrentUser,
) -> Result<impl Responder, AppError> {
    let company_id = user.company_id()?;
    let tomorrow = chrono::Utc::now().date_naive() + chrono::Duration::days(1);

    let mut sql = joined_select();
    sql.push_str(" WHERE s.company_id = $1 AND s.worker_id = $2 AND s.date = $3 ORDER BY s.hours");

    let shifts = sqlx::query_as::<_, ShiftWithWorker>(&sql)
        .bind(company_id)
        .bind(user.id())
        .bind(tomorrow)
        .fetch_all(&**pool)
        .await?;

    Ok(HttpResponse::Ok().json(shifts))
}
