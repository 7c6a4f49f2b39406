use crate::{
    auth::CurrentUser,
    error::AppError,
    models::ShiftWithWorker,
    pdf::{self, ReportRow},
};
use actix_web::{get, http::header, web, HttpResponse, Responder};
use sqlx::PgPool;

/// Exports the company's full shift table as a PDF download.
///
/// The document title carries the company name in the company color; rows
/// are ordered by date. Workers and managers alike can export.
#[get("/export/pdf")]
pub async fn export_pdf(
    pool: web::Data<PgPool>,
    user: CurrentUser,
) -> Result<impl Responder, AppError> {
    let company_id = user.company_id()?;

    let company = sqlx::query_as::<_, (String, String)>(
        "SELECT name, color FROM companies WHERE id = $1",
    )
    .bind(company_id)
    .fetch_optional(&**pool)
    .await?;

    let (company_name, company_color) = match company {
        Some(company) => company,
        None => return Err(AppError::NotFound("Company not found".into())),
    };

    let shifts = sqlx::query_as::<_, ShiftWithWorker>(
        "SELECT s.id, s.date, s.hours, s.notes, s.color, s.worker_id, s.company_id, \
         s.created_at, s.updated_at, u.full_name AS worker_name \
         FROM shifts s LEFT JOIN users u ON u.id = s.worker_id \
         WHERE s.company_id = $1 ORDER BY s.date, s.hours",
    )
    .bind(company_id)
    .fetch_all(&**pool)
    .await?;

    let rows: Vec<ReportRow> = shifts
        .iter()
        .map(|shift| ReportRow {
            date: shift.date.to_string(),
            hours: shift.hours.clone(),
            notes: if shift.notes.is_empty() {
                "-".to_string()
            } else {
                shift.notes.clone()
            },
            worker: shift
                .worker_name
                .clone()
                .unwrap_or_else(|| "N/A".to_string()),
            color: shift.color.clone(),
        })
        .collect();

    let bytes = pdf::render_shift_report(&company_name, &company_color, &rows)?;

    Ok(HttpResponse::Ok()
        .content_type("application/pdf")
        .insert_header((
            header::CONTENT_DISPOSITION,
            "attachment; filename=\"shifts.pdf\"",
        ))
        .body(bytes))
}
