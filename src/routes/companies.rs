use crate::{
    auth::CurrentUser,
    error::AppError,
    models::{Company, CompanyInput},
};
use actix_web::{get, post, put, web, HttpResponse, Responder};
use serde_json::json;
use sqlx::PgPool;
use validator::Validate;

const COMPANY_COLUMNS: &str = "id, name, color, logo_url, created_at";

/// Lists all companies across tenants. System admin only.
#[get("")]
pub async fn list_companies(
    pool: web::Data<PgPool>,
    user: CurrentUser,
) -> Result<impl Responder, AppError> {
    user.require_system_admin()?;

    let companies = sqlx::query_as::<_, Company>(&format!(
        "SELECT {} FROM companies ORDER BY name",
        COMPANY_COLUMNS
    ))
    .fetch_all(&**pool)
    .await?;

    Ok(HttpResponse::Ok().json(companies))
}

/// Provisions a new company (tenant). System admin only.
#[post("")]
pub async fn create_company(
    pool: web::Data<PgPool>,
    user: CurrentUser,
    company_data: web::Json<CompanyInput>,
) -> Result<impl Responder, AppError> {
    user.require_system_admin()?;
    company_data.validate()?;

    let company = sqlx::query_as::<_, Company>(&format!(
        "INSERT INTO companies (name, color, logo_url)
         VALUES ($1, $2, $3)
         RETURNING {}",
        COMPANY_COLUMNS
    ))
    .bind(&company_data.name)
    .bind(company_data.color_or_default())
    .bind(&company_data.logo_url)
    .fetch_one(&**pool)
    .await?;

    Ok(HttpResponse::Created().json(company))
}

/// Updates a company's name, color or logo. System admin only.
#[put("/{id}")]
pub async fn update_company(
    pool: web::Data<PgPool>,
    user: CurrentUser,
    company_id: web::Path<i32>,
    company_data: web::Json<CompanyInput>,
) -> Result<impl Responder, AppError> {
    user.require_system_admin()?;
    company_data.validate()?;

    let company = sqlx::query_as::<_, Company>(&format!(
        "UPDATE companies SET name = $1, color = $2, logo_url = $3
         WHERE id = $4
         RETURNING {}",
        COMPANY_COLUMNS
    ))
    .bind(&company_data.name)
    .bind(company_data.color_or_default())
    .bind(&company_data.logo_url)
    .bind(company_id.into_inner())
    .fetch_optional(&**pool)
    .await?;

    match company {
        Some(company) => Ok(HttpResponse::Ok().json(company)),
        None => Err(AppError::NotFound("Company not found".into())),
    }
}

/// Returns the caller's own company, or `{ "company": null }` for users
/// outside any tenant (system admins). Any authenticated user.
#[get("/company")]
pub async fn my_company(
    pool: web::Data<PgPool>,
    user: CurrentUser,
) -> Result<impl Responder, AppError> {
    let company_id = match user.0.company_id {
        Some(id) => id,
        None => return Ok(HttpResponse::Ok().json(json!({ "company": null }))),
    };

    let company = sqlx::query_as::<_, Company>(&format!(
        "SELECT {} FROM companies WHERE id = $1",
        COMPANY_COLUMNS
    ))
    .bind(company_id)
    .fetch_optional(&**pool)
    .await?;

    match company {
        Some(company) => Ok(HttpResponse::Ok().json(json!({ "company": company }))),
        None => Err(AppError::NotFound("Company not found".into())),
    }
}
