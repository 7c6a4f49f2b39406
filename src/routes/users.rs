use crate::{
    auth::{hash_password, CurrentUser},
    error::AppError,
    models::{NewUserRequest, Role, UserSummary},
};
use actix_web::{get, post, web, HttpResponse, Responder};
use sqlx::PgPool;
use validator::Validate;

const SUMMARY_COLUMNS: &str = "id, username, full_name, role, company_id";

/// Provisions a user into a company. System admin only.
///
/// The role defaults to `worker`; creating another system admin through this
/// endpoint is rejected, the only path to an admin account is first-run setup.
#[post("")]
pub async fn create_user(
    pool: web::Data<PgPool>,
    user: CurrentUser,
    user_data: web::Json<NewUserRequest>,
) -> Result<impl Responder, AppError> {
    user.require_system_admin()?;
    user_data.validate()?;

    let role = user_data.role.unwrap_or(Role::Worker);
    if role == Role::SystemAdmin {
        return Err(AppError::BadRequest(
            "Cannot create a system admin through this endpoint".into(),
        ));
    }

    let company_id = user_data
        .company_id
        .ok_or_else(|| AppError::BadRequest("A company is required for this role".into()))?;

    let company_exists = sqlx::query_as::<_, (i32,)>("SELECT id FROM companies WHERE id = $1")
        .bind(company_id)
        .fetch_optional(&**pool)
        .await?;
    if company_exists.is_none() {
        return Err(AppError::NotFound("Company not found".into()));
    }

    let existing_user = sqlx::query_as::<_, (i32,)>("SELECT id FROM users WHERE username = $1")
        .bind(&user_data.username)
        .fetch_optional(&**pool)
        .await?;
    if existing_user.is_some() {
        return Err(AppError::Conflict("Username already taken".into()));
    }

    let password_hash = hash_password(&user_data.password)?;

    let created = sqlx::query_as::<_, UserSummary>(&format!(
        "INSERT INTO users (username, password_hash, full_name, role, company_id)
         VALUES ($1, $2, $3, $4, $5)
         RETURNING {}",
        SUMMARY_COLUMNS
    ))
    .bind(&user_data.username)
    .bind(&password_hash)
    .bind(&user_data.full_name)
    .bind(role)
    .bind(company_id)
    .fetch_one(&**pool)
    .await?;

    Ok(HttpResponse::Created().json(created))
}

/// Lists every user across tenants, password hashes excluded. System admin only.
#[get("")]
pub async fn list_users(
    pool: web::Data<PgPool>,
    user: CurrentUser,
) -> Result<impl Responder, AppError> {
    user.require_system_admin()?;

    let users = sqlx::query_as::<_, UserSummary>(&format!(
        "SELECT {} FROM users ORDER BY username",
        SUMMARY_COLUMNS
    ))
    .fetch_all(&**pool)
    .await?;

    Ok(HttpResponse::Ok().json(users))
}

/// Lists the members of the caller's company (system admins never appear:
/// they belong to no company). Any company member.
#[get("/workers")]
pub async fn list_workers(
    pool: web::Data<PgPool>,
    user: CurrentUser,
) -> Result<impl Responder, AppError> {
    let company_id = user.company_id()?;

    let workers = sqlx::query_as::<_, UserSummary>(&format!(
        "SELECT {} FROM users WHERE company_id = $1 ORDER BY full_name",
        SUMMARY_COLUMNS
    ))
    .bind(company_id)
    .fetch_all(&**pool)
    .await?;

    Ok(HttpResponse::Ok().json(workers))
}
