use crate::{
    auth::{
        generate_token, hash_password, verify_password, AuthResponse, LoginRequest, SessionUser,
        SetupRequest,
    },
    error::AppError,
    models::{Role, User},
};
use actix_web::{post, web, HttpResponse, Responder};
use sqlx::PgPool;
use validator::Validate;

const USER_COLUMNS: &str =
    "id, username, password_hash, full_name, role, company_id, created_at";

/// Login
///
/// Authenticates a user by username and password and returns a token plus the
/// session identity. Unknown usernames and wrong passwords produce the same
/// 401 so the response does not reveal which usernames exist.
#[post("/login")]
pub async fn login(
    pool: web::Data<PgPool>,
    login_data: web::Json<LoginRequest>,
) -> Result<impl Responder, AppError> {
    login_data.validate()?;

    let user = sqlx::query_as::<_, User>(&format!(
        "SELECT {} FROM users WHERE username = $1",
        USER_COLUMNS
    ))
    .bind(&login_data.username)
    .fetch_optional(&**pool)
    .await?;

    match user {
        Some(user) => {
            if verify_password(&login_data.password, &user.password_hash)? {
                let token = generate_token(&user)?;
                Ok(HttpResponse::Ok().json(AuthResponse {
                    token,
                    user: SessionUser::from(&user),
                }))
            } else {
                Err(AppError::Unauthorized("Invalid credentials".into()))
            }
        }
        None => Err(AppError::Unauthorized("Invalid credentials".into())),
    }
}

/// First-run setup
///
/// Creates the initial system administrator. Available only while no system
/// admin exists; afterwards it answers 409 and changes nothing, so the
/// endpoint can stay mounted in production.
#[post("/setup")]
pub async fn setup(
    pool: web::Data<PgPool>,
    setup_data: web::Json<SetupRequest>,
) -> Result<impl Responder, AppError> {
    setup_data.validate()?;

    let existing_admin = sqlx::query_as::<_, (i32,)>(
        "SELECT id FROM users WHERE role = $1 LIMIT 1",
    )
    .bind(Role::SystemAdmin)
    .fetch_optional(&**pool)
    .await?;

    if existing_admin.is_some() {
        return Err(AppError::Conflict("System admin already exists".into()));
    }

    let password_hash = hash_password(&setup_data.password)?;

    let user = sqlx::query_as::<_, User>(&format!(
        "INSERT INTO users (username, password_hash, full_name, role, company_id)
         VALUES ($1, $2, $3, $4, NULL)
         RETURNING {}",
        USER_COLUMNS
    ))
    .bind(&setup_data.username)
    .bind(&password_hash)
    .bind(&setup_data.full_name)
    .bind(Role::SystemAdmin)
    .fetch_one(&**pool)
    .await?;

    let token = generate_token(&user)?;

    Ok(HttpResponse::Created().json(AuthResponse {
        token,
        user: SessionUser::from(&user),
    }))
}
