use actix_web::dev::Payload;
use actix_web::{Error as ActixError, FromRequest, HttpMessage, HttpRequest};
use std::future::{ready, Ready};

use crate::auth::token::Claims;
use crate::error::AppError;
use crate::models::Role;

/// Extracts the authenticated user's claims from request extensions.
///
/// Intended for routes protected by `AuthMiddleware`, which validates the JWT
/// and inserts the decoded `Claims`. If no claims are present (middleware not
/// applied, or applied after this route), extraction fails with 401.
///
/// The claims carry everything the handlers need for authorization: the role
/// gates and the tenant scope, so no extra user lookup happens per request.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub Claims);

impl CurrentUser {
    /// The caller's user id.
    pub fn id(&self) -> i32 {
        self.0.sub
    }

    /// The caller's tenant, or 400 `No company assigned` for users outside
    /// any company (system admins).
    pub fn company_id(&self) -> Result<i32, AppError> {
        self.0
            .company_id
            .ok_or_else(|| AppError::BadRequest("No company assigned".into()))
    }

    /// 403 unless the caller is the system administrator.
    pub fn require_system_admin(&self) -> Result<(), AppError> {
        if self.0.role == Role::SystemAdmin {
            Ok(())
        } else {
            Err(AppError::Forbidden("Access denied".into()))
        }
    }

    /// 403 unless the caller manages the company. System admins do not pass
    /// this gate: they have no company to manage shifts in.
    pub fn require_manager(&self) -> Result<(), AppError> {
        if self.0.role == Role::Manager {
            Ok(())
        } else {
            Err(AppError::Forbidden("Manager role required".into()))
        }
    }
}

impl FromRequest for CurrentUser {
    type Error = ActixError; // AppError converts into ActixError via ResponseError
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        match req.extensions().get::<Claims>().cloned() {
            Some(claims) => ready(Ok(CurrentUser(claims))),
            None => {
                let err = AppError::Unauthorized(
                    "User claims not found in request. Ensure AuthMiddleware is active."
                        .to_string(),
                );
                ready(Err(err.into()))
            }
        }
    }
}
