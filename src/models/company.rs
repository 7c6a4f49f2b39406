use chrono::{DateTime, Utc};
use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// Color applied to companies and shifts when none is given.
pub const DEFAULT_COLOR: &str = "#3B82F6";

lazy_static! {
    // CSS hex colors, long form only: #RRGGBB
    pub static ref HEX_COLOR_REGEX: regex::Regex =
        regex::Regex::new(r"^#[0-9a-fA-F]{6}$").unwrap();
}

/// A company is the tenant boundary: every manager, worker, shift and
/// vacation request belongs to exactly one.
#[derive(Debug, Serialize, Deserialize, FromRow)]
pub struct Company {
    pub id: i32,
    pub name: String,
    /// Brand color used by the calendar and the PDF report title.
    pub color: String,
    pub logo_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Payload for creating or updating a company (system admin only).
#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct CompanyInput {
    #[validate(length(min = 1, max = 100))]
    pub name: String,

    /// Defaults to [`DEFAULT_COLOR`] when omitted.
    #[validate(regex(path = "HEX_COLOR_REGEX", message = "Color must be a #RRGGBB hex value"))]
    pub color: Option<String>,

    #[validate(length(max = 500))]
    pub logo_url: Option<String>,
}

impl CompanyInput {
    /// The color to store, falling back to the default.
    pub fn color_or_default(&self) -> &str {
        self.color.as_deref().unwrap_or(DEFAULT_COLOR)
    }
}
