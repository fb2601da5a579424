use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display};
use utoipa::ToSchema;

/// Review state of a leave application. Any state may be reached from any
/// other, including resetting a decided application back to pending.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema, Display, AsRefStr, sqlx::Type,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum ApplicationStatus {
    Pending,
    Approved,
    Rejected,
}

impl ApplicationStatus {
    /// Capitalized form used in documents and the report.
    pub fn label(&self) -> &'static str {
        match self {
            ApplicationStatus::Pending => "Pending",
            ApplicationStatus::Approved => "Approved",
            ApplicationStatus::Rejected => "Rejected",
        }
    }

    /// true for approved or rejected.
    pub fn is_decided(&self) -> bool {
        !matches!(self, ApplicationStatus::Pending)
    }
}

/// Which half of the day a 0.5-day leave covers.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema, Display, AsRefStr, sqlx::Type,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum HalfDayType {
    First,
    Second,
}

impl HalfDayType {
    pub fn label(&self) -> &'static str {
        match self {
            HalfDayType::First => "Morning",
            HalfDayType::Second => "Afternoon",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
#[schema(
    example = json!({
        "id": 1,
        "name": "John Doe",
        "department": "Accounts",
        "designation": "Officer",
        "email": "john.doe@company.com",
        "phone": "+8801712345678",
        "start_date": "2024-01-10",
        "end_date": "2024-01-12",
        "days": 3.0,
        "half_day_type": null,
        "reason": "Family program",
        "comments": "",
        "status": "pending",
        "admin_message": "",
        "status_update_date": null,
        "document_link": null,
        "created_at": "2024-01-09T10:15:00Z",
        "updated_at": "2024-01-09T10:15:00Z"
    })
)]
pub struct Application {
    #[schema(example = 1)]
    pub id: u64,

    #[schema(example = "John Doe")]
    pub name: String,

    #[schema(example = "Accounts")]
    pub department: String,

    #[schema(example = "Officer")]
    pub designation: String,

    #[schema(example = "john.doe@company.com")]
    pub email: String,

    #[schema(example = "+8801712345678")]
    pub phone: String,

    #[schema(example = "2024-01-10", value_type = String, format = "date")]
    pub start_date: NaiveDate,

    #[schema(example = "2024-01-12", value_type = String, format = "date")]
    pub end_date: NaiveDate,

    /// Total leave days; exactly 0.5 for a half-day request.
    #[schema(example = 3.0)]
    pub days: f64,

    /// Set iff days = 0.5.
    #[schema(example = json!(null), nullable = true)]
    pub half_day_type: Option<HalfDayType>,

    #[schema(example = "Family program")]
    pub reason: String,

    #[schema(example = "")]
    pub comments: String,

    #[schema(example = "pending")]
    pub status: ApplicationStatus,

    #[schema(example = "")]
    pub admin_message: String,

    /// Set only when the application is approved or rejected.
    #[schema(example = json!(null), value_type = Option<String>, format = "date-time", nullable = true)]
    pub status_update_date: Option<DateTime<Utc>>,

    /// Link to the generated decision document, when one exists.
    #[schema(example = json!(null), nullable = true)]
    pub document_link: Option<String>,

    #[schema(example = "2024-01-09T10:15:00Z", value_type = String, format = "date-time")]
    pub created_at: DateTime<Utc>,

    #[schema(example = "2024-01-09T10:15:00Z", value_type = String, format = "date-time")]
    pub updated_at: DateTime<Utc>,
}
