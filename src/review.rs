use chrono::{DateTime, Utc};
use serde::Deserialize;
use utoipa::ToSchema;

use crate::model::application::{Application, ApplicationStatus};

/// Admin review payload for a status change.
///
/// Defaulting rules: a missing or blank `admin_message` keeps whatever
/// message is already stored; `regenerate_document` defaults to false.
#[derive(Debug, Deserialize, ToSchema)]
pub struct StatusUpdateRequest {
    #[schema(example = "approved")]
    pub status: ApplicationStatus,

    #[schema(example = "Enjoy your leave", nullable = true)]
    pub admin_message: Option<String>,

    /// Force a fresh decision document even if nothing else changed.
    #[serde(default)]
    #[schema(example = false)]
    pub regenerate_document: bool,
}

/// What a review request resolves to against the stored record.
#[derive(Debug, Clone, PartialEq)]
pub struct ReviewPlan {
    pub status: ApplicationStatus,
    /// `Some` overwrites the stored admin message.
    pub admin_message: Option<String>,
    /// `Some` refreshes the decision timestamp; `None` leaves it untouched.
    pub status_update_date: Option<DateTime<Utc>>,
    pub regenerate: bool,
}

/// Decides how a status update applies to the stored application.
///
/// The decision document is regenerated iff the requested status is a
/// decision (approved/rejected) and any of: regeneration was explicitly
/// requested, the status actually changes, or no document link exists yet.
/// Resetting to pending never regenerates and never touches the stored
/// link or decision timestamp.
pub fn plan_review(
    current: &Application,
    request: &StatusUpdateRequest,
    now: DateTime<Utc>,
) -> ReviewPlan {
    let regenerate = request.status.is_decided()
        && (request.regenerate_document
            || request.status != current.status
            || current.document_link.is_none());

    let status_update_date = if request.status.is_decided() {
        Some(now)
    } else {
        None
    };

    let admin_message = request
        .admin_message
        .as_deref()
        .map(str::trim)
        .filter(|message| !message.is_empty())
        .map(str::to_owned);

    ReviewPlan {
        status: request.status,
        admin_message,
        status_update_date,
        regenerate,
    }
}
