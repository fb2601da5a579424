use actix_web::{HttpResponse, web};
use chrono::Utc;
use serde::Deserialize;
use sqlx::MySqlPool;
use utoipa::ToSchema;

use crate::auth::auth::AuthAdmin;
use crate::docgen::{DecisionSnapshot, DocumentClient};
use crate::errors::AppError;
use crate::leave::leave_duration;
use crate::mailer::Mailer;
use crate::model::application::{Application, HalfDayType};
use crate::review::{StatusUpdateRequest, plan_review};
use crate::store::{self, NewApplication, ReviewUpdate};

#[derive(Deserialize, ToSchema)]
pub struct SubmitApplication {
    #[schema(example = "John Doe")]
    pub name: String,
    #[schema(example = "Accounts")]
    pub department: String,
    #[schema(example = "Officer")]
    pub designation: String,
    #[schema(example = "john@example.com")]
    pub email: String,
    #[schema(example = "01700000000")]
    pub phone: String,
    #[schema(example = "2024-01-10", format = "date", value_type = String)]
    pub start_date: chrono::NaiveDate,
    #[schema(example = "2024-01-12", format = "date", value_type = String)]
    pub end_date: chrono::NaiveDate,
    /// Half-day leave; only valid when start and end dates are the same
    #[serde(default)]
    #[schema(example = false)]
    pub half_day: bool,
    #[schema(example = "first")]
    pub half_day_type: Option<HalfDayType>,
    #[schema(example = "Medical appointment")]
    pub reason: String,
    #[schema(example = "Reachable by phone")]
    pub comments: Option<String>,
}

fn required_fields(payload: &SubmitApplication) -> Result<(), AppError> {
    let required = [
        ("name", payload.name.as_str()),
        ("department", payload.department.as_str()),
        ("designation", payload.designation.as_str()),
        ("email", payload.email.as_str()),
        ("phone", payload.phone.as_str()),
        ("reason", payload.reason.as_str()),
    ];

    for (field, value) in required {
        if value.trim().is_empty() {
            return Err(AppError::validation(format!("{} is required", field)));
        }
    }

    Ok(())
}

/* =========================
Submit application
========================= */
/// Swagger doc for submit_application endpoint
#[utoipa::path(
    post,
    path = "/api/applications",
    request_body(
        content = SubmitApplication,
        description = "Leave application payload",
        content_type = "application/json"
    ),
    responses(
        (status = 201, description = "Application submitted", body = Application),
        (status = 400, description = "Missing fields or invalid date range"),
    ),
    tag = "Applications"
)]
pub async fn submit_application(
    pool: web::Data<MySqlPool>,
    mailer: web::Data<Mailer>,
    payload: web::Json<SubmitApplication>,
) -> Result<HttpResponse, AppError> {
    // 1️⃣ validate fields and dates
    required_fields(&payload)?;

    let duration = leave_duration(
        payload.start_date,
        payload.end_date,
        payload.half_day,
        payload.half_day_type,
    )?;

    // 2️⃣ persist as pending
    let record = NewApplication {
        name: payload.name.trim().to_string(),
        department: payload.department.trim().to_string(),
        designation: payload.designation.trim().to_string(),
        email: payload.email.trim().to_string(),
        phone: payload.phone.trim().to_string(),
        start_date: payload.start_date,
        end_date: payload.end_date,
        days: duration.days,
        half_day_type: duration.half_day_type,
        reason: payload.reason.trim().to_string(),
        comments: payload
            .comments
            .as_deref()
            .unwrap_or("")
            .trim()
            .to_string(),
    };

    let id = store::insert_application(pool.get_ref(), &record)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "Failed to insert application");
            AppError::Internal
        })?;

    let application = store::fetch_application(pool.get_ref(), id)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, id, "Failed to fetch stored application");
            AppError::Internal
        })?
        .ok_or(AppError::Internal)?;

    // 3️⃣ tell the admins, but never fail the submission over mail
    if let Err(e) = mailer.send_new_application_alert(&application).await {
        tracing::warn!(error = %e, id, "Failed to send new-application alert");
    }

    Ok(HttpResponse::Created().json(application))
}

/* =========================
List applications (admin)
========================= */
/// Swagger doc for list_applications endpoint
#[utoipa::path(
    get,
    path = "/api/applications",
    responses(
        (status = 200, description = "All applications, newest first", body = [Application]),
        (status = 401, description = "Unauthorized"),
    ),
    security(("bearer_auth" = [])),
    tag = "Applications"
)]
pub async fn list_applications(
    _auth: AuthAdmin,
    pool: web::Data<MySqlPool>,
) -> Result<HttpResponse, AppError> {
    let applications = store::fetch_all_applications(pool.get_ref())
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "Failed to fetch applications");
            AppError::Internal
        })?;

    Ok(HttpResponse::Ok().json(applications))
}

/* =========================
Get one application (admin)
========================= */
/// Swagger doc for get_application endpoint
#[utoipa::path(
    get,
    path = "/api/applications/{id}",
    params(
        ("id" = u64, Path, description = "Application id")
    ),
    responses(
        (status = 200, description = "Application found", body = Application),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Application not found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Applications"
)]
pub async fn get_application(
    _auth: AuthAdmin,
    pool: web::Data<MySqlPool>,
    path: web::Path<u64>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();

    let application = store::fetch_application(pool.get_ref(), id)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, id, "Failed to fetch application");
            AppError::Internal
        })?
        .ok_or_else(|| AppError::not_found("Application not found"))?;

    Ok(HttpResponse::Ok().json(application))
}

/// Shared review pipeline: plan the transition, regenerate the decision
/// document when the plan calls for it, persist, then notify the
/// applicant. Document and mail failures are absorbed; store failures
/// fail the whole update.
async fn apply_review(
    pool: &MySqlPool,
    mailer: &Mailer,
    documents: &DocumentClient,
    id: u64,
    request: &StatusUpdateRequest,
) -> Result<Application, AppError> {
    let current = store::fetch_application(pool, id)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, id, "Failed to fetch application");
            AppError::Internal
        })?
        .ok_or_else(|| AppError::not_found("Application not found"))?;

    let plan = plan_review(&current, request, Utc::now());

    let mut update = ReviewUpdate {
        status: plan.status,
        admin_message: plan.admin_message.clone(),
        status_update_date: plan.status_update_date,
        document_link: None,
    };

    if plan.regenerate {
        // A failed generation stores NULL rather than keeping a link that
        // no longer matches the decision.
        let snapshot = DecisionSnapshot::from_review(&current, &plan);
        update.document_link = Some(documents.generate(&snapshot).await);
    }

    store::update_review(pool, id, update).await.map_err(|e| {
        tracing::error!(error = %e, id, "Failed to update application");
        AppError::Internal
    })?;

    let updated = store::fetch_application(pool, id)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, id, "Failed to fetch updated application");
            AppError::Internal
        })?
        .ok_or_else(|| AppError::not_found("Application not found"))?;

    if let Err(e) = mailer.send_status_update(&updated).await {
        tracing::warn!(error = %e, id, "Failed to send status-update email");
    }

    Ok(updated)
}

/* =========================
Update status (admin)
========================= */
/// Swagger doc for update_status endpoint
#[utoipa::path(
    put,
    path = "/api/applications/{id}/status",
    params(
        ("id" = u64, Path, description = "Application id")
    ),
    request_body(
        content = StatusUpdateRequest,
        description = "New status, optional admin message, optional regeneration flag",
        content_type = "application/json"
    ),
    responses(
        (status = 200, description = "Application updated", body = Application),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Application not found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Applications"
)]
pub async fn update_status(
    _auth: AuthAdmin,
    pool: web::Data<MySqlPool>,
    mailer: web::Data<Mailer>,
    documents: web::Data<DocumentClient>,
    path: web::Path<u64>,
    payload: web::Json<StatusUpdateRequest>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();

    let updated = apply_review(
        pool.get_ref(),
        mailer.get_ref(),
        documents.get_ref(),
        id,
        &payload,
    )
    .await?;

    Ok(HttpResponse::Ok().json(updated))
}

/* =========================
Regenerate document (admin)
========================= */
/// Swagger doc for regenerate_document endpoint
#[utoipa::path(
    post,
    path = "/api/applications/{id}/document",
    params(
        ("id" = u64, Path, description = "Application id")
    ),
    responses(
        (status = 200, description = "Document regenerated for the stored status", body = Application),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Application not found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Applications"
)]
pub async fn regenerate_document(
    _auth: AuthAdmin,
    pool: web::Data<MySqlPool>,
    mailer: web::Data<Mailer>,
    documents: web::Data<DocumentClient>,
    path: web::Path<u64>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();

    let current = store::fetch_application(pool.get_ref(), id)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, id, "Failed to fetch application");
            AppError::Internal
        })?
        .ok_or_else(|| AppError::not_found("Application not found"))?;

    // Re-run the review at the stored status with regeneration forced; for
    // a pending application this leaves the record as it is.
    let request = StatusUpdateRequest {
        status: current.status,
        admin_message: None,
        regenerate_document: true,
    };

    let updated = apply_review(
        pool.get_ref(),
        mailer.get_ref(),
        documents.get_ref(),
        id,
        &request,
    )
    .await?;

    Ok(HttpResponse::Ok().json(updated))
}
