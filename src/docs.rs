use crate::api::application::SubmitApplication;
use crate::model::application::{Application, ApplicationStatus, HalfDayType};
use crate::models::{AdminIdentity, ChangeCredentialsRequest, LoginRequest, LoginResponse};
use crate::review::StatusUpdateRequest;
use utoipa::Modify;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{OpenApi, openapi};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Leave Desk API",
        version = "1.0.0",
        description = r#"
## Leave Desk

This API powers a small **leave-request management** service: employees submit
leave applications and an administrator reviews them.

### 🔹 Key Features
- **Applications**
  - Submit a leave application with automatic day counting (half days supported)
  - List, inspect, approve or reject applications
  - Regenerate the decision document for a reviewed application
- **Report**
  - Download a consolidated XLSX report of all applications
- **Auth**
  - Admin login with signed session tokens, credential change

### 🔐 Security
Review, report and credential endpoints are protected using **JWT Bearer
authentication**. Submission and login are open (rate limited).

### 📦 Response Format
- JSON-based RESTful responses; the report endpoint returns an XLSX attachment

---
Built with **Rust**, **Actix Web**, **SQLx**, and **Utoipa**.
"#,
    ),
    paths(
        crate::api::application::submit_application,
        crate::api::application::list_applications,
        crate::api::application::get_application,
        crate::api::application::update_status,
        crate::api::application::regenerate_document,

        crate::api::report::download_report,

        crate::auth::handlers::login,
        crate::auth::handlers::change_credentials
    ),
    components(
        schemas(
            Application,
            ApplicationStatus,
            HalfDayType,
            SubmitApplication,
            StatusUpdateRequest,
            LoginRequest,
            LoginResponse,
            AdminIdentity,
            ChangeCredentialsRequest
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Applications", description = "Leave application APIs"),
        (name = "Report", description = "Consolidated report download"),
        (name = "Auth", description = "Admin session APIs"),
    )
)]
pub struct ApiDoc;

pub struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}
