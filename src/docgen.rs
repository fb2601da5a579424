use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::model::application::{Application, ApplicationStatus};
use crate::review::ReviewPlan;

/// Everything the document service needs to render a decision letter.
/// The admin message and status come from the review being applied, not
/// from the stored row, so a regenerated document reflects the latest
/// decision.
#[derive(Debug, Serialize)]
pub struct DecisionSnapshot {
    pub name: String,
    pub department: String,
    pub designation: String,
    pub email: String,
    pub phone: String,
    pub start_date: chrono::NaiveDate,
    pub end_date: chrono::NaiveDate,
    pub days: f64,
    pub reason: String,
    pub admin_message: String,
    pub status: &'static str,
    pub status_date: Option<DateTime<Utc>>,
    pub file_name: String,
}

impl DecisionSnapshot {
    pub fn from_review(application: &Application, plan: &ReviewPlan) -> Self {
        let admin_message = plan
            .admin_message
            .clone()
            .unwrap_or_else(|| application.admin_message.clone());
        let admin_message = if admin_message.is_empty() {
            "No message provided".to_string()
        } else {
            admin_message
        };

        let decided_at = plan.status_update_date.unwrap_or_else(Utc::now);

        Self {
            name: application.name.clone(),
            department: application.department.clone(),
            designation: application.designation.clone(),
            email: application.email.clone(),
            phone: application.phone.clone(),
            start_date: application.start_date,
            end_date: application.end_date,
            days: application.days,
            reason: application.reason.clone(),
            admin_message,
            status: plan.status.label(),
            status_date: plan.status_update_date,
            file_name: document_file_name(&application.name, plan.status, decided_at),
        }
    }
}

/// `20240110093000_john_doe_approved.pdf` for John Doe approved at
/// 2024-01-10 09:30:00.
pub fn document_file_name(name: &str, status: ApplicationStatus, at: DateTime<Utc>) -> String {
    let clean_name = name
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("_")
        .to_lowercase();

    format!("{}_{}_{}.pdf", at.format("%Y%m%d%H%M%S"), clean_name, status)
}

#[derive(Debug, Deserialize)]
struct GeneratedDocument {
    link: Option<String>,
}

/// Client for the external document service. Generation is best effort:
/// any failure is logged and reported as `None`, and the review carries
/// on without a document link.
pub struct DocumentClient {
    client: reqwest::Client,
    service_url: Option<String>,
    service_token: Option<String>,
}

impl DocumentClient {
    pub fn from_config(config: &Config) -> Self {
        Self {
            client: reqwest::Client::new(),
            service_url: config.document_service_url.clone(),
            service_token: config.document_service_token.clone(),
        }
    }

    pub async fn generate(&self, snapshot: &DecisionSnapshot) -> Option<String> {
        let url = match &self.service_url {
            Some(url) => url,
            None => {
                log::debug!("document service not configured; skipping generation");
                return None;
            }
        };

        let mut request = self.client.post(url).json(snapshot);
        if let Some(token) = &self.service_token {
            request = request.bearer_auth(token);
        }

        let response = match request.send().await {
            Ok(response) => response,
            Err(e) => {
                log::warn!("failed to reach document service: {}", e);
                return None;
            }
        };

        if !response.status().is_success() {
            log::warn!(
                "document service rejected the request: {}",
                response.status()
            );
            return None;
        }

        match response.json::<GeneratedDocument>().await {
            Ok(GeneratedDocument { link: Some(link) }) => Some(link),
            Ok(GeneratedDocument { link: None }) => {
                log::warn!("document service returned no link");
                None
            }
            Err(e) => {
                log::warn!("document service returned an unreadable body: {}", e);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeZone};

    fn sample_application() -> Application {
        Application {
            id: 7,
            name: "John Doe".to_string(),
            department: "Accounts".to_string(),
            designation: "Officer".to_string(),
            email: "john@example.com".to_string(),
            phone: "01800000000".to_string(),
            start_date: NaiveDate::from_ymd_opt(2024, 1, 10).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2024, 1, 12).unwrap(),
            days: 3.0,
            half_day_type: None,
            reason: "Medical appointment".to_string(),
            comments: String::new(),
            status: ApplicationStatus::Pending,
            admin_message: String::new(),
            status_update_date: None,
            document_link: None,
            created_at: Utc.with_ymd_and_hms(2024, 1, 8, 10, 0, 0).unwrap(),
            updated_at: Utc.with_ymd_and_hms(2024, 1, 8, 10, 0, 0).unwrap(),
        }
    }

    fn approval_plan(at: DateTime<Utc>, message: Option<&str>) -> ReviewPlan {
        ReviewPlan {
            status: ApplicationStatus::Approved,
            admin_message: message.map(|m| m.to_string()),
            status_update_date: Some(at),
            regenerate: true,
        }
    }

    #[test]
    fn file_name_is_stamp_name_status() {
        let at = Utc.with_ymd_and_hms(2024, 1, 10, 9, 30, 0).unwrap();
        assert_eq!(
            document_file_name("John Doe", ApplicationStatus::Approved, at),
            "20240110093000_john_doe_approved.pdf"
        );
    }

    #[test]
    fn file_name_collapses_whitespace_runs() {
        let at = Utc.with_ymd_and_hms(2024, 1, 10, 9, 30, 0).unwrap();
        assert_eq!(
            document_file_name("Mary  Ann Smith", ApplicationStatus::Rejected, at),
            "20240110093000_mary_ann_smith_rejected.pdf"
        );
    }

    #[test]
    fn snapshot_takes_the_message_from_the_plan() {
        let application = sample_application();
        let at = Utc.with_ymd_and_hms(2024, 1, 10, 9, 30, 0).unwrap();
        let snapshot =
            DecisionSnapshot::from_review(&application, &approval_plan(at, Some("Approved, enjoy")));
        assert_eq!(snapshot.admin_message, "Approved, enjoy");
        assert_eq!(snapshot.status, "Approved");
        assert_eq!(snapshot.status_date, Some(at));
    }

    #[test]
    fn snapshot_falls_back_when_no_message_exists() {
        let application = sample_application();
        let at = Utc.with_ymd_and_hms(2024, 1, 10, 9, 30, 0).unwrap();
        let snapshot = DecisionSnapshot::from_review(&application, &approval_plan(at, None));
        assert_eq!(snapshot.admin_message, "No message provided");
    }

    #[test]
    fn snapshot_keeps_the_stored_message_when_the_plan_has_none() {
        let mut application = sample_application();
        application.admin_message = "Earlier note".to_string();
        let at = Utc.with_ymd_and_hms(2024, 1, 10, 9, 30, 0).unwrap();
        let snapshot = DecisionSnapshot::from_review(&application, &approval_plan(at, None));
        assert_eq!(snapshot.admin_message, "Earlier note");
    }

    #[test]
    fn snapshot_file_name_uses_the_decision_time() {
        let application = sample_application();
        let at = Utc.with_ymd_and_hms(2024, 2, 1, 14, 5, 9).unwrap();
        let snapshot = DecisionSnapshot::from_review(&application, &approval_plan(at, None));
        assert_eq!(snapshot.file_name, "20240201140509_john_doe_approved.pdf");
    }
}
