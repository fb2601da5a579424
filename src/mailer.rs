use chrono::NaiveDate;
use serde_json::json;
use tracing::{debug, warn};

use crate::config::Config;
use crate::errors::AppError;
use crate::model::application::{Application, ApplicationStatus};

/// Transactional mail client. Delivery is opt-in: without an API key
/// every send becomes a logged no-op, so local setups work without a
/// mail account.
pub struct Mailer {
    client: reqwest::Client,
    api_url: String,
    api_key: Option<String>,
    from_email: String,
    sender_name: String,
    admin_emails: Vec<String>,
}

impl Mailer {
    pub fn from_config(config: &Config) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_url: config.mail_api_url.clone(),
            api_key: config.mail_api_key.clone(),
            from_email: config.mail_from.clone(),
            sender_name: config.mail_sender_name.clone(),
            admin_emails: config.admin_emails.clone(),
        }
    }

    /// Tells the admins a new application arrived.
    pub async fn send_new_application_alert(
        &self,
        application: &Application,
    ) -> Result<(), AppError> {
        if self.admin_emails.is_empty() {
            debug!("no admin recipients configured; skipping new-application mail");
            return Ok(());
        }

        self.deliver(
            &self.admin_emails,
            &new_application_subject(application),
            new_application_body(application),
        )
        .await
    }

    /// Tells the applicant their application was reviewed.
    pub async fn send_status_update(&self, application: &Application) -> Result<(), AppError> {
        let recipients = vec![application.email.clone()];
        self.deliver(
            &recipients,
            &status_update_subject(application),
            status_update_body(application),
        )
        .await
    }

    async fn deliver(
        &self,
        recipients: &[String],
        subject: &str,
        html_content: String,
    ) -> Result<(), AppError> {
        let api_key = match &self.api_key {
            Some(key) => key,
            None => {
                debug!(subject, "mail delivery disabled; skipping");
                return Ok(());
            }
        };

        let to: Vec<_> = recipients.iter().map(|email| json!({ "email": email })).collect();
        let body = json!({
            "sender": {
                "name": self.sender_name,
                "email": self.from_email
            },
            "to": to,
            "subject": subject,
            "htmlContent": html_content
        });

        let response = self
            .client
            .post(&self.api_url)
            .header("api-key", api_key)
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| AppError::upstream(format!("failed to reach mail service: {}", e)))?;

        if response.status().is_success() {
            Ok(())
        } else {
            let status = response.status();
            let text = response.text().await.unwrap_or_else(|_| "(no body)".to_string());
            warn!(%status, body = %text, "mail service rejected the message");
            Err(AppError::upstream(format!(
                "mail service error: {}",
                status
            )))
        }
    }
}

fn format_date(date: NaiveDate) -> String {
    date.format("%B %-d, %Y").to_string()
}

/// Whole-day counts render without the trailing ".0"; half days keep
/// their fraction.
fn format_days(days: f64) -> String {
    if days.fract() == 0.0 {
        format!("{}", days as i64)
    } else {
        format!("{}", days)
    }
}

fn day_word(days: f64) -> &'static str {
    if days > 1.0 { "days" } else { "day" }
}

fn leave_period(application: &Application) -> String {
    format!(
        "{} to {} ({} {})",
        format_date(application.start_date),
        format_date(application.end_date),
        format_days(application.days),
        day_word(application.days)
    )
}

fn status_heading(status: ApplicationStatus) -> &'static str {
    match status {
        ApplicationStatus::Pending => "Pending Review",
        ApplicationStatus::Approved => "Approved",
        ApplicationStatus::Rejected => "Rejected",
    }
}

fn status_color(status: ApplicationStatus) -> &'static str {
    match status {
        ApplicationStatus::Approved => "green",
        ApplicationStatus::Rejected => "red",
        ApplicationStatus::Pending => "orange",
    }
}

fn new_application_subject(application: &Application) -> String {
    format!("New Leave Application from {}", application.name)
}

fn new_application_body(application: &Application) -> String {
    let comments = if application.comments.is_empty() {
        "None"
    } else {
        application.comments.as_str()
    };

    format!(
        r#"
        <h2>New Leave Application Submitted</h2>
        <p><strong>Employee:</strong> {name}</p>
        <p><strong>Department:</strong> {department}</p>
        <p><strong>Designation:</strong> {designation}</p>
        <p><strong>Email:</strong> {email}</p>
        <p><strong>Phone:</strong> {phone}</p>
        <p><strong>Leave Period:</strong> {period}</p>
        <p><strong>Reason:</strong> {reason}</p>
        <p><strong>Comments:</strong> {comments}</p>
        <p>Please login to the admin dashboard to review this application.</p>
        "#,
        name = application.name,
        department = application.department,
        designation = application.designation,
        email = application.email,
        phone = application.phone,
        period = leave_period(application),
        reason = application.reason,
        comments = comments,
    )
}

fn status_update_subject(application: &Application) -> String {
    format!(
        "Leave Application Status Update: {}",
        status_heading(application.status)
    )
}

fn status_update_body(application: &Application) -> String {
    let heading = status_heading(application.status);

    let admin_message = if application.admin_message.is_empty() {
        String::new()
    } else {
        format!(
            "<p><strong>Message from Admin:</strong> {}</p>",
            application.admin_message
        )
    };

    let document_block = match &application.document_link {
        Some(link) => format!(
            r#"
        <div style="margin: 20px 0; padding: 15px; background-color: #f0f0f0; border-radius: 5px; text-align: center;">
          <p style="margin-bottom: 10px;"><strong>Here is your application document</strong></p>
          <a href="{link}" target="_blank" style="display: inline-block; background-color: #4CAF50; color: white; padding: 10px 20px; text-decoration: none; border-radius: 4px; font-weight: bold;">View Document</a>
        </div>
        "#,
        ),
        None => String::new(),
    };

    format!(
        r#"
        <h2>Your Leave Application Status: {heading}</h2>
        <p><strong>Leave Period:</strong> {period}</p>
        <p><strong>Status:</strong> <span style="color: {color}">{heading}</span></p>
        {admin_message}
        {document_block}
        <p>If you have any questions, please contact the HR department.</p>
        "#,
        heading = heading,
        period = leave_period(application),
        color = status_color(application.status),
        admin_message = admin_message,
        document_block = document_block,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn sample_application() -> Application {
        Application {
            id: 3,
            name: "Jane Roe".to_string(),
            department: "Engineering".to_string(),
            designation: "Developer".to_string(),
            email: "jane@example.com".to_string(),
            phone: "01700000000".to_string(),
            start_date: NaiveDate::from_ymd_opt(2024, 3, 4).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2024, 3, 6).unwrap(),
            days: 3.0,
            half_day_type: None,
            reason: "Family event".to_string(),
            comments: String::new(),
            status: ApplicationStatus::Approved,
            admin_message: String::new(),
            status_update_date: Some(Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap()),
            document_link: None,
            created_at: Utc.with_ymd_and_hms(2024, 2, 28, 8, 0, 0).unwrap(),
            updated_at: Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap(),
        }
    }

    #[test]
    fn whole_days_render_without_fraction() {
        assert_eq!(format_days(1.0), "1");
        assert_eq!(format_days(3.0), "3");
        assert_eq!(format_days(0.5), "0.5");
    }

    #[test]
    fn single_and_half_days_stay_singular() {
        assert_eq!(day_word(0.5), "day");
        assert_eq!(day_word(1.0), "day");
        assert_eq!(day_word(2.0), "days");
    }

    #[test]
    fn alert_subject_names_the_applicant() {
        let application = sample_application();
        assert_eq!(
            new_application_subject(&application),
            "New Leave Application from Jane Roe"
        );
    }

    #[test]
    fn alert_body_falls_back_for_empty_comments() {
        let application = sample_application();
        let body = new_application_body(&application);
        assert!(body.contains("<strong>Comments:</strong> None"));
        assert!(body.contains("March 4, 2024 to March 6, 2024 (3 days)"));
    }

    #[test]
    fn status_subject_uses_the_review_heading() {
        let mut application = sample_application();
        application.status = ApplicationStatus::Pending;
        assert_eq!(
            status_update_subject(&application),
            "Leave Application Status Update: Pending Review"
        );
    }

    #[test]
    fn status_colors_follow_the_decision() {
        assert_eq!(status_color(ApplicationStatus::Approved), "green");
        assert_eq!(status_color(ApplicationStatus::Rejected), "red");
        assert_eq!(status_color(ApplicationStatus::Pending), "orange");
    }

    #[test]
    fn admin_message_appears_only_when_present() {
        let mut application = sample_application();
        assert!(!status_update_body(&application).contains("Message from Admin"));

        application.admin_message = "Enjoy your leave".to_string();
        let body = status_update_body(&application);
        assert!(body.contains("<strong>Message from Admin:</strong> Enjoy your leave"));
    }

    #[test]
    fn document_button_appears_only_with_a_link() {
        let mut application = sample_application();
        assert!(!status_update_body(&application).contains("View Document"));

        application.document_link = Some("https://files.test/doc.pdf".to_string());
        let body = status_update_body(&application);
        assert!(body.contains("https://files.test/doc.pdf"));
        assert!(body.contains("View Document"));
    }
}
