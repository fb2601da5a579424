use chrono::{DateTime, NaiveDate, Utc};
use sqlx::MySqlPool;

use crate::auth::password::hash_password;
use crate::model::admin::AdminAccount;
use crate::model::application::{Application, ApplicationStatus, HalfDayType};

/// Column values for a freshly submitted application. Status starts as
/// pending and the admin message starts empty; both are written here
/// rather than relying on column defaults.
#[derive(Debug)]
pub struct NewApplication {
    pub name: String,
    pub department: String,
    pub designation: String,
    pub email: String,
    pub phone: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub days: f64,
    pub half_day_type: Option<HalfDayType>,
    pub reason: String,
    pub comments: String,
}

pub async fn insert_application(
    pool: &MySqlPool,
    application: &NewApplication,
) -> Result<u64, sqlx::Error> {
    let result = sqlx::query(
        r#"
        INSERT INTO applications
            (name, department, designation, email, phone,
             start_date, end_date, days, half_day_type,
             reason, comments, status, admin_message)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&application.name)
    .bind(&application.department)
    .bind(&application.designation)
    .bind(&application.email)
    .bind(&application.phone)
    .bind(application.start_date)
    .bind(application.end_date)
    .bind(application.days)
    .bind(application.half_day_type)
    .bind(&application.reason)
    .bind(&application.comments)
    .bind(ApplicationStatus::Pending)
    .bind("")
    .execute(pool)
    .await?;

    Ok(result.last_insert_id())
}

/// Newest applications first; id breaks ties between rows created in the
/// same second.
pub async fn fetch_all_applications(pool: &MySqlPool) -> Result<Vec<Application>, sqlx::Error> {
    sqlx::query_as::<_, Application>(
        "SELECT * FROM applications ORDER BY created_at DESC, id DESC",
    )
    .fetch_all(pool)
    .await
}

pub async fn fetch_application(
    pool: &MySqlPool,
    id: u64,
) -> Result<Option<Application>, sqlx::Error> {
    sqlx::query_as::<_, Application>("SELECT * FROM applications WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await
}

/// Columns touched by a review decision. `None` on an outer option means
/// the stored value is kept; `document_link: Some(None)` clears the link.
#[derive(Debug)]
pub struct ReviewUpdate {
    pub status: ApplicationStatus,
    pub admin_message: Option<String>,
    pub status_update_date: Option<DateTime<Utc>>,
    pub document_link: Option<Option<String>>,
}

fn review_set_clause(update: &ReviewUpdate) -> String {
    let mut sets = vec!["status = ?"];
    if update.admin_message.is_some() {
        sets.push("admin_message = ?");
    }
    if update.status_update_date.is_some() {
        sets.push("status_update_date = ?");
    }
    if update.document_link.is_some() {
        sets.push("document_link = ?");
    }
    sets.join(", ")
}

pub async fn update_review(
    pool: &MySqlPool,
    id: u64,
    update: ReviewUpdate,
) -> Result<u64, sqlx::Error> {
    let sql = format!(
        "UPDATE applications SET {} WHERE id = ?",
        review_set_clause(&update)
    );

    let mut query = sqlx::query(&sql).bind(update.status);
    if let Some(message) = update.admin_message {
        query = query.bind(message);
    }
    if let Some(at) = update.status_update_date {
        query = query.bind(at);
    }
    if let Some(link) = update.document_link {
        query = query.bind(link);
    }

    let result = query.bind(id).execute(pool).await?;
    Ok(result.rows_affected())
}

pub async fn fetch_admin_by_username(
    pool: &MySqlPool,
    username: &str,
) -> Result<Option<AdminAccount>, sqlx::Error> {
    sqlx::query_as::<_, AdminAccount>("SELECT * FROM admins WHERE username = ?")
        .bind(username)
        .fetch_optional(pool)
        .await
}

pub async fn update_admin_password(
    pool: &MySqlPool,
    id: u64,
    password_hash: &str,
) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("UPDATE admins SET password_hash = ? WHERE id = ?")
        .bind(password_hash)
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected())
}

/// Inserts the default admin account when the table is empty so a fresh
/// deployment can be logged into. The default password must be changed
/// through the credentials endpoint.
pub async fn ensure_seed_admin(pool: &MySqlPool) -> anyhow::Result<()> {
    let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM admins")
        .fetch_one(pool)
        .await?;

    if count > 0 {
        return Ok(());
    }

    let password_hash = hash_password("admin123");
    sqlx::query("INSERT INTO admins (username, password_hash) VALUES (?, ?)")
        .bind("admin")
        .bind(&password_hash)
        .execute(pool)
        .await?;

    tracing::warn!("seeded default admin account 'admin'; change its password immediately");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_update() -> ReviewUpdate {
        ReviewUpdate {
            status: ApplicationStatus::Approved,
            admin_message: None,
            status_update_date: None,
            document_link: None,
        }
    }

    #[test]
    fn set_clause_always_touches_status() {
        assert_eq!(review_set_clause(&base_update()), "status = ?");
    }

    #[test]
    fn set_clause_includes_only_provided_columns() {
        let update = ReviewUpdate {
            admin_message: Some("ok".to_string()),
            document_link: Some(Some("https://files.test/doc.pdf".to_string())),
            ..base_update()
        };
        assert_eq!(
            review_set_clause(&update),
            "status = ?, admin_message = ?, document_link = ?"
        );
    }

    #[test]
    fn set_clause_covers_full_decision() {
        let update = ReviewUpdate {
            admin_message: Some("Enjoy your leave".to_string()),
            status_update_date: Some(Utc::now()),
            document_link: Some(None),
            ..base_update()
        };
        assert_eq!(
            review_set_clause(&update),
            "status = ?, admin_message = ?, status_update_date = ?, document_link = ?"
        );
    }
}
