use actix_web::{HttpResponse, web};
use chrono::{DateTime, Utc};
use rust_xlsxwriter::{Format, FormatAlign, FormatBorder, Workbook, XlsxError};
use serde_json::json;
use sqlx::MySqlPool;

use crate::auth::auth::AuthAdmin;
use crate::errors::AppError;
use crate::model::application::{Application, ApplicationStatus};
use crate::store;

const XLSX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

const COLUMNS: [(&str, f64); 6] = [
    ("Name", 28.0),
    ("Department", 22.0),
    ("Dates", 24.0),
    ("Days", 14.0),
    ("Applied On", 22.0),
    ("Status", 12.0),
];

fn format_date(date: chrono::NaiveDate) -> String {
    date.format("%B %-d, %Y").to_string()
}

fn format_days(days: f64) -> String {
    if days.fract() == 0.0 {
        format!("{}", days as i64)
    } else {
        format!("{}", days)
    }
}

/// Name cell carries the contact lines underneath the name.
fn name_cell(application: &Application) -> String {
    format!(
        "{}\n{}\n{}",
        application.name, application.email, application.phone
    )
}

fn department_cell(application: &Application) -> String {
    format!("{}\n{}", application.department, application.designation)
}

/// A single-day leave shows one date instead of a one-day range.
fn dates_cell(application: &Application) -> String {
    if application.start_date == application.end_date {
        format_date(application.start_date)
    } else {
        format!(
            "{}\nto {}",
            format_date(application.start_date),
            format_date(application.end_date)
        )
    }
}

fn days_cell(application: &Application) -> String {
    let mut text = format_days(application.days);
    if let Some(half) = application.half_day_type {
        text.push_str(&format!(" ({})", half.label()));
    }
    text
}

fn applied_cell(application: &Application) -> String {
    format!(
        "{}\n{}",
        format_date(application.created_at.date_naive()),
        application.created_at.format("%-I:%M:%S %p")
    )
}

fn status_palette(status: ApplicationStatus) -> (u32, u32) {
    match status {
        ApplicationStatus::Approved => (0xD1FAE5, 0x065F46),
        ApplicationStatus::Rejected => (0xFEE2E2, 0x991B1B),
        ApplicationStatus::Pending => (0xFEF3C7, 0x92400E),
    }
}

/// Builds the consolidated workbook: a merged title row, a generated-at
/// line, a header row, then one row per application with the status cell
/// tinted by decision.
pub fn build_report_workbook(
    applications: &[Application],
    generated_at: DateTime<Utc>,
) -> Result<Vec<u8>, XlsxError> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();

    let title_format = Format::new()
        .set_bold()
        .set_font_size(16)
        .set_align(FormatAlign::Center);
    let subtitle_format = Format::new()
        .set_font_size(10)
        .set_align(FormatAlign::Center);
    let header_format = Format::new()
        .set_bold()
        .set_background_color(0xF0F0F0)
        .set_border(FormatBorder::Thin)
        .set_border_color(0xDCDCDC);
    let body_format = Format::new()
        .set_text_wrap()
        .set_align(FormatAlign::Top)
        .set_border(FormatBorder::Thin)
        .set_border_color(0xDCDCDC);
    let body_alt_format = body_format.clone().set_background_color(0xF9F9F9);

    worksheet.merge_range(0, 0, 0, 5, "Leave Applications Report", &title_format)?;
    worksheet.merge_range(
        1,
        0,
        1,
        5,
        &format!(
            "Generated on: {} at {}",
            format_date(generated_at.date_naive()),
            generated_at.format("%-I:%M:%S %p")
        ),
        &subtitle_format,
    )?;

    for (col, (header, width)) in COLUMNS.iter().enumerate() {
        worksheet.set_column_width(col as u16, *width)?;
        worksheet.write_string_with_format(3, col as u16, *header, &header_format)?;
    }

    for (i, application) in applications.iter().enumerate() {
        let row = (i as u32) + 4;
        let base = if i % 2 == 0 {
            &body_format
        } else {
            &body_alt_format
        };

        let (fill, font) = status_palette(application.status);
        let status_format = Format::new()
            .set_background_color(fill)
            .set_font_color(font)
            .set_align(FormatAlign::VerticalCenter)
            .set_border(FormatBorder::Thin)
            .set_border_color(0xDCDCDC);

        worksheet.set_row_height(row, 45)?;
        worksheet.write_string_with_format(row, 0, name_cell(application), base)?;
        worksheet.write_string_with_format(row, 1, department_cell(application), base)?;
        worksheet.write_string_with_format(row, 2, dates_cell(application), base)?;
        worksheet.write_string_with_format(row, 3, days_cell(application), base)?;
        worksheet.write_string_with_format(row, 4, applied_cell(application), base)?;
        worksheet.write_string_with_format(
            row,
            5,
            application.status.label(),
            &status_format,
        )?;
    }

    workbook.save_to_buffer()
}

/* =========================
Download report (admin)
========================= */
/// Swagger doc for download_report endpoint
#[utoipa::path(
    get,
    path = "/api/report",
    responses(
        (status = 200, description = "XLSX attachment, or a JSON notice when no applications exist"),
        (status = 401, description = "Unauthorized"),
    ),
    security(("bearer_auth" = [])),
    tag = "Report"
)]
pub async fn download_report(
    _auth: AuthAdmin,
    pool: web::Data<MySqlPool>,
) -> Result<HttpResponse, AppError> {
    let applications = store::fetch_all_applications(pool.get_ref())
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "Failed to fetch applications for report");
            AppError::Internal
        })?;

    if applications.is_empty() {
        return Ok(HttpResponse::Ok().json(json!({
            "message": "No applications found to generate report"
        })));
    }

    let generated_at = Utc::now();
    let buffer = build_report_workbook(&applications, generated_at).map_err(|e| {
        tracing::error!(error = %e, "Failed to build report workbook");
        AppError::Internal
    })?;

    let filename = format!(
        "leave-applications-report-{}.xlsx",
        generated_at.format("%Y-%m-%d")
    );

    Ok(HttpResponse::Ok()
        .content_type(XLSX_CONTENT_TYPE)
        .insert_header((
            "Content-Disposition",
            format!("attachment; filename=\"{}\"", filename),
        ))
        .body(buffer))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::application::HalfDayType;
    use chrono::{NaiveDate, TimeZone};

    fn sample_application() -> Application {
        Application {
            id: 1,
            name: "John Doe".to_string(),
            department: "Accounts".to_string(),
            designation: "Officer".to_string(),
            email: "john@example.com".to_string(),
            phone: "01700000000".to_string(),
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
            created_at: Utc.with_ymd_and_hms(2024, 1, 8, 9, 30, 0).unwrap(),
            updated_at: Utc.with_ymd_and_hms(2024, 1, 8, 9, 30, 0).unwrap(),
        }
    }

    #[test]
    fn equal_dates_collapse_to_one_line() {
        let mut application = sample_application();
        application.end_date = application.start_date;
        assert_eq!(dates_cell(&application), "January 10, 2024");
    }

    #[test]
    fn ranges_show_both_dates() {
        let application = sample_application();
        assert_eq!(
            dates_cell(&application),
            "January 10, 2024\nto January 12, 2024"
        );
    }

    #[test]
    fn whole_day_counts_drop_the_fraction() {
        let application = sample_application();
        assert_eq!(days_cell(&application), "3");
    }

    #[test]
    fn half_days_carry_their_session() {
        let mut application = sample_application();
        application.days = 0.5;
        application.half_day_type = Some(HalfDayType::First);
        assert_eq!(days_cell(&application), "0.5 (Morning)");

        application.half_day_type = Some(HalfDayType::Second);
        assert_eq!(days_cell(&application), "0.5 (Afternoon)");
    }

    #[test]
    fn name_cell_stacks_contact_lines() {
        let application = sample_application();
        assert_eq!(
            name_cell(&application),
            "John Doe\njohn@example.com\n01700000000"
        );
    }

    #[test]
    fn workbook_bytes_are_a_zip_container() {
        let applications = vec![sample_application()];
        let generated_at = Utc.with_ymd_and_hms(2024, 1, 15, 12, 0, 0).unwrap();
        let buffer = build_report_workbook(&applications, generated_at).unwrap();
        assert!(buffer.len() > 4);
        assert_eq!(&buffer[..4], b"PK\x03\x04");
    }
}
