use anyhow::Context;
use chrono::NaiveDate;
use sqlx::{PgPool, Row};
use uuid::Uuid;

use crate::models::{RegistrationRecord, ReportStatus, Session};
use crate::schedule;

pub async fn init_db(pool: &PgPool) -> anyhow::Result<()> {
    sqlx::migrate!("./migrations").run(pool).await?;
    Ok(())
}

pub async fn create_session(
    pool: &PgPool,
    code: &str,
    title: &str,
    start_date: NaiveDate,
) -> anyhow::Result<Session> {
    let expected = schedule::expected_report_date(start_date);
    let row = sqlx::query(
        r#"
        INSERT INTO defense_tracker.sessions (id, code, title, start_date, expected_report_date)
        VALUES ($1, $2, $3, $4, $5)
        ON CONFLICT (code) DO UPDATE
        SET title = EXCLUDED.title,
            start_date = EXCLUDED.start_date,
            expected_report_date = EXCLUDED.expected_report_date
        RETURNING id
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(code)
    .bind(title)
    .bind(start_date)
    .bind(expected)
    .fetch_one(pool)
    .await?;

    Ok(Session {
        id: row.get("id"),
        code: code.to_string(),
        title: title.to_string(),
        start_date,
        expected_report_date: expected,
    })
}

pub async fn list_sessions(pool: &PgPool) -> anyhow::Result<Vec<Session>> {
    let rows = sqlx::query(
        "SELECT id, code, title, start_date, expected_report_date \
         FROM defense_tracker.sessions ORDER BY start_date",
    )
    .fetch_all(pool)
    .await?;

    let mut sessions = Vec::new();
    for row in rows {
        sessions.push(Session {
            id: row.get("id"),
            code: row.get("code"),
            title: row.get("title"),
            start_date: row.get("start_date"),
            expected_report_date: row.get("expected_report_date"),
        });
    }

    Ok(sessions)
}

pub async fn find_session(pool: &PgPool, code: &str) -> anyhow::Result<Session> {
    let row = sqlx::query(
        "SELECT id, code, title, start_date, expected_report_date \
         FROM defense_tracker.sessions WHERE code = $1",
    )
    .bind(code)
    .fetch_optional(pool)
    .await?
    .with_context(|| format!("no session with code {code}"))?;

    Ok(Session {
        id: row.get("id"),
        code: row.get("code"),
        title: row.get("title"),
        start_date: row.get("start_date"),
        expected_report_date: row.get("expected_report_date"),
    })
}

pub async fn fetch_registrations(
    pool: &PgPool,
    session_id: Uuid,
) -> anyhow::Result<Vec<RegistrationRecord>> {
    let rows = sqlx::query(
        "SELECT id, student_id, student_name, class_name, report_status, \
         supervisor_name, project_title, internship_company_name \
         FROM defense_tracker.registrations \
         WHERE session_id = $1 \
         ORDER BY student_id, id",
    )
    .bind(session_id)
    .fetch_all(pool)
    .await?;

    let mut registrations = Vec::new();
    for row in rows {
        let raw_status: Option<String> = row.get("report_status");
        registrations.push(RegistrationRecord {
            id: row.get("id"),
            student_id: row.get("student_id"),
            student_name: row.get("student_name"),
            class_name: row.get("class_name"),
            report_status: raw_status.as_deref().and_then(ReportStatus::parse),
            supervisor_name: row.get("supervisor_name"),
            project_title: row.get("project_title"),
            internship_company_name: row.get("internship_company_name"),
        });
    }

    Ok(registrations)
}

pub async fn seed(pool: &PgPool) -> anyhow::Result<()> {
    let sessions = vec![
        (
            Uuid::parse_str("7d3c2c44-5b92-4a8e-9c1f-2f9f6b6f01aa")?,
            "2024-spring-graduation",
            "Graduation Defense — Spring 2024",
            NaiveDate::from_ymd_opt(2024, 1, 15).context("invalid date")?,
        ),
        (
            Uuid::parse_str("b6f1a9d0-1d8a-4f02-8f43-6d5a2c9e54bb")?,
            "2024-spring-internship",
            "Internship Reports — Spring 2024",
            NaiveDate::from_ymd_opt(2024, 2, 5).context("invalid date")?,
        ),
    ];

    for (id, code, title, start_date) in sessions {
        sqlx::query(
            r#"
            INSERT INTO defense_tracker.sessions (id, code, title, start_date, expected_report_date)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (code) DO UPDATE
            SET title = EXCLUDED.title,
                start_date = EXCLUDED.start_date,
                expected_report_date = EXCLUDED.expected_report_date
            "#,
        )
        .bind(id)
        .bind(code)
        .bind(title)
        .bind(start_date)
        .bind(schedule::expected_report_date(start_date))
        .execute(pool)
        .await?;
    }

    let registrations = vec![
        (
            "seed-001",
            "2024-spring-graduation",
            "B20DCCN001",
            "Avery Lee",
            "SE-2024",
            Some("reporting"),
            Some("Dr. Tran Minh"),
            Some("Course registration portal"),
            Some("FPT Software"),
        ),
        (
            "seed-002",
            "2024-spring-graduation",
            "B20DCCN014",
            "Jules Moreno",
            "SE-2024",
            Some("reporting"),
            Some("Dr. Tran Minh"),
            Some("Thesis archive search"),
            Some("Viettel"),
        ),
        (
            "seed-003",
            "2024-spring-graduation",
            "B20DCCN027",
            "Kiara Patel",
            "IS-2024",
            Some("exempted"),
            Some("Dr. Pham Quynh"),
            Some("Lab inventory tracker"),
            None,
        ),
        (
            "seed-004",
            "2024-spring-graduation",
            "B20DCCN033",
            "Tomas Novak",
            "IS-2024",
            Some("withdrawn"),
            None,
            None,
            None,
        ),
        (
            "seed-005",
            "2024-spring-internship",
            "B21DCCN008",
            "Mina Okafor",
            "SE-2025",
            Some("not_yet_reporting"),
            Some("Dr. Pham Quynh"),
            Some("Warehouse dashboard"),
            Some("FPT Software"),
        ),
    ];

    for (source_key, session_code, student_id, student_name, class_name, status, supervisor, project, company) in
        registrations
    {
        let session_id: Uuid =
            sqlx::query("SELECT id FROM defense_tracker.sessions WHERE code = $1")
                .bind(session_code)
                .fetch_one(pool)
                .await?
                .get("id");

        sqlx::query(
            r#"
            INSERT INTO defense_tracker.registrations
            (id, session_id, student_id, student_name, class_name, report_status,
             supervisor_name, project_title, internship_company_name, source_key)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            ON CONFLICT (source_key) DO NOTHING
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(session_id)
        .bind(student_id)
        .bind(student_name)
        .bind(class_name)
        .bind(status)
        .bind(supervisor)
        .bind(project)
        .bind(company)
        .bind(source_key)
        .execute(pool)
        .await?;
    }

    Ok(())
}

pub async fn import_csv(
    pool: &PgPool,
    session_code: &str,
    csv_path: &std::path::Path,
) -> anyhow::Result<usize> {
    #[derive(serde::Deserialize)]
    struct CsvRow {
        student_id: String,
        student_name: String,
        class_name: String,
        report_status: Option<String>,
        supervisor_name: Option<String>,
        project_title: Option<String>,
        internship_company_name: Option<String>,
        source_key: Option<String>,
    }

    let session = find_session(pool, session_code).await?;
    let mut reader = csv::Reader::from_path(csv_path)?;
    let mut inserted = 0usize;

    for result in reader.deserialize::<CsvRow>() {
        let row = result?;
        let source_key = row
            .source_key
            .unwrap_or_else(|| format!("import-{}", Uuid::new_v4()));

        let result = sqlx::query(
            r#"
            INSERT INTO defense_tracker.registrations
            (id, session_id, student_id, student_name, class_name, report_status,
             supervisor_name, project_title, internship_company_name, source_key)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            ON CONFLICT (source_key) DO NOTHING
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(session.id)
        .bind(&row.student_id)
        .bind(&row.student_name)
        .bind(&row.class_name)
        .bind(&row.report_status)
        .bind(&row.supervisor_name)
        .bind(&row.project_title)
        .bind(&row.internship_company_name)
        .bind(source_key)
        .execute(pool)
        .await?;

        if result.rows_affected() > 0 {
            inserted += 1;
        }
    }

    Ok(inserted)
}
