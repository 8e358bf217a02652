use chrono::NaiveDate;
use serde::Serialize;
use uuid::Uuid;

// One unified status drives both the graduation and internship counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportStatus {
    NotYetReporting,
    Reporting,
    Exempted,
    Withdrawn,
}

impl ReportStatus {
    // Unknown values map to None, never an error.
    pub fn parse(raw: &str) -> Option<ReportStatus> {
        match raw {
            "not_yet_reporting" => Some(ReportStatus::NotYetReporting),
            "reporting" => Some(ReportStatus::Reporting),
            "exempted" => Some(ReportStatus::Exempted),
            "withdrawn" => Some(ReportStatus::Withdrawn),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegistrationRecord {
    pub id: Uuid,
    pub student_id: String,
    pub student_name: String,
    pub class_name: String,
    pub report_status: Option<ReportStatus>,
    pub supervisor_name: Option<String>,
    pub project_title: Option<String>,
    pub internship_company_name: Option<String>,
}

#[derive(Debug, Clone)]
pub struct Session {
    pub id: Uuid,
    pub code: String,
    pub title: String,
    pub start_date: NaiveDate,
    pub expected_report_date: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SupervisorSummary {
    pub name: String,
    pub project_count: usize,
    pub student_count: usize,
}

// Recomputed on demand, never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionStats {
    pub student_count: usize,
    pub supervisor_count: usize,
    pub project_count: usize,
    pub reporting_graduation_count: usize,
    pub reporting_internship_count: usize,
    pub exempted_graduation_count: usize,
    pub withdrawn_graduation_count: usize,
    pub withdrawn_internship_count: usize,
    pub internship_company_count: usize,
    pub supervisor_details: Vec<SupervisorSummary>,
    pub withdrawn_students: Vec<RegistrationRecord>,
    pub exempted_students: Vec<RegistrationRecord>,
}
