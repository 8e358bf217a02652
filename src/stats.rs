use std::collections::{HashMap, HashSet};

use crate::models::{RegistrationRecord, ReportStatus, SessionStats, SupervisorSummary};

#[derive(Default)]
struct SupervisorAccum {
    student_count: usize,
    project_titles: HashSet<String>,
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

/// Single pass over one session's registrations. The graduation and
/// internship counters are views of the one unified status: reporting and
/// withdrawn increment both, exempted has no internship bucket.
pub fn aggregate(records: &[RegistrationRecord]) -> SessionStats {
    let mut supervisors: HashMap<String, SupervisorAccum> = HashMap::new();
    let mut supervisor_order: Vec<String> = Vec::new();
    let mut project_titles: HashSet<&str> = HashSet::new();
    let mut company_names: HashSet<&str> = HashSet::new();

    let mut reporting_count = 0usize;
    let mut exempted_count = 0usize;
    let mut withdrawn_count = 0usize;
    let mut withdrawn_students = Vec::new();
    let mut exempted_students = Vec::new();

    for record in records {
        match record.report_status {
            Some(ReportStatus::Reporting) => reporting_count += 1,
            Some(ReportStatus::Exempted) => {
                exempted_count += 1;
                exempted_students.push(record.clone());
            }
            Some(ReportStatus::Withdrawn) => {
                withdrawn_count += 1;
                withdrawn_students.push(record.clone());
            }
            Some(ReportStatus::NotYetReporting) | None => {}
        }

        if let Some(title) = non_empty(record.project_title.as_deref()) {
            project_titles.insert(title);
        }
        if let Some(company) = non_empty(record.internship_company_name.as_deref()) {
            company_names.insert(company);
        }

        if let Some(name) = non_empty(record.supervisor_name.as_deref()) {
            let entry = supervisors.entry(name.to_string()).or_insert_with(|| {
                supervisor_order.push(name.to_string());
                SupervisorAccum::default()
            });
            entry.student_count += 1;
            if let Some(title) = non_empty(record.project_title.as_deref()) {
                entry.project_titles.insert(title.to_string());
            }
        }
    }

    let supervisor_details: Vec<SupervisorSummary> = supervisor_order
        .iter()
        .map(|name| {
            let accum = &supervisors[name.as_str()];
            SupervisorSummary {
                name: name.clone(),
                project_count: accum.project_titles.len(),
                student_count: accum.student_count,
            }
        })
        .collect();

    SessionStats {
        student_count: records.len(),
        supervisor_count: supervisor_details.len(),
        project_count: project_titles.len(),
        reporting_graduation_count: reporting_count,
        reporting_internship_count: reporting_count,
        exempted_graduation_count: exempted_count,
        withdrawn_graduation_count: withdrawn_count,
        withdrawn_internship_count: withdrawn_count,
        internship_company_count: company_names.len(),
        supervisor_details,
        withdrawn_students,
        exempted_students,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn sample_registration(
        status: Option<ReportStatus>,
        supervisor: Option<&str>,
        project: Option<&str>,
    ) -> RegistrationRecord {
        RegistrationRecord {
            id: Uuid::new_v4(),
            student_id: "B20DCCN001".to_string(),
            student_name: "Avery Lee".to_string(),
            class_name: "SE-2024".to_string(),
            report_status: status,
            supervisor_name: supervisor.map(String::from),
            project_title: project.map(String::from),
            internship_company_name: None,
        }
    }

    #[test]
    fn empty_input_yields_zeros() {
        let stats = aggregate(&[]);
        assert_eq!(stats.student_count, 0);
        assert_eq!(stats.supervisor_count, 0);
        assert_eq!(stats.project_count, 0);
        assert_eq!(stats.reporting_graduation_count, 0);
        assert_eq!(stats.reporting_internship_count, 0);
        assert_eq!(stats.exempted_graduation_count, 0);
        assert_eq!(stats.withdrawn_graduation_count, 0);
        assert_eq!(stats.withdrawn_internship_count, 0);
        assert_eq!(stats.internship_company_count, 0);
        assert!(stats.supervisor_details.is_empty());
        assert!(stats.withdrawn_students.is_empty());
        assert!(stats.exempted_students.is_empty());
    }

    #[test]
    fn counts_every_registration_regardless_of_status() {
        let records = vec![
            sample_registration(Some(ReportStatus::Reporting), None, None),
            sample_registration(Some(ReportStatus::Withdrawn), None, None),
            sample_registration(Some(ReportStatus::NotYetReporting), None, None),
            sample_registration(None, None, None),
        ];
        let stats = aggregate(&records);
        assert_eq!(stats.student_count, 4);
        assert_eq!(stats.reporting_graduation_count, 1);
        assert_eq!(stats.withdrawn_graduation_count, 1);
        assert_eq!(stats.exempted_graduation_count, 0);
    }

    #[test]
    fn graduation_and_internship_counters_mirror() {
        let records = vec![
            sample_registration(Some(ReportStatus::Reporting), None, None),
            sample_registration(Some(ReportStatus::Reporting), None, None),
            sample_registration(Some(ReportStatus::Exempted), None, None),
            sample_registration(Some(ReportStatus::Withdrawn), None, None),
        ];
        let stats = aggregate(&records);
        assert_eq!(
            stats.reporting_graduation_count,
            stats.reporting_internship_count
        );
        assert_eq!(
            stats.withdrawn_graduation_count,
            stats.withdrawn_internship_count
        );
        assert_eq!(stats.reporting_graduation_count, 2);
        assert_eq!(stats.exempted_graduation_count, 1);
        assert_eq!(stats.withdrawn_graduation_count, 1);
    }

    #[test]
    fn projects_count_distinct_titles() {
        let records = vec![
            sample_registration(None, None, Some("A")),
            sample_registration(None, None, Some("A")),
            sample_registration(None, None, Some("B")),
            sample_registration(None, None, None),
        ];
        let stats = aggregate(&records);
        assert_eq!(stats.project_count, 2);
    }

    #[test]
    fn shared_project_counts_once_across_supervisors() {
        let records = vec![
            sample_registration(None, Some("Dr. Tran"), Some("Shared Platform")),
            sample_registration(None, Some("Dr. Kim"), Some("Shared Platform")),
        ];
        let stats = aggregate(&records);
        assert_eq!(stats.project_count, 1);
        assert_eq!(stats.supervisor_count, 2);
        assert_eq!(stats.supervisor_details[0].project_count, 1);
        assert_eq!(stats.supervisor_details[1].project_count, 1);
    }

    #[test]
    fn supervisor_summary_accumulates_per_name() {
        let records = vec![
            sample_registration(None, Some("Dr. Tran"), Some("P1")),
            sample_registration(None, Some("Dr. Tran"), Some("P2")),
            sample_registration(None, Some(""), Some("P3")),
            sample_registration(None, None, Some("P4")),
        ];
        let stats = aggregate(&records);
        assert_eq!(stats.supervisor_count, 1);
        assert_eq!(stats.supervisor_details.len(), 1);
        let summary = &stats.supervisor_details[0];
        assert_eq!(summary.name, "Dr. Tran");
        assert_eq!(summary.project_count, 2);
        assert_eq!(summary.student_count, 2);
    }

    #[test]
    fn supervisors_keep_first_seen_order() {
        let records = vec![
            sample_registration(None, Some("Dr. Zhang"), None),
            sample_registration(None, Some("Dr. Abbas"), None),
            sample_registration(None, Some("Dr. Zhang"), None),
        ];
        let stats = aggregate(&records);
        let names: Vec<&str> = stats
            .supervisor_details
            .iter()
            .map(|s| s.name.as_str())
            .collect();
        assert_eq!(names, vec!["Dr. Zhang", "Dr. Abbas"]);
        assert_eq!(stats.supervisor_details[0].student_count, 2);
    }

    #[test]
    fn withdrawn_and_exempted_lists_preserve_input_order() {
        let mut first = sample_registration(Some(ReportStatus::Withdrawn), None, None);
        first.student_id = "S1".to_string();
        let second = sample_registration(Some(ReportStatus::Exempted), None, None);
        let mut third = sample_registration(Some(ReportStatus::Withdrawn), None, None);
        third.student_id = "S3".to_string();

        let stats = aggregate(&[first, second, third]);
        assert_eq!(stats.withdrawn_students.len(), 2);
        assert_eq!(stats.withdrawn_students[0].student_id, "S1");
        assert_eq!(stats.withdrawn_students[1].student_id, "S3");
        assert_eq!(stats.exempted_students.len(), 1);
    }

    #[test]
    fn distinct_companies_counted_across_records() {
        let mut a = sample_registration(None, None, None);
        a.internship_company_name = Some("FPT Software".to_string());
        let mut b = sample_registration(None, None, None);
        b.internship_company_name = Some("FPT Software".to_string());
        let mut c = sample_registration(None, None, None);
        c.internship_company_name = Some("Viettel".to_string());
        let mut d = sample_registration(None, None, None);
        d.internship_company_name = Some(String::new());

        let stats = aggregate(&[a, b, c, d]);
        assert_eq!(stats.internship_company_count, 2);
    }

    #[test]
    fn aggregation_is_idempotent() {
        let records = vec![
            sample_registration(Some(ReportStatus::Reporting), Some("Dr. Tran"), Some("P1")),
            sample_registration(Some(ReportStatus::Withdrawn), Some("Dr. Kim"), Some("P2")),
            sample_registration(Some(ReportStatus::Exempted), None, None),
        ];
        assert_eq!(aggregate(&records), aggregate(&records));
    }

    #[test]
    fn unknown_status_strings_fall_through() {
        assert_eq!(ReportStatus::parse("reporting"), Some(ReportStatus::Reporting));
        assert_eq!(ReportStatus::parse("defended"), None);
        assert_eq!(ReportStatus::parse(""), None);
    }
}
