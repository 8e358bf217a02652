use std::fmt::Write;

use crate::models::{RegistrationRecord, Session, SessionStats};

fn push_student_lines(output: &mut String, students: &[RegistrationRecord], empty_label: &str) {
    if students.is_empty() {
        let _ = writeln!(output, "{empty_label}");
    } else {
        for student in students {
            let _ = writeln!(
                output,
                "- {} ({}, {})",
                student.student_name, student.student_id, student.class_name
            );
        }
    }
}

pub fn build_report(session: &Session, stats: &SessionStats) -> String {
    let mut output = String::new();

    let _ = writeln!(output, "# Session Report: {}", session.title);
    let _ = writeln!(
        output,
        "Session {} started {}, expected report date {}",
        session.code, session.start_date, session.expected_report_date
    );
    let _ = writeln!(output);
    let _ = writeln!(output, "## Overview");
    let _ = writeln!(output, "- Registered students: {}", stats.student_count);
    let _ = writeln!(output, "- Supervisors: {}", stats.supervisor_count);
    let _ = writeln!(output, "- Distinct projects: {}", stats.project_count);
    let _ = writeln!(
        output,
        "- Partner companies: {}",
        stats.internship_company_count
    );
    let _ = writeln!(output);
    let _ = writeln!(output, "## Status Counts");
    let _ = writeln!(
        output,
        "- Reporting (graduation/internship): {}/{}",
        stats.reporting_graduation_count, stats.reporting_internship_count
    );
    let _ = writeln!(
        output,
        "- Exempted (graduation): {}",
        stats.exempted_graduation_count
    );
    let _ = writeln!(
        output,
        "- Withdrawn (graduation/internship): {}/{}",
        stats.withdrawn_graduation_count, stats.withdrawn_internship_count
    );

    let _ = writeln!(output);
    let _ = writeln!(output, "## Supervisors");

    if stats.supervisor_details.is_empty() {
        let _ = writeln!(output, "No supervisors assigned in this session.");
    } else {
        for summary in stats.supervisor_details.iter() {
            let _ = writeln!(
                output,
                "- {}: {} students across {} projects",
                summary.name, summary.student_count, summary.project_count
            );
        }
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "## Withdrawn Students");
    push_student_lines(
        &mut output,
        &stats.withdrawn_students,
        "No withdrawals in this session.",
    );

    let _ = writeln!(output);
    let _ = writeln!(output, "## Exempted Students");
    push_student_lines(
        &mut output,
        &stats.exempted_students,
        "No exemptions in this session.",
    );

    output
}
