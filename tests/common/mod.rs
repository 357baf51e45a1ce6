#![allow(dead_code)]

use chrono::NaiveDate;
use transcript_pdf::{
    LayoutMetrics, RenderConfig, RenderOptions, SemesterData, Student, SubjectResult,
    TranscriptData,
};

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

pub fn subject(semester: usize, index: usize) -> SubjectResult {
    let obtained = 55.0 + ((semester * 7 + index * 11) % 45) as f64;
    SubjectResult {
        code: format!("CS{}{:02}", semester + 1, index + 1),
        name: format!("Course {} of term {}", index + 1, semester + 1),
        credit_hours: 3,
        total_marks: 100,
        obtained_marks: obtained,
        percentage: obtained,
        gpa: ((obtained - 50.0) / 12.5).clamp(0.0, 4.0),
        grade_letter: if obtained >= 85.0 { "A" } else { "B" }.to_string(),
    }
}

/// A transcript with one semester per entry of `subject_counts`.
pub fn transcript(subject_counts: &[usize]) -> TranscriptData {
    let semesters: Vec<SemesterData> = subject_counts
        .iter()
        .enumerate()
        .map(|(i, &n)| SemesterData {
            name: format!("Semester {}", i + 1),
            start_date: NaiveDate::from_ymd_opt(2021 + (i / 2) as i32, if i % 2 == 0 { 9 } else { 2 }, 1),
            end_date: None,
            subjects: (0..n).map(|j| subject(i, j)).collect(),
            semester_gpa: 3.25,
            semester_credit_hours: 3 * n as u32,
        })
        .collect();
    TranscriptData {
        student: Student {
            name: "Ayesha Khan".to_string(),
            roll_number: "BSCS-21-017".to_string(),
            national_id: "35202-1234567-1".to_string(),
            program: "BS Computer Science".to_string(),
            department: "Department of Computer Science".to_string(),
        },
        semesters,
        overall_gpa: 3.25,
        total_credit_hours: 3 * subject_counts.iter().sum::<usize>() as u32,
    }
}

/// Default metrics with a page whose content area (between the top margin
/// and the footer band) is `content_height` units tall.
pub fn metrics_with_content_height(content_height: f32) -> LayoutMetrics {
    let m = LayoutMetrics::default();
    LayoutMetrics {
        page_height: content_height
            + m.margin_top
            + m.margin_bottom
            + m.footer_reserved_height,
        ..m
    }
}

pub fn config(metrics: LayoutMetrics) -> RenderConfig {
    RenderConfig {
        metrics,
        style: Default::default(),
        options: RenderOptions {
            institution: "Faculty of Computing".to_string(),
            signature_label: "Registrar".to_string(),
            generated_on: NaiveDate::from_ymd_opt(2026, 10, 14).unwrap(),
        },
    }
}

/// All `(semester, subject)` pairs in document order for the given semesters.
pub fn flattened(transcript: &TranscriptData, semesters: std::ops::Range<usize>) -> Vec<(usize, usize)> {
    semesters
        .flat_map(|i| (0..transcript.semesters[i].subjects.len()).map(move |j| (i, j)))
        .collect()
}
