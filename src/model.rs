use std::path::Path;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Student {
    pub name: String,
    pub roll_number: String,
    pub national_id: String,
    pub program: String,
    pub department: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SubjectResult {
    pub code: String,
    pub name: String,
    pub credit_hours: u32,
    pub total_marks: u32,
    pub obtained_marks: f64,
    pub percentage: f64,
    pub gpa: f64,
    pub grade_letter: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SemesterData {
    pub name: String,
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    pub subjects: Vec<SubjectResult>,
    pub semester_gpa: f64,
    pub semester_credit_hours: u32,
}

/// A student's academic record with aggregates computed by the producer.
/// Nothing in this crate mutates it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TranscriptData {
    pub student: Student,
    pub semesters: Vec<SemesterData>,
    pub overall_gpa: f64,
    pub total_credit_hours: u32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReportType {
    /// Every semester in order, followed by one overall summary.
    Full,
    /// A single semester (0-based index), no overall summary.
    Semester(usize),
}

impl ReportType {
    pub fn is_full(self) -> bool {
        matches!(self, ReportType::Full)
    }
}

impl TranscriptData {
    pub fn total_subjects(&self) -> usize {
        self.semesters.iter().map(|s| s.subjects.len()).sum()
    }

    /// Indices of the semesters a report of this type renders.
    pub fn semester_range(&self, report: ReportType) -> std::ops::Range<usize> {
        match report {
            ReportType::Full => 0..self.semesters.len(),
            ReportType::Semester(i) => i..i + 1,
        }
    }

    /// Reject inputs that would otherwise render as blank pages or empty tables.
    pub fn validate(&self, report: ReportType) -> Result<()> {
        if self.semesters.is_empty() {
            return Err(Error::NoSemesters);
        }
        if let ReportType::Semester(index) = report
            && index >= self.semesters.len()
        {
            return Err(Error::SemesterOutOfRange {
                index,
                count: self.semesters.len(),
            });
        }

        for index in self.semester_range(report) {
            let semester = &self.semesters[index];
            if semester.subjects.is_empty() {
                return Err(Error::EmptySemester {
                    index,
                    name: semester.name.clone(),
                });
            }
            if !gpa_in_range(semester.semester_gpa) {
                log::warn!(
                    "Semester {:?} GPA {} outside 0.00..=4.00",
                    semester.name,
                    semester.semester_gpa
                );
            }
            for subject in &semester.subjects {
                if !gpa_in_range(subject.gpa) {
                    log::warn!(
                        "Subject {} GPA {} outside 0.00..=4.00",
                        subject.code,
                        subject.gpa
                    );
                }
            }
        }

        if report.is_full() && !gpa_in_range(self.overall_gpa) {
            log::warn!("Overall GPA {} outside 0.00..=4.00", self.overall_gpa);
        }
        Ok(())
    }
}

fn gpa_in_range(gpa: f64) -> bool {
    (0.0..=4.0).contains(&gpa)
}

pub fn parse_transcript(json: &str) -> Result<TranscriptData> {
    Ok(serde_json::from_str(json)?)
}

pub fn load_transcript(path: &Path) -> Result<TranscriptData> {
    let text = std::fs::read_to_string(path).map_err(Error::Io)?;
    parse_transcript(&text)
}
