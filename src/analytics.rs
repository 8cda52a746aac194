//! Pure derivations over student records
//!
//! Every function here is a deterministic function of its inputs: no clock,
//! no storage, no hidden state. Aggregation uses integer sums so results do
//! not depend on record order.
//!
//! ## Grade point table
//!
//! | Percentage | Grade point |
//! |-----------:|------------:|
//! | ≥ 90       | 10          |
//! | ≥ 80       | 9           |
//! | ≥ 70       | 8           |
//! | ≥ 60       | 7           |
//! | ≥ 50       | 6           |
//! | ≥ 40       | 5           |
//! | otherwise  | 0           |

use serde::{Deserialize, Serialize};

use crate::record::{AttendanceRecord, Course, ExamMark};

/// (inclusive lower bound in percent, grade point), highest first
const GRADE_THRESHOLDS: [(u64, u8); 6] = [(90, 10), (80, 9), (70, 8), (60, 7), (50, 6), (40, 5)];

/// Integer division rounding halves up. `den` must be non-zero.
const fn div_round_half_up(num: u64, den: u64) -> u64 {
    (2 * num + den) / (2 * den)
}

/// Round to two decimal places.
#[must_use]
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Grade point on the 0-10 scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct GradePoint(u8);

impl GradePoint {
    /// Grade point for `obtained` out of `max` marks.
    ///
    /// Compares `100 * obtained` against `threshold * max` so bracket edges
    /// are exact (no floating point). Returns `None` when `max == 0`.
    #[must_use]
    pub fn from_marks(obtained: u64, max: u64) -> Option<Self> {
        if max == 0 {
            return None;
        }
        let scaled = obtained * 100;
        let point = GRADE_THRESHOLDS
            .iter()
            .find(|(threshold, _)| scaled >= threshold * max)
            .map_or(0, |&(_, point)| point);
        Some(Self(point))
    }

    /// Grade point for an already computed percentage.
    #[must_use]
    pub fn from_percentage(percentage: f64) -> Self {
        #[allow(clippy::cast_precision_loss)]
        let point = GRADE_THRESHOLDS
            .iter()
            .find(|(threshold, _)| percentage >= *threshold as f64)
            .map_or(0, |&(_, point)| point);
        Self(point)
    }

    /// Numeric value (0-10).
    #[must_use]
    pub const fn value(self) -> u8 {
        self.0
    }
}

/// Attendance totals for one course.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceStats {
    /// Course ID.
    pub course_id: String,
    /// Course name.
    pub course_name: String,
    /// Recorded sessions.
    pub total_classes: u32,
    /// Sessions marked present or late.
    pub attended: u32,
    /// Rounded attended percentage (0 with no sessions).
    pub percentage: u32,
}

/// Count `(total, attended)` sessions of `student_id` in `course_id`.
#[must_use]
pub fn attendance_tally(
    records: &[AttendanceRecord],
    student_id: &str,
    course_id: &str,
) -> (u32, u32) {
    records
        .iter()
        .filter(|r| r.is_for(student_id, course_id))
        .fold((0, 0), |(total, attended), r| {
            (total + 1, attended + u32::from(r.status().counts_as_attended()))
        })
}

/// Attendance percentage of `student_id` in `course_id`.
///
/// `round(100 * attended / total)` with halves rounded up; 0 when the
/// student has no records for the course.
#[must_use]
pub fn attendance_percentage(records: &[AttendanceRecord], student_id: &str, course_id: &str) -> u32 {
    let (total, attended) = attendance_tally(records, student_id, course_id);
    percentage_of(attended, total)
}

fn percentage_of(part: u32, whole: u32) -> u32 {
    if whole == 0 {
        return 0;
    }
    // part <= whole, so the quotient is at most 100
    u32::try_from(div_round_half_up(u64::from(part) * 100, u64::from(whole))).unwrap_or(100)
}

/// Attendance totals for `course`.
#[must_use]
pub fn attendance_stats(records: &[AttendanceRecord], student_id: &str, course: &Course) -> AttendanceStats {
    let (total_classes, attended) = attendance_tally(records, student_id, course.id());
    AttendanceStats {
        course_id: course.id().to_string(),
        course_name: course.name().to_string(),
        total_classes,
        attended,
        percentage: percentage_of(attended, total_classes),
    }
}

/// Mean of per-course attendance percentages, rounded half up.
///
/// Every course counts, including courses with no sessions (at 0%).
/// Returns 0 when there are no courses.
#[must_use]
pub fn overall_attendance(records: &[AttendanceRecord], student_id: &str, courses: &[Course]) -> u32 {
    if courses.is_empty() {
        return 0;
    }
    let sum: u64 = courses
        .iter()
        .map(|c| u64::from(attendance_percentage(records, student_id, c.id())))
        .sum();
    u32::try_from(div_round_half_up(sum, courses.len() as u64)).unwrap_or(100)
}

/// Summed `(obtained, max)` marks of `student_id` in `course_id`.
///
/// `None` when the student has no marks for the course.
#[must_use]
pub fn course_marks(exams: &[ExamMark], student_id: &str, course_id: &str) -> Option<(u64, u64)> {
    exams
        .iter()
        .filter(|e| e.is_for(student_id, course_id))
        .fold(None, |acc, e| {
            let (obtained, max) = acc.unwrap_or((0, 0));
            Some((
                obtained + u64::from(e.obtained_marks()),
                max + u64::from(e.max_marks()),
            ))
        })
}

/// Grade of one course that contributed to a semester result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseGrade {
    /// Course ID.
    pub course_id: String,
    /// Course name.
    pub course_name: String,
    /// Credit weight.
    pub credits: u32,
    /// `100 * obtained / max` over all marks, unrounded.
    pub percentage: f64,
    /// Grade point for `percentage`.
    pub grade_point: GradePoint,
}

/// Credit-weighted result for one semester.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SemesterResult {
    /// Semester number.
    pub semester: u32,
    /// Contributing courses in catalogue order.
    pub courses: Vec<CourseGrade>,
    /// SGPA rounded to 2 decimals.
    pub sgpa: f64,
    /// Credits of contributing courses.
    pub total_credits: u32,
}

/// Grade every course of `semester` that has marks for `student_id`.
///
/// Courses without marks (or whose max marks sum to 0) are skipped: they
/// add neither credits nor grade points.
#[must_use]
pub fn semester_result(
    courses: &[Course],
    exams: &[ExamMark],
    student_id: &str,
    semester: u32,
) -> SemesterResult {
    let grades: Vec<CourseGrade> = courses
        .iter()
        .filter(|c| c.semester() == semester)
        .filter_map(|course| {
            let (obtained, max) = course_marks(exams, student_id, course.id())?;
            let grade_point = GradePoint::from_marks(obtained, max)?;
            #[allow(clippy::cast_precision_loss)]
            let percentage = obtained as f64 * 100.0 / max as f64;
            Some(CourseGrade {
                course_id: course.id().to_string(),
                course_name: course.name().to_string(),
                credits: course.credits(),
                percentage,
                grade_point,
            })
        })
        .collect();

    let total_credits: u32 = grades.iter().map(|g| g.credits).sum();
    let weighted: u64 = grades
        .iter()
        .map(|g| u64::from(g.grade_point.value()) * u64::from(g.credits))
        .sum();

    #[allow(clippy::cast_precision_loss)]
    let sgpa = if total_credits == 0 {
        0.0
    } else {
        round2(weighted as f64 / f64::from(total_credits))
    };

    SemesterResult {
        semester,
        courses: grades,
        sgpa,
        total_credits,
    }
}

/// SGPA of `student_id` for `semester`, rounded to 2 decimals.
///
/// 0 when the semester has no courses or no course has marks.
#[must_use]
pub fn sgpa(courses: &[Course], exams: &[ExamMark], student_id: &str, semester: u32) -> f64 {
    semester_result(courses, exams, student_id, semester).sgpa
}

/// CGPA: arithmetic mean of `sgpa(1..=through_semester)`, rounded to 2 decimals.
///
/// Semesters without contributing courses count as 0. Returns 0 for
/// `through_semester == 0`.
#[must_use]
pub fn cgpa(courses: &[Course], exams: &[ExamMark], student_id: &str, through_semester: u32) -> f64 {
    if through_semester == 0 {
        return 0.0;
    }
    let total: f64 = (1..=through_semester)
        .map(|semester| sgpa(courses, exams, student_id, semester))
        .sum();
    round2(total / f64::from(through_semester))
}
