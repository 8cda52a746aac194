//! Record schema tests: construction, validation and stored document shape.

use campus_records::record::{
    AttendanceRecord, AttendanceStatus, BookingStatus, Course, ExamMark, ExamType, MealBooking,
    MealType, Student,
};
use chrono::NaiveDate;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

// =============================================================================
// Student
// =============================================================================

#[test]
fn test_student_builder() {
    let student = Student::builder("s1", "Alex Johnson")
        .roll_number("CS2022001")
        .department("Computer Science")
        .semester(4)
        .section("A")
        .batch_number("2022")
        .build()
        .unwrap();

    assert_eq!(student.id(), "s1");
    assert_eq!(student.semester(), 4);
    assert_eq!(student.batch_number(), "2022");
    assert!(student.email().is_none());
    assert!(student.profile_image().is_none());
}

#[test]
fn test_student_optional_fields_round_trip() {
    let student = Student::builder("s2", "Priya Sharma")
        .semester(6)
        .email("priya@university.edu")
        .phone("+91 98765 43210")
        .address("Hostel Block C, Room 214")
        .date_of_birth("2003-08-19")
        .blood_group("B+")
        .profile_image("https://example.org/p.png")
        .build()
        .unwrap();

    let json = serde_json::to_string(&student).unwrap();
    let decoded: Student = serde_json::from_str(&json).unwrap();

    assert_eq!(decoded, student);
    assert_eq!(decoded.phone(), Some("+91 98765 43210"));
    assert_eq!(decoded.date_of_birth(), Some("2003-08-19"));
}

#[test]
fn test_student_document_without_optional_fields_decodes() {
    let json = r#"{
        "id": "s3", "name": "Daniel Kim", "rollNumber": "CS2022003",
        "department": "Computer Science", "semester": 4, "section": "B",
        "batchNumber": "2022"
    }"#;
    let student: Student = serde_json::from_str(json).unwrap();

    assert_eq!(student.roll_number(), "CS2022003");
    assert!(student.address().is_none());
    assert!(student.blood_group().is_none());
}

// =============================================================================
// Course / ExamMark
// =============================================================================

#[test]
fn test_course_builder() {
    let course = Course::builder("c3", "CS303", "Database Systems")
        .instructor("Prof. James Miller")
        .credits(3)
        .department("Computer Science")
        .semester(4)
        .build()
        .unwrap();

    assert_eq!(course.code(), "CS303");
    assert_eq!(course.instructor(), "Prof. James Miller");
    assert_eq!(course.credits(), 3);
}

#[test]
fn test_exam_mark_document_shape() {
    let mark = ExamMark::builder("exam_mid_1_1", "s1", "c1", ExamType::Midterm, date(2025, 4, 15))
        .marks(45, 50)
        .build()
        .unwrap();

    let json = serde_json::to_value(&mark).unwrap();
    assert_eq!(json["examType"], "midterm");
    assert_eq!(json["maxMarks"], 50);
    assert_eq!(json["obtainedMarks"], 45);
    assert_eq!(json["date"], "2025-04-15");
}

#[test]
fn test_exam_mark_rejects_zero_max() {
    let result = ExamMark::builder("e1", "s1", "c1", ExamType::Final, date(2025, 7, 20))
        .marks(0, 0)
        .build();
    assert!(result.is_err());
}

// =============================================================================
// AttendanceRecord / MealBooking
// =============================================================================

#[test]
fn test_attendance_record_round_trip() {
    let record = AttendanceRecord::new("att_1", "s1", "c2", date(2025, 4, 14), AttendanceStatus::Late);

    let json = serde_json::to_string(&record).unwrap();
    let decoded: AttendanceRecord = serde_json::from_str(&json).unwrap();

    assert_eq!(decoded, record);
    assert!(decoded.is_for("s1", "c2"));
}

#[test]
fn test_unknown_status_in_document_rejected() {
    let json = r#"{"id":"a","courseId":"c1","date":"2025-04-14","studentId":"s1","status":"excused"}"#;
    assert!(serde_json::from_str::<AttendanceRecord>(json).is_err());
}

#[test]
fn test_meal_booking_document_shape() {
    let booking = MealBooking::new("meal_l_1_0", "s1", date(2025, 4, 16), MealType::Lunch);
    let json = serde_json::to_value(&booking).unwrap();

    assert_eq!(json["mealType"], "lunch");
    assert_eq!(json["status"], "booked");
    assert_eq!(json["studentId"], "s1");
}

#[test]
fn test_enum_string_forms_parse_back() {
    for meal in MealType::ALL {
        assert_eq!(meal.as_str().parse::<MealType>().unwrap(), meal);
    }
    for status in [BookingStatus::Booked, BookingStatus::Cancelled, BookingStatus::Consumed] {
        assert_eq!(status.to_string().parse::<BookingStatus>().unwrap(), status);
    }
    for kind in [ExamType::Midterm, ExamType::Assignment, ExamType::Quiz, ExamType::Final] {
        assert_eq!(kind.to_string().parse::<ExamType>().unwrap(), kind);
    }
}
