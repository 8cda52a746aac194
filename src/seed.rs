//! Seed dataset used when a collection has no usable snapshot.
//!
//! Output is a pure function of the [`EngineConfig`] seed and "today": each
//! collection draws from its own RNG stream, so one collection falling back
//! never shifts the contents of another.

use chrono::{Datelike, Days, NaiveDate, Weekday};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::{Collection, EngineConfig};
use crate::record::{
    AttendanceRecord, AttendanceStatus, Course, ExamMark, ExamType, MealBooking, MealPlan, MealType,
    Student,
};

const STUDENT_COUNT: u32 = 3;
const COURSE_COUNT: u32 = 5;

fn rng_for(config: &EngineConfig, collection: Collection) -> StdRng {
    let stream = Collection::ALL
        .iter()
        .position(|c| *c == collection)
        .unwrap_or_default() as u64;
    StdRng::seed_from_u64(config.seed().wrapping_add(stream))
}

fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default()
}

/// The seed students, `s1` through `s3`.
#[must_use]
pub fn students() -> Vec<Student> {
    let rows = [
        ("s1", "Alex Johnson", "CS2022001", "A", "alex.johnson@university.edu", "O+"),
        ("s2", "Priya Sharma", "CS2022002", "A", "priya.sharma@university.edu", "B+"),
        ("s3", "Daniel Kim", "CS2022003", "B", "daniel.kim@university.edu", "A-"),
    ];
    rows.iter()
        .filter_map(|&(id, name, roll, section, email, blood)| {
            Student::builder(id, name)
                .roll_number(roll)
                .department("Computer Science")
                .semester(4)
                .section(section)
                .batch_number("2022")
                .email(email)
                .blood_group(blood)
                .build()
                .ok()
        })
        .collect()
}

/// The seed student to make current: `config.current_student_id()` if it
/// names a seed student, else the first one.
#[must_use]
pub fn current_student(config: &EngineConfig) -> Student {
    let mut all = students();
    let index = all
        .iter()
        .position(|s| s.id() == config.current_student_id())
        .unwrap_or_default();
    all.swap_remove(index)
}

/// The fourth-semester Computer Science catalogue.
#[must_use]
pub fn courses() -> Vec<Course> {
    let rows = [
        ("c1", "CS301", "Data Structures", "Dr. Robert Brown", 4),
        ("c2", "CS302", "Algorithms", "Dr. Sarah Wilson", 4),
        ("c3", "CS303", "Database Systems", "Prof. James Miller", 3),
        ("c4", "CS304", "Operating Systems", "Dr. Emily Davis", 4),
        ("c5", "CS305", "Computer Networks", "Prof. Michael Clark", 3),
    ];
    rows.iter()
        .filter_map(|&(id, code, name, instructor, credits)| {
            Course::builder(id, code, name)
                .instructor(instructor)
                .credits(credits)
                .department("Computer Science")
                .semester(4)
                .build()
                .ok()
        })
        .collect()
}

/// Weekday sessions over the configured history window for every seed
/// student and course; roughly 80% present, 10% late, 10% absent.
#[must_use]
pub fn attendance(config: &EngineConfig) -> Vec<AttendanceRecord> {
    let today = config.today();
    let dates: Vec<NaiveDate> = (0..config.attendance_history_days())
        .filter_map(|back| today.checked_sub_days(Days::new(u64::from(back))))
        .filter(|d| !matches!(d.weekday(), Weekday::Sat | Weekday::Sun))
        .collect();

    let mut rng = rng_for(config, Collection::Attendance);
    let mut records = Vec::new();
    for student in 1..=STUDENT_COUNT {
        for course in 1..=COURSE_COUNT {
            for (index, date) in dates.iter().enumerate() {
                let roll: f64 = rng.gen();
                let status = if roll < 0.8 {
                    AttendanceStatus::Present
                } else if roll < 0.9 {
                    AttendanceStatus::Late
                } else {
                    AttendanceStatus::Absent
                };
                records.push(AttendanceRecord::new(
                    format!("att_{student}_{course}_{index}"),
                    format!("s{student}"),
                    format!("c{course}"),
                    *date,
                    status,
                ));
            }
        }
    }
    records
}

/// One midterm, three assignments, two quizzes and a final per seed
/// student and course.
#[must_use]
pub fn exams(config: &EngineConfig) -> Vec<ExamMark> {
    let mut rng = rng_for(config, Collection::Exams);
    let mut marks = Vec::new();
    let mut push = |id: String, student: u32, course: u32, kind, date, obtained, max| {
        if let Ok(mark) = ExamMark::builder(id, format!("s{student}"), format!("c{course}"), kind, date)
            .marks(obtained, max)
            .build()
        {
            marks.push(mark);
        }
    };

    for student in 1..=STUDENT_COUNT {
        for course in 1..=COURSE_COUNT {
            push(
                format!("exam_mid_{student}_{course}"),
                student,
                course,
                ExamType::Midterm,
                ymd(2025, 4, 15),
                rng.gen_range(30..50),
                50,
            );
            for i in 1..=3 {
                push(
                    format!("exam_assign_{student}_{course}_{i}"),
                    student,
                    course,
                    ExamType::Assignment,
                    ymd(2025, i + 2, i * 5),
                    rng.gen_range(12..20),
                    20,
                );
            }
            for i in 1..=2 {
                push(
                    format!("exam_quiz_{student}_{course}_{i}"),
                    student,
                    course,
                    ExamType::Quiz,
                    ymd(2025, i + 3, i * 10),
                    rng.gen_range(6..10),
                    10,
                );
            }
            push(
                format!("exam_final_{student}_{course}"),
                student,
                course,
                ExamType::Final,
                ymd(2025, 7, 20),
                rng.gen_range(70..100),
                100,
            );
        }
    }
    marks
}

/// Bookings over the configured horizon starting today: breakfast ~70%,
/// lunch ~80%, dinner ~90% of days.
#[must_use]
pub fn meal_bookings(config: &EngineConfig) -> Vec<MealBooking> {
    let today = config.today();
    let mut rng = rng_for(config, Collection::MealBookings);
    let mut bookings = Vec::new();

    for student in 1..=STUDENT_COUNT {
        for index in 0..config.meal_horizon_days() {
            let Some(date) = today.checked_add_days(Days::new(u64::from(index))) else {
                continue;
            };
            for (meal, prefix, chance) in [
                (MealType::Breakfast, 'b', 0.7),
                (MealType::Lunch, 'l', 0.8),
                (MealType::Dinner, 'd', 0.9),
            ] {
                if rng.gen_bool(chance) {
                    bookings.push(MealBooking::new(
                        format!("meal_{prefix}_{student}_{index}"),
                        format!("s{student}"),
                        date,
                        meal,
                    ));
                }
            }
        }
    }
    bookings
}

/// The hostel's weekly menu, Monday first.
#[must_use]
pub fn meal_plans() -> Vec<MealPlan> {
    let week: [(Weekday, [&str; 4], [&str; 4], [&str; 4]); 7] = [
        (
            Weekday::Mon,
            ["Bread", "Eggs", "Milk", "Cereal"],
            ["Rice", "Dal", "Vegetables", "Yogurt"],
            ["Chapati", "Paneer Curry", "Salad", "Dessert"],
        ),
        (
            Weekday::Tue,
            ["Paratha", "Curd", "Fruit", "Tea"],
            ["Pulao", "Rajma", "Raita", "Papad"],
            ["Naan", "Chicken Curry", "Vegetables", "Ice Cream"],
        ),
        (
            Weekday::Wed,
            ["Idli", "Sambhar", "Chutney", "Coffee"],
            ["Biryani", "Salan", "Raita", "Salad"],
            ["Chapati", "Mixed Vegetables", "Dal", "Fruit"],
        ),
        (
            Weekday::Thu,
            ["Upma", "Coconut Chutney", "Fruit", "Tea"],
            ["Rice", "Sambar", "Rasam", "Curd"],
            ["Chapati", "Palak Paneer", "Dal", "Sweet"],
        ),
        (
            Weekday::Fri,
            ["Poha", "Chutney", "Milk", "Fruit"],
            ["Chole Bhature", "Raita", "Salad", "Pickle"],
            ["Chapati", "Egg Curry", "Dal", "Kheer"],
        ),
        (
            Weekday::Sat,
            ["Dosa", "Sambhar", "Chutney", "Coffee"],
            ["Puri", "Aloo Sabzi", "Raita", "Papad"],
            ["Chapati", "Matar Paneer", "Dal", "Fruit"],
        ),
        (
            Weekday::Sun,
            ["Aloo Paratha", "Curd", "Pickle", "Tea"],
            ["Special Thali", "Sweet", "Papad", "Salad"],
            ["Chapati", "Butter Chicken", "Dal", "Ice Cream"],
        ),
    ];
    week.into_iter()
        .map(|(day, breakfast, lunch, dinner)| {
            MealPlan::new(format!("mp{}", day.number_from_monday()), day)
                .with_items(MealType::Breakfast, breakfast)
                .with_items(MealType::Lunch, lunch)
                .with_items(MealType::Dinner, dinner)
        })
        .collect()
}
