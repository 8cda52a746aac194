//! Derivation benchmarks
//!
//! Benchmarks for the read paths the dashboard hits on every render:
//! - Attendance percentage over growing histories
//! - SGPA over growing mark sheets
//! - Attendance upsert through the engine (in-memory store)

use campus_records::analytics;
use campus_records::clock::FixedClock;
use campus_records::kv::MemoryKvStore;
use campus_records::record::{AttendanceRecord, AttendanceStatus, Course, ExamMark, ExamType};
use campus_records::{EngineConfig, StudentEngine};
use chrono::{Days, NaiveDate};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

fn start() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
}

/// Attendance for 5 courses over `days` days
fn create_attendance(days: u64) -> Vec<AttendanceRecord> {
    let statuses = [
        AttendanceStatus::Present,
        AttendanceStatus::Present,
        AttendanceStatus::Late,
        AttendanceStatus::Absent,
    ];
    (0..days)
        .flat_map(|d| {
            (1..=5).map(move |c| {
                let status = statuses[usize::try_from(d + c).unwrap() % statuses.len()];
                AttendanceRecord::new(
                    format!("a_{d}_{c}"),
                    "s1",
                    format!("c{c}"),
                    start() + Days::new(d),
                    status,
                )
            })
        })
        .collect()
}

fn create_courses() -> Vec<Course> {
    (1..=5)
        .map(|c| {
            Course::builder(format!("c{c}"), format!("CS30{c}"), format!("Course {c}"))
                .credits(3 + c % 2)
                .semester(4)
                .build()
                .unwrap()
        })
        .collect()
}

/// `per_course` quiz marks for each of 5 courses
fn create_exams(per_course: u32) -> Vec<ExamMark> {
    (0..per_course)
        .flat_map(|i| {
            (1..=5).map(move |c| {
                ExamMark::builder(format!("e_{i}_{c}"), "s1", format!("c{c}"), ExamType::Quiz, start())
                    .marks((i * 7 + c) % 11, 10)
                    .build()
                    .unwrap()
            })
        })
        .collect()
}

fn bench_attendance_percentage(c: &mut Criterion) {
    let mut group = c.benchmark_group("attendance_percentage");

    for days in [30, 180, 1_000].iter() {
        let records = create_attendance(*days);

        group.bench_with_input(BenchmarkId::from_parameter(days), days, |b, _| {
            b.iter(|| {
                let pct = analytics::attendance_percentage(black_box(&records), "s1", "c3");
                black_box(pct);
            });
        });
    }

    group.finish();
}

fn bench_overall_attendance(c: &mut Criterion) {
    let courses = create_courses();
    let records = create_attendance(180);

    c.bench_function("overall_attendance_180_days", |b| {
        b.iter(|| {
            let pct = analytics::overall_attendance(black_box(&records), "s1", &courses);
            black_box(pct);
        });
    });
}

fn bench_sgpa(c: &mut Criterion) {
    let mut group = c.benchmark_group("sgpa");
    let courses = create_courses();

    for per_course in [4, 40, 400].iter() {
        let exams = create_exams(*per_course);

        group.bench_with_input(BenchmarkId::from_parameter(per_course), per_course, |b, _| {
            b.iter(|| {
                let sgpa = analytics::sgpa(&courses, black_box(&exams), "s1", 4);
                black_box(sgpa);
            });
        });
    }

    group.finish();
}

fn bench_mark_attendance(c: &mut Criterion) {
    let runtime = tokio::runtime::Runtime::new().unwrap();
    let config = EngineConfig::builder()
        .clock(FixedClock::new(NaiveDate::from_ymd_opt(2025, 4, 16).unwrap()))
        .build()
        .unwrap();
    let (mut engine, _) = runtime.block_on(StudentEngine::open(MemoryKvStore::new(), config));

    c.bench_function("mark_attendance_upsert", |b| {
        b.iter(|| {
            let mutation = runtime
                .block_on(engine.mark_attendance("c1", AttendanceStatus::Present))
                .unwrap();
            black_box(mutation);
        });
    });
}

criterion_group!(
    benches,
    bench_attendance_percentage,
    bench_overall_attendance,
    bench_sgpa,
    bench_mark_attendance
);
criterion_main!(benches);
