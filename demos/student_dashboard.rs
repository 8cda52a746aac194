//! Student Dashboard Demo
//!
//! Run with: `cargo run --example student_dashboard`
//!
//! Opens the engine over a file store, prints the derived dashboard and
//! exercises the attendance and meal mutators. Set `RUST_LOG=debug` to see
//! load and persistence events.

use anyhow::Context;
use campus_records::kv::FileKvStore;
use campus_records::record::{AttendanceStatus, MealType};
use campus_records::{EngineConfig, StudentEngine};
use chrono::Days;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let root = std::env::temp_dir().join("campus-records-dashboard");
    let kv = FileKvStore::open(&root)
        .await
        .with_context(|| format!("opening store at {}", root.display()))?;
    let (mut engine, report) = StudentEngine::open(kv, EngineConfig::default()).await;

    println!("=== Load ===");
    for (collection, source) in report.iter() {
        println!("   {:<13} {source}", collection.key());
    }

    let student = engine.current_student()?.clone();
    println!("\n=== {} ({}) ===", student.name(), student.roll_number());
    println!(
        "   {} | semester {} | section {}",
        student.department(),
        student.semester(),
        student.section()
    );

    println!("\n=== Attendance ===");
    for stats in engine.attendance_summary()? {
        println!(
            "   {:<28} {:>3}%  ({}/{})",
            stats.course_name, stats.percentage, stats.attended, stats.total_classes
        );
    }
    println!("   overall                      {:>3}%", engine.overall_attendance()?);

    println!("\n=== Results ===");
    let result = engine.semester_result(student.semester())?;
    for grade in &result.courses {
        println!(
            "   {:<28} {:>6.2}%  GP {}",
            grade.course_name,
            grade.percentage,
            grade.grade_point.value()
        );
    }
    println!("   SGPA {:.2} over {} credits", result.sgpa, result.total_credits);
    println!("   CGPA {:.2}", engine.current_cgpa()?);

    println!("\n=== Mutations ===");
    let marked = engine.mark_attendance("c1", AttendanceStatus::Present).await?;
    println!(
        "   marked {} -> {} ({:?})",
        marked.record.course_id(),
        marked.record.status(),
        marked.persisted
    );

    let tomorrow = engine
        .config()
        .today()
        .checked_add_days(Days::new(1))
        .context("date overflow")?;
    let toggled = engine.toggle_meal_booking(tomorrow, MealType::Dinner).await?;
    println!(
        "   dinner on {tomorrow}: {} ({:?})",
        toggled.record.status(),
        toggled.persisted
    );

    if let Some(plan) = engine.meal_plan_for(tomorrow) {
        println!("   menu ({}):", plan.day());
        for meal in MealType::ALL {
            println!("     {:<9} {}", meal.as_str(), plan.items(meal).join(", "));
        }
    }
    for booking in engine.bookings_on(tomorrow)? {
        println!("   {tomorrow} {:<9} {}", booking.meal_type().as_str(), booking.status());
    }

    Ok(())
}
