//! Benchmark for loading and classifying attendance files
//!
//! Run with: cargo bench --bench classify_benchmark

use std::io::Write;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rand::prelude::*;
use rand::SeedableRng;
use tempfile::TempDir;

use attendance_report::pipeline::{classify, classify_table, AttendanceRecord, AttendanceTable};

/// Generate a synthetic attendance table
fn generate_table(n_rows: usize, seed: u64) -> AttendanceTable {
    let mut rng = rand::rngs::StdRng::seed_from_u64(seed);
    let records = (0..n_rows)
        .map(|i| {
            AttendanceRecord::new(format!("student{}@school.edu", i), rng.gen::<f64>() * 100.0)
                .with_gender(if rng.gen::<bool>() { "F" } else { "M" })
        })
        .collect();
    AttendanceTable::new(records, true)
}

fn write_csv(table: &AttendanceTable) -> (TempDir, std::path::PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("attendance.csv");
    let mut file = std::io::BufWriter::new(std::fs::File::create(&path).unwrap());
    writeln!(file, "Student Mail ID,Attendance Percentage,Gender").unwrap();
    for record in table.records() {
        writeln!(
            file,
            "{},{:.2},{}",
            record.student_mail_id,
            record.attendance_percentage,
            record.gender.as_deref().unwrap_or("")
        )
        .unwrap();
    }
    drop(file);
    (temp_dir, path)
}

fn bench_classify_table(c: &mut Criterion) {
    let mut group = c.benchmark_group("classify_table");

    for n_rows in [1_000, 10_000, 100_000] {
        let table = generate_table(n_rows, 7);
        group.throughput(Throughput::Elements(n_rows as u64));
        group.bench_with_input(BenchmarkId::from_parameter(n_rows), &table, |b, table| {
            b.iter(|| classify_table(black_box(table.clone()), 75.0))
        });
    }

    group.finish();
}

fn bench_classify_file(c: &mut Criterion) {
    let mut group = c.benchmark_group("classify_file");
    group.sample_size(20);

    for n_rows in [1_000, 50_000] {
        let (_temp_dir, path) = write_csv(&generate_table(n_rows, 11));
        group.throughput(Throughput::Elements(n_rows as u64));
        group.bench_with_input(BenchmarkId::from_parameter(n_rows), &path, |b, path| {
            b.iter(|| classify(black_box(path), 75.0).unwrap())
        });
    }

    group.finish();
}

criterion_group!(benches, bench_classify_table, bench_classify_file);
criterion_main!(benches);
