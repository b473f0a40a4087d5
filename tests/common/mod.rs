//! Shared test utilities and fixture generators

use std::io::Write;
use std::path::PathBuf;
use tempfile::TempDir;

#[allow(dead_code)]
pub const HEADER: &str = "Student Mail ID,Attendance Percentage,Gender";

/// Write `lines` (header included) to `name` inside a fresh temporary directory
pub fn write_temp_file(name: &str, lines: &[&str]) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join(name);

    let mut file = std::fs::File::create(&path).unwrap();
    for line in lines {
        writeln!(file, "{}", line).unwrap();
    }

    (temp_dir, path)
}

/// Three-row scenario: one defaulter (b@x.com), 75 sits on the boundary
#[allow(dead_code)]
pub fn create_scenario_csv() -> (TempDir, PathBuf) {
    write_temp_file(
        "scenario.csv",
        &[HEADER, "a@x.com,80,F", "b@x.com,60,M", "c@x.com,75,F"],
    )
}

/// Ten rows: six at or above 75%, four below, mixed genders
#[allow(dead_code)]
pub fn create_class_csv() -> (TempDir, PathBuf) {
    write_temp_file(
        "class.csv",
        &[
            HEADER,
            "s01@school.edu,92.5,F",
            "s02@school.edu,75,M",
            "s03@school.edu,88,F",
            "s04@school.edu,60,M",
            "s05@school.edu,79.9,Other",
            "s06@school.edu,74.9,F",
            "s07@school.edu,100,M",
            "s08@school.edu,12,F",
            "s09@school.edu,81,M",
            "s10@school.edu,50,F",
        ],
    )
}

/// Generate `rows` CSV lines with random percentages in 0..=100
#[allow(dead_code)]
pub fn random_rows(rows: usize, seed: u64) -> Vec<String> {
    use rand::{Rng, SeedableRng};
    let mut rng = rand::rngs::StdRng::seed_from_u64(seed);
    let genders = ["F", "M", "Other"];

    (0..rows)
        .map(|i| {
            format!(
                "student{}@school.edu,{:.1},{}",
                i,
                rng.gen_range(0.0..=100.0),
                genders[rng.gen_range(0..genders.len())]
            )
        })
        .collect()
}
