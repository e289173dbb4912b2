//! Setup phase: read districts and people from input text into a registry's staging list.
//!
//! Input layout, one record per line, fields separated by single spaces:
//!
//! ```text
//! <number of districts>
//! <district id>            (repeated)
//! <number of people>
//! <first> <last> <birth month> <age> <district id> <effectiveness>   (repeated)
//! ```

use crate::models::{District, DistrictId, Person, Registry};
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Errors that abort setup. Bad individual records are logged and skipped instead.
#[derive(Debug)]
pub enum SetupError {
    /// The input could not be opened or read.
    Io(std::io::Error),
    /// The csv reader failed on the underlying stream.
    Csv(csv::Error),
    /// A count line is missing or not a number, so the rest of the input cannot be framed.
    BadCount { line: u64, value: String },
}

impl std::fmt::Display for SetupError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SetupError::Io(e) => write!(f, "Error reading the input: {}", e),
            SetupError::Csv(e) => write!(f, "Error processing the input: {}", e),
            SetupError::BadCount { line, value } => {
                write!(f, "Line {}: expected a count, found {:?}", line, value)
            }
        }
    }
}

impl std::error::Error for SetupError {}

impl From<std::io::Error> for SetupError {
    fn from(e: std::io::Error) -> Self {
        SetupError::Io(e)
    }
}

impl From<csv::Error> for SetupError {
    fn from(e: csv::Error) -> Self {
        SetupError::Csv(e)
    }
}

/// Read an input file into a new registry seeded with `seed`. Nothing is admitted yet.
pub fn setup_from_path(path: impl AsRef<Path>, seed: u64) -> Result<Registry, SetupError> {
    let file = File::open(path.as_ref())?;
    log::info!("Reading districts and people from {}", path.as_ref().display());
    parse_input(file, seed)
}

/// Parse input text into a registry seeded with `seed`.
///
/// 1. Read the district count, then that many district ids (in staging order).
/// 2. Read the people count, then that many people; each joins its district's odd or even
///    population by birth-month parity.
/// 3. Unparsable records and people naming an unknown district are logged and skipped.
pub fn parse_input(input: impl Read, seed: u64) -> Result<Registry, SetupError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .delimiter(b' ')
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(input);
    let mut records = reader.records();

    let mut districts: Vec<District> = Vec::new();
    let district_count = read_count(&mut records)?;
    for _ in 0..district_count {
        let Some(record) = records.next() else {
            log::warn!("Input ended after {} of {} districts", districts.len(), district_count);
            break;
        };
        let record = record?;
        match first_field(&record).map(str::parse::<DistrictId>) {
            Some(Ok(id)) => districts.push(District::new(id)),
            _ => log::warn!("Line {}: skipping malformed district id {:?}", line_of(&record), record),
        }
    }

    let people_count = read_count(&mut records)?;
    let mut placed = 0usize;
    for i in 0..people_count {
        let Some(record) = records.next() else {
            log::warn!("Input ended after {} of {} people", i, people_count);
            break;
        };
        let record = record?;
        let person = match parse_person(&record) {
            Ok(p) => p,
            Err(msg) => {
                log::warn!("Line {}: skipping person record: {}", line_of(&record), msg);
                continue;
            }
        };
        match districts.iter_mut().find(|d| d.id == person.district_id) {
            Some(district) => {
                district.add_person(person);
                placed += 1;
            }
            None => log::warn!(
                "Line {}: {} names unknown district {}; skipped",
                line_of(&record),
                person.full_name(),
                person.district_id
            ),
        }
    }

    log::info!("Set up {} district(s) with {} people", districts.len(), placed);
    Ok(Registry::with_staging(districts, seed))
}

fn read_count<R: Read>(records: &mut csv::StringRecordsIter<'_, R>) -> Result<usize, SetupError> {
    let record = match records.next() {
        Some(record) => record?,
        None => {
            return Err(SetupError::BadCount {
                line: 0,
                value: String::new(),
            })
        }
    };
    let value = first_field(&record).unwrap_or_default();
    value.parse().map_err(|_| SetupError::BadCount {
        line: line_of(&record),
        value: value.to_string(),
    })
}

/// Empty fields (doubled or trailing spaces) are ignored; fields past the sixth are unused.
fn parse_person(record: &csv::StringRecord) -> Result<Person, String> {
    let fields: Vec<&str> = record.iter().filter(|f| !f.is_empty()).collect();
    if fields.len() < 6 {
        return Err(format!("expected 6 fields, found {}", fields.len()));
    }
    let field = |i: usize, name: &str| -> Result<i64, String> {
        fields[i]
            .parse()
            .map_err(|_| format!("{} {:?} is not a number", name, fields[i]))
    };
    let birth_month = field(2, "birth month")?;
    if !(1..=12).contains(&birth_month) {
        return Err(format!("birth month {} is out of range", birth_month));
    }
    let age = field(3, "age")?;
    let district_id = field(4, "district id")?;
    let effectiveness = field(5, "effectiveness")?;
    Ok(Person::new(
        fields[0],
        fields[1],
        birth_month as u32,
        u32::try_from(age).map_err(|_| format!("age {} is negative", age))?,
        DistrictId::try_from(district_id).map_err(|_| format!("district id {} is out of range", district_id))?,
        i32::try_from(effectiveness).map_err(|_| format!("effectiveness {} is out of range", effectiveness))?,
    ))
}

fn first_field(record: &csv::StringRecord) -> Option<&str> {
    record.iter().find(|f| !f.is_empty())
}

fn line_of(record: &csv::StringRecord) -> u64 {
    record.position().map_or(0, |p| p.line())
}
