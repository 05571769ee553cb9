use chrono::{Local, TimeZone};
use rand::Rng;
use uuid::Builder;

use crate::{DataType, GeneratorError, GeneratorResult, DATE_END_MS, DATE_START_MS};

pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Produces the value of one cell. `row` is the 1-based row number.
pub fn generate_cell<R: Rng>(data_type: DataType, row: u64, rng: &mut R) -> GeneratorResult<String> {
    match data_type {
        DataType::Number => Ok(row.to_string()),
        DataType::String => Ok(random_uuid(rng)),
        DataType::Date => random_date(rng),
    }
}

/// A random v4 UUID in lowercase hyphenated form, drawn from `rng`.
pub fn random_uuid<R: Rng>(rng: &mut R) -> String {
    let mut bytes = [0u8; 16];
    rng.fill(&mut bytes);

    Builder::from_random_bytes(bytes)
        .into_uuid()
        .hyphenated()
        .to_string()
}

/// A random calendar date within the fixed window, in the local time zone.
pub fn random_date<R: Rng>(rng: &mut R) -> GeneratorResult<String> {
    let millis = rng.gen_range(DATE_START_MS..=DATE_END_MS);
    format_date(millis, &Local)
}

pub fn format_date<Tz>(millis: i64, tz: &Tz) -> GeneratorResult<String>
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    tz.timestamp_millis_opt(millis)
        .single()
        .map(|dt| dt.format(DATE_FORMAT).to_string())
        .ok_or(GeneratorError::DateOutOfRange { millis })
}
