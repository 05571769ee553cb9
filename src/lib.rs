use std::{
    path::{Path, PathBuf},
    str::FromStr,
};

use rand::{rngs::StdRng, SeedableRng};
use serde::{de::IntoDeserializer, Deserialize};
use thiserror::Error;
use tracing::{debug, info};

pub mod command_map;
pub mod generator;
pub mod validator;

use command_map::CommandMap;
use generator::{cell::random_uuid, writer::write_csv_file};
use validator::Command;

pub const HEADERS_FLAG: &str = "-h";
pub const DATA_TYPES_FLAG: &str = "-d";
pub const ROW_COUNT_FLAG: &str = "-rc";
pub const FILE_NAME_FLAG: &str = "-n";
pub const SEED_FLAG: &str = "-s";

pub const REQUIRED_FLAGS: [&str; 3] = [HEADERS_FLAG, DATA_TYPES_FLAG, ROW_COUNT_FLAG];

/// Marks a command line token as a flag.
pub const FLAG_PREFIX: char = '-';

/// 2020-05-20, in milliseconds since the epoch.
pub const DATE_START_MS: i64 = 1_590_000_000_000;
/// 2020-12-23, in milliseconds since the epoch.
pub const DATE_END_MS: i64 = 1_608_744_323_000;

pub const CSV_EXTENSION: &str = "csv";

#[derive(Error, Debug)]
pub enum GeneratorError {
    #[error("Missing required arguments: {}", .flags.join(", "))]
    MissingArguments { flags: Vec<&'static str> },

    #[error("Missing value for {flag}")]
    MissingValue { flag: &'static str },

    #[error("Invalid row count: {value}")]
    InvalidRowCount { value: String },

    #[error("Invalid data types")]
    InvalidDataTypes { value: String },

    #[error("At least one header is required")]
    EmptyHeaders,

    #[error("Column mismatch: {headers} headers but {data_types} data types")]
    ColumnMismatch { headers: usize, data_types: usize },

    #[error("Invalid seed: {value}")]
    InvalidSeed { value: String },

    #[error("Date out of range: {millis}ms")]
    DateOutOfRange { millis: i64 },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV writing error: {0}")]
    Csv(#[from] csv::Error),
}

impl GeneratorError {
    /// True for errors caused by the command line rather than the environment.
    pub fn is_usage_error(&self) -> bool {
        !matches!(
            self,
            GeneratorError::Io(_) | GeneratorError::Csv(_) | GeneratorError::DateOutOfRange { .. }
        )
    }
}

pub type GeneratorResult<T> = std::result::Result<T, GeneratorError>;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataType {
    Number,
    String,
    Date,
}

impl FromStr for DataType {
    type Err = GeneratorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let deserializer: serde::de::value::StrDeserializer<'_, serde::de::value::Error> =
            s.into_deserializer();
        DataType::deserialize(deserializer).map_err(|_| GeneratorError::InvalidDataTypes {
            value: s.to_string(),
        })
    }
}

pub fn usage() -> &'static str {
    "\n\
CSV Generator usage:\n\
Required:\n\
-h specify headers ie foo bar baz\n\
-d specify data types corresponding to header valid types: number string date\n\
-rc specify row count i.e 100000\n\
\n\
Optional:\n\
-n file name, csv is suffixed by programme if not specified a uuid will be assigned\n\
-s seed for the random generator, makes a run reproducible\n"
}

/// Parses `args` (without the program name), validates them and writes the
/// generated file into `out_dir`. Returns the path that was written.
pub fn run<S: AsRef<str>>(args: &[S], out_dir: &Path) -> GeneratorResult<PathBuf> {
    let command_map = CommandMap::parse(args);
    let command = Command::from_map(&command_map)?;

    let mut rng = match command.seed {
        Some(seed) => {
            debug!(seed, "seeding generator");
            StdRng::seed_from_u64(seed)
        }
        None => StdRng::from_entropy(),
    };

    let base_name = match &command.file_name {
        Some(name) => name.clone(),
        None => random_uuid(&mut rng),
    };
    let path = out_dir.join(format!("{base_name}.{CSV_EXTENSION}"));

    info!(
        path = %path.display(),
        columns = command.headers.len(),
        rows = command.row_count,
        "generating csv"
    );
    write_csv_file(
        &path,
        &command.headers,
        &command.data_types,
        command.row_count,
        &mut rng,
    )?;

    Ok(path)
}
