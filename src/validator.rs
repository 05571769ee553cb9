use crate::{
    command_map::CommandMap, DataType, GeneratorError, GeneratorResult, DATA_TYPES_FLAG,
    FILE_NAME_FLAG, HEADERS_FLAG, REQUIRED_FLAGS, ROW_COUNT_FLAG, SEED_FLAG,
};

/// A fully validated invocation. Nothing is written until one of these exists.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Command {
    pub headers: Vec<String>,
    pub data_types: Vec<DataType>,
    pub row_count: u64,
    pub file_name: Option<String>,
    pub seed: Option<u64>,
}

impl Command {
    pub fn from_map(map: &CommandMap) -> GeneratorResult<Self> {
        let missing = missing_flags(map);
        if !missing.is_empty() {
            return Err(GeneratorError::MissingArguments { flags: missing });
        }

        // Presence was checked above
        let headers = map.get(HEADERS_FLAG).unwrap_or_default().to_vec();
        let raw_types = map.get(DATA_TYPES_FLAG).unwrap_or_default();

        let row_count = parse_row_count(map)?;
        let data_types = validate_types(raw_types)?;

        if headers.is_empty() {
            return Err(GeneratorError::EmptyHeaders);
        }
        if headers.len() != data_types.len() {
            return Err(GeneratorError::ColumnMismatch {
                headers: headers.len(),
                data_types: data_types.len(),
            });
        }

        let file_name = optional_value(map, FILE_NAME_FLAG)?.map(str::to_string);
        let seed = optional_value(map, SEED_FLAG)?
            .map(|value| {
                value.parse::<u64>().map_err(|_| GeneratorError::InvalidSeed {
                    value: value.to_string(),
                })
            })
            .transpose()?;

        Ok(Self {
            headers,
            data_types,
            row_count,
            file_name,
            seed,
        })
    }
}

/// Required flags absent from the map, in declaration order.
pub fn missing_flags(map: &CommandMap) -> Vec<&'static str> {
    REQUIRED_FLAGS
        .iter()
        .copied()
        .filter(|flag| !map.contains(flag))
        .collect()
}

/// Checks every token against the type vocabulary. Fails on the first
/// unknown token.
pub fn validate_types<S: AsRef<str>>(data_types: &[S]) -> GeneratorResult<Vec<DataType>> {
    data_types.iter().map(|t| t.as_ref().parse()).collect()
}

fn parse_row_count(map: &CommandMap) -> GeneratorResult<u64> {
    let value = map
        .get(ROW_COUNT_FLAG)
        .and_then(|values| values.first())
        .ok_or(GeneratorError::MissingValue {
            flag: ROW_COUNT_FLAG,
        })?;

    value
        .parse::<u64>()
        .map_err(|_| GeneratorError::InvalidRowCount {
            value: value.clone(),
        })
}

/// First value of an optional flag. A flag given without a value is an error.
fn optional_value<'a>(map: &'a CommandMap, flag: &'static str) -> GeneratorResult<Option<&'a str>> {
    match map.get(flag) {
        None => Ok(None),
        Some(values) => values
            .first()
            .map(|v| Some(v.as_str()))
            .ok_or(GeneratorError::MissingValue { flag }),
    }
}
