use std::{fs::File, io::Write, path::Path};

use csv::{Terminator, WriterBuilder};
use rand::Rng;
use tracing::debug;

use crate::{DataType, GeneratorResult};

use super::cell::generate_cell;

/// A CSV sink that writes a header record followed by generated rows.
pub struct CsvStreamWriter<W: Write> {
    pub writer: csv::Writer<W>,
}

impl<W: Write> CsvStreamWriter<W> {
    pub fn new(inner: W) -> Self {
        let writer = WriterBuilder::new()
            .has_headers(false)
            .terminator(Terminator::Any(b'\n'))
            .from_writer(inner);

        Self { writer }
    }

    /// Writes `headers` then `row_count` rows, column `k` generated as
    /// `data_types[k]`. Callers guarantee both slices have the same length.
    pub fn write_rows<R: Rng>(
        &mut self,
        headers: &[String],
        data_types: &[DataType],
        row_count: u64,
        rng: &mut R,
    ) -> GeneratorResult<()> {
        self.writer.write_record(headers)?;

        let mut record = Vec::with_capacity(data_types.len());
        for row in 1..=row_count {
            record.clear();
            for data_type in data_types {
                record.push(generate_cell(*data_type, row, rng)?);
            }
            self.writer.write_record(&record)?;
        }

        self.writer.flush()?;
        debug!(rows = row_count, "rows written");
        Ok(())
    }

    pub fn into_inner(self) -> GeneratorResult<W> {
        self.writer
            .into_inner()
            .map_err(|e| e.into_error().into())
    }
}

/// Creates or truncates `path` and writes the whole document to it.
pub fn write_csv_file<R: Rng>(
    path: &Path,
    headers: &[String],
    data_types: &[DataType],
    row_count: u64,
    rng: &mut R,
) -> GeneratorResult<()> {
    let file = File::create(path)?;
    let mut stream = CsvStreamWriter::new(file);
    stream.write_rows(headers, data_types, row_count, rng)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn render(headers: &[&str], data_types: &[DataType], row_count: u64, seed: u64) -> String {
        let headers: Vec<String> = headers.iter().map(|h| h.to_string()).collect();
        let mut rng = StdRng::seed_from_u64(seed);
        let mut stream = CsvStreamWriter::new(Vec::new());

        stream
            .write_rows(&headers, data_types, row_count, &mut rng)
            .unwrap();
        String::from_utf8(stream.into_inner().unwrap()).unwrap()
    }

    #[test]
    fn writes_header_and_numbered_rows() {
        let output = render(&["id", "n"], &[DataType::Number, DataType::Number], 3, 1);

        assert_eq!(output, "id,n\n1,1\n2,2\n3,3\n");
    }

    #[test]
    fn zero_rows_is_header_only() {
        let output = render(&["id", "when"], &[DataType::Number, DataType::Date], 0, 1);

        assert_eq!(output, "id,when\n");
    }

    #[test]
    fn mixed_columns_keep_header_order() {
        let output = render(
            &["name", "id", "when"],
            &[DataType::String, DataType::Number, DataType::Date],
            50,
            9,
        );
        let lines: Vec<&str> = output.lines().collect();

        assert_eq!(lines.len(), 51);
        assert_eq!(lines[0], "name,id,when");
        for (i, line) in lines[1..].iter().enumerate() {
            let fields: Vec<&str> = line.split(',').collect();
            assert_eq!(fields.len(), 3);
            assert_eq!(fields[0].len(), 36);
            assert_eq!(fields[1], (i + 1).to_string());
            assert_eq!(fields[2].len(), 10);
        }
        assert!(output.ends_with('\n') && !output.ends_with("\n\n"));
        assert!(!output.contains('\r'));
    }

    #[test]
    fn same_seed_same_document() {
        let types = [DataType::String, DataType::Date];

        assert_eq!(render(&["a", "b"], &types, 20, 3), render(&["a", "b"], &types, 20, 3));
    }

    #[test]
    fn write_to_missing_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("out.csv");
        let mut rng = StdRng::seed_from_u64(1);

        let err = write_csv_file(&path, &["a".to_string()], &[DataType::Number], 1, &mut rng)
            .unwrap_err();
        assert!(matches!(err, crate::GeneratorError::Io(_)));
    }
}
