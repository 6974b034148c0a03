//! Csv Executor
//!
//! Whole-document write & read of one record type.

use std::borrow::Cow;
use std::fs::File;
use std::io::{BufRead, BufReader, Cursor, Write};
use std::marker::PhantomData;
use std::path::PathBuf;

use tracing::{debug, warn};

use crate::de::{header_validate, record_deserialize};
use crate::se::{header_serialize, record_serialize};
use crate::util::is_blank;
use crate::{CsvConfig, CsvError, CsvRecord, CsvResult, TypeSchema};

/// Where a document is read from.
#[derive(Debug)]
pub enum CsvSource<'a> {
    Text(&'a str),
    Path(PathBuf),
    File(File),
    Bytes(Cursor<Vec<u8>>),
}

/// Outcome of a read: decoded records plus one message per failed line.
///
/// Both can be non-empty at the same time.
#[derive(Debug, Clone, PartialEq)]
pub struct CsvReadResult<T> {
    pub records: Vec<T>,
    pub errors: Vec<String>,
}

impl<T> Default for CsvReadResult<T> {
    fn default() -> Self {
        Self {
            records: Vec::new(),
            errors: Vec::new(),
        }
    }
}

impl<T> CsvReadResult<T> {
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}

/// Csv executor bound to the record type `T`.
///
/// The schema of `T` is built and validated once, at construction.
#[derive(Debug)]
pub struct CsvExecutor<T: CsvRecord> {
    pub(crate) config: CsvConfig,
    pub(crate) schema: TypeSchema,
    _record: PhantomData<fn() -> T>,
}

impl<T: CsvRecord> CsvExecutor<T> {
    /// Fails with a configuration error if `T` has no mapped field or duplicated indices.
    pub fn new() -> CsvResult<Self> {
        Self::new_with_config(CsvConfig::default())
    }

    pub fn new_with_config(config: CsvConfig) -> CsvResult<Self> {
        let schema = TypeSchema::build::<T>()?;

        Ok(Self {
            config,
            schema,
            _record: PhantomData,
        })
    }

    pub fn config(&self) -> &CsvConfig {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut CsvConfig {
        &mut self.config
    }

    pub fn set_config(&mut self, config: CsvConfig) -> &mut Self {
        self.config = config;
        self
    }

    pub fn schema(&self) -> &TypeSchema {
        &self.schema
    }

    /// records -> csv document
    pub fn write<'a, I>(&self, records: I) -> CsvResult<String>
    where
        I: IntoIterator<Item = &'a T>,
        T: 'a,
    {
        let mut buf = String::new();

        if self.config.has_header_record {
            header_serialize(&mut buf, &self.schema, &self.config);
        }

        let mut count = 0;
        for record in records {
            record_serialize(&mut buf, record, &self.schema, &self.config)?;
            count += 1;
        }

        debug!(
            type_name = self.schema.type_name(),
            records = count,
            "csv document written"
        );

        Ok(buf)
    }

    /// records -> csv document -> `writer`
    pub fn write_to<'a, I, W>(&self, records: I, mut writer: W) -> CsvResult<()>
    where
        I: IntoIterator<Item = &'a T>,
        T: 'a,
        W: Write,
    {
        let doc = self.write(records)?;
        writer.write_all(doc.as_bytes())?;
        writer.flush()?;
        Ok(())
    }

    /// Blank content is an invalid argument.
    pub fn read_str(&self, content: &str) -> CsvResult<CsvReadResult<T>> {
        self.read_lines(content.as_bytes())
    }

    /// A stream holding nothing but whitespace is an invalid argument, as for `read_str`.
    pub fn read<R: BufRead>(&self, reader: R) -> CsvResult<CsvReadResult<T>> {
        self.read_lines(reader)
    }

    pub fn read_source(&self, source: CsvSource<'_>) -> CsvResult<CsvReadResult<T>> {
        match source {
            CsvSource::Text(s) => self.read_str(s),
            CsvSource::Path(path) => self.read(BufReader::new(File::open(path)?)),
            CsvSource::File(file) => self.read(BufReader::new(file)),
            CsvSource::Bytes(bytes) => self.read(bytes),
        }
    }

    /// Line by line: line 1 may be a header, every other line is a record.
    ///
    /// A failing line is recorded in `errors` and skipped; only I/O faults abort.
    /// Bytes that are not UTF-8 are decoded as `U+FFFD`.
    fn read_lines<R: BufRead>(&self, mut reader: R) -> CsvResult<CsvReadResult<T>> {
        let mut result = CsvReadResult::default();
        // leading whitespace-only lines, held until some content shows up
        let mut leading = Vec::new();
        let mut blank = true;
        let mut buf = Vec::new();
        let mut line_number = 0;

        loop {
            buf.clear();
            if reader.read_until(b'\n', &mut buf)? == 0 {
                break;
            }
            line_number += 1;

            if buf.ends_with(b"\n") {
                buf.pop();
                if buf.ends_with(b"\r") {
                    buf.pop();
                }
            }

            let line = String::from_utf8_lossy(&buf);
            if matches!(line, Cow::Owned(_)) {
                warn!(line_number, "csv line is not valid UTF-8");
            }

            if blank && is_blank(&line) {
                leading.push((line_number, line.into_owned()));
                continue;
            }
            if blank {
                blank = false;
                for (n, l) in leading.drain(..) {
                    self.read_line(n, &l, &mut result);
                }
            }
            self.read_line(line_number, &line, &mut result);
        }

        if blank {
            return Err(CsvError::InvalidArgument("csv content is empty"));
        }

        debug!(
            type_name = self.schema.type_name(),
            records = result.records.len(),
            errors = result.errors.len(),
            "csv document read"
        );

        Ok(result)
    }

    fn read_line(&self, line_number: usize, line: &str, result: &mut CsvReadResult<T>) {
        let config = &self.config;
        let cells = line.split(config.delimiter).collect::<Vec<_>>();

        if line_number == 1 && config.has_header_record {
            if config.validate_header && !header_validate(&cells, &self.schema, config) {
                let e = CsvError::HeaderValidation(cells[0].to_owned());
                warn!(line_number, error = %e, "csv header rejected");
                result.errors.push(e.line_message(line_number));
            }
            return;
        }

        match record_deserialize::<T>(line_number, &cells, &self.schema, config) {
            Ok(decoded) => {
                for e in decoded.field_errors {
                    warn!(line_number, error = %e, "csv field skipped");
                    result.errors.push(e.line_message(line_number));
                }
                result.records.push(decoded.record);
            }
            Err(e) => {
                warn!(line_number, error = %e, "csv line skipped");
                result.errors.push(e.line_message(line_number));
            }
        }
    }
}
