use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::PathBuf;
use std::vec;

use chrono::{NaiveDate, NaiveTime};
use csv::{ByteRecord, ReaderBuilder, Terminator};
use tracing::debug;

use crate::models::{Origin, ParseError, RawRecord};
use crate::source::{ReadError, FIELD_DELIMITER, FIELD_NAMES};

const DATE_FORMAT: &str = "%Y-%m-%d";
const TIME_FORMAT: &str = "%H:%M:%S";
const HEADER_LINE: u64 = 1;

/// Lazily reads a list of files as one continuous stream of records.
///
/// Files are opened one at a time, in the order given, when the previous one
/// is exhausted. The first physical line of every file is a header and is
/// skipped whatever it contains. Every other line, blank ones included, is
/// either a record or a [`ReadError::Parse`], after which reading carries on
/// with the next line. A file that cannot be opened or read yields
/// [`ReadError::Io`] and reading moves on to the next file.
pub struct RecordReader {
    pending: vec::IntoIter<PathBuf>,
    current: Option<OpenFile>,
    splitter: ReaderBuilder
}

struct OpenFile {
    path: PathBuf,
    lines: BufReader<File>,
    line: u64,
    buffer: Vec<u8>
}

impl OpenFile {
    /// Reads the next physical line into the buffer without its terminator
    /// and returns its 1-based number, or `None` at end of file.
    fn next_line(&mut self) -> io::Result<Option<u64>> {
        self.buffer.clear();

        if self.lines.read_until(b'\n', &mut self.buffer)? == 0 {
            return Ok(None)
        }

        if self.buffer.last() == Some(&b'\n') {
            self.buffer.pop();

            if self.buffer.last() == Some(&b'\r') {
                self.buffer.pop();
            }
        }

        self.line += 1;

        Ok(Some(self.line))
    }
}

impl RecordReader {
    pub fn new(files: Vec<PathBuf>) -> Self {
        let mut splitter = ReaderBuilder::new();

        splitter
            .delimiter(FIELD_DELIMITER)
            .has_headers(false)
            .terminator(Terminator::Any(b'\n'))
            .flexible(true)
            .quoting(false);

        Self {
            pending: files.into_iter(),
            current: None,
            splitter
        }
    }

    fn open(path: PathBuf) -> Result<OpenFile, ReadError> {
        let file = File::open(&path).map_err(|error| ReadError::io(&path, error))?;

        debug!("Reading transactions from [{}]", path.display());

        Ok(OpenFile {
            path,
            lines: BufReader::new(file),
            line: 0,
            buffer: Vec::new()
        })
    }
}

impl Iterator for RecordReader {
    type Item = Result<RawRecord, ReadError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if self.current.is_none() {
                let path = self.pending.next()?;

                match Self::open(path) {
                    Ok(file) => self.current = Some(file),
                    Err(error) => return Some(Err(error))
                }
            }

            let file = self.current.as_mut()?;

            match file.next_line() {
                Ok(Some(HEADER_LINE)) => continue,
                Ok(Some(line)) => {
                    let origin = Origin::new(&file.path, line);
                    return Some(parse_line(&self.splitter, origin, &file.buffer).map_err(ReadError::from))
                }
                Ok(None) => {
                    debug!("Finished reading [{}]", file.path.display());
                    self.current = None;
                }
                Err(error) => {
                    let failure = ReadError::io(&file.path, error);
                    self.current = None;
                    return Some(Err(failure))
                }
            }
        }
    }
}

fn split_fields(splitter: &ReaderBuilder, line: &[u8]) -> csv::Result<ByteRecord> {
    let mut record = ByteRecord::new();
    splitter.from_reader(line).read_byte_record(&mut record)?;

    Ok(record)
}

fn parse_line(splitter: &ReaderBuilder, origin: Origin, line: &[u8]) -> Result<RawRecord, ParseError> {
    let record = split_fields(splitter, line)
        .map_err(|error| ParseError::malformed(origin.clone(), error.to_string()))?;

    //NOTE: A blank line still holds one (empty) field
    let found = record.len().max(1);

    if found != FIELD_NAMES.len() {
        return Err(ParseError::field_count(origin, found, FIELD_NAMES.len()))
    }

    let fields = record.iter()
        .map(std::str::from_utf8)
        .collect::<Result<Vec<&str>, _>>()
        .map_err(|error| ParseError::malformed(origin.clone(), error.to_string()))?;

    let trx_date = NaiveDate::parse_from_str(fields[3], DATE_FORMAT)
        .map_err(|_| ParseError::invalid_date(origin.clone(), fields[3]))?;

    let trx_time = NaiveTime::parse_from_str(fields[4], TIME_FORMAT)
        .map_err(|_| ParseError::invalid_time(origin.clone(), fields[4]))?;

    Ok(RawRecord {
        origin,
        account_number: fields[0].to_string(),
        trx_amount: fields[1].to_string(),
        description: Some(fields[2]).filter(|value| !value.is_empty()).map(str::to_string),
        trx_date,
        trx_time,
        customer_id: fields[5].to_string(),
        version: None
    })
}
