use std::fs::File;
use std::io::{BufRead, BufReader, Lines};
use std::path::Path;

use arcstr::ArcStr;
use tracing::trace;

use crate::{GeoError, GeoPoint, Result};

const DELIMITER: &str = "\",\"";

/// A single named coordinate read from the dataset.
#[derive(Clone, Debug, PartialEq)]
pub struct Record {
    pub name: ArcStr,
    pub location: GeoPoint,
}

/// Parses one line of the dataset.
///
/// Lines that carry no data (empty lines, lines with a NUL byte, and lines
/// not starting with a quote such as the header) yield `Ok(None)`. A quoted
/// line that does not consist of a name and two numbers is an error.
pub fn parse_line(line: &str) -> Result<Option<Record>> {
    if line.is_empty() || line.contains('\0') {
        return Ok(None);
    }

    let Some(body) = line.strip_prefix('"') else {
        return Ok(None);
    };

    let body = body.strip_suffix('"').unwrap_or(body);

    let fault = || GeoError::DataParsing { line: line.to_owned() };

    let mut fields = body.split(DELIMITER);
    let (Some(name), Some(latitude), Some(longitude), None) =
        (fields.next(), fields.next(), fields.next(), fields.next())
    else {
        return Err(fault());
    };

    let latitude = parse_coordinate(latitude).ok_or_else(fault)?;
    let longitude = parse_coordinate(longitude).ok_or_else(fault)?;

    Ok(Some(Record {
        name: ArcStr::from(name.trim_matches('"')),
        location: GeoPoint::new(latitude, longitude),
    }))
}

fn parse_coordinate(value: &str) -> Option<f64> {
    value.trim_matches('"').trim().parse().ok()
}

/// A single forward pass over the records of a dataset.
///
/// The iterator ends after the first error and drops the underlying reader.
pub struct Records<R> {
    resource: String,
    lines: Option<Lines<R>>,
}

impl Records<BufReader<File>> {
    /// Opens the dataset at the given path for reading.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let resource = path.display().to_string();

        let file = File::open(path).map_err(|err| GeoError::access(&resource, err))?;

        Ok(Self::new(BufReader::new(file), resource))
    }
}

impl<R: BufRead> Records<R> {
    pub fn new(reader: R, resource: impl Into<String>) -> Self {
        Self {
            resource: resource.into(),
            lines: Some(reader.lines()),
        }
    }

    fn fail(&mut self, err: GeoError) -> Option<Result<Record>> {
        self.lines = None;
        Some(Err(err))
    }
}

impl<R: BufRead> Iterator for Records<R> {
    type Item = Result<Record>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let line = match self.lines.as_mut()?.next() {
                Some(Ok(line)) => line,
                Some(Err(err)) => {
                    let err = GeoError::access(&self.resource, err);
                    return self.fail(err);
                }
                None => {
                    self.lines = None;
                    return None;
                }
            };

            match parse_line(&line) {
                Ok(Some(record)) => return Some(Ok(record)),
                Ok(None) => trace!("Skipping non-data line {:?}", line),
                Err(err) => return self.fail(err),
            }
        }
    }
}
