use std::fmt;
use std::io::{Read, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::allocator::IdAllocator;
use super::application::{Application, ApplicationRecord};
use super::position::Position;

const POSITION_MARKER: char = '#';
const APPLICATION_MARKER: char = '*';

#[derive(Debug)]
pub enum RecordError {
    Io(std::io::Error),
    Csv(csv::Error),
}

impl fmt::Display for RecordError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordError::Io(err) => write!(f, "failed to access positions file: {}", err),
            RecordError::Csv(err) => write!(f, "invalid position record: {}", err),
        }
    }
}

impl std::error::Error for RecordError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RecordError::Io(err) => Some(err),
            RecordError::Csv(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for RecordError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for RecordError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct PositionRow {
    name: String,
    hours_per_week: u32,
    pay_rate: u32,
}

/// Loads positions and their applications from the `#`/`*` record format.
pub struct PositionReader;

impl PositionReader {
    pub fn from_path<P: AsRef<Path>>(
        path: P,
        allocator: &mut IdAllocator,
    ) -> Result<Vec<Position>, RecordError> {
        let path = path.as_ref();
        let file = std::fs::File::open(path)?;
        let positions = Self::from_reader(file, allocator)?;
        info!(path = %path.display(), positions = positions.len(), "loaded positions file");
        Ok(positions)
    }

    pub fn from_reader<R: Read>(
        mut reader: R,
        allocator: &mut IdAllocator,
    ) -> Result<Vec<Position>, RecordError> {
        let mut contents = String::new();
        reader.read_to_string(&mut contents)?;
        Ok(parse_positions(&contents, allocator))
    }
}

/// Parse every well-formed position block. Malformed positions and applications are skipped,
/// as are positions left without any application.
pub fn parse_positions(contents: &str, allocator: &mut IdAllocator) -> Vec<Position> {
    if !contents.starts_with(POSITION_MARKER) {
        return Vec::new();
    }

    let mut positions = Vec::new();
    let mut current: Option<Position> = None;
    let mut skipping = false;

    for (index, line) in contents.lines().enumerate() {
        let line_number = index + 1;
        let line = line.trim();

        if let Some(header) = line.strip_prefix(POSITION_MARKER) {
            positions.extend(current.take().filter(|position| !position.is_empty()));
            match parse_position_header(header) {
                Ok(position) => {
                    current = Some(position);
                    skipping = false;
                }
                Err(reason) => {
                    warn!(line = line_number, %reason, "skipping malformed position");
                    skipping = true;
                }
            }
        } else if let Some(fields) = line.strip_prefix(APPLICATION_MARKER) {
            if skipping {
                continue;
            }
            let Some(position) = current.as_mut() else {
                continue;
            };
            let added = parse_application(fields, allocator).and_then(|application| {
                position
                    .add_application(application)
                    .map_err(|err| err.to_string())
            });
            if let Err(reason) = added {
                warn!(
                    line = line_number,
                    position = position.name(),
                    %reason,
                    "skipping malformed application"
                );
            }
        } else if !line.is_empty() {
            warn!(line = line_number, "ignoring unrecognized line");
        }
    }

    positions.extend(current.filter(|position| !position.is_empty()));
    positions
}

fn parse_position_header(header: &str) -> Result<Position, String> {
    let row: PositionRow = read_row(header).map_err(|err| err.to_string())?;
    Position::new(row.name, row.hours_per_week, row.pay_rate).map_err(|err| err.to_string())
}

fn parse_application(fields: &str, allocator: &mut IdAllocator) -> Result<Application, String> {
    let record: ApplicationRecord = read_row(fields).map_err(|err| err.to_string())?;
    Application::from_record(allocator, &record).map_err(|err| err.to_string())
}

fn read_row<T: for<'de> Deserialize<'de>>(line: &str) -> Result<T, csv::Error> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(line.as_bytes());

    match reader.deserialize::<T>().next() {
        Some(row) => row,
        None => Err(csv::Error::from(std::io::Error::new(
            std::io::ErrorKind::UnexpectedEof,
            "empty record",
        ))),
    }
}

/// Writes positions back in the same record format [`PositionReader`] accepts.
pub struct PositionWriter;

impl PositionWriter {
    pub fn to_path<P: AsRef<Path>>(path: P, positions: &[Position]) -> Result<(), RecordError> {
        let path = path.as_ref();
        let rendered = Self::render(positions)?;
        std::fs::write(path, rendered)?;
        info!(path = %path.display(), positions = positions.len(), "saved positions file");
        Ok(())
    }

    pub fn to_writer<W: Write>(mut writer: W, positions: &[Position]) -> Result<(), RecordError> {
        writer.write_all(Self::render(positions)?.as_bytes())?;
        writer.flush()?;
        Ok(())
    }

    /// Render positions; a position without applications renders as nothing.
    pub fn render(positions: &[Position]) -> Result<String, RecordError> {
        let mut output = String::new();
        for position in positions.iter().filter(|position| !position.is_empty()) {
            let header = write_row(&PositionRow {
                name: position.name().to_string(),
                hours_per_week: position.hours_per_week(),
                pay_rate: position.pay_rate(),
            })?;
            output.push_str(&format!("{POSITION_MARKER} {header}\n"));

            for application in position.applications() {
                let fields = write_row(&application.record())?;
                output.push_str(&format!("{APPLICATION_MARKER} {fields}\n"));
            }
        }
        Ok(output)
    }
}

fn write_row<T: Serialize>(row: &T) -> Result<String, RecordError> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new());
    writer.serialize(row)?;
    let bytes = writer
        .into_inner()
        .map_err(|err| RecordError::Io(err.into_error()))?;
    let line = String::from_utf8(bytes).map_err(|err| {
        RecordError::Io(std::io::Error::new(std::io::ErrorKind::InvalidData, err))
    })?;
    Ok(line.trim_end_matches('\n').to_string())
}
