use std::{fs, io, path};

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::value::Value as JsonValue;

use crate::error::StoreError;
use crate::report::{LogReporter, Reporter};

const RECORD_EXT: &str = "json";
const TABLE_EXT: &str = "csv";

/// A flat record: one CSV row as an ordered column-to-value mapping.
pub type Row = serde_json::Map<String, JsonValue>;

/// A directory-rooted store for JSON records and CSV row sets.
///
/// Each logical name maps to a single file directly under the root
/// (`<root>/<name>.json` or `<root>/<name>.csv`). Every operation opens and
/// closes its own file handle; repeated writes to the same name overwrite
/// with last-writer-wins semantics and no locking.
///
/// Recoverable outcomes (missing file, malformed content, non-serializable
/// value, empty input) are converted to `bool`/`Option` results and narrated
/// through the store's [`Reporter`]; callers never need to catch anything.
pub struct DataStore {
    root: path::PathBuf,
    reporter: Box<dyn Reporter>,
}

impl DataStore {
    /// Open a store rooted at `root`, creating the directory if missing.
    ///
    /// Creation is idempotent; an already-existing directory is fine. Any
    /// other failure (permissions, root path occupied by a file) is fatal to
    /// construction and propagates as [`StoreError::RootPathInvalid`].
    pub fn open(root: impl Into<path::PathBuf>) -> Result<DataStore, StoreError> {
        Self::open_with_reporter(root, Box::new(LogReporter))
    }

    /// Open a store that reports diagnostics through `reporter` instead of
    /// the `log` facade.
    pub fn open_with_reporter(
        root: impl Into<path::PathBuf>,
        reporter: Box<dyn Reporter>,
    ) -> Result<DataStore, StoreError> {
        let root = root.into();
        fs::create_dir_all(&root).map_err(|source| StoreError::RootPathInvalid {
            path: root.clone(),
            source,
        })?;

        reporter.info(&format!("DataStore opened at {}", root.display()));
        Ok(DataStore { root, reporter })
    }

    pub fn root(&self) -> &path::Path {
        &self.root
    }

    fn file_path(&self, name: &str, extension: &str) -> path::PathBuf {
        self.root.join(format!("{}.{}", name, extension))
    }

    /// Write `record` as pretty-printed JSON to `<root>/<name>.json`.
    ///
    /// Overwrites any prior file of that name. Returns `false` (with an
    /// error-level diagnostic) if the record cannot be represented as JSON;
    /// serialization happens before the file is touched, so a failed write
    /// leaves any prior file for `name` intact.
    pub fn write_record<T: Serialize>(&self, record: &T, name: &str) -> bool {
        match self.try_write_record(record, name) {
            Ok(file_path) => {
                self.reporter
                    .info(&format!("Record saved to {}", file_path.display()));
                true
            }
            Err(error) => {
                self.reporter
                    .error(&format!("Error saving record \"{}\": {}", name, error));
                false
            }
        }
    }

    fn try_write_record<T: Serialize>(
        &self,
        record: &T,
        name: &str,
    ) -> Result<path::PathBuf, StoreError> {
        use io::Write;

        let text = serde_json::to_string_pretty(record)?;

        let file_path = self.file_path(name, RECORD_EXT);
        let mut file = fs::File::create(&file_path)?;
        file.write_all(text.as_bytes())?;
        file.write_all(b"\n")?;

        Ok(file_path)
    }

    /// Read the JSON record stored under `name`.
    ///
    /// Missing file yields `None` with a warning diagnostic; a present but
    /// malformed file yields `None` with an error diagnostic. On success the
    /// decoded value is structurally equal to what was written.
    pub fn read_record(&self, name: &str) -> Option<JsonValue> {
        let file_path = self.file_path(name, RECORD_EXT);
        match self.try_read_record(&file_path) {
            Ok(value) => {
                self.reporter
                    .info(&format!("Record loaded from {}", file_path.display()));
                Some(value)
            }
            Err(error) => {
                self.report_read_failure(&file_path, &error);
                None
            }
        }
    }

    /// Read the record stored under `name`, decoded into `T`.
    ///
    /// A record that does not match `T`'s shape counts as malformed: `None`
    /// plus an error diagnostic.
    pub fn read_record_as<T: DeserializeOwned>(&self, name: &str) -> Option<T> {
        let value = self.read_record(name)?;
        match serde_json::from_value(value) {
            Ok(record) => Some(record),
            Err(error) => {
                self.reporter
                    .error(&format!("Error decoding record \"{}\": {}", name, error));
                None
            }
        }
    }

    fn try_read_record(&self, file_path: &path::Path) -> Result<JsonValue, StoreError> {
        let file = fs::File::open(file_path)?;
        let reader = io::BufReader::new(file);
        let value = serde_json::from_reader(reader)?;
        Ok(value)
    }

    /// Write `rows` as a CSV file at `<root>/<name>.csv`.
    ///
    /// The header comes from the first row's keys in their insertion order;
    /// every row must carry all header columns (extra keys are ignored — the
    /// shared key set is a caller contract). An empty `rows` returns `false`
    /// with a warning and creates no file; a row missing a header column
    /// returns `false` with an error, also without touching the filesystem.
    pub fn write_rows(&self, rows: &[Row], name: &str) -> bool {
        if rows.is_empty() {
            self.reporter.warn("No rows to save");
            return false;
        }

        match self.try_write_rows(rows, name) {
            Ok(file_path) => {
                self.reporter
                    .info(&format!("CSV data saved to {}", file_path.display()));
                true
            }
            Err(error) => {
                self.reporter
                    .error(&format!("Error saving CSV \"{}\": {}", name, error));
                false
            }
        }
    }

    fn try_write_rows(&self, rows: &[Row], name: &str) -> Result<path::PathBuf, StoreError> {
        let header: Vec<&String> = rows[0].keys().collect();

        // Render every row up front so a schema violation in row N doesn't
        // leave a truncated file behind.
        let mut rendered: Vec<Vec<String>> = Vec::with_capacity(rows.len());
        for (index, row) in rows.iter().enumerate() {
            let mut fields = Vec::with_capacity(header.len());
            for column in &header {
                let value = row
                    .get(column.as_str())
                    .ok_or_else(|| StoreError::MissingColumn {
                        index,
                        column: (*column).clone(),
                    })?;
                fields.push(field_text(value));
            }
            rendered.push(fields);
        }

        let file_path = self.file_path(name, TABLE_EXT);
        let mut writer = csv::Writer::from_path(&file_path)?;
        writer.write_record(&header)?;
        for fields in &rendered {
            writer.write_record(fields)?;
        }
        writer.flush()?;

        Ok(file_path)
    }

    /// Read the CSV file stored under `name`.
    ///
    /// The flat encoding is not type-preserving: every field comes back as a
    /// `Value::String`, whatever was written in. Missing file yields `None`
    /// with a warning; any other read failure yields `None` with an error.
    pub fn read_rows(&self, name: &str) -> Option<Vec<Row>> {
        let file_path = self.file_path(name, TABLE_EXT);
        match self.try_read_rows(&file_path) {
            Ok(rows) => {
                self.reporter
                    .info(&format!("CSV data loaded from {}", file_path.display()));
                Some(rows)
            }
            Err(error) => {
                self.report_read_failure(&file_path, &error);
                None
            }
        }
    }

    fn try_read_rows(&self, file_path: &path::Path) -> Result<Vec<Row>, StoreError> {
        let file = fs::File::open(file_path)?;
        let mut reader = csv::Reader::from_reader(io::BufReader::new(file));

        let header = reader.headers()?.clone();
        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record?;
            let mut row = Row::new();
            for (column, field) in header.iter().zip(record.iter()) {
                row.insert(column.to_string(), JsonValue::String(field.to_string()));
            }
            rows.push(row);
        }

        Ok(rows)
    }

    fn report_read_failure(&self, file_path: &path::Path, error: &StoreError) {
        if let StoreError::Io(io_error) = error {
            if io_error.kind() == io::ErrorKind::NotFound {
                self.reporter
                    .warn(&format!("File not found: {}", file_path.display()));
                return;
            }
        }
        self.reporter
            .error(&format!("Error reading {}: {}", file_path.display(), error));
    }
}

/// CSV rendering of a scalar JSON value. Strings are written bare (the csv
/// writer adds quoting where needed); null becomes the empty field.
fn field_text(value: &JsonValue) -> String {
    match value {
        JsonValue::String(text) => text.clone(),
        JsonValue::Null => String::new(),
        other => other.to_string(),
    }
}
