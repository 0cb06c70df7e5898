use crate::domain::model::{value_kind, Mapping};
use crate::utils::error::{RecordError, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::Value;
use std::fs;
use std::path::Path;

/// Hook applied to a record's mapping right before it is written as JSON text.
///
/// Every field of the records in this crate is already a JSON primitive, so
/// [`PlainEncoder`] is enough for them; callers with richer conventions
/// (redaction, value normalization) plug in their own implementation.
pub trait JsonEncoder {
    fn encode(&self, value: Value) -> Result<Value>;
}

/// Passes values through untouched.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainEncoder;

impl JsonEncoder for PlainEncoder {
    fn encode(&self, value: Value) -> Result<Value> {
        Ok(value)
    }
}

/// Mapping, JSON and file round-trips shared by every record.
///
/// Implementors derive `Deserialize` with `#[serde(default, deny_unknown_fields)]`
/// so that absent fields fall back to the defaults and unknown ones are rejected.
pub trait JsonRecord: Serialize + DeserializeOwned + Sized {
    /// Name used in error messages.
    const RECORD_NAME: &'static str;

    fn to_mapping(&self) -> Mapping;

    /// Checked before any JSON text is produced; records with values JSON
    /// cannot carry reject them here.
    fn ensure_encodable(&self) -> Result<()> {
        Ok(())
    }

    /// Builds the record from a mapping; absent fields take their defaults.
    fn from_mapping(fields: Mapping) -> Result<Self> {
        serde_json::from_value(Value::Object(fields)).map_err(|e| RecordError::SchemaError {
            record: Self::RECORD_NAME,
            message: e.to_string(),
        })
    }

    /// Parses JSON text that must hold a single object.
    fn from_json(json: &str) -> Result<Self> {
        match serde_json::from_str::<Value>(json)? {
            Value::Object(fields) => Self::from_mapping(fields),
            other => Err(RecordError::SchemaError {
                record: Self::RECORD_NAME,
                message: format!("expected a JSON object, found {}", value_kind(&other)),
            }),
        }
    }

    /// Compact output has no whitespace at all; pretty output indents by four spaces.
    fn to_json(&self, compact: bool) -> Result<String> {
        self.to_json_with(compact, &PlainEncoder)
    }

    /// Like [`JsonRecord::to_json`], passing the mapping through `encoder` first.
    fn to_json_with(&self, compact: bool, encoder: &dyn JsonEncoder) -> Result<String> {
        self.ensure_encodable()?;
        let value = encoder.encode(Value::Object(self.to_mapping()))?;

        if compact {
            return Ok(serde_json::to_string(&value)?);
        }

        let mut buf = Vec::new();
        let mut serializer =
            serde_json::Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(b"    "));
        value.serialize(&mut serializer)?;
        Ok(String::from_utf8_lossy(&buf).into_owned())
    }

    /// Reads and parses a JSON file written by [`JsonRecord::to_file`].
    fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        tracing::debug!("Loading {} from {}", Self::RECORD_NAME, path.display());

        let content = fs::read_to_string(path).map_err(|e| RecordError::from_io(path, e))?;
        Self::from_json(&content)
    }

    /// Writes the pretty JSON form, replacing any existing file. Nothing is
    /// created when the record cannot be encoded.
    ///
    /// The parent directory and its own parent are created when missing; deeper
    /// missing ancestors are an error.
    fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let json = self.to_json(false)?;

        if let Some(parent) = non_empty_parent(path) {
            if let Some(grandparent) = non_empty_parent(parent) {
                ensure_dir(grandparent)?;
            }
            ensure_dir(parent)?;
        }

        fs::write(path, json).map_err(|source| RecordError::IoError {
            path: path.to_path_buf(),
            source,
        })?;

        tracing::debug!("Saved {} to {}", Self::RECORD_NAME, path.display());
        Ok(())
    }
}

fn non_empty_parent(path: &Path) -> Option<&Path> {
    path.parent().filter(|p| !p.as_os_str().is_empty())
}

/// Creates a single directory level, never its ancestors.
fn ensure_dir(dir: &Path) -> Result<()> {
    if dir.is_dir() {
        return Ok(());
    }

    match fs::create_dir(dir) {
        Ok(()) => {
            tracing::debug!("Created directory {}", dir.display());
            Ok(())
        }
        Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists && dir.is_dir() => Ok(()),
        Err(source) => Err(RecordError::IoError {
            path: dir.to_path_buf(),
            source,
        }),
    }
}
