use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use serde_json::{Number, Value};

/// Largest integer a JavaScript number holds exactly.
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

/// Whole-valued floats become integers so a line reads the way a browser's
/// `JSON.stringify` writes it (`1.0` and `1e2` as `1` and `100`).
pub(crate) fn with_js_numbers(value: &Value) -> Value {
    match value {
        Value::Number(number) => Value::Number(js_number(number)),
        Value::Array(items) => Value::Array(items.iter().map(with_js_numbers).collect()),
        Value::Object(entries) => Value::Object(
            entries
                .iter()
                .map(|(key, value)| (key.clone(), with_js_numbers(value)))
                .collect(),
        ),
        other => other.clone(),
    }
}

fn js_number(number: &Number) -> Number {
    match number.as_f64() {
        Some(float) if number.is_f64() && float.fract() == 0.0 && float.abs() <= MAX_SAFE_INTEGER => {
            Number::from(float as i64)
        }
        _ => number.clone(),
    }
}

/// Append-only store; every call adds exactly one record.
pub trait RecordStore: Send + Sync {
    fn append(&self, payload: &Value) -> Result<(), StoreError>;
    fn read_all(&self) -> Result<Vec<Value>, StoreError>;
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("record store unavailable: {0}")]
    Io(#[from] std::io::Error),
    #[error("record could not be encoded: {0}")]
    Encoding(#[from] serde_json::Error),
}

/// One compact JSON document per line.
#[derive(Debug)]
pub struct JsonlRecordStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonlRecordStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl RecordStore for JsonlRecordStore {
    fn append(&self, payload: &Value) -> Result<(), StoreError> {
        let mut line = serde_json::to_string(&with_js_numbers(payload))?;
        line.push('\n');

        let _guard = self.write_lock.lock().expect("record store mutex poisoned");
        if let Some(parent) = self.path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        file.write_all(line.as_bytes())?;
        Ok(())
    }

    fn read_all(&self) -> Result<Vec<Value>, StoreError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(err) => return Err(err.into()),
        };
        raw.lines()
            .filter(|line| !line.trim().is_empty())
            .map(|line| serde_json::from_str(line).map_err(StoreError::from))
            .collect()
    }
}

#[derive(Debug, Default)]
pub struct MemoryRecordStore {
    records: Mutex<Vec<Value>>,
}

impl RecordStore for MemoryRecordStore {
    fn append(&self, payload: &Value) -> Result<(), StoreError> {
        self.records
            .lock()
            .expect("record store mutex poisoned")
            .push(payload.clone());
        Ok(())
    }

    fn read_all(&self) -> Result<Vec<Value>, StoreError> {
        Ok(self.records.lock().expect("record store mutex poisoned").clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn appends_one_compact_line_per_record() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = JsonlRecordStore::new(dir.path().join("applications.jsonl"));

        store.append(&json!({ "a": 1 })).expect("first append");
        store.append(&json!({ "a": 1 })).expect("duplicate append");
        store
            .append(&json!({ "zeta": true, "alpha": [1, 2] }))
            .expect("third append");

        let raw = fs::read_to_string(store.path()).expect("file exists");
        assert_eq!(raw, "{\"a\":1}\n{\"a\":1}\n{\"zeta\":true,\"alpha\":[1,2]}\n");
        assert_eq!(store.read_all().expect("reads back").len(), 3);
    }

    #[test]
    fn whole_floats_are_written_like_javascript() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = JsonlRecordStore::new(dir.path().join("applications.jsonl"));
        let payload: Value =
            serde_json::from_str(r#"{"a":1.0,"b":1e2,"c":[2.50,{"d":-0.0}],"e":"1.0"}"#)
                .expect("payload parses");

        store.append(&payload).expect("append");

        let raw = fs::read_to_string(store.path()).expect("file exists");
        assert_eq!(raw, "{\"a\":1,\"b\":100,\"c\":[2.5,{\"d\":0}],\"e\":\"1.0\"}\n");
    }

    #[test]
    fn missing_file_reads_as_empty() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = JsonlRecordStore::new(dir.path().join("none.jsonl"));
        assert!(store.read_all().expect("reads").is_empty());
    }
}
