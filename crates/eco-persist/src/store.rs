//! Document storage.

use std::collections::HashMap;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use eco_core::EnvironmentalDataPoint;

use crate::error::PersistResult;

/// Durable key/document storage for environmental data points.
///
/// `put` is a synchronous call made from inside the bus handler; a slow
/// store directly throttles delivery for that handler, and a failed write
/// propagates out of it (fail-fast, no retry, no silent data loss).
pub trait DocumentStore: Send + Sync {
    fn put(&self, id: &str, point: &EnvironmentalDataPoint) -> PersistResult<()>;
}

/// Mutex-guarded in-memory store for tests and dry runs.
#[derive(Default)]
pub struct MemoryStore {
    documents: Mutex<HashMap<String, EnvironmentalDataPoint>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.documents.lock().expect("store mutex poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn get(&self, id: &str) -> Option<EnvironmentalDataPoint> {
        self.documents
            .lock()
            .expect("store mutex poisoned")
            .get(id)
            .cloned()
    }

    /// Every stored point, ordered by timestamp. Test support.
    pub fn points(&self) -> Vec<EnvironmentalDataPoint> {
        let mut points: Vec<_> = self
            .documents
            .lock()
            .expect("store mutex poisoned")
            .values()
            .cloned()
            .collect();
        points.sort_by(|a, b| a.timestamp.total_cmp(&b.timestamp));
        points
    }
}

impl DocumentStore for MemoryStore {
    fn put(&self, id: &str, point: &EnvironmentalDataPoint) -> PersistResult<()> {
        self.documents
            .lock()
            .expect("store mutex poisoned")
            .insert(id.to_string(), point.clone());
        Ok(())
    }
}

/// JSON-lines store: one append-only file per environment under a root
/// directory.
#[derive(Clone)]
pub struct JsonlStore {
    root_dir: PathBuf,
}

impl JsonlStore {
    pub fn new(root_dir: PathBuf) -> PersistResult<Self> {
        if !root_dir.exists() {
            fs::create_dir_all(&root_dir)?;
        }
        Ok(Self { root_dir })
    }

    fn environment_path(&self, environment: &str) -> PathBuf {
        self.root_dir.join(format!("{environment}.jsonl"))
    }

    /// Read back every point recorded for an environment. Returns an empty
    /// list when nothing has been written yet.
    pub fn load_environment(&self, environment: &str) -> PersistResult<Vec<EnvironmentalDataPoint>> {
        let path = self.environment_path(environment);
        if !path.exists() {
            return Ok(Vec::new());
        }

        let content = fs::read_to_string(path)?;
        let mut points = Vec::new();
        for line in content.lines() {
            if !line.trim().is_empty() {
                let point: EnvironmentalDataPoint = serde_json::from_str(line)?;
                points.push(point);
            }
        }
        Ok(points)
    }

    pub fn root_dir(&self) -> &Path {
        &self.root_dir
    }
}

impl DocumentStore for JsonlStore {
    fn put(&self, _id: &str, point: &EnvironmentalDataPoint) -> PersistResult<()> {
        let line = serde_json::to_string(point)?;
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(self.environment_path(&point.environment))?;
        writeln!(file, "{line}")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use eco_core::{Value, Variable};

    #[test]
    fn memory_store_keeps_documents_by_id() {
        let store = MemoryStore::new();
        let point = EnvironmentalDataPoint::new(
            "chamber_1",
            Variable::new("air_temperature"),
            false,
            Value::scalar(21.0),
            100.0,
        );

        store.put(&point.id, &point).unwrap();
        assert_eq!(store.len(), 1);
        assert_eq!(store.get(&point.id), Some(point));
    }

    #[test]
    fn memory_store_points_sorted_by_timestamp() {
        let store = MemoryStore::new();
        for timestamp in [30.0, 10.0, 20.0] {
            let point = EnvironmentalDataPoint::new(
                "chamber_1",
                Variable::new("air_temperature"),
                false,
                Value::scalar(timestamp),
                timestamp,
            );
            store.put(&point.id, &point).unwrap();
        }

        let timestamps: Vec<f64> = store.points().iter().map(|p| p.timestamp).collect();
        assert_eq!(timestamps, vec![10.0, 20.0, 30.0]);
    }
}
