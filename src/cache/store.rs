use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::PathBuf;
use tracing::{debug, warn};

/// On-disk copies of API responses, so revisiting a page inside the TTL
/// does not hit the backend again.
#[derive(Debug, Clone)]
pub struct SnapshotStore {
    dir: PathBuf,
    ttl_secs: u64,
}

#[derive(Debug, Serialize, Deserialize)]
struct Snapshot<T> {
    saved_at: chrono::DateTime<chrono::Utc>,
    key: String,
    payload: T,
}

impl SnapshotStore {
    pub fn new(dir: PathBuf, ttl_secs: u64) -> Self {
        Self { dir, ttl_secs }
    }

    /// Request keys look like `/photos?category=x&page=1`.
    fn path_for_key(&self, key: &str) -> PathBuf {
        let safe_key: String = key
            .trim_start_matches('/')
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() || c == '-' { c } else { '_' })
            .collect();
        self.dir.join(format!("{safe_key}.json"))
    }

    pub fn load<T: for<'de> Deserialize<'de>>(&self, key: &str) -> Option<T> {
        let path = self.path_for_key(key);
        let content = std::fs::read_to_string(&path).ok()?;

        let snapshot: Snapshot<Value> = match serde_json::from_str(&content) {
            Ok(s) => s,
            Err(e) => {
                warn!(key = key, error = %e, "Unreadable snapshot");
                return None;
            }
        };

        // Sanitized names can collide; the stored key settles it.
        if snapshot.key != key {
            return None;
        }

        let age = chrono::Utc::now()
            .signed_duration_since(snapshot.saved_at)
            .num_seconds();
        if age < 0 || age as u64 > self.ttl_secs {
            debug!(key = key, age = age, "Snapshot expired");
            return None;
        }

        match serde_json::from_value(snapshot.payload) {
            Ok(payload) => {
                debug!(key = key, age = age, "Snapshot hit");
                Some(payload)
            }
            Err(e) => {
                warn!(key = key, error = %e, "Snapshot payload no longer matches");
                None
            }
        }
    }

    pub fn save<T: Serialize>(&self, key: &str, payload: &T) -> Result<()> {
        std::fs::create_dir_all(&self.dir).with_context(|| {
            format!("Failed to create snapshot directory: {}", self.dir.display())
        })?;

        let snapshot = Snapshot {
            saved_at: chrono::Utc::now(),
            key: key.to_string(),
            payload,
        };

        let content = serde_json::to_string(&snapshot).context("Failed to serialize snapshot")?;
        let path = self.path_for_key(key);
        std::fs::write(&path, content)
            .with_context(|| format!("Failed to write snapshot: {}", path.display()))?;

        debug!(key = key, "Snapshot saved");
        Ok(())
    }

    pub fn clear(&self) -> Result<()> {
        if self.dir.exists() {
            for entry in std::fs::read_dir(&self.dir)? {
                let path = entry?.path();
                if path.extension().is_some_and(|ext| ext == "json") {
                    std::fs::remove_file(&path)?;
                }
            }
            debug!(dir = %self.dir.display(), "Snapshots cleared");
        }
        Ok(())
    }
}
