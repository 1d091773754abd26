//! Catalog storage API.

use crate::error::CatalogResult;
use crate::record::PumpCurveRecord;
use std::fs;
use std::path::{Path, PathBuf};

/// Candidate query boundary used by the matcher.
///
/// The BEP-window pre-filter lives here, on the store side, so the matcher
/// never re-derives it per call.
pub trait CatalogQuery {
    /// Records whose BEP window contains `target_flow_m3h`.
    fn candidates_for(&self, target_flow_m3h: f64) -> Vec<PumpCurveRecord>;
}

/// JSON-file backed pump catalog.
///
/// Loaded and validated once at open; `refresh` re-reads the file on caller
/// demand. There is no background change polling: callers own the handle and
/// decide when to reload.
#[derive(Debug, Clone)]
pub struct CatalogStore {
    path: PathBuf,
    records: Vec<PumpCurveRecord>,
}

impl CatalogStore {
    pub fn open(path: &Path) -> CatalogResult<Self> {
        let records = Self::load(path)?;
        Ok(Self {
            path: path.to_path_buf(),
            records,
        })
    }

    /// Re-read the backing file, replacing the in-memory records.
    pub fn refresh(&mut self) -> CatalogResult<()> {
        self.records = Self::load(&self.path)?;
        Ok(())
    }

    fn load(path: &Path) -> CatalogResult<Vec<PumpCurveRecord>> {
        let content = fs::read_to_string(path)?;
        let records: Vec<PumpCurveRecord> = serde_json::from_str(&content)?;
        for record in &records {
            record.validate()?;
        }
        tracing::info!(count = records.len(), path = %path.display(), "catalog loaded");
        Ok(records)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn records(&self) -> &[PumpCurveRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl CatalogQuery for CatalogStore {
    fn candidates_for(&self, target_flow_m3h: f64) -> Vec<PumpCurveRecord> {
        self.records
            .iter()
            .filter(|r| r.window_contains(target_flow_m3h))
            .cloned()
            .collect()
    }
}

/// In-memory catalog, handy for tests and synthetic candidate sets.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCatalog {
    records: Vec<PumpCurveRecord>,
}

impl InMemoryCatalog {
    pub fn new(records: Vec<PumpCurveRecord>) -> Self {
        Self { records }
    }
}

impl CatalogQuery for InMemoryCatalog {
    fn candidates_for(&self, target_flow_m3h: f64) -> Vec<PumpCurveRecord> {
        self.records
            .iter()
            .filter(|r| r.window_contains(target_flow_m3h))
            .cloned()
            .collect()
    }
}
