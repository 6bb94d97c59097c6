//! Store double that records how it was called

use crate::{Connector, ConnectorPatch, ConnectorStore};
use anyhow::{anyhow, Result};
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

#[derive(Default)]
pub struct RecordingStore {
    rows: Mutex<Vec<Connector>>,
    insert_attempts: Mutex<Vec<String>>,
    find_all_calls: AtomicUsize,
    find_by_id_calls: AtomicUsize,
    fail_insert_at: Option<usize>,
    fail_find_all: bool,
}

impl RecordingStore {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn with_rows(rows: Vec<Connector>) -> Self {
        Self {
            rows: Mutex::new(rows),
            ..Self::default()
        }
    }

    pub fn fail_insert_at(mut self, attempt: usize) -> Self {
        self.fail_insert_at = Some(attempt);
        self
    }

    pub fn fail_find_all(mut self) -> Self {
        self.fail_find_all = true;
        self
    }

    pub fn rows(&self) -> Vec<Connector> {
        self.rows.lock().unwrap().clone()
    }

    pub fn inserted_ids(&self) -> Vec<String> {
        self.insert_attempts.lock().unwrap().clone()
    }

    pub fn find_all_calls(&self) -> usize {
        self.find_all_calls.load(Ordering::SeqCst)
    }

    pub fn find_by_id_calls(&self) -> usize {
        self.find_by_id_calls.load(Ordering::SeqCst)
    }

    pub fn clear_calls(&self) {
        self.insert_attempts.lock().unwrap().clear();
        self.find_all_calls.store(0, Ordering::SeqCst);
        self.find_by_id_calls.store(0, Ordering::SeqCst);
    }
}

#[async_trait]
impl ConnectorStore for RecordingStore {
    async fn find_all(&self) -> Result<Vec<Connector>> {
        self.find_all_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_find_all {
            return Err(anyhow!("connection reset"));
        }
        Ok(self.rows())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Connector>> {
        self.find_by_id_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.rows.lock().unwrap().iter().find(|r| r.id == id).cloned())
    }

    async fn insert_one(&self, connector: Connector) -> Result<Connector> {
        let attempt = {
            let mut attempts = self.insert_attempts.lock().unwrap();
            attempts.push(connector.id.clone());
            attempts.len() - 1
        };
        if self.fail_insert_at == Some(attempt) {
            return Err(anyhow!("insert of '{}' failed", connector.id));
        }

        let mut rows = self.rows.lock().unwrap();
        if rows.iter().any(|r| r.id == connector.id) {
            return Err(anyhow!("Connector '{}' already exists", connector.id));
        }
        rows.push(connector.clone());
        Ok(connector)
    }

    async fn update_one(&self, id: &str, patch: &ConnectorPatch) -> Result<Option<Connector>> {
        let mut rows = self.rows.lock().unwrap();
        Ok(rows.iter_mut().find(|r| r.id == id).map(|row| {
            row.apply(patch);
            row.clone()
        }))
    }
}
