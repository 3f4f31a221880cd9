//! In-memory student repository.

use dashmap::DashMap;
use std::collections::BTreeMap;
use std::sync::Arc;

use crate::config::schema::StoreConfig;
use crate::observability::metrics;
use crate::store::record::{seed_records, Student, StudentId};

/// A thread-safe handle to the student records.
///
/// Cloning the handle shares the same underlying map.
#[derive(Clone, Default)]
pub struct StudentStore {
    inner: Arc<DashMap<StudentId, Student>>,
}

impl StudentStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(DashMap::new()),
        }
    }

    /// Create a store holding the fixed seed records.
    pub fn seeded() -> Self {
        let store = Self::new();
        for (id, student) in seed_records() {
            store.inner.insert(id, student);
        }
        metrics::record_store_size(store.len());
        store
    }

    /// Build the store described by the configuration.
    pub fn from_config(config: &StoreConfig) -> Self {
        let store = if config.seed { Self::seeded() } else { Self::new() };
        tracing::info!(records = store.len(), seeded = config.seed, "Student store ready");
        store
    }

    /// Number of records currently held.
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Snapshot of every record, ordered by id.
    pub fn list(&self) -> BTreeMap<StudentId, Student> {
        self.inner
            .iter()
            .map(|r| (*r.key(), r.value().clone()))
            .collect()
    }

    pub fn get(&self, id: StudentId) -> Option<Student> {
        self.inner.get(&id).map(|r| r.value().clone())
    }

    /// First record (lowest id) whose name matches, ignoring case.
    pub fn find_by_name(&self, name: &str) -> Option<Student> {
        self.find_first(|student| student.name_matches(name))
    }

    /// First record (lowest id) matching both the name, ignoring case, and the exact age.
    pub fn find_by_name_and_age(&self, name: &str, age: i64) -> Option<Student> {
        self.find_first(|student| student.name_matches(name) && student.age == Some(age))
    }

    fn find_first(&self, predicate: impl Fn(&Student) -> bool) -> Option<Student> {
        self.inner
            .iter()
            .filter(|r| predicate(r.value()))
            .min_by_key(|r| *r.key())
            .map(|r| r.value().clone())
    }

    /// Insert a record under id `len + 1` and return the id with the stored value.
    ///
    /// The id is size-derived: after a deletion it may equal an existing id,
    /// in which case that record is overwritten.
    pub fn create(&self, student: Student) -> (StudentId, Student) {
        let id = self.inner.len() as StudentId + 1;
        if let Some(previous) = self.inner.insert(id, student.clone()) {
            tracing::warn!(id, ?previous, "Size-derived id collided with an existing record; overwriting");
        }
        metrics::record_store_size(self.len());
        (id, student)
    }

    /// Overwrite the whole record at `id`. Returns `None` if `id` is absent.
    pub fn replace(&self, id: StudentId, student: Student) -> Option<Student> {
        let mut entry = self.inner.get_mut(&id)?;
        *entry = student;
        Some(entry.value().clone())
    }

    /// Merge the real input of `patch` into the record at `id`.
    /// Returns `None` if `id` is absent.
    pub fn patch(&self, id: StudentId, patch: Student) -> Option<Student> {
        let mut entry = self.inner.get_mut(&id)?;
        entry.apply_patch(patch);
        Some(entry.value().clone())
    }

    /// Remove the record at `id`, returning it if it existed.
    pub fn delete(&self, id: StudentId) -> Option<Student> {
        let removed = self.inner.remove(&id).map(|(_, student)| student);
        if removed.is_some() {
            metrics::record_store_size(self.len());
        }
        removed
    }
}
