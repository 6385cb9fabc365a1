//! In-memory table of records with simulated access latency.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicI32, Ordering};

use tokio::sync::RwLock;

use super::{Latency, StoreError};

/// A record that can live in a [`Table`].
pub trait Record: Clone + Send + Sync + 'static {
    /// Singular, lowercase entity name used in errors and logs.
    const KIND: &'static str;

    /// Raw id of the record.
    fn id(&self) -> i32;

    /// Overwrite the id (used when inserting).
    fn assign_id(&mut self, id: i32);
}

/// Implement [`Record`] for a model with a typed `id` field.
macro_rules! impl_record {
    ($ty:ty, $id:ident, $kind:literal) => {
        impl $crate::store::Record for $ty {
            const KIND: &'static str = $kind;

            fn id(&self) -> i32 {
                self.id.as_i32()
            }

            fn assign_id(&mut self, id: i32) {
                self.id = ::pressroom_core::$id::new(id);
            }
        }
    };
}

pub(crate) use impl_record;

/// An id-ordered collection of records standing in for a REST resource.
///
/// Every public operation first waits out the simulated network round trip,
/// then takes the lock for a single critical section.
pub struct Table<T> {
    rows: RwLock<BTreeMap<i32, T>>,
    next_id: AtomicI32,
    latency: Latency,
}

impl<T: Record> Table<T> {
    /// Build a table from seed rows. New ids continue after the highest seed id.
    #[must_use]
    pub fn new(rows: Vec<T>, latency: Latency) -> Self {
        let rows: BTreeMap<i32, T> = rows.into_iter().map(|row| (row.id(), row)).collect();
        let next_id = rows.keys().next_back().map_or(1, |max| max + 1);

        Self {
            rows: RwLock::new(rows),
            next_id: AtomicI32::new(next_id),
            latency,
        }
    }

    /// All records in ascending id order.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Unavailable` on a simulated failure.
    pub async fn all(&self) -> Result<Vec<T>, StoreError> {
        self.latency.simulate("list", T::KIND).await?;
        Ok(self.snapshot().await)
    }

    /// Fetch one record.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` for unknown ids.
    pub async fn get(&self, id: i32) -> Result<T, StoreError> {
        self.latency.simulate("get", T::KIND).await?;
        self.rows
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or_else(|| StoreError::not_found::<T>(id))
    }

    /// Insert a record, assigning the next id. Returns the stored record.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Unavailable` on a simulated failure.
    pub async fn insert(&self, mut row: T) -> Result<T, StoreError> {
        self.latency.simulate("create", T::KIND).await?;
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        row.assign_id(id);
        self.rows.write().await.insert(id, row.clone());
        tracing::info!(kind = T::KIND, id, "Record created");
        Ok(row)
    }

    /// Replace a record, keeping its id.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` for unknown ids.
    pub async fn replace(&self, id: i32, mut row: T) -> Result<T, StoreError> {
        self.latency.simulate("update", T::KIND).await?;
        let mut rows = self.rows.write().await;
        let slot = rows.get_mut(&id).ok_or_else(|| StoreError::not_found::<T>(id))?;
        row.assign_id(id);
        *slot = row.clone();
        tracing::info!(kind = T::KIND, id, "Record updated");
        Ok(row)
    }

    /// Mutate a record in place.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` for unknown ids.
    pub async fn update<F>(&self, id: i32, f: F) -> Result<T, StoreError>
    where
        F: FnOnce(&mut T) + Send,
    {
        self.latency.simulate("update", T::KIND).await?;
        let mut rows = self.rows.write().await;
        let row = rows.get_mut(&id).ok_or_else(|| StoreError::not_found::<T>(id))?;
        f(row);
        row.assign_id(id);
        tracing::info!(kind = T::KIND, id, "Record updated");
        Ok(row.clone())
    }

    /// Remove a record. Returns what was removed.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` for unknown ids.
    pub async fn delete(&self, id: i32) -> Result<T, StoreError> {
        self.latency.simulate("delete", T::KIND).await?;
        let removed = self
            .rows
            .write()
            .await
            .remove(&id)
            .ok_or_else(|| StoreError::not_found::<T>(id))?;
        tracing::info!(kind = T::KIND, id, "Record deleted");
        Ok(removed)
    }

    /// Remove several records. Unknown ids are skipped; returns how many went.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Unavailable` on a simulated failure.
    pub async fn delete_many(&self, ids: &[i32]) -> Result<usize, StoreError> {
        self.latency.simulate("bulk delete", T::KIND).await?;
        let mut rows = self.rows.write().await;
        let removed = ids.iter().filter(|id| rows.remove(*id).is_some()).count();
        tracing::info!(kind = T::KIND, requested = ids.len(), removed, "Bulk delete");
        Ok(removed)
    }

    /// Mutate several records. Unknown ids are skipped; returns how many changed.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Unavailable` on a simulated failure.
    pub async fn update_many<F>(&self, ids: &[i32], f: F) -> Result<usize, StoreError>
    where
        F: Fn(&mut T) + Send,
    {
        self.latency.simulate("bulk update", T::KIND).await?;
        let mut rows = self.rows.write().await;
        let mut updated = 0;
        for id in ids {
            if let Some(row) = rows.get_mut(id) {
                f(row);
                row.assign_id(*id);
                updated += 1;
            }
        }
        tracing::info!(kind = T::KIND, requested = ids.len(), updated, "Bulk update");
        Ok(updated)
    }

    /// Number of records.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Unavailable` on a simulated failure.
    pub async fn count(&self) -> Result<usize, StoreError> {
        self.latency.simulate("count", T::KIND).await?;
        Ok(self.rows.read().await.len())
    }

    /// Current rows without simulating a call.
    ///
    /// Used when one simulated call reads several tables at once.
    pub(crate) async fn snapshot(&self) -> Vec<T> {
        self.rows.read().await.values().cloned().collect()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Note {
        id: i32,
        text: String,
    }

    impl Record for Note {
        const KIND: &'static str = "note";

        fn id(&self) -> i32 {
            self.id
        }

        fn assign_id(&mut self, id: i32) {
            self.id = id;
        }
    }

    fn note(id: i32, text: &str) -> Note {
        Note {
            id,
            text: text.to_string(),
        }
    }

    fn table() -> Table<Note> {
        Table::new(vec![note(1, "a"), note(5, "b")], Latency::none())
    }

    #[tokio::test]
    async fn test_insert_continues_after_highest_seed_id() {
        let table = table();
        let created = table.insert(note(0, "c")).await.unwrap();
        assert_eq!(created.id, 6);
        assert_eq!(table.count().await.unwrap(), 3);
    }

    #[tokio::test]
    async fn test_get_unknown_is_not_found() {
        let err = table().get(9).await.unwrap_err();
        assert!(matches!(err, StoreError::NotFound { kind: "note", id: 9 }));
    }

    #[tokio::test]
    async fn test_update_and_replace_keep_id() {
        let table = table();
        let updated = table
            .update(1, |n| {
                n.text = "changed".to_string();
                n.id = 99;
            })
            .await
            .unwrap();
        assert_eq!(updated, note(1, "changed"));

        let replaced = table.replace(5, note(0, "new")).await.unwrap();
        assert_eq!(replaced, note(5, "new"));
        assert_eq!(table.get(5).await.unwrap().text, "new");
    }

    #[tokio::test]
    async fn test_bulk_operations_skip_unknown_ids() {
        let table = table();
        let updated = table
            .update_many(&[1, 5, 42], |n| n.text.push('!'))
            .await
            .unwrap();
        assert_eq!(updated, 2);

        let removed = table.delete_many(&[5, 42]).await.unwrap();
        assert_eq!(removed, 1);
        assert_eq!(table.all().await.unwrap(), vec![note(1, "a!")]);
    }

    #[tokio::test]
    async fn test_failures_surface_as_unavailable() {
        let table = Table::new(vec![note(1, "a")], Latency::new(std::time::Duration::ZERO, 1.0));
        assert!(matches!(
            table.delete(1).await,
            Err(StoreError::Unavailable(_))
        ));
        // The failed call must not have removed anything.
        assert_eq!(table.snapshot().await.len(), 1);
    }
}
