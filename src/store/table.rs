use std::sync::RwLock;

use crate::error::Result;
use crate::models::{Attendance, CalendarEvent, Grade};

/// A record addressable by its opaque string ID.
pub trait Record: Clone + Send + Sync + 'static {
    fn id(&self) -> &str;
}

impl Record for Grade {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Record for Attendance {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Record for CalendarEvent {
    fn id(&self) -> &str {
        &self.id
    }
}

/// Backing storage for one kind of record.
///
/// The domain stores only talk to this trait, so the in-memory table can be
/// swapped for a persistent one without touching them. Each call is atomic
/// with respect to the others.
pub trait RecordStore<T: Record>: Send + Sync {
    /// Every record, in insertion order.
    fn all(&self) -> Result<Vec<T>>;

    /// Records matching `predicate`, in insertion order.
    fn filter(&self, predicate: &dyn Fn(&T) -> bool) -> Result<Vec<T>> {
        Ok(self.all()?.into_iter().filter(|r| predicate(r)).collect())
    }

    /// Append records in one step.
    fn insert(&self, records: Vec<T>) -> Result<()>;

    /// Apply `change` to the record with `id` in place, returning the
    /// updated copy. `None` when no record has that ID.
    fn modify(&self, id: &str, change: &mut dyn FnMut(&mut T)) -> Result<Option<T>>;

    /// Remove the record with `id`, returning it. `None` when absent.
    fn remove(&self, id: &str) -> Result<Option<T>>;
}

/// A `Vec` behind a lock.
#[derive(Debug, Default)]
pub struct MemoryTable<T> {
    rows: RwLock<Vec<T>>,
}

impl<T> MemoryTable<T> {
    pub fn new(rows: Vec<T>) -> Self {
        Self {
            rows: RwLock::new(rows),
        }
    }
}

impl<T: Record> RecordStore<T> for MemoryTable<T> {
    fn all(&self) -> Result<Vec<T>> {
        let rows = self.rows.read().expect("table lock poisoned");
        Ok(rows.clone())
    }

    fn filter(&self, predicate: &dyn Fn(&T) -> bool) -> Result<Vec<T>> {
        let rows = self.rows.read().expect("table lock poisoned");
        Ok(rows.iter().filter(|r| predicate(r)).cloned().collect())
    }

    fn insert(&self, records: Vec<T>) -> Result<()> {
        let mut rows = self.rows.write().expect("table lock poisoned");
        rows.extend(records);
        Ok(())
    }

    fn modify(&self, id: &str, change: &mut dyn FnMut(&mut T)) -> Result<Option<T>> {
        let mut rows = self.rows.write().expect("table lock poisoned");
        let Some(row) = rows.iter_mut().find(|r| r.id() == id) else {
            return Ok(None);
        };
        change(row);
        Ok(Some(row.clone()))
    }

    fn remove(&self, id: &str) -> Result<Option<T>> {
        let mut rows = self.rows.write().expect("table lock poisoned");
        let Some(index) = rows.iter().position(|r| r.id() == id) else {
            return Ok(None);
        };
        Ok(Some(rows.remove(index)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::seed;

    #[test]
    fn modify_only_touches_matching_row() {
        let table = MemoryTable::new(seed::grades());

        let updated = table
            .modify("2", &mut |g: &mut Grade| g.score = 50.0)
            .unwrap()
            .expect("row exists");
        assert_eq!(updated.score, 50.0);

        let rows = table.all().unwrap();
        assert_eq!(rows[0].score, 85.0);
        assert_eq!(rows[1].score, 50.0);
        assert_eq!(rows[2].score, 78.0);
    }

    #[test]
    fn missing_ids_leave_table_untouched() {
        let table = MemoryTable::new(seed::grades());

        assert!(table
            .modify("nope", &mut |g: &mut Grade| g.score = 0.0)
            .unwrap()
            .is_none());
        assert!(table.remove("nope").unwrap().is_none());
        assert_eq!(table.all().unwrap(), seed::grades());
    }

    #[test]
    fn remove_preserves_order_of_remaining_rows() {
        let table = MemoryTable::new(seed::grades());
        table.remove("1").unwrap();

        let ids: Vec<_> = table.all().unwrap().into_iter().map(|g| g.id).collect();
        assert_eq!(ids, vec!["2", "3"]);
    }
}
