//! Key-value persistence for the planner records.
//!
//! The planner only needs "get a named blob" and "set a named blob"; the
//! [`KeyValueStore`] trait is that capability. [`FileStore`] keeps one JSON
//! file per record, [`MemoryStore`] keeps everything in a map for tests.

mod file;
mod memory;
mod records;

pub use file::FileStore;
pub use memory::MemoryStore;
pub use records::{Record, load_state, save_all, save_record};

pub(crate) use records::decode_day_events;

use crate::error::PlannerResult;

pub trait KeyValueStore {
    fn get(&self, key: &str) -> PlannerResult<Option<String>>;

    fn set(&mut self, key: &str, value: &str) -> PlannerResult<()>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for &mut S {
    fn get(&self, key: &str) -> PlannerResult<Option<String>> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> PlannerResult<()> {
        (**self).set(key, value)
    }
}
