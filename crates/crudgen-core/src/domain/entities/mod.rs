pub mod collection;
pub mod entry;

pub use collection::{EntryCollection, PRIMARY_KEY};
pub use entry::Entry;
