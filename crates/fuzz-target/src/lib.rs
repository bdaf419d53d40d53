//! Table capability surface exercised by the fuzzer.
//!
//! The table service under test is an external collaborator; the fuzzer
//! only needs the nine operations of [`Table`] plus an optional
//! [`Table::stats`] probe. Two in-process implementations ship with the
//! crate:
//!
//! - [`MemoryTable`] - namespaced map with expiry and an optional byte budget
//! - [`NullTable`] - accepts everything and stores nothing
//!
//! [`execute`] dispatches one generated command against any table.

pub mod error;
pub mod execute;
pub mod memory;
pub mod null;
pub mod table;

pub use error::TableError;
pub use execute::execute;
pub use memory::MemoryTable;
pub use null::NullTable;
pub use table::{MemoryStats, Table};
