//! Command dispatch.

use crate::error::TableError;
use crate::table::Table;
use fuzz_core::Command;
use std::time::Duration;

/// Execute one command against the table, discarding its result.
///
/// With a deadline, an operation that does not finish in time fails with
/// [`TableError::Timeout`].
pub async fn execute(
    table: &dyn Table,
    command: &Command,
    deadline: Option<Duration>,
) -> Result<(), TableError> {
    match deadline {
        Some(limit) => tokio::time::timeout(limit, dispatch(table, command))
            .await
            .map_err(|_| TableError::Timeout(limit))?,
        None => dispatch(table, command).await,
    }
}

async fn dispatch(table: &dyn Table, command: &Command) -> Result<(), TableError> {
    match command {
        Command::Get { key, namespace } => table.get(key, namespace).await.map(drop),
        Command::Set {
            key,
            value,
            expire,
            namespace,
        } => table.set(key, value.clone(), *expire, namespace).await,
        Command::Exists { key, namespace } => table.exists(key, namespace).await.map(drop),
        Command::Delete { key, namespace } => table.delete(key, namespace).await.map(drop),
        Command::Ttl { key, namespace } => table.ttl(key, namespace).await.map(drop),
        Command::Count { namespace } => table.count(namespace).await.map(drop),
        Command::Clear { namespace } => table.clear(namespace).await,
        Command::Namespaces => table.namespaces().await.map(drop),
        Command::ClearAll => table.clear_all().await,
    }
}
