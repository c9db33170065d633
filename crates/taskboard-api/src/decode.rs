//! Decoding of task API response bodies.

use serde::de::DeserializeOwned;
use taskboard_core::{TaskboardError, TaskboardResult};
use taskboard_domain::Task;

pub fn decode<T: DeserializeOwned>(body: &str) -> TaskboardResult<T> {
    serde_json::from_str(body).map_err(|e| TaskboardError::Serialization(e.to_string()))
}

/// Decodes a list response record by record.
///
/// A record that does not decode, for example because its status is not one
/// of the three board columns, is logged and skipped so it never reaches
/// the board.
pub fn decode_task_list(body: &str) -> TaskboardResult<Vec<Task>> {
    let records: Vec<serde_json::Value> = decode(body)?;
    let total = records.len();

    let tasks: Vec<Task> = records
        .into_iter()
        .filter_map(|record| {
            let id = record.get("id").cloned();
            match serde_json::from_value::<Task>(record) {
                Ok(task) => Some(task),
                Err(e) => {
                    tracing::warn!(
                        id = ?id,
                        error = %e,
                        "Skipping task record that failed to decode"
                    );
                    None
                }
            }
        })
        .collect();

    if tasks.len() != total {
        tracing::warn!("Decoded {} of {} task records", tasks.len(), total);
    }
    Ok(tasks)
}
