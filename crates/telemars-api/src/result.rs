//! Task state and result types.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::task::Task;

/// Identifier the service assigns to a submitted task.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(String);

impl TaskId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Response to a task submission.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub(crate) struct TaskTicket {
    pub id: TaskId,
}

/// Processing status of a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskStatus {
    New,
    InProgress,
    Done,
    Failed,
}

/// State of a submitted task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskState {
    pub id: TaskId,
    pub status: TaskStatus,
    /// Failure reason, when the service gives one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// One row as returned by the service: a slice combination and the
/// statistics computed for one target audience.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultRow {
    /// Label of the target audience; absent for audience-independent rows.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audience: Option<String>,
    #[serde(default)]
    pub slices: Map<String, Value>,
    #[serde(default)]
    pub statistics: Map<String, Value>,
}

/// Raw result of a finished task.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskResult {
    pub id: TaskId,
    #[serde(default)]
    pub data: Vec<ResultRow>,
}

impl TaskResult {
    /// Flattens the per-audience rows into one wide table.
    ///
    /// Slice columns come first, in the order the task requested them.
    /// Each statistic gets one column per audience named
    /// `"{statistic} {audience}"` (`RtgPer All 25-50`); sales statistics
    /// get a single column under their plain name. Rows sharing the same
    /// slice values merge into one, in order of first appearance.
    pub fn table(&self, task: &Task) -> Table {
        let mut columns: Vec<String> = task.slices().iter().map(|s| s.to_string()).collect();
        for audience in task.audiences() {
            for statistic in task.statistics() {
                let name = statistic_column(
                    statistic.as_str(),
                    statistic.is_sales(),
                    Some(audience.name()),
                );
                if !columns.contains(&name) {
                    columns.push(name);
                }
            }
        }
        let mut positions: HashMap<String, usize> = columns
            .iter()
            .enumerate()
            .map(|(i, name)| (name.clone(), i))
            .collect();

        let mut rows: Vec<Vec<Value>> = Vec::new();
        let mut row_index: HashMap<String, usize> = HashMap::new();

        for raw in &self.data {
            let key: Vec<Value> = task
                .slices()
                .iter()
                .map(|slice| raw.slices.get(slice.as_str()).cloned().unwrap_or(Value::Null))
                .collect();
            let key_text = Value::Array(key.clone()).to_string();

            let row = *row_index.entry(key_text).or_insert_with(|| {
                let mut cells = key;
                cells.resize(columns.len(), Value::Null);
                rows.push(cells);
                rows.len() - 1
            });

            for (statistic, value) in &raw.statistics {
                let is_sales = task
                    .statistics()
                    .iter()
                    .any(|s| s.as_str() == statistic && s.is_sales());
                let name = statistic_column(statistic, is_sales, raw.audience.as_deref());
                let column = match positions.get(&name) {
                    Some(&column) => column,
                    None => {
                        columns.push(name.clone());
                        for cells in rows.iter_mut() {
                            cells.push(Value::Null);
                        }
                        positions.insert(name, columns.len() - 1);
                        columns.len() - 1
                    }
                };
                rows[row][column] = value.clone();
            }
        }

        Table { columns, rows }
    }
}

fn statistic_column(statistic: &str, is_sales: bool, audience: Option<&str>) -> String {
    match audience {
        Some(audience) if !is_sales => format!("{statistic} {audience}"),
        _ => statistic.to_string(),
    }
}

/// A flattened result table.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Table {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Value>>,
}

impl Table {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Values of the named column, top to bottom.
    pub fn column(&self, name: &str) -> Option<Vec<&Value>> {
        let index = self.columns.iter().position(|c| c == name)?;
        Some(self.rows.iter().filter_map(|row| row.get(index)).collect())
    }

    /// Rows as column-name to value maps.
    pub fn records(&self) -> Vec<Map<String, Value>> {
        self.rows
            .iter()
            .map(|row| {
                self.columns
                    .iter()
                    .cloned()
                    .zip(row.iter().cloned())
                    .collect()
            })
            .collect()
    }
}
