use serde::{Deserialize, Serialize};

use crate::core::types::SeriesDef;
use crate::core::value::Row;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableColumn {
    pub key: String,
    pub header: String,
}

/// Tabular projection of chart rows for non-visual consumers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableProjection {
    pub columns: Vec<TableColumn>,
    pub rows: Vec<Vec<String>>,
}

impl TableProjection {
    #[must_use]
    pub fn headers(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|column| column.header.as_str())
    }
}

/// Projects `rows` onto `[x_key, ...series y keys]`.
///
/// Pure data reshaping; absent fields become empty cells.
#[must_use]
pub fn project_table(rows: &[Row], x_key: &str, series: &[SeriesDef]) -> TableProjection {
    let mut columns = Vec::with_capacity(series.len() + 1);
    columns.push(TableColumn {
        key: x_key.to_owned(),
        header: x_key.to_owned(),
    });
    columns.extend(series.iter().map(|def| TableColumn {
        key: def.y_key.clone(),
        header: def.display_label().to_owned(),
    }));

    let rows = rows
        .iter()
        .map(|row| {
            columns
                .iter()
                .map(|column| {
                    row.get(&column.key)
                        .map(ToString::to_string)
                        .unwrap_or_default()
                })
                .collect()
        })
        .collect();

    TableProjection { columns, rows }
}
