use chrono::{DateTime, Utc};

/// Column label carrying one or more levels. Multi-symbol provider
/// responses label columns on two levels, e.g. `("Close", "AAPL")`;
/// single-symbol responses use one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnLabel(Vec<String>);

impl ColumnLabel {
    pub fn single(name: impl Into<String>) -> Self {
        Self(vec![name.into()])
    }

    pub fn multi<I, S>(levels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(levels.into_iter().map(Into::into).collect())
    }

    pub fn levels(&self) -> &[String] {
        &self.0
    }

    pub fn is_flat(&self) -> bool {
        self.0.len() == 1
    }

    fn flatten(&mut self) {
        self.0.truncate(1);
    }
}

/// Timestamp-indexed table of value columns, the shape history providers
/// hand back. Rows whose value is missing stay in the table; callers skip
/// them when building a series.
#[derive(Debug, Clone, Default)]
pub struct HistoryFrame {
    index: Vec<DateTime<Utc>>,
    columns: Vec<(ColumnLabel, Vec<Option<f64>>)>,
}

impl HistoryFrame {
    pub fn new(index: Vec<DateTime<Utc>>) -> Self {
        Self {
            index,
            columns: Vec::new(),
        }
    }

    /// `values` must align with the index row-for-row.
    pub fn push_column(&mut self, label: ColumnLabel, values: Vec<Option<f64>>) {
        debug_assert_eq!(self.index.len(), values.len());
        self.columns.push((label, values));
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn index(&self) -> &[DateTime<Utc>] {
        &self.index
    }

    /// Collapse multi-level column labels to their first level.
    pub fn flatten_columns(&mut self) {
        for (label, _) in &mut self.columns {
            label.flatten();
        }
    }

    /// Look up a column by single-level name. Multi-level labels never
    /// match; flatten first.
    pub fn column(&self, name: &str) -> Option<&[Option<f64>]> {
        self.columns
            .iter()
            .find(|(label, _)| label.is_flat() && label.levels()[0] == name)
            .map(|(_, values)| values.as_slice())
    }
}
