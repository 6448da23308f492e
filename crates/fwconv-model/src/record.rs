//! Extracted records and the output table.

use indexmap::IndexMap;

/// Output column name to trimmed value, for one input line.
///
/// Iteration order is column order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractedRecord {
    values: IndexMap<String, String>,
}

impl ExtractedRecord {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            values: IndexMap::with_capacity(capacity),
        }
    }

    /// Appends a column value, replacing any previous value for `column`.
    pub fn insert(&mut self, column: impl Into<String>, value: impl Into<String>) {
        self.values.insert(column.into(), value.into());
    }

    pub fn get(&self, column: &str) -> Option<&str> {
        self.values.get(column).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    pub fn values(&self) -> impl Iterator<Item = &str> {
        self.values.values().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values
            .iter()
            .map(|(column, value)| (column.as_str(), value.as_str()))
    }
}

impl<K, V> FromIterator<(K, V)> for ExtractedRecord
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(column, value)| (column.into(), value.into()))
                .collect(),
        }
    }
}

/// Records sharing one column set, in input line order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OutputTable {
    columns: Vec<String>,
    records: Vec<ExtractedRecord>,
}

impl OutputTable {
    pub fn new(columns: Vec<String>) -> Self {
        Self {
            columns,
            records: Vec::new(),
        }
    }

    /// Appends a record. Its columns must match the table's, in order.
    pub fn push(&mut self, record: ExtractedRecord) {
        debug_assert!(
            record.columns().eq(self.columns.iter().map(String::as_str)),
            "record columns do not match table columns"
        );
        self.records.push(record);
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn records(&self) -> &[ExtractedRecord] {
        &self.records
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Values of `column` across all records.
    pub fn column_values<'a>(&'a self, column: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.records
            .iter()
            .filter_map(move |record| record.get(column))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_preserves_insertion_order() {
        let record: ExtractedRecord = [("B", "2"), ("A", "1")].into_iter().collect();
        assert_eq!(record.columns().collect::<Vec<_>>(), vec!["B", "A"]);
        assert_eq!(record.get("A"), Some("1"));
        assert_eq!(record.get("C"), None);
    }

    #[test]
    fn test_table_collects_column_values() {
        let mut table = OutputTable::new(vec!["ID".to_string()]);
        table.push([("ID", "001")].into_iter().collect());
        table.push([("ID", "002")].into_iter().collect());

        assert_eq!(table.len(), 2);
        assert_eq!(
            table.column_values("ID").collect::<Vec<_>>(),
            vec!["001", "002"]
        );
    }
}
