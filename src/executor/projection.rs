//! Projection of matched rows into keyed records.
//!
//! A record maps field names to cells in field order. Each field is looked up
//! by name in the header when the header carries it; otherwise the field takes
//! the cell at its own position in the field list. A field with no cell maps
//! to `None`, and cells not named by any field are dropped.

use crate::access::{Row, Value};
use crate::catalog::ColumnIndex;
use indexmap::IndexMap;

/// A row rendered as an insertion-ordered map of field name to cell
pub type Record = IndexMap<String, Option<Value>>;

/// Project one row onto `fields`
pub fn project(row: &Row, fields: &[String], columns: Option<&ColumnIndex>) -> Record {
    fields
        .iter()
        .enumerate()
        .map(|(i, field)| {
            let position = columns
                .and_then(|columns| columns.position_of(field))
                .unwrap_or(i);
            (field.clone(), row.get(position).cloned())
        })
        .collect()
}

/// Project every row onto `fields`
pub fn project_all<'r, I>(rows: I, fields: &[String], columns: Option<&ColumnIndex>) -> Vec<Record>
where
    I: IntoIterator<Item = &'r Row>,
{
    rows.into_iter()
        .map(|row| project(row, fields, columns))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    fn sample() -> Row {
        Row::new(vec![Value::from(1), Value::from("aiu"), Value::from("Japan")])
    }

    #[test]
    fn test_project_by_header() {
        let columns = ColumnIndex::from_names(["id", "name", "country"]);
        let record = project(&sample(), &fields(&["id", "name", "country"]), Some(&columns));
        assert_eq!(record["id"], Some(Value::from(1)));
        assert_eq!(record["country"], Some(Value::from("Japan")));
        assert_eq!(
            record.keys().collect::<Vec<_>>(),
            vec!["id", "name", "country"]
        );
    }

    #[test]
    fn test_pick_fields_by_name() {
        let columns = ColumnIndex::from_names(["id", "name", "country"]);
        let record = project(&sample(), &fields(&["country", "id"]), Some(&columns));
        assert_eq!(record["country"], Some(Value::from("Japan")));
        assert_eq!(record["id"], Some(Value::from(1)));
        assert_eq!(record.len(), 2);
    }

    #[test]
    fn test_unknown_field_falls_back_to_position() {
        let columns = ColumnIndex::from_names(["id", "name", "country"]);
        let record = project(&sample(), &fields(&["key", "label"]), Some(&columns));
        assert_eq!(record["key"], Some(Value::from(1)));
        assert_eq!(record["label"], Some(Value::from("aiu")));
    }

    #[test]
    fn test_missing_cell_is_none() {
        let record = project(&sample(), &fields(&["a", "b", "c", "d"]), None);
        assert_eq!(record["c"], Some(Value::from("Japan")));
        assert_eq!(record["d"], None);
    }

    #[test]
    fn test_project_all() {
        let rows = vec![sample(), Row::new(vec![Value::from(2)])];
        let records = project_all(&rows, &fields(&["id"]), None);
        assert_eq!(records.len(), 2);
        assert_eq!(records[1]["id"], Some(Value::from(2)));
    }
}
