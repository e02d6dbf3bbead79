//! JSON renderer. Each row is an object keyed by column label, in column
//! order (relies on `serde_json`'s `preserve_order`).

use serde_json::{Map as JsonMap, Value};

use crate::{ReportError, ReportModel};

pub fn report_json(m: &ReportModel) -> Value {
    let mut root = JsonMap::new();
    root.insert(
        "columns".into(),
        Value::Array(m.columns.iter().map(|c| Value::String(c.as_str().into())).collect()),
    );
    let rows = m
        .rows
        .iter()
        .map(|row| {
            let obj: JsonMap<String, Value> = m
                .columns
                .iter()
                .zip(row)
                .map(|(c, cell)| (c.as_str().to_string(), Value::String(cell.clone())))
                .collect();
            Value::Object(obj)
        })
        .collect();
    root.insert("rows".into(), Value::Array(rows));
    root.insert(
        "message".into(),
        m.message.map_or(Value::Null, |s| Value::String(s.into())),
    );
    Value::Object(root)
}

pub fn render_json(m: &ReportModel) -> Result<String, ReportError> {
    serde_json::to_string_pretty(&report_json(m)).map_err(|e| ReportError::Serialize(e.to_string()))
}
