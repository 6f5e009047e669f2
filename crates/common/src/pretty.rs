//! Human-friendly rendering of engine tables, for debug logging and demos.

use tabled::{builder::Builder, settings, Table as TabledTable};
use types::{Table, Value};

/// Predefined output styles that map to `tabled` styles.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum TableStyleKind {
    #[default]
    Modern,
    Ascii,
    Plain,
}

impl TableStyleKind {
    fn apply(self, table: &mut TabledTable) {
        match self {
            Self::Modern => table.with(settings::Style::modern()),
            Self::Ascii => table.with(settings::Style::ascii()),
            Self::Plain => table.with(settings::Style::empty()),
        };
    }
}

/// Render a `Table` into a human-friendly grid string.
pub fn render_table(table: &Table, style: TableStyleKind) -> String {
    if table.columns.is_empty() {
        return "<empty>".into();
    }

    let mut builder = Builder::default();
    builder.push_record(table.columns.iter().map(|(name, _)| name.clone()));

    for row in 0..table.row_count() {
        let cells: Vec<String> = table
            .columns
            .iter()
            .map(|(_, column)| format_value(&column.get(row)))
            .collect();
        builder.push_record(cells);
    }

    let mut rendered = builder.build();
    style.apply(&mut rendered);
    rendered.to_string()
}

/// Format a single value for display.
pub fn format_value(value: &Value) -> String {
    match value {
        Value::Int(v) => v.to_string(),
        Value::Float(v) => v.to_string(),
    }
}
