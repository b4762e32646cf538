use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::UTF8_FULL;
use comfy_table::{
    Attribute, Cell, CellAlignment, Color, ColumnConstraint, ContentArrangement, Table, Width,
};

use septoctor_model::{
    FieldValue, IngestOutput, IngestReport, IntakeDecision, IntakeError, MappedRecord,
};
use septoctor_standards::CanonicalSchema;

pub fn print_report(report: &IngestReport, schema: &CanonicalSchema) {
    println!("{}", report.message);
    match &report.output {
        IngestOutput::Structured(record) => println!("{}", record_table(record, schema)),
        IngestOutput::FreeText(text) => {
            println!();
            println!("{text}");
        }
    }
}

pub fn print_rejection(error: &IntakeError) {
    eprintln!("{}", rejection_line(error));
}

pub fn print_decision(decision: &IntakeDecision) {
    println!("{}", decision_line(decision));
}

pub fn print_schema(schema: &CanonicalSchema) {
    println!("Schema: {} v{}", schema.name(), schema.version());
    println!("Fingerprint: {}", schema.fingerprint());
    println!("{}", schema_table(schema));
}

/// One-line verdict of the intake checks.
pub fn decision_line(decision: &IntakeDecision) -> String {
    if !decision.accepted {
        return format!("rejected: {}", decision.reason);
    }
    match decision.kind {
        Some(kind) => format!("accepted ({kind}): {}", decision.reason),
        None => format!("accepted: {}", decision.reason),
    }
}

pub fn rejection_line(error: &IntakeError) -> String {
    format!("rejected [{}]: {}", error.kind(), error.user_message())
}

/// Mapped fields with their class; derived categories are marked as such.
pub fn record_table(record: &MappedRecord, schema: &CanonicalSchema) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Field"),
        header_cell("Class"),
        header_cell("Value"),
    ]);
    apply_table_style(&mut table);
    for (name, value) in record.iter() {
        let class = match schema.field(name) {
            Some(field) => Cell::new(field.class),
            None => dim_cell("derived"),
        };
        table.add_row(vec![Cell::new(name), class, value_cell(value)]);
    }
    table
}

pub fn schema_table(schema: &CanonicalSchema) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Field"),
        header_cell("Class"),
        header_cell("Synonyms"),
        header_cell("Derived"),
    ]);
    apply_table_style(&mut table);
    for field in schema.fields() {
        let derived = match &field.derived {
            Some(derived) => Cell::new(&derived.target),
            None => dim_cell("-"),
        };
        table.add_row(vec![
            Cell::new(&field.name),
            Cell::new(field.class),
            Cell::new(field.synonyms.join(", ")),
            derived,
        ]);
    }
    table
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
    table.set_constraints(vec![ColumnConstraint::LowerBoundary(Width::Fixed(30))]);
}

fn value_cell(value: &FieldValue) -> Cell {
    match value {
        FieldValue::Number(_) => Cell::new(value).set_alignment(CellAlignment::Right),
        FieldValue::Text(text) if text.is_empty() => dim_cell("(empty)"),
        FieldValue::Text(_) => Cell::new(value),
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
