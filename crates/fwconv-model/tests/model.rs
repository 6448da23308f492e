//! Tests for fwconv-model types.

use fwconv_model::{ExtractedRecord, FieldDefinition, OutputTable, Schema, ViolationKind};

#[test]
fn schema_reports_every_violation() {
    let error = Schema::new(vec![
        FieldDefinition::new(1, 3, "ID", true),
        FieldDefinition::new(0, 2, "", true),
        FieldDefinition::new(9, 4, "Score", false),
    ])
    .unwrap_err();

    assert_eq!(error.for_position(1).count(), 0);
    assert_eq!(error.for_position(2).count(), 2);
    let kinds: Vec<&ViolationKind> = error.for_position(3).map(|v| &v.kind).collect();
    assert_eq!(kinds, vec![&ViolationKind::StartAfterEnd { start: 9, end: 4 }]);

    let message = error.to_string();
    assert!(message.contains("field 3 ('Score')"), "{message}");
}

#[test]
fn schema_keeps_order_and_kept_subset() {
    let schema = Schema::new(vec![
        FieldDefinition::new(1, 2, "A", false),
        FieldDefinition::new(3, 8, "B", true),
        FieldDefinition::new(9, 9, "C", true),
    ])
    .unwrap();

    assert_eq!(schema.len(), 3);
    assert_eq!(schema.kept_indices(), &[1, 2]);
    assert_eq!(
        schema
            .kept_fields()
            .map(|field| field.output_field.as_str())
            .collect::<Vec<_>>(),
        vec!["B", "C"]
    );
    assert_eq!(schema.record_width(), 9);
    assert_eq!(schema.fields()[1].width(), 6);
}

#[test]
fn output_table_collects_records_in_order() {
    let mut table = OutputTable::new(vec!["ID".to_string(), "Score".to_string()]);
    for (id, score) in [("A1", "10"), ("A2", ""), ("A3", "7")] {
        let record: ExtractedRecord = [("ID", id), ("Score", score)].into_iter().collect();
        table.push(record);
    }

    assert_eq!(table.len(), 3);
    assert_eq!(
        table.column_values("Score").collect::<Vec<_>>(),
        vec!["10", "", "7"]
    );
    assert_eq!(table.records()[1].get("ID"), Some("A2"));
}
