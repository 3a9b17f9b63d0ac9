use super::*;

fn equipment(id: i64, name: &str, model: &str) -> EquipmentType {
    EquipmentType {
        id: EquipmentTypeId(id),
        name: name.into(),
        model: model.into(),
        manufacturer: String::new(),
        width_ft: 4.0,
        depth_ft: 2.0,
        color: "#336699".into(),
    }
}

#[test]
fn load_resolves_clearance_once() {
    let table = ClearanceTable::default();
    let catalog = Catalog::load(vec![equipment(1, "Table Saw", ""), equipment(2, "Workbench", "")], &table).unwrap();

    let saw = catalog.get(EquipmentTypeId(1)).unwrap();
    assert_eq!(saw.kind, Some(EquipmentKind::TableSaw));
    assert_eq!(saw.clearance, Some(ClearanceMargins::new(8.0, 8.0, 0.0, 0.0)));

    let bench = catalog.get(EquipmentTypeId(2)).unwrap();
    assert_eq!(bench.kind, None);
    assert_eq!(bench.clearance, None);
}

#[test]
fn load_with_empty_table_has_no_clearance() {
    let catalog = Catalog::load(vec![equipment(1, "Table Saw", "")], &ClearanceTable::empty()).unwrap();
    let saw = catalog.get(EquipmentTypeId(1)).unwrap();
    assert_eq!(saw.kind, Some(EquipmentKind::TableSaw));
    assert!(saw.clearance.is_none());
}

#[test]
fn load_rejects_non_positive_footprint() {
    let mut bad = equipment(1, "Broken", "");
    bad.depth_ft = 0.0;
    let err = Catalog::load(vec![bad], &ClearanceTable::default()).unwrap_err();
    assert!(matches!(err, LayoutError::InvalidDimensions { .. }));
}

#[test]
fn get_unknown_type_errors() {
    let catalog = Catalog::new();
    let err = catalog.get(EquipmentTypeId(42)).unwrap_err();
    assert!(matches!(err, LayoutError::UnknownEquipmentType(EquipmentTypeId(42))));
    assert_eq!(err.to_string(), "unknown equipment type: 42");
}

#[test]
fn insert_replaces_existing_type() {
    let table = ClearanceTable::default();
    let mut catalog = Catalog::new();
    catalog.insert(equipment(7, "Planer", ""), &table).unwrap();
    catalog.insert(equipment(7, "Workbench", ""), &table).unwrap();
    assert_eq!(catalog.len(), 1);
    assert!(catalog.get(EquipmentTypeId(7)).unwrap().clearance.is_none());
}

#[test]
fn from_json_applies_defaults() {
    let raw = r#"[{"id": 3, "name": "Drill Press"}]"#;
    let catalog = Catalog::from_json(raw, &ClearanceTable::default()).unwrap();
    let entry = catalog.get(EquipmentTypeId(3)).unwrap();
    assert_eq!(entry.equipment.width_ft, 3.0);
    assert_eq!(entry.equipment.depth_ft, 3.0);
    assert_eq!(entry.equipment.color, "#aaa");
    assert_eq!(entry.equipment.model, "");
    assert_eq!(entry.clearance, Some(ClearanceMargins::new(0.0, 0.0, 0.0, 2.0)));
}

#[test]
fn from_json_malformed_errors() {
    let err = Catalog::from_json("not json", &ClearanceTable::default()).unwrap_err();
    assert!(matches!(err, LayoutError::Json(_)));
}

#[test]
fn equipment_ref_copies_identity() {
    let catalog = Catalog::load(vec![equipment(5, "Jointer", "JWJ-8CS")], &ClearanceTable::default()).unwrap();
    let r = catalog.get(EquipmentTypeId(5)).unwrap().equipment_ref();
    assert_eq!(r.type_id, EquipmentTypeId(5));
    assert_eq!(r.name, "Jointer");
    assert_eq!(r.model, "JWJ-8CS");
}

#[test]
fn empty_catalog() {
    let catalog = Catalog::new();
    assert!(catalog.is_empty());
    assert_eq!(catalog.len(), 0);
}
