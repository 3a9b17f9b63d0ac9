//! End-to-end workshop scenario through the public session API.

use shopfloor::catalog::{Catalog, EquipmentTypeId};
use shopfloor::clearance::{ClearanceTable, clearance_box};
use shopfloor::config::LayoutConfig;
use shopfloor::engine::{Action, LayoutSession};
use shopfloor::footprint::{Bounds, Footprint, Point};
use shopfloor::shop::{PlacementId, Shop};
use shopfloor::snap::normalize_position;

const EPSILON: f64 = 1e-9;

const TABLE_SAW: EquipmentTypeId = EquipmentTypeId(10);
const PLANER: EquipmentTypeId = EquipmentTypeId(11);
const BENCH: EquipmentTypeId = EquipmentTypeId(12);

const CATALOG_JSON: &str = r##"[
    {"id": 10, "name": "Table Saw", "model": "PCS31230", "manufacturer": "SawStop",
     "width_ft": 6.0, "depth_ft": 3.0, "color": "#b33"},
    {"id": 11, "name": "Thickness Planer", "model": "DW735", "width_ft": 2.0, "depth_ft": 2.0},
    {"id": 12, "name": "Workbench"}
]"##;

fn bounds_eq(a: Bounds, b: Bounds) -> bool {
    (a.left - b.left).abs() < EPSILON
        && (a.right - b.right).abs() < EPSILON
        && (a.top - b.top).abs() < EPSILON
        && (a.bottom - b.bottom).abs() < EPSILON
}

/// 40x30 ft shop drawn at 10 px per foot.
fn workshop() -> LayoutSession {
    // Several tests install the subscriber; only the first wins.
    let _ = tracing_subscriber::fmt().with_test_writer().with_max_level(tracing::Level::DEBUG).try_init();
    let catalog = Catalog::from_json(CATALOG_JSON, &ClearanceTable::default()).unwrap();
    let config = LayoutConfig { view_padding: 1.0, ..LayoutConfig::default() };
    let mut session = LayoutSession::new(Shop::new(40.0, 30.0).unwrap(), catalog, config);
    session.set_viewport(400.0, 300.0).unwrap();
    session
}

fn px(x_ft: f64, y_ft: f64) -> Point {
    Point::new(x_ft * 10.0, y_ft * 10.0)
}

fn created(actions: &[Action]) -> PlacementId {
    match actions.first() {
        Some(Action::PlacementCreated { placement }) => placement.id,
        other => panic!("expected PlacementCreated, got {other:?}"),
    }
}

#[test]
fn table_saw_clearance_scenario() {
    let mut session = workshop();

    let first = created(&session.drop_equipment(TABLE_SAW, px(20.0, 15.0)).unwrap());
    let zone = clearance_box(session.placement(first).unwrap()).unwrap();
    assert!(bounds_eq(zone, Bounds { left: 9.0, right: 31.0, top: 13.5, bottom: 16.5 }));
    assert!(session.clearance_issues().is_empty());

    let second = created(&session.drop_equipment(TABLE_SAW, px(5.0, 15.0)).unwrap());
    let zone = clearance_box(session.placement(second).unwrap()).unwrap();
    assert!(bounds_eq(zone, Bounds { left: -6.0, right: 16.0, top: 13.5, bottom: 16.5 }));

    // The second zone crosses the west wall but stops short of the first body at x = 17.
    assert!(session.clearance_issues().contains(&second));
    assert!(!session.clearance_issues().contains(&first));
}

#[test]
fn planer_zone_flags_both_machines() {
    let mut session = workshop();
    let saw = created(&session.drop_equipment(TABLE_SAW, px(20.0, 15.0)).unwrap());
    // Planer zone reaches 6 ft above and below its 2x2 body.
    let planer = created(&session.drop_equipment(PLANER, px(20.0, 21.0)).unwrap());

    let issues = session.clearance_issues();
    assert!(issues.contains(&planer));
    assert!(issues.contains(&saw));
}

#[test]
fn arrange_rotate_and_reload() {
    let mut session = workshop();
    let saw = created(&session.drop_equipment(TABLE_SAW, px(20.0, 15.0)).unwrap());
    let bench = created(&session.drop_equipment(BENCH, px(35.0, 25.0)).unwrap());

    // Drag the bench onto the saw: reverted.
    session.on_pointer_down(px(35.0, 25.0));
    session.on_pointer_move(px(20.0, 15.0));
    let actions = session.on_pointer_up(px(20.0, 15.0));
    assert!(matches!(actions[0], Action::DragReverted { id, blocker: Some(b), .. } if id == bench && b == saw));

    // Drag it next to the saw instead: committed.
    session.on_pointer_down(px(35.0, 25.0));
    session.on_pointer_move(px(30.0, 15.0));
    let actions = session.on_pointer_up(px(30.0, 15.0));
    assert_eq!(actions[0], Action::PlacementMoved { id: bench, center: Point::new(30.0, 15.0) });

    // Turn the saw a quarter.
    session.select(Some(saw)).unwrap();
    let actions = session.rotate_selected(90.0);
    assert!(matches!(actions[0], Action::PlacementRotated { id, .. } if id == saw));

    // Persist and reload into a fresh session.
    let records = session.records();
    let json = serde_json::to_string(&records).unwrap();
    let mut reloaded = workshop();
    reloaded.load_placements(serde_json::from_str(&json).unwrap());
    assert_eq!(reloaded.records(), records);
    assert_eq!(reloaded.placements().len(), 2);
    assert!((reloaded.placements()[0].rotation_deg() - 90.0).abs() < EPSILON);
}

#[test]
fn oversized_equipment_is_centered() {
    let shop = Shop::new(40.0, 30.0).unwrap();
    let footprint = Footprint::new(Point::new(0.0, 0.0), 50.0, 2.0, 0.0);
    let p = normalize_position(5.0, 5.0, &shop, 0.5, &footprint);
    assert!((p.x - 20.0).abs() < EPSILON);
    assert!((p.y - 5.0).abs() < EPSILON);
}

#[test]
fn delete_and_redrop_gets_fresh_id() {
    let mut session = workshop();
    let first = created(&session.drop_equipment(BENCH, px(10.0, 10.0)).unwrap());
    let actions = session.delete_selected();
    assert!(matches!(actions[0], Action::PlacementDeleted { id, .. } if id == first));

    let second = created(&session.drop_equipment(BENCH, px(10.0, 10.0)).unwrap());
    assert_ne!(first, second);
}
