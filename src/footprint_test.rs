#![allow(clippy::float_cmp)]

use super::*;

const EPSILON: f64 = 1e-9;

fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < EPSILON
}

fn saw_at(x: f64, y: f64, rotation: f64) -> Footprint {
    Footprint::new(Point::new(x, y), 6.0, 3.0, rotation)
}

// --- normalize_rotation ---

#[test]
fn normalize_rotation_keeps_in_range_values() {
    assert_eq!(normalize_rotation(0.0), 0.0);
    assert_eq!(normalize_rotation(45.0), 45.0);
    assert_eq!(normalize_rotation(359.5), 359.5);
}

#[test]
fn normalize_rotation_wraps_full_turns() {
    assert_eq!(normalize_rotation(360.0), 0.0);
    assert_eq!(normalize_rotation(450.0), 90.0);
    assert_eq!(normalize_rotation(720.0), 0.0);
}

#[test]
fn normalize_rotation_wraps_negative_angles() {
    assert_eq!(normalize_rotation(-90.0), 270.0);
    assert_eq!(normalize_rotation(-360.0), 0.0);
    assert_eq!(normalize_rotation(-450.0), 270.0);
}

#[test]
fn normalize_rotation_tiny_negative_stays_below_360() {
    let r = normalize_rotation(-1e-20);
    assert!((0.0..360.0).contains(&r));
}

#[test]
fn footprint_new_normalizes_rotation() {
    assert_eq!(saw_at(0.0, 0.0, -90.0).rotation_deg, 270.0);
}

// --- bounding_box ---

#[test]
fn bounding_box_unrotated_matches_footprint() {
    let b = saw_at(20.0, 15.0, 0.0).bounding_box();
    assert_eq!(b, Bounds { left: 17.0, right: 23.0, top: 13.5, bottom: 16.5 });
}

#[test]
fn bounding_box_exact_at_quarter_turns() {
    for rotation in [0.0, 90.0, 180.0, 270.0] {
        let b = saw_at(10.0, 10.0, rotation).bounding_box();
        let swapped = rotation == 90.0 || rotation == 270.0;
        let (w, h) = if swapped { (3.0, 6.0) } else { (6.0, 3.0) };
        assert_eq!(b.width(), w, "width at {rotation}");
        assert_eq!(b.height(), h, "height at {rotation}");
    }
}

#[test]
fn bounding_box_square_at_45_grows_by_sqrt2() {
    let b = Footprint::new(Point::new(0.0, 0.0), 4.0, 4.0, 45.0).bounding_box();
    let expected = 4.0 * std::f64::consts::SQRT_2;
    assert!(approx_eq(b.width(), expected));
    assert!(approx_eq(b.height(), expected));
}

#[test]
fn bounding_box_centered_on_footprint() {
    let b = saw_at(7.5, -3.0, 30.0).bounding_box();
    let c = b.center();
    assert!(approx_eq(c.x, 7.5));
    assert!(approx_eq(c.y, -3.0));
}

#[test]
fn bounding_box_free_function_matches_method() {
    let f = saw_at(4.0, 5.0, 60.0);
    assert_eq!(bounding_box(f.center, f.width_ft, f.depth_ft, f.rotation_deg), f.bounding_box());
}

#[test]
fn half_extents_at_30_degrees() {
    let (ex, ey) = half_extents(6.0, 3.0, 30.0);
    let (sin, cos) = 30f64.to_radians().sin_cos();
    assert!(approx_eq(ex, cos * 3.0 + sin * 1.5));
    assert!(approx_eq(ey, sin * 3.0 + cos * 1.5));
}

// --- Bounds ---

#[test]
fn bounds_overlap_when_interiors_intersect() {
    let a = Bounds { left: 0.0, right: 2.0, top: 0.0, bottom: 2.0 };
    let b = Bounds { left: 1.0, right: 3.0, top: 1.0, bottom: 3.0 };
    assert!(a.overlaps(&b));
    assert!(b.overlaps(&a));
}

#[test]
fn bounds_touching_edges_do_not_overlap() {
    let a = Bounds { left: 0.0, right: 2.0, top: 0.0, bottom: 2.0 };
    let right = Bounds { left: 2.0, right: 4.0, top: 0.0, bottom: 2.0 };
    let below = Bounds { left: 0.0, right: 2.0, top: 2.0, bottom: 4.0 };
    assert!(!a.overlaps(&right));
    assert!(!a.overlaps(&below));
}

#[test]
fn bounds_containment_overlaps() {
    let outer = Bounds { left: 0.0, right: 10.0, top: 0.0, bottom: 10.0 };
    let inner = Bounds { left: 4.0, right: 5.0, top: 4.0, bottom: 5.0 };
    assert!(outer.overlaps(&inner));
    assert!(inner.overlaps(&outer));
}

#[test]
fn bounds_within_shop_inclusive_of_walls() {
    let flush = Bounds { left: 0.0, right: 40.0, top: 0.0, bottom: 30.0 };
    assert!(flush.within_shop(40.0, 30.0));
    let out = Bounds { left: -0.1, right: 5.0, top: 0.0, bottom: 5.0 };
    assert!(!out.within_shop(40.0, 30.0));
}

// --- contains_point ---

#[test]
fn contains_point_unrotated_inclusive_edges() {
    let f = saw_at(10.0, 10.0, 0.0);
    assert!(f.contains_point(Point::new(10.0, 10.0)));
    assert!(f.contains_point(Point::new(13.0, 11.5)));
    assert!(!f.contains_point(Point::new(13.1, 10.0)));
}

#[test]
fn contains_point_respects_rotation() {
    // 6x3 turned a quarter: now 3 wide, 6 deep.
    let f = saw_at(10.0, 10.0, 90.0);
    assert!(f.contains_point(Point::new(10.0, 12.5)));
    assert!(!f.contains_point(Point::new(12.5, 10.0)));
}

#[test]
fn contains_point_rejects_bounding_box_corner_at_45() {
    let f = Footprint::new(Point::new(0.0, 0.0), 4.0, 4.0, 45.0);
    let b = f.bounding_box();
    let corner = Point::new(b.right - 0.1, b.bottom - 0.1);
    assert!(!f.contains_point(corner));
    assert!(f.contains_point(Point::new(2.5, 0.0)));
}

// --- corners / to_world ---

#[test]
fn corners_unrotated() {
    let c = saw_at(0.0, 0.0, 0.0).corners();
    assert_eq!(c[0], Point::new(-3.0, -1.5));
    assert_eq!(c[2], Point::new(3.0, 1.5));
}

#[test]
fn corners_lie_on_bounding_box_at_quarter_turn() {
    let f = saw_at(5.0, 5.0, 90.0);
    let b = f.bounding_box();
    for p in f.corners() {
        assert!(approx_eq(p.x, b.left) || approx_eq(p.x, b.right));
        assert!(approx_eq(p.y, b.top) || approx_eq(p.y, b.bottom));
    }
}

#[test]
fn to_world_rotates_clockwise_on_screen() {
    // Local +x points down the screen after a quarter turn.
    let p = saw_at(0.0, 0.0, 90.0).to_world(1.0, 0.0);
    assert!(approx_eq(p.x, 0.0));
    assert!(approx_eq(p.y, 1.0));
}

#[test]
fn at_moves_center_only() {
    let f = saw_at(1.0, 1.0, 30.0).at(Point::new(4.0, 5.0));
    assert_eq!(f.center, Point::new(4.0, 5.0));
    assert_eq!(f.rotation_deg, 30.0);
    assert_eq!(f.width_ft, 6.0);
}

#[test]
fn axis_aligned_detection() {
    assert!(saw_at(0.0, 0.0, 0.0).is_axis_aligned());
    assert!(saw_at(0.0, 0.0, 270.0).is_axis_aligned());
    assert!(!saw_at(0.0, 0.0, 15.0).is_axis_aligned());
}

#[test]
fn sin_cos_exact_on_quarter_turns() {
    assert_eq!(sin_cos_deg(90.0), (1.0, 0.0));
    assert_eq!(sin_cos_deg(180.0), (0.0, -1.0));
    assert_eq!(sin_cos_deg(-90.0), (-1.0, 0.0));
}
