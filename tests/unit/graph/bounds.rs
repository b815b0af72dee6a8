use super::*;

fn nodes(points: &[(f64, f64)]) -> Vec<NodePosition> {
    points
        .iter()
        .enumerate()
        .map(|(i, &(x, y))| NodePosition::new(format!("n{i}"), x, y))
        .collect()
}

#[test]
fn zero_margin_is_exact_min_max() {
    let ns = nodes(&[(3.0, -1.0), (-2.0, 8.0), (5.5, 0.0), (0.0, -4.0)]);
    let b = estimate_bounds(&ns, 0.0).unwrap();
    assert_eq!((b.x_min, b.x_max), (-2.0, 5.5));
    assert_eq!((b.y_min, b.y_max), (-4.0, 8.0));
    assert_eq!(b.width, 7.5);
    assert_eq!(b.height, 12.0);
}

#[test]
fn axes_are_trimmed_independently() {
    // x outlier and y outlier live on different nodes; each axis drops its own extremes.
    let ns = nodes(&[
        (1000.0, 0.0),
        (0.0, -900.0),
        (1.0, 1.0),
        (2.0, 2.0),
        (3.0, 3.0),
        (-1.0, 4.0),
        (4.0, -1.0),
        (0.5, 0.5),
        (1.5, 1.5),
        (2.5, 2.5),
    ]);
    let b = estimate_bounds(&ns, 0.1).unwrap();
    assert_eq!((b.x_min, b.x_max), (0.0, 4.0));
    assert_eq!((b.y_min, b.y_max), (-1.0, 3.0));
}

#[test]
fn too_few_survivors_is_geometry_error() {
    let ns = nodes(&[(0.0, 0.0), (1.0, 1.0), (2.0, 2.0)]);
    // floor(3 * 0.4) = 1 dropped per side -> 1 survivor.
    let err = estimate_bounds(&ns, 0.4).unwrap_err();
    assert!(matches!(err, ReelError::Geometry(_)), "{err}");

    let err = estimate_bounds(&nodes(&[(0.0, 0.0)]), 0.0).unwrap_err();
    assert!(matches!(err, ReelError::Geometry(_)));

    assert!(matches!(
        estimate_bounds(&[], 0.0).unwrap_err(),
        ReelError::Geometry(_)
    ));
}

#[test]
fn margin_out_of_range_is_configuration_error() {
    let ns = nodes(&[(0.0, 0.0), (1.0, 1.0)]);
    for m in [-0.1, 0.5, 0.9, f64::NAN] {
        assert!(matches!(
            estimate_bounds(&ns, m).unwrap_err(),
            ReelError::Configuration(_)
        ));
    }
}

#[test]
fn non_finite_positions_are_rejected() {
    let ns = nodes(&[(0.0, 0.0), (f64::NAN, 1.0), (2.0, 2.0)]);
    assert!(matches!(
        estimate_bounds(&ns, 0.0).unwrap_err(),
        ReelError::Geometry(_)
    ));
}

#[test]
fn exposes_bounds_variables() {
    let b = estimate_bounds(&nodes(&[(0.0, 0.0), (4.0, 2.0)]), 0.0).unwrap();
    let vars = b.variables();
    assert!(vars.contains(&("bounds.width", 4.0)));
    assert!(vars.contains(&("bounds.height", 2.0)));
    assert_eq!(b.center(), Point::new(2.0, 1.0));
}
