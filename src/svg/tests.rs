use super::*;
use crate::core::PathElement;
use approx::assert_relative_eq;

fn samples(path: &Path) -> Vec<DVec2> {
    path.iter()
        .filter_map(|e| match e {
            PathElement::Sample(p) => Some(*p),
            PathElement::PenLift => None,
        })
        .collect()
}

#[test]
fn test_two_shapes_are_separated_by_one_pen_lift() {
    let svg = r#"
    <svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 100 100">
        <line x1="0" y1="0" x2="10" y2="0"/>
        <polyline points="0,20 0,30"/>
    </svg>
    "#;

    let path = import_svg(svg, &SvgImportOptions::default()).expect("Import fehlgeschlagen");

    assert_eq!(path.pen_lift_count(), 1);
    assert_eq!(path.elements()[0], PathElement::Sample(DVec2::ZERO));
    let lift_index = path
        .iter()
        .position(|e| *e == PathElement::PenLift)
        .unwrap();
    assert_eq!(lift_index, 6); // 0, 2, 4, 6, 8, 10
    assert_eq!(
        path.elements()[lift_index + 1],
        PathElement::Sample(DVec2::new(0.0, 20.0))
    );
}

#[test]
fn test_sample_spacing_respects_step() {
    let svg = r#"<svg><path d="M0 0 C 0 40 40 40 40 0"/></svg>"#;
    let options = SvgImportOptions {
        sample_step: 1.5,
        ..SvgImportOptions::default()
    };

    let path = import_svg(svg, &options).unwrap();
    let points = samples(&path);

    assert!(points.len() > 20);
    for pair in points.windows(2) {
        assert!(pair[0].distance(pair[1]) <= 1.5 + 1e-9);
    }
    assert_eq!(*points.last().unwrap(), DVec2::new(40.0, 0.0));
}

#[test]
fn test_transform_scale_flip_offset() {
    let svg = r#"<svg><line x1="10" y1="20" x2="10" y2="20.5"/></svg>"#;
    let options = SvgImportOptions {
        sample_step: 10.0,
        scale: 2.0,
        flip_y: true,
        offset: [-5.0, 300.0],
    };

    let path = import_svg(svg, &options).unwrap();
    let first = samples(&path)[0];

    assert_relative_eq!(first.x, 15.0);
    assert_relative_eq!(first.y, 260.0);
}

#[test]
fn test_polygon_is_closed() {
    let svg = r#"<svg><polygon points="0,0 4,0 4,4"/></svg>"#;
    let path = import_svg(svg, &SvgImportOptions::default()).unwrap();
    let points = samples(&path);
    assert_eq!(*points.last().unwrap(), DVec2::ZERO);
}

#[test]
fn test_unknown_elements_are_ignored() {
    let svg = r#"<svg><g><rect width="10" height="10"/><text>hi</text></g></svg>"#;
    let path = import_svg(svg, &SvgImportOptions::default()).unwrap();
    assert!(path.is_empty());
}

#[test]
fn test_broken_path_data_names_element() {
    let svg = r#"<svg><path d="M 0 0 L 10"/></svg>"#;
    let err = import_svg(svg, &SvgImportOptions::default()).expect_err("muss fehlschlagen");
    assert!(format!("{err:#}").contains("<path>"));
}

#[test]
fn test_invalid_options_are_rejected() {
    let options = SvgImportOptions {
        sample_step: 0.0,
        ..SvgImportOptions::default()
    };
    assert!(import_svg("<svg/>", &options).is_err());
}

#[test]
fn test_arc_is_sampled_along_the_curve() {
    let svg = r#"<svg><path d="M 0 0 A 50 50 0 0 1 100 0"/></svg>"#;
    let path = import_svg(svg, &SvgImportOptions::default()).unwrap();
    let points = samples(&path);

    // Halbkreis: Länge ≈ 157, also deutlich mehr Punkte als die Sehne (100) hätte
    assert!(points.len() > 75);
    let bulge = points.iter().map(|p| p.y.abs()).fold(0.0, f64::max);
    assert_relative_eq!(bulge, 50.0, epsilon = 0.5);
}

#[test]
fn test_overflowing_line_is_rejected_without_panic() {
    let svg = r#"<svg><line x1="0" y1="0" x2="1e999" y2="0"/></svg>"#;
    let err = import_svg(svg, &SvgImportOptions::default()).expect_err("1e999 ist unendlich");
    assert!(format!("{err:#}").contains("<line>"));
}

#[test]
fn test_huge_finite_line_is_rejected() {
    let svg = r#"<svg><line x1="0" y1="0" x2="1e300" y2="0"/></svg>"#;
    let err = import_svg(svg, &SvgImportOptions::default()).expect_err("zu lang");
    assert!(format!("{err:#}").contains("Teilpfad 0"));
}

#[test]
fn test_transform_overflow_is_rejected() {
    let svg = r#"<svg><line x1="0" y1="0" x2="1e10" y2="0"/></svg>"#;
    let options = SvgImportOptions {
        sample_step: 1e308,
        scale: 1e300,
        ..SvgImportOptions::default()
    };
    assert!(import_svg(svg, &options).is_err());
}
