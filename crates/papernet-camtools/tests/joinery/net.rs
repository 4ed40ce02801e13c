use papernet_camtools::{pyramid_net, render_svg, DashSpec, FaceGeometry, NetSpec, SvgStyle};
use papernet_designer::PathCommand;

#[test]
fn test_hexagonal_pyramid() {
    let spec = NetSpec {
        face: FaceGeometry::new([0.8, 1.0, 1.0], 6),
        ..NetSpec::default()
    };
    let dieline = pyramid_net(&spec).unwrap();
    let pieces = dieline.cut.subpaths();
    // outline plus a hole on every other face
    assert_eq!(pieces.len(), 4);
    assert_eq!(pieces[0].commands().last(), Some(&PathCommand::Close));
    for hole in &pieces[1..] {
        assert_eq!(hole.commands().last(), Some(&PathCommand::Close));
    }
}

#[test]
fn test_faces_beyond_a_full_turn_fail() {
    let spec = NetSpec {
        face: FaceGeometry::new([1.0, 1.0, 1.0], 8),
        ..NetSpec::default()
    };
    let err = pyramid_net(&spec).unwrap_err();
    assert!(err.is_geometry_error());
}

#[test]
fn test_dashed_interface_folds() {
    let solid = pyramid_net(&NetSpec::default()).unwrap();
    let dashed = pyramid_net(&NetSpec {
        interface_dash: Some(DashSpec::new(vec![4.0, 1.0, 1.0, 1.0], 7.0, 0.0).unwrap()),
        ..NetSpec::default()
    })
    .unwrap();
    assert!(dashed.score.subpaths().len() > solid.score.subpaths().len());
    assert_eq!(dashed.cut, solid.cut);
}

#[test]
fn test_net_renders_to_svg() {
    let dieline = pyramid_net(&NetSpec::default()).unwrap();
    let svg = render_svg(&dieline, &SvgStyle::default()).unwrap();
    assert!(svg.starts_with("<?xml"));
    assert_eq!(svg.matches("<path ").count(), 2);
    assert!(svg.contains("mm\" viewBox="));
}
