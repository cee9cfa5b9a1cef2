use farm_geometry::{
    compute_empty_spaces, geometry_to_wkt, split_into_fields, wkt_to_geometry, Geometry,
    GeometryError, GeometryKind,
};
use farm_geometry_int_test::test_util::{create_l_shaped_context, run_test};

#[test]
fn test_decode_every_kind() {
    let cases = [
        ("POINT (30 10)", GeometryKind::Point),
        ("LINESTRING (30 10, 10 30, 40 40)", GeometryKind::LineString),
        (
            "POLYGON ((35 10, 45 45, 15 40, 10 20, 35 10), (20 30, 35 35, 30 20, 20 30))",
            GeometryKind::Polygon,
        ),
        ("MULTIPOINT ((10 40), (40 30), (20 20), (30 10))", GeometryKind::MultiPoint),
        (
            "MULTILINESTRING ((10 10, 20 20, 10 40), (40 40, 30 30, 40 20, 30 10))",
            GeometryKind::MultiLineString,
        ),
        (
            "MULTIPOLYGON (((40 40, 20 45, 45 30, 40 40)), ((20 35, 10 30, 10 10, 30 5, 45 20, 20 35), (30 20, 20 15, 20 25, 30 20)))",
            GeometryKind::MultiPolygon,
        ),
    ];

    for (wkt, kind) in cases {
        let geometry = wkt_to_geometry(wkt).unwrap();
        assert_eq!(geometry.kind(), kind, "{}", wkt);
        assert_eq!(geometry_to_wkt(&geometry), wkt);
    }
}

#[test]
fn test_multipolygon_member_structure() {
    let geometry = wkt_to_geometry(
        "MULTIPOLYGON (((0 0, 4 0, 4 4, 0 4, 0 0), (1 1, 2 1, 2 2, 1 1)), ((10 10, 12 10, 12 12, 10 10)))",
    )
    .unwrap();

    match geometry {
        Geometry::MultiPolygon(polygons) => {
            assert_eq!(polygons.len(), 2);
            assert_eq!(polygons[0].len(), 2);
            assert_eq!(polygons[1].len(), 1);
            assert_eq!(polygons[1][0].len(), 4);
        }
        other => panic!("Expected MultiPolygon, got {:?}", other),
    }
}

#[test]
fn test_invalid_wkt_is_an_error() {
    for wkt in [
        "FOO (1 2)",
        "POINT 1 2",
        "POINT (a b)",
        "",
        "POLYGON",
        "LINESTRING (1 2)",
        "POLYGON (1 2, 3 4, 5 6, 1 2)",
        "MULTIPOLYGON ((1 2, 3 4, 5 6, 1 2)",
    ] {
        match wkt_to_geometry(wkt) {
            Err(GeometryError::InvalidWkt(_)) => {}
            other => panic!("Expected InvalidWkt for '{}', got {:?}", wkt, other),
        }
    }
}

#[test]
fn test_operation_results_round_trip() {
    run_test(
        || create_l_shaped_context(),
        |ctx| {
            let fields = split_into_fields(ctx.farm(), 4);
            let kept: Vec<_> = fields.features[..3].to_vec();
            let spaces = compute_empty_spaces(ctx.farm(), &kept);

            for feature in fields.iter().chain(spaces.iter()) {
                let geometry = feature.geometry.as_ref().unwrap();
                let decoded = wkt_to_geometry(&geometry_to_wkt(geometry))?;
                assert_eq!(&decoded, geometry);
            }
            Ok(())
        },
    )
}
