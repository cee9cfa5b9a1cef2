use farm_geometry::{set_ops, split_into_fields_with_diagnostics, FarmGeometryConfig, Feature, Geometry};
use farm_geometry_int_test::test_util::{random_convex_polygon, total_area, union_all, within_bbox};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

#[test]
fn test_random_convex_farms() {
    let mut rng = StdRng::seed_from_u64(20240611);
    let config = FarmGeometryConfig::default();

    for round in 0..100 {
        let polygon = random_convex_polygon(&mut rng);
        let farm_bbox = set_ops::bbox(&polygon).unwrap();
        let farm_area = set_ops::planar_area(&polygon);
        let farm = Feature::new(polygon.clone()).with_property("id", format!("random-{}", round));
        let n = rng.random_range(1..=10);

        let (fields, diagnostics) = split_into_fields_with_diagnostics(&farm, n, &config);
        assert!(diagnostics.is_clean(), "round {}: {:?}", round, diagnostics);
        assert!(
            !fields.is_empty() && fields.len() <= n,
            "round {}: {} fields for n = {}",
            round,
            fields.len(),
            n
        );

        let tolerance = 1e-9 * (farm_bbox.width() + farm_bbox.height());
        for field in &fields {
            let geometry = field.geometry.as_ref().unwrap();
            assert!(matches!(geometry, Geometry::Polygon(_)), "round {}", round);
            let bbox = set_ops::bbox(geometry).unwrap();
            assert!(within_bbox(&bbox, &farm_bbox, tolerance), "round {}", round);
        }

        let covered = total_area(&fields);
        assert!(
            (covered - farm_area).abs() <= farm_area * 1e-6,
            "round {}: {} vs {}",
            round,
            covered,
            farm_area
        );

        // The fields cover the farm and nothing outside it
        let sliver = config.sliver_area(&farm_bbox);
        let union = union_all(&fields.features).unwrap().unwrap();
        let uncovered = set_ops::difference(&polygon, &union).unwrap();
        assert_eq!(
            uncovered.and_then(|g| set_ops::drop_slivers(g, sliver)),
            None,
            "round {}: farm not covered",
            round
        );
        let outside = set_ops::difference(&union, &polygon).unwrap();
        assert_eq!(
            outside.and_then(|g| set_ops::drop_slivers(g, sliver)),
            None,
            "round {}: fields leave the farm",
            round
        );

        // Fields do not overlap
        let union_area = set_ops::planar_area(&union);
        assert!(
            (union_area - covered).abs() <= farm_area * 1e-6,
            "round {}: union {} vs sum {}",
            round,
            union_area,
            covered
        );
    }
}
