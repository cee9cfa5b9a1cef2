use farm_geometry::{
    area_in_acres, parse_acres, set_ops, split_into_fields, split_into_fields_with_config,
    split_into_fields_with_diagnostics, AreaMode, FarmGeometryConfig, Feature, Geometry, SkipKind,
};
use farm_geometry_int_test::test_util::{
    create_l_shaped_context, create_test_context, farm_from_wkt, feature_area, run_test,
    total_area, TestContext,
};

#[test]
fn test_split_rectangle_into_vertical_strips() {
    run_test(
        || create_test_context(),
        |ctx| {
            let fields = split_into_fields(ctx.farm(), 4);
            assert_eq!(fields.len(), 4);

            let ids: Vec<String> = fields.iter().filter_map(Feature::id).collect();
            assert_eq!(ids, vec!["test-farm_0", "test-farm_1", "test-farm_2", "test-farm_3"]);

            for (i, field) in fields.iter().enumerate() {
                let bbox = set_ops::bbox(field.geometry.as_ref().unwrap()).unwrap();
                assert!((bbox.min_x - 50.0 * i as f64).abs() < 1e-9);
                assert!((bbox.width() - 50.0).abs() < 1e-9);
                assert!((bbox.height() - 100.0).abs() < 1e-9);
                assert!((feature_area(field) - 5000.0).abs() < 1e-6);
            }

            assert!((total_area(&fields) - 20000.0).abs() < 1e-6);
            Ok(())
        },
    )
}

#[test]
fn test_field_properties() {
    run_test(
        || create_test_context(),
        |ctx| {
            let fields = split_into_fields(ctx.farm(), 2);
            for (i, field) in fields.iter().enumerate() {
                assert_eq!(field.property_string("type").as_deref(), Some("field"));
                assert_eq!(field.property_string("farm").as_deref(), Some("Test Farm"));
                assert_eq!(field.name(), Some(format!("Field {}", i + 1)));

                // 10000 square units
                assert_eq!(field.property_string("area").as_deref(), Some("2.47 acres"));
                let label = field.property_string("area").unwrap();
                assert_eq!(parse_acres(&label), area_in_acres(field));
            }
            Ok(())
        },
    )
}

#[test]
fn test_split_once_returns_original() {
    run_test(
        || create_l_shaped_context(),
        |ctx| {
            let fields = split_into_fields(ctx.farm(), 1);
            assert_eq!(fields.features, vec![ctx.farm().clone()]);

            let fields = split_into_fields(ctx.farm(), 0);
            assert_eq!(fields.features, vec![ctx.farm().clone()]);
            Ok(())
        },
    )
}

#[test]
fn test_split_l_shaped_farm() {
    run_test(
        || create_l_shaped_context(),
        |ctx| {
            let fields = split_into_fields(ctx.farm(), 3);
            assert_eq!(fields.len(), 3);

            // The first strip holds the arm, the others only the base
            let areas: Vec<f64> = fields.iter().map(feature_area).collect();
            assert!((areas[0] - 20000.0).abs() < 1e-6);
            assert!((areas[1] - 10000.0).abs() < 1e-6);
            assert!((areas[2] - 10000.0).abs() < 1e-6);
            Ok(())
        },
    )
}

#[test]
fn test_strips_between_islands_are_dropped() {
    run_test(
        || {
            let farm = farm_from_wkt(
                "islands",
                "Island Farm",
                "MULTIPOLYGON (((0 0, 10 0, 10 10, 0 10, 0 0)), ((90 0, 100 0, 100 10, 90 10, 90 0)))",
            )?;
            Ok(TestContext::new(
                farm,
                FarmGeometryConfig::default(),
            ))
        },
        |ctx| {
            let (fields, diagnostics) =
                split_into_fields_with_diagnostics(ctx.farm(), 5, ctx.config());
            let ids: Vec<String> = fields.iter().filter_map(Feature::id).collect();
            assert_eq!(ids, vec!["islands_0", "islands_4"]);
            assert!(diagnostics.is_clean());
            assert!((total_area(&fields) - 200.0).abs() < 1e-6);
            Ok(())
        },
    )
}

#[test]
fn test_non_polygonal_farm() {
    run_test(
        || create_test_context(),
        |ctx| {
            let line = farm_from_wkt("road", "Road", "LINESTRING (0 0, 100 100)")?;
            let (fields, diagnostics) = split_into_fields_with_diagnostics(&line, 4, ctx.config());
            assert!(fields.is_empty());
            assert_eq!(diagnostics.len(), 1);

            let point = Feature::new(Geometry::point(1.0, 1.0));
            assert!(split_into_fields(&point, 4).is_empty());
            Ok(())
        },
    )
}

#[test]
fn test_spherical_area_labels() {
    run_test(
        || {
            // About 0.01 x 0.01 degrees near Des Moines
            let farm = farm_from_wkt(
                "iowa",
                "Iowa Farm",
                "POLYGON ((-93.62 41.58, -93.61 41.58, -93.61 41.59, -93.62 41.59, -93.62 41.58))",
            )?;
            let config = FarmGeometryConfig::builder()
                .area_mode(AreaMode::Spherical)
                .build();
            Ok(TestContext::new(farm, config))
        },
        |ctx| {
            let fields = split_into_fields_with_config(ctx.farm(), 2, ctx.config());
            assert_eq!(fields.len(), 2);
            for field in &fields {
                let acres = parse_acres(&field.property_string("area").unwrap());
                // Each half is roughly 0.5 km2, about 115 acres
                assert!(acres > 100.0 && acres < 130.0, "got {}", acres);
            }
            Ok(())
        },
    )
}

#[test]
fn test_unbounded_field_count_is_capped() {
    run_test(
        || create_test_context(),
        |ctx| {
            let config = FarmGeometryConfig::builder().max_fields(25).build();
            let (fields, diagnostics) =
                split_into_fields_with_diagnostics(ctx.farm(), usize::MAX, &config);
            assert_eq!(fields.len(), 25);
            assert_eq!(fields.features[24].id().as_deref(), Some("test-farm_24"));
            assert!((total_area(&fields) - 20000.0).abs() < 1e-6);

            let kinds: Vec<SkipKind> = diagnostics.skipped().iter().map(|s| s.kind).collect();
            assert_eq!(kinds, vec![SkipKind::LimitExceeded]);
            Ok(())
        },
    )
}
