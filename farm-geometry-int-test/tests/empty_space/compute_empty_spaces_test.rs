use farm_geometry::{
    compute_empty_spaces, compute_empty_spaces_with_config, compute_empty_spaces_with_diagnostics,
    set_ops, split_into_fields, wkt_to_geometry, BoundingBox, FarmGeometryConfig, Feature, SkipKind,
};
use farm_geometry_int_test::test_util::{
    create_l_shaped_context, create_test_context, feature_area, run_test, total_area,
};

#[test]
fn test_no_fields_returns_farm() {
    run_test(
        || create_test_context(),
        |ctx| {
            let spaces = compute_empty_spaces(ctx.farm(), &[]);
            assert_eq!(spaces.features, vec![ctx.farm().clone()]);
            Ok(())
        },
    )
}

#[test]
fn test_all_fields_leave_nothing() {
    run_test(
        || create_l_shaped_context(),
        |ctx| {
            let fields = split_into_fields(ctx.farm(), 5);
            let spaces = compute_empty_spaces(ctx.farm(), &fields.features);
            assert!(spaces.is_empty(), "unexpected {:?}", spaces);
            Ok(())
        },
    )
}

#[test]
fn test_removed_field_becomes_empty_space() {
    run_test(
        || create_test_context(),
        |ctx| {
            let mut fields = split_into_fields(ctx.farm(), 4).features;
            fields.remove(1);

            let spaces = compute_empty_spaces(ctx.farm(), &fields);
            assert_eq!(spaces.len(), 1);

            let space = &spaces.features[0];
            assert_eq!(space.id().as_deref(), Some("empty-space-0"));
            assert_eq!(space.name().as_deref(), Some("Uncategorized Area"));
            assert_eq!(space.property_string("type").as_deref(), Some("empty-space"));
            assert_eq!(space.property_string("farm").as_deref(), Some("Test Farm"));
            assert_eq!(space.property_string("area").as_deref(), Some("1.24 acres"));

            let bbox = set_ops::bbox(space.geometry.as_ref().unwrap()).unwrap();
            assert!((bbox.min_x - 50.0).abs() < 1e-9);
            assert!((bbox.max_x - 100.0).abs() < 1e-9);
            assert!((feature_area(space) - 5000.0).abs() < 1e-6);
            Ok(())
        },
    )
}

#[test]
fn test_two_gaps_are_numbered() {
    run_test(
        || create_test_context(),
        |ctx| {
            let fields: Vec<Feature> = split_into_fields(ctx.farm(), 4)
                .into_iter()
                .step_by(2)
                .collect();

            let spaces = compute_empty_spaces(ctx.farm(), &fields);
            assert_eq!(spaces.len(), 2);

            let ids: Vec<String> = spaces.iter().filter_map(Feature::id).collect();
            assert_eq!(ids, vec!["empty-space-0", "empty-space-1"]);
            let names: Vec<String> = spaces.iter().filter_map(Feature::name).collect();
            assert_eq!(names, vec!["Uncategorized Area 1", "Uncategorized Area 2"]);
            assert!((total_area(&spaces) - 10000.0).abs() < 1e-6);
            Ok(())
        },
    )
}

#[test]
fn test_overlapping_and_overhanging_fields() {
    run_test(
        || create_test_context(),
        |ctx| {
            let fields = vec![
                Feature::new(wkt_to_geometry("POLYGON ((-50 -50, 120 -50, 120 150, -50 150, -50 -50))")?),
                Feature::new(wkt_to_geometry("POLYGON ((100 0, 150 0, 150 100, 100 100, 100 0))")?),
            ];
            let spaces = compute_empty_spaces(ctx.farm(), &fields);
            assert_eq!(spaces.len(), 1);
            assert!((total_area(&spaces) - 5000.0).abs() < 1e-6);

            let bbox = set_ops::bbox(spaces.features[0].geometry.as_ref().unwrap()).unwrap();
            assert_eq!(bbox, BoundingBox::new(150.0, 0.0, 200.0, 100.0));
            Ok(())
        },
    )
}

#[test]
fn test_unusable_fields_are_reported() {
    run_test(
        || create_test_context(),
        |ctx| {
            let fields = vec![
                Feature::without_geometry(),
                Feature::new(wkt_to_geometry("POLYGON ((0 0, 100 0, 100 100, 0 100, 0 0))")?),
                Feature::new(wkt_to_geometry("POINT (5 5)")?),
            ];
            let (spaces, diagnostics) =
                compute_empty_spaces_with_diagnostics(ctx.farm(), &fields, ctx.config());
            assert_eq!(spaces.len(), 1);
            assert!((total_area(&spaces) - 10000.0).abs() < 1e-6);

            let skipped: Vec<(Option<usize>, SkipKind)> =
                diagnostics.skipped().iter().map(|s| (s.index, s.kind)).collect();
            assert_eq!(
                skipped,
                vec![(Some(0), SkipKind::MissingGeometry), (Some(2), SkipKind::InvalidGeometry)]
            );
            Ok(())
        },
    )
}

#[test]
fn test_farm_without_geometry() {
    run_test(
        || create_test_context(),
        |ctx| {
            let (spaces, diagnostics) = compute_empty_spaces_with_diagnostics(
                &Feature::without_geometry(),
                &[ctx.farm().clone()],
                ctx.config(),
            );
            assert!(spaces.is_empty());
            assert_eq!(diagnostics.skipped()[0].kind, SkipKind::MissingGeometry);
            Ok(())
        },
    )
}

#[test]
fn test_fallback_farm_name_from_config() {
    run_test(
        || create_test_context(),
        |ctx| {
            let unnamed = Feature::new(ctx.farm().geometry.clone().unwrap());
            let field = Feature::new(wkt_to_geometry("POLYGON ((0 0, 100 0, 100 100, 0 100, 0 0))")?);
            let config = FarmGeometryConfig::builder().fallback_farm_name("North Lot").build();

            let spaces = compute_empty_spaces_with_config(&unnamed, &[field], &config);
            assert_eq!(spaces.features[0].property_string("farm").as_deref(), Some("North Lot"));
            Ok(())
        },
    )
}
