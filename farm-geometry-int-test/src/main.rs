use farm_geometry::{
    compute_empty_spaces, split_into_fields, wkt_to_geometry, Feature, GeometryResult,
};
use farm_geometry_int_test::test_util::{random_convex_polygon, total_area};
use rand::SeedableRng;

fn main() -> GeometryResult<()> {
    println!("Starting stress test...");
    let mut rng = rand::rngs::StdRng::seed_from_u64(7);

    let count = 10000;
    let farms: Vec<Feature> = (0..count)
        .map(|i| {
            Feature::new(random_convex_polygon(&mut rng))
                .with_property("id", format!("farm-{}", i))
                .with_property("name", format!("Farm {}", i))
        })
        .collect();

    let start = std::time::Instant::now();
    let mut field_count = 0;
    let mut all_fields = Vec::with_capacity(count);
    for farm in &farms {
        let fields = split_into_fields(farm, 8);
        field_count += fields.len();
        all_fields.push(fields);
    }
    println!("Split {} farms into {} fields in {:?}", count, field_count, start.elapsed());

    let start = std::time::Instant::now();
    let mut empty_area = 0.0;
    for (farm, fields) in farms.iter().zip(&all_fields) {
        // Keep every third field so each farm has gaps
        let kept: Vec<Feature> = fields.iter().step_by(3).cloned().collect();
        empty_area += total_area(&compute_empty_spaces(farm, &kept));
    }
    println!("Computed empty space ({:.1} sq units) in {:?}", empty_area, start.elapsed());

    let start = std::time::Instant::now();
    let mut vertices = 0;
    for farm in &farms {
        if let Some(geometry) = &farm.geometry {
            vertices += wkt_to_geometry(&geometry.to_string())?.num_coords();
        }
    }
    println!("Round-tripped {} vertices through WKT in {:?}", vertices, start.elapsed());

    Ok(())
}
