use farm_geometry::{
    set_ops, wkt_to_geometry, BoundingBox, Coordinate, FarmGeometryConfig, Feature,
    FeatureCollection, Geometry, GeometryResult,
};
use rand::Rng;
use std::backtrace::Backtrace;
use std::f64::consts::PI;
use std::time::Instant;

/// Runs a test against a freshly built context, reporting errors and panics
/// with the elapsed time and a backtrace.
pub fn run_test<T, B>(before: B, test: T)
where
    T: Fn(TestContext) -> GeometryResult<()> + std::panic::UnwindSafe + std::panic::RefUnwindSafe,
    B: Fn() -> GeometryResult<TestContext> + std::panic::UnwindSafe + std::panic::RefUnwindSafe,
{
    let start_time = Instant::now();

    let result = std::panic::catch_unwind(|| {
        let backtrace = Backtrace::capture();
        match before() {
            Ok(ctx) => test(ctx)
                .map_err(|e| (format!("Test failed: {:?}", e), backtrace.to_string())),
            Err(e) => Err((format!("Before run failed: {:?}", e), backtrace.to_string())),
        }
    });

    let (error, backtrace) = match result {
        Ok(Ok(_)) => return,
        Ok(Err((e, bt))) => (e, bt),
        Err(panic_err) => {
            let err_msg = if let Some(s) = panic_err.downcast_ref::<&str>() {
                s.to_string()
            } else if let Some(s) = panic_err.downcast_ref::<String>() {
                s.clone()
            } else {
                "Unknown panic".to_string()
            };
            (format!("Panic: {}", err_msg), Backtrace::capture().to_string())
        }
    };

    eprintln!("\n==================== TEST FAILED ====================");
    eprintln!("Failed after {:?}", start_time.elapsed());
    eprintln!("Error: {}", error);
    if !backtrace.is_empty() && !backtrace.contains("disabled") {
        eprintln!("\nBacktrace:\n{}", backtrace);
    }
    eprintln!("=====================================================\n");

    panic!("Test failed. Last error: {}", error);
}

#[derive(Clone)]
pub struct TestContext {
    farm: Feature,
    config: FarmGeometryConfig,
}

impl TestContext {
    pub fn new(farm: Feature, config: FarmGeometryConfig) -> Self {
        Self { farm, config }
    }

    pub fn farm(&self) -> &Feature {
        &self.farm
    }

    pub fn config(&self) -> &FarmGeometryConfig {
        &self.config
    }
}

/// A 200 x 100 rectangular farm with default configuration.
pub fn create_test_context() -> GeometryResult<TestContext> {
    let farm = farm_from_wkt(
        "test-farm",
        "Test Farm",
        "POLYGON ((0 0, 200 0, 200 100, 0 100, 0 0))",
    )?;
    Ok(TestContext::new(farm, FarmGeometryConfig::default()))
}

/// An L-shaped farm: a 300 x 100 base with a 100 x 100 arm on the left.
pub fn create_l_shaped_context() -> GeometryResult<TestContext> {
    let farm = farm_from_wkt(
        "l-farm",
        "L Farm",
        "POLYGON ((0 0, 300 0, 300 100, 100 100, 100 200, 0 200, 0 0))",
    )?;
    Ok(TestContext::new(farm, FarmGeometryConfig::default()))
}

/// Builds a named farm feature from WKT.
pub fn farm_from_wkt(id: &str, name: &str, wkt: &str) -> GeometryResult<Feature> {
    Ok(Feature::new(wkt_to_geometry(wkt)?)
        .with_property("id", id)
        .with_property("name", name))
}

/// Random convex polygon: vertices on an ellipse at sorted random angles.
pub fn random_convex_polygon<R: Rng>(rng: &mut R) -> Geometry {
    let center_x = rng.random_range(-1000.0..1000.0);
    let center_y = rng.random_range(-1000.0..1000.0);
    let radius_x = rng.random_range(1.0..500.0);
    let radius_y = rng.random_range(1.0..500.0);
    let vertices: usize = rng.random_range(3..=24);

    // One vertex per equal sector, so no two vertices coincide
    let sector = 2.0 * PI / vertices as f64;
    let mut ring: Vec<Coordinate> = (0..vertices)
        .map(|i| {
            let angle = sector * i as f64 + rng.random_range(0.1..0.9) * sector;
            Coordinate::new(
                center_x + radius_x * angle.cos(),
                center_y + radius_y * angle.sin(),
            )
        })
        .collect();
    ring.push(ring[0]);

    Geometry::Polygon(vec![ring])
}

/// Sum of the planar areas of every feature geometry.
pub fn total_area(collection: &FeatureCollection) -> f64 {
    collection
        .iter()
        .filter_map(|feature| feature.geometry.as_ref())
        .map(set_ops::planar_area)
        .sum()
}

/// Planar area of a feature's geometry, zero when it has none.
pub fn feature_area(feature: &Feature) -> f64 {
    feature
        .geometry
        .as_ref()
        .map(set_ops::planar_area)
        .unwrap_or(0.0)
}

/// True when `inner` lies within `outer`, allowing for rounding in the
/// boolean engine.
pub fn within_bbox(inner: &BoundingBox, outer: &BoundingBox, tolerance: f64) -> bool {
    inner.min_x >= outer.min_x - tolerance
        && inner.min_y >= outer.min_y - tolerance
        && inner.max_x <= outer.max_x + tolerance
        && inner.max_y <= outer.max_y + tolerance
}

/// Union of every feature geometry, `None` when nothing is covered.
pub fn union_all(features: &[Feature]) -> GeometryResult<Option<Geometry>> {
    let mut covered: Option<Geometry> = None;
    for geometry in features.iter().filter_map(|feature| feature.geometry.as_ref()) {
        covered = match covered {
            None => Some(geometry.clone()),
            Some(acc) => set_ops::union(&acc, geometry)?,
        };
    }
    Ok(covered)
}
