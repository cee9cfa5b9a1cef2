use crate::geometry::{Coordinate, Geometry};

/// A 2D bounding box represented by minimum and maximum coordinates.
///
/// `BoundingBox` defines a rectangular area using the minimum (min_x, min_y)
/// and maximum (max_x, max_y) corners. The partitioner slices a farm's
/// bounding box into equal strips, see [`BoundingBox::strips`].
///
/// # Examples
///
/// ```rust
/// use farm_geometry::BoundingBox;
///
/// let bbox = BoundingBox::new(0.0, 0.0, 100.0, 50.0);
/// let strips = bbox.strips(4);
/// assert_eq!(strips.len(), 4);
/// assert_eq!(strips[0], BoundingBox::new(0.0, 0.0, 25.0, 50.0));
/// ```
#[derive(Clone, PartialEq, Default, Debug, serde::Deserialize, serde::Serialize)]
pub struct BoundingBox {
    /// Minimum X coordinate
    pub min_x: f64,
    /// Minimum Y coordinate
    pub min_y: f64,
    /// Maximum X coordinate
    pub max_x: f64,
    /// Maximum Y coordinate
    pub max_y: f64,
}

impl std::fmt::Display for BoundingBox {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "BoundingBox({}, {}, {}, {})", self.min_x, self.min_y, self.max_x, self.max_y)
    }
}

/// Direction in which a bounding box is cut into strips.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SliceAxis {
    /// Vertical strips, cut along X.
    X,
    /// Horizontal strips, cut along Y.
    Y,
}

impl BoundingBox {
    /// Creates a new bounding box with the specified coordinates.
    pub fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> BoundingBox {
        BoundingBox {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    /// Computes the smallest box containing every coordinate.
    ///
    /// Returns `None` for an empty iterator.
    pub fn from_coords<'a, I>(coords: I) -> Option<BoundingBox>
    where
        I: IntoIterator<Item = &'a Coordinate>,
    {
        let mut iter = coords.into_iter();
        let first = iter.next()?;
        let mut bbox = BoundingBox::new(first.x, first.y, first.x, first.y);
        for coord in iter {
            bbox.min_x = bbox.min_x.min(coord.x);
            bbox.min_y = bbox.min_y.min(coord.y);
            bbox.max_x = bbox.max_x.max(coord.x);
            bbox.max_y = bbox.max_y.max(coord.y);
        }
        Some(bbox)
    }

    /// Returns the width of the bounding box.
    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    /// Returns the height of the bounding box.
    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    /// Returns the area of the bounding box.
    pub fn area(&self) -> f64 {
        self.width() * self.height()
    }

    /// Returns the rectangle covering this box as a closed polygon.
    pub fn to_polygon(&self) -> Geometry {
        Geometry::rectangle(self.min_x, self.min_y, self.max_x, self.max_y)
    }

    /// Axis along which the box is cut so that strips stay close to square.
    ///
    /// Wider-than-tall boxes are cut along X; everything else along Y.
    pub fn slice_axis(&self) -> SliceAxis {
        if self.width() > self.height() {
            SliceAxis::X
        } else {
            SliceAxis::Y
        }
    }

    /// Cuts the box into `n` equal strips along [`Self::slice_axis`].
    ///
    /// The last strip always ends exactly on the box's maximum edge.
    /// Returns an empty vector for `n == 0`.
    pub fn strips(&self, n: usize) -> Vec<BoundingBox> {
        let axis = self.slice_axis();
        let (start, end) = match axis {
            SliceAxis::X => (self.min_x, self.max_x),
            SliceAxis::Y => (self.min_y, self.max_y),
        };
        let step = (end - start) / n as f64;

        (0..n)
            .map(|i| {
                let lo = start + step * i as f64;
                let hi = if i + 1 == n { end } else { start + step * (i + 1) as f64 };
                match axis {
                    SliceAxis::X => BoundingBox::new(lo, self.min_y, hi, self.max_y),
                    SliceAxis::Y => BoundingBox::new(self.min_x, lo, self.max_x, hi),
                }
            })
            .collect()
    }
}
