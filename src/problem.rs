//! Problem instances: city coordinates.
//!
//! A TSP instance is a list of [`City`] points indexed `0..n`. City 0 is the
//! fixed start and end of every tour.
//!
//! [`generate_cities`] builds synthetic instances inside a rectangular
//! drawing area, either scattered uniformly or arranged on a circle (a
//! layout whose optimal tour is known: the polygon perimeter).

use crate::error::{Error, Result};
use rand::Rng;
use std::f64::consts::PI;

/// Margin kept between generated cities and the edge of the drawing area.
pub const LAYOUT_PADDING: f64 = 80.0;

/// An immutable point in the plane.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct City {
    pub x: f64,
    pub y: f64,
}

impl City {
    /// Creates a city at `(x, y)`.
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Straight-line distance to `other`.
    #[inline]
    pub fn distance_to(&self, other: &City) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

impl From<(f64, f64)> for City {
    fn from((x, y): (f64, f64)) -> Self {
        Self::new(x, y)
    }
}

/// How [`generate_cities`] places points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CityLayout {
    /// Uniformly random inside the padded area.
    #[default]
    Random,

    /// Evenly spaced on a circle centred in the padded area.
    Circle,
}

/// Generates `n` cities inside a `width × height` area.
///
/// Points stay [`LAYOUT_PADDING`] away from every edge. If the area is too
/// small to leave any interior, all points collapse onto the padding corner
/// (random layout) or the centre (circle layout).
pub fn generate_cities<R: Rng>(
    layout: CityLayout,
    n: usize,
    width: f64,
    height: f64,
    rng: &mut R,
) -> Vec<City> {
    let inner_w = (width - 2.0 * LAYOUT_PADDING).max(0.0);
    let inner_h = (height - 2.0 * LAYOUT_PADDING).max(0.0);

    match layout {
        CityLayout::Random => (0..n)
            .map(|_| {
                let x = LAYOUT_PADDING + inner_w * rng.random::<f64>();
                let y = LAYOUT_PADDING + inner_h * rng.random::<f64>();
                City::new(x, y)
            })
            .collect(),
        CityLayout::Circle => {
            let radius = inner_w.min(inner_h) / 2.5;
            let cx = LAYOUT_PADDING + inner_w / 2.0;
            let cy = LAYOUT_PADDING + inner_h / 2.0;
            (0..n)
                .map(|i| {
                    let angle = 2.0 * PI * i as f64 / n as f64;
                    City::new(cx + radius * angle.cos(), cy + radius * angle.sin())
                })
                .collect()
        }
    }
}

/// Checks that `cities` can form a tour with a finite cost.
///
/// Requires at least two cities with finite coordinates. The bounding-box
/// diagonal times the city count bounds every circuit length, so that
/// product must also be finite.
pub fn validate_cities(cities: &[City]) -> Result<()> {
    if cities.len() < 2 {
        return Err(Error::TooFewCities {
            count: cities.len(),
        });
    }
    if let Some(index) = cities
        .iter()
        .position(|c| !c.x.is_finite() || !c.y.is_finite())
    {
        return Err(Error::NonFiniteCoordinate { index });
    }

    let (mut min_x, mut min_y) = (f64::INFINITY, f64::INFINITY);
    let (mut max_x, mut max_y) = (f64::NEG_INFINITY, f64::NEG_INFINITY);
    for c in cities {
        min_x = min_x.min(c.x);
        min_y = min_y.min(c.y);
        max_x = max_x.max(c.x);
        max_y = max_y.max(c.y);
    }
    let diagonal = (max_x - min_x).hypot(max_y - min_y);
    if !(diagonal * cities.len() as f64).is_finite() {
        return Err(Error::CoordinateSpanTooLarge);
    }
    Ok(())
}
