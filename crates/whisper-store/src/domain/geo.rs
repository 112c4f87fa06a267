//! Great-circle distance and coarse grid cells.
//!
//! The spatial index buckets messages into 1°×1° latitude/longitude cells.
//! A radius query computes a conservative superset of cells from the radius
//! bounding box, then applies the exact haversine post-filter, so the cell
//! cover only has to be a superset, never exact.

use super::entities::Coordinate;

/// Mean spherical Earth radius in meters.
pub const EARTH_RADIUS_METERS: f64 = 6_371_000.0;

/// Grid cell edge length in degrees.
const CELL_SIZE_DEG: f64 = 1.0;

/// Approximate meridian arc length of one degree of latitude.
const METERS_PER_DEG_LAT: f64 = 111_320.0;

/// Inflation applied to bounding-box spans so the spherical approximation
/// never under-covers a point at exactly the query radius.
const COVER_MARGIN: f64 = 1.05;

/// Covers wider than this fall back to scanning occupied cells.
const MAX_COVER_CELLS: i64 = 4_096;

/// Haversine distance between two points in meters.
pub fn haversine_distance(a: Coordinate, b: Coordinate) -> f64 {
    let lat1_rad = a.lat.to_radians();
    let lat2_rad = b.lat.to_radians();
    let delta_lat = (b.lat - a.lat).to_radians();
    let delta_lng = (b.lng - a.lng).to_radians();

    let h = (delta_lat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (delta_lng / 2.0).sin().powi(2);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());

    EARTH_RADIUS_METERS * c
}

/// A 1°×1° grid cell identified by the floor of its south-west corner.
///
/// `lat` is in [-90, 89] (the 89 cell covers latitudes up to 90 inclusive);
/// `lng` is in [-180, 179] with 180 wrapped onto -180.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct CellKey {
    pub lat: i16,
    pub lng: i16,
}

impl CellKey {
    /// The cell containing a coordinate. Assumes the coordinate is valid.
    pub fn for_coordinate(coord: Coordinate) -> Self {
        Self {
            lat: (coord.lat / CELL_SIZE_DEG).floor().clamp(-90.0, 89.0) as i16,
            lng: wrap_lng_cell((coord.lng / CELL_SIZE_DEG).floor() as i32),
        }
    }
}

fn wrap_lng_cell(cell: i32) -> i16 {
    ((cell + 180).rem_euclid(360) - 180) as i16
}

/// Conservative superset of cells within `radius_m` of `center`.
///
/// Returns `None` when the cover degenerates (near a pole, a span wrapping
/// the whole globe, or simply too many cells); callers then scan every
/// occupied cell instead. The haversine post-filter makes either path exact.
pub fn covering_cells(center: Coordinate, radius_m: f64) -> Option<Vec<CellKey>> {
    let dlat_deg = radius_m * COVER_MARGIN / METERS_PER_DEG_LAT;
    let min_lat = (center.lat - dlat_deg).max(-90.0);
    let max_lat = (center.lat + dlat_deg).min(90.0);

    // Longitude degrees shrink toward the poles; size the span at the most
    // poleward latitude of the band so equatorward rows are over-covered.
    let cos_min = min_lat.abs().max(max_lat.abs()).to_radians().cos();
    if cos_min < 1e-4 {
        return None;
    }
    let dlng_deg = radius_m * COVER_MARGIN / (METERS_PER_DEG_LAT * cos_min);
    if dlng_deg >= 180.0 {
        return None;
    }

    let lat_lo = (min_lat.floor() as i32).clamp(-90, 89);
    let lat_hi = (max_lat.floor() as i32).clamp(-90, 89);
    let lng_lo = (center.lng - dlng_deg).floor() as i32;
    let lng_hi = (center.lng + dlng_deg).floor() as i32;

    let count = (lat_hi - lat_lo + 1) as i64 * (lng_hi - lng_lo + 1) as i64;
    if count > MAX_COVER_CELLS {
        return None;
    }

    let mut cells = Vec::with_capacity(count as usize);
    for lat in lat_lo..=lat_hi {
        for lng in lng_lo..=lng_hi {
            cells.push(CellKey {
                lat: lat as i16,
                lng: wrap_lng_cell(lng),
            });
        }
    }
    Some(cells)
}
