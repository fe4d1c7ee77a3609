use std::path::Path;

use ordered_float::OrderedFloat;

use crate::{distance, GeoError, GeoPoint, NamedDistance, Record, Records, Result};

/// Bounds of a single search.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Limits {
    /// Maximum distance in meters, inclusive.
    pub max_distance: f64,
    pub max_results: usize,
}

impl Limits {
    /// Validates caller supplied limits. `max_results` is signed so that
    /// negative values coming from the outside can be rejected.
    pub fn new(max_distance: f64, max_results: i64) -> Result<Self> {
        if max_distance.is_nan() || max_distance < 0.0 {
            return Err(GeoError::InvalidArgument(format!("maxDistance must not be negative, got {}", max_distance)));
        }

        let max_results = usize::try_from(max_results)
            .map_err(|_| GeoError::InvalidArgument(format!("maxResults must not be negative, got {}", max_results)))?;

        Ok(Self { max_distance, max_results })
    }
}

/// Collects the records within reach of a point and ranks them by distance.
pub struct Collector {
    origin: GeoPoint,
    limits: Limits,
    matches: Vec<NamedDistance>,
}

impl Collector {
    pub fn new(origin: GeoPoint, limits: Limits) -> Self {
        Self { origin, limits, matches: Vec::new() }
    }

    pub fn push(&mut self, record: Record) {
        if self.limits.max_results == 0 {
            return;
        }

        let distance_meters = distance(self.origin, record.location);
        if distance_meters <= self.limits.max_distance {
            self.matches.push(NamedDistance { name: record.name, distance_meters });
        }
    }

    /// Number of matches collected so far, before truncation.
    pub fn len(&self) -> usize {
        self.matches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }

    /// Returns the closest matches in ascending order of distance.
    pub fn finish(self) -> Vec<NamedDistance> {
        let max_results = self.limits.max_results;
        let mut matches = self.matches;

        let key = |m: &NamedDistance| OrderedFloat(m.distance_meters);

        // move the closest max_results entries to the front, then only sort those
        if matches.len() > max_results {
            matches.select_nth_unstable_by_key(max_results, key);
            matches.truncate(max_results);
        }

        matches.sort_by_key(key);
        matches
    }
}

/// Ranks the given records by their distance to `origin`.
/// Fails on the first record that failed to read, without partial results.
pub fn nearby<I>(records: I, origin: GeoPoint, limits: Limits) -> Result<Vec<NamedDistance>>
where
    I: IntoIterator<Item = Result<Record>>,
{
    let mut collector = Collector::new(origin, limits);

    for record in records {
        collector.push(record?);
    }

    Ok(collector.finish())
}

/// Scans the dataset at `path` for locations near `origin`.
pub fn nearby_locations(path: impl AsRef<Path>, origin: GeoPoint, limits: Limits) -> Result<Vec<NamedDistance>> {
    nearby(Records::open(path)?, origin, limits)
}
