// THEORY:
// The `resolver` answers the one question the engine exists for: which legend event
// owns the region around a query point?
//
// Map images are antialiased. Region borders, city labels and hairlines blend the
// legend colors, so the exact pixel under a query point is often a color no legend
// registers. The resolver therefore works in two stages:
// 1.  **Exact Match**: Read the pixel at the query point. If its color is a legend key,
//     that record wins outright, whatever surrounds it.
// 2.  **Ring Search**: Otherwise walk outward ring by ring (radius 1, 2, ... up to the
//     configured limit) and return the first candidate whose color is a legend key.
//     Candidates outside the buffer are skipped, never clamped or wrapped. The first
//     hit in ring order wins, so ties are settled by enumeration order (see `ring`),
//     not by true Euclidean distance.
// 3.  **Explicit Outcome**: Exhausting the search is not an error. It is the
//     `Resolution::NotFound` variant, and the caller decides whether to omit or fail.
//
// The resolver is a stateless utility: every input is borrowed read-only and any
// number of resolutions may run in parallel over different maps.

use crate::core_modules::event_record::EventRecord;
use crate::core_modules::pixel_buffer::Point;
use crate::core_modules::ring::RingMetric;
use serde::{Deserialize, Serialize};

pub const DEFAULT_SEARCH_RADIUS_LIMIT: u32 = 10;

/// Tunables for the nearest-match search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolverConfig {
    /// The largest ring radius examined before giving up.
    pub search_radius_limit: u32,
    /// The distance used to shape rings. Manhattan rings are diamonds.
    #[serde(default)]
    pub metric: RingMetric,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            search_radius_limit: DEFAULT_SEARCH_RADIUS_LIMIT,
            metric: RingMetric::default(),
        }
    }
}

/// A legend record together with where it was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Match<'a> {
    /// The record, borrowed verbatim from the legend.
    pub record: &'a EventRecord,
    /// The pixel whose color matched.
    pub location: Point,
    /// Ring radius of `location`; 0 for an exact hit.
    pub radius: u32,
}

impl Match<'_> {
    pub fn is_exact(&self) -> bool {
        self.radius == 0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution<'a> {
    Found(Match<'a>),
    /// No legend color within `radius_limit` of the query point.
    NotFound { radius_limit: u32 },
}

impl<'a> Resolution<'a> {
    pub fn record(&self) -> Option<&'a EventRecord> {
        match self {
            Resolution::Found(found) => Some(found.record),
            Resolution::NotFound { .. } => None,
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, Resolution::Found(_))
    }
}

pub mod nearest_match {
    use super::*;
    use crate::core_modules::legend::Legend;
    use crate::core_modules::pixel_buffer::PixelBuffer;
    use crate::core_modules::ring::ring_offsets;
    use crate::error::ResolveError;
    use log::{debug, trace};

    /// Finds the legend record owning the region around `query`.
    pub fn resolve<'a, B>(
        query: Point,
        buffer: &B,
        legend: &'a Legend,
        config: &ResolverConfig,
    ) -> Result<Resolution<'a>, ResolveError>
    where
        B: PixelBuffer + ?Sized,
    {
        if !buffer.contains_point(query) {
            return Err(ResolveError::OutOfBounds {
                x: query.x,
                y: query.y,
                width: buffer.width(),
                height: buffer.height(),
            });
        }

        let not_found = Resolution::NotFound {
            radius_limit: config.search_radius_limit,
        };
        if legend.is_empty() {
            return Ok(not_found);
        }

        // Radius 0: the query pixel itself.
        if let Some(record) = legend.get(&buffer.color_at(query)) {
            trace!("exact legend match at ({}, {})", query.x, query.y);
            return Ok(Resolution::Found(Match {
                record,
                location: query,
                radius: 0,
            }));
        }

        Ok(search_rings(query, buffer, legend, config).map_or(not_found, Resolution::Found))
    }

    /// Walks rings 1..=limit around `center`, returning the first legend hit.
    pub fn search_rings<'a, B>(
        center: Point,
        buffer: &B,
        legend: &'a Legend,
        config: &ResolverConfig,
    ) -> Option<Match<'a>>
    where
        B: PixelBuffer + ?Sized,
    {
        let last_radius = config
            .search_radius_limit
            .min(reach(center, buffer, config.metric));

        for radius in 1..=last_radius {
            for (dx, dy) in ring_offsets(config.metric, radius) {
                let x = i64::from(center.x) + dx;
                let y = i64::from(center.y) + dy;
                if !buffer.contains(x, y) {
                    continue;
                }

                let location = Point::new(x as u32, y as u32);
                if let Some(record) = legend.get(&buffer.color_at(location)) {
                    debug!(
                        "legend match for ({}, {}) at ({}, {}), radius {}",
                        center.x, center.y, location.x, location.y, radius
                    );
                    return Some(Match {
                        record,
                        location,
                        radius,
                    });
                }
            }
        }

        None
    }

    /// Distance from `center` to the farthest pixel of the buffer. Rings beyond it
    /// lie entirely outside and cannot match.
    fn reach<B: PixelBuffer + ?Sized>(center: Point, buffer: &B, metric: RingMetric) -> u32 {
        let span_x = center.x.max(buffer.width().saturating_sub(1).saturating_sub(center.x));
        let span_y = center.y.max(buffer.height().saturating_sub(1).saturating_sub(center.y));
        match metric {
            RingMetric::Manhattan => span_x.saturating_add(span_y),
            RingMetric::Chebyshev => span_x.max(span_y),
        }
    }
}
