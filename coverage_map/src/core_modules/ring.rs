// THEORY:
// A ring is every offset at one exact distance from a center point. The resolver
// walks rings of increasing radius, so the order offsets come out of a ring is what
// decides ties between equally distant candidates.
//
// The enumeration order is fixed and part of the contract:
// - Manhattan (the diamond `|dx| + |dy| = r`): `dx` ascends from `-r` to `r`; for each
//   `dx` the `-dy` point comes before the `+dy` point. Where `dy` is zero the two
//   coincide and the point is produced once.
// - Chebyshev (the square `max(|dx|, |dy|) = r`): `dx` ascends from `-r` to `r`; for
//   each `dx`, `dy` ascends over the points that lie on the square's edge.
//
// Radius 0 is never produced here; the center is the resolver's exact-match step.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub type Offset = (i64, i64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RingMetric {
    #[default]
    Manhattan,
    Chebyshev,
}

impl RingMetric {
    pub fn name(self) -> &'static str {
        match self {
            RingMetric::Manhattan => "manhattan",
            RingMetric::Chebyshev => "chebyshev",
        }
    }
}

impl fmt::Display for RingMetric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for RingMetric {
    type Err = String;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        match name.trim().to_ascii_lowercase().as_str() {
            "manhattan" => Ok(RingMetric::Manhattan),
            "chebyshev" => Ok(RingMetric::Chebyshev),
            other => Err(other.to_string()),
        }
    }
}

/// Offsets at exactly `radius` from the center, in the metric's fixed order.
pub fn ring_offsets(metric: RingMetric, radius: u32) -> impl Iterator<Item = Offset> {
    let r = i64::from(radius);
    (-r..=r).flat_map(move |dx| {
        // Each column is `-reach..=reach`, either whole or stepped down to its two ends.
        let (reach, whole) = match metric {
            RingMetric::Manhattan => (r - dx.abs(), dx.abs() == r),
            RingMetric::Chebyshev => (r, dx.abs() == r),
        };
        let step = if whole { 1 } else { 2 * reach as usize };
        (-reach..=reach).step_by(step).map(move |dy| (dx, dy))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manhattan_ring_one_order() {
        let offsets: Vec<Offset> = ring_offsets(RingMetric::Manhattan, 1).collect();
        assert_eq!(offsets, vec![(-1, 0), (0, -1), (0, 1), (1, 0)]);
    }

    #[test]
    fn manhattan_ring_two_order() {
        let offsets: Vec<Offset> = ring_offsets(RingMetric::Manhattan, 2).collect();
        assert_eq!(
            offsets,
            vec![(-2, 0), (-1, -1), (-1, 1), (0, -2), (0, 2), (1, -1), (1, 1), (2, 0)]
        );
    }

    #[test]
    fn manhattan_rings_have_four_r_points_all_at_distance_r() {
        for radius in 1..=10u32 {
            let offsets: Vec<Offset> = ring_offsets(RingMetric::Manhattan, radius).collect();
            assert_eq!(offsets.len(), 4 * radius as usize);
            assert!(offsets.iter().all(|(dx, dy)| dx.abs() + dy.abs() == i64::from(radius)));
        }
    }

    #[test]
    fn chebyshev_rings_have_eight_r_points_on_the_square() {
        for radius in 1..=6u32 {
            let offsets: Vec<Offset> = ring_offsets(RingMetric::Chebyshev, radius).collect();
            assert_eq!(offsets.len(), 8 * radius as usize);
            assert!(offsets.iter().all(|(dx, dy)| dx.abs().max(dy.abs()) == i64::from(radius)));
        }
        let first: Vec<Offset> = ring_offsets(RingMetric::Chebyshev, 1).take(4).collect();
        assert_eq!(first, vec![(-1, -1), (-1, 0), (-1, 1), (0, -1)]);
    }

    #[test]
    fn chebyshev_ring_two_order() {
        let offsets: Vec<Offset> = ring_offsets(RingMetric::Chebyshev, 2).collect();
        assert_eq!(
            offsets,
            vec![
                (-2, -2), (-2, -1), (-2, 0), (-2, 1), (-2, 2),
                (-1, -2), (-1, 2),
                (0, -2), (0, 2),
                (1, -2), (1, 2),
                (2, -2), (2, -1), (2, 0), (2, 1), (2, 2),
            ]
        );
    }

    #[test]
    fn radius_zero_is_just_the_center() {
        for metric in [RingMetric::Manhattan, RingMetric::Chebyshev] {
            assert_eq!(ring_offsets(metric, 0).collect::<Vec<_>>(), vec![(0, 0)]);
        }
    }

    #[test]
    fn metric_names_parse() {
        assert_eq!("Chebyshev".parse::<RingMetric>(), Ok(RingMetric::Chebyshev));
        assert_eq!(" manhattan ".parse::<RingMetric>(), Ok(RingMetric::Manhattan));
        assert!("euclid".parse::<RingMetric>().is_err());
    }
}
