// THEORY:
// The `orchestrator` module is the top-level API of the engine. It takes everything
// one broadcast week provides (the national games, plus one legend and one map image
// per regional section) and produces the single ordered list of games visible
// from the configured location.
//
// Stages:
// 1.  **National Games**: Seeded into the result as given. They are not tied to a map
//     and need no resolution.
// 2.  **Regional Games**: Each map is resolved independently at the same query point.
//     A hit appends the legend's record; a miss is logged, remembered in the report,
//     and otherwise omitted. A query the map cannot even contain fails the batch.
// 3.  **Ordering**: The combined list is stably sorted by broadcast day on the
//     Tuesday-to-Monday week. Records with a missing or unrecognized day fail the
//     batch instead of landing at an arbitrary position.

use crate::config::BatchConfig;
use crate::core_modules::event_record::EventRecord;
use crate::core_modules::legend::Legend;
use crate::core_modules::pixel_buffer::PixelBuffer;
use crate::core_modules::resolver::Resolution;
use crate::core_modules::resolver::nearest_match::resolve;
use crate::error::BatchError;
use log::{info, warn};

// Re-export key data structures for the public API.
pub use crate::core_modules::pixel_buffer::Point;
pub use crate::core_modules::resolver::ResolverConfig;

/// One regional map: its legend and its decoded pixels.
#[derive(Debug, Clone)]
pub struct MapEntry<B> {
    /// Section heading the map was published under, used in logs and reports.
    pub title: String,
    pub legend: Legend,
    pub pixels: B,
}

impl<B> MapEntry<B> {
    pub fn new(title: impl Into<String>, legend: Legend, pixels: B) -> Self {
        Self {
            title: title.into(),
            legend,
            pixels,
        }
    }
}

/// The result of one batch run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchReport {
    /// Every visible game, ordered by broadcast day.
    pub events: Vec<EventRecord>,
    /// Titles of maps where no legend color was found near the query point.
    pub unresolved: Vec<String>,
}

/// Outcome of resolving a single map, owned so it can cross task boundaries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum MapOutcome {
    Found(EventRecord),
    NotFound { radius_limit: u32 },
}

pub(crate) fn resolve_map<B>(entry: &MapEntry<B>, config: &BatchConfig) -> Result<MapOutcome, BatchError>
where
    B: PixelBuffer,
{
    let resolution = resolve(config.query, &entry.pixels, &entry.legend, &config.resolver).map_err(
        |source| BatchError::Resolve {
            map: entry.title.clone(),
            source,
        },
    )?;

    Ok(match resolution {
        Resolution::Found(found) => MapOutcome::Found(found.record.clone()),
        Resolution::NotFound { radius_limit } => MapOutcome::NotFound { radius_limit },
    })
}

/// Folds per-map outcomes, in map order, into the national list and sorts the result.
pub(crate) fn assemble(
    national: Vec<EventRecord>,
    outcomes: impl IntoIterator<Item = (String, MapOutcome)>,
) -> Result<BatchReport, BatchError> {
    let mut events = national;
    let mut unresolved = Vec::new();

    for (title, outcome) in outcomes {
        match outcome {
            MapOutcome::Found(record) => events.push(record),
            MapOutcome::NotFound { radius_limit } => {
                warn!("{title}: no legend color within radius {radius_limit} of the query point");
                unresolved.push(title);
            }
        }
    }

    let events = sort_by_broadcast_day(events)?;
    info!(
        "batch resolved {} events, {} maps unresolved",
        events.len(),
        unresolved.len()
    );

    Ok(BatchReport { events, unresolved })
}

/// Stable sort on the Tuesday-anchored broadcast week.
pub fn sort_by_broadcast_day(events: Vec<EventRecord>) -> Result<Vec<EventRecord>, BatchError> {
    let mut ranked = events
        .into_iter()
        .map(|event| -> Result<_, BatchError> { Ok((event.broadcast_day()?.rank(), event)) })
        .collect::<Result<Vec<_>, _>>()?;

    ranked.sort_by_key(|(rank, _)| *rank);
    Ok(ranked.into_iter().map(|(_, event)| event).collect())
}

/// Sequential batch runner.
pub struct BatchOrchestrator {
    config: BatchConfig,
}

impl BatchOrchestrator {
    pub fn new(config: BatchConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &BatchConfig {
        &self.config
    }

    pub fn run<B: PixelBuffer>(
        &self,
        national: Vec<EventRecord>,
        maps: &[MapEntry<B>],
    ) -> Result<BatchReport, BatchError> {
        let outcomes = maps
            .iter()
            .map(|entry| -> Result<_, BatchError> {
                Ok((entry.title.clone(), resolve_map(entry, &self.config)?))
            })
            .collect::<Result<Vec<_>, _>>()?;

        assemble(national, outcomes)
    }
}
