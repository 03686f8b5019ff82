// THEORY:
// This file is the main entry point for the `coverage_map` library crate.
// It defines the public API handed to whatever acquires the week's data: the
// orchestrators and their configuration at the top, and the leaf components
// (`core_modules`) for callers that build legends or probe a single map.
//
// Data flows one way: legend + pixel buffer -> resolver -> event record or
// not-found -> merged, day-ordered batch report.

pub mod config;
pub mod core_modules;
pub mod error;
pub mod orchestrator;
pub mod parallel_orchestrator;

pub use config::BatchConfig;
pub use core_modules::color_key::ColorKey;
pub use core_modules::event_record::{BroadcastDay, EventRecord};
pub use core_modules::legend::Legend;
pub use core_modules::pixel_buffer::{PixelBuffer, Point, RasterGrid};
pub use core_modules::resolver::{Match, Resolution, ResolverConfig};
pub use core_modules::resolver::nearest_match::resolve;
pub use core_modules::ring::RingMetric;
pub use orchestrator::{BatchOrchestrator, BatchReport, MapEntry};
pub use parallel_orchestrator::ParallelOrchestrator;
