//! Data model shared by every stage of the assessment pipeline.

pub mod catalog;
pub mod landmark;
pub mod measurement;
pub mod snapshot;

pub use catalog::{metrics, regions};
pub use landmark::{Landmark, LandmarkId, Point3};
pub use measurement::{AngleMeasurement, MeasurementUnit, RegionMeasurements};
pub use snapshot::Snapshot;
