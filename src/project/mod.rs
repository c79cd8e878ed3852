//! Area/track value types and the project payloads exchanged with the
//! external loader and encoder.

mod area;
mod snapshot;
mod track;

pub use area::{AreaMap, AreaPolygon, AxleMode};
pub use snapshot::{ProjectExport, ProjectSnapshot};
pub use track::{AreaCollection, NtracsTrack, TrackMap};
