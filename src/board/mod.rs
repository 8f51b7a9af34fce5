pub mod cozy;
pub mod notation;

pub use cozy::Position;
pub use notation::{Cells, FenFields, Occupant};
