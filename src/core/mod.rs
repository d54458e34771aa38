pub mod field;
pub mod scale;
pub mod ticks;

pub use field::{MappedRecord, map_dataset};
pub use scale::{BandScale, LinearScale, TimeScale, XScale};
