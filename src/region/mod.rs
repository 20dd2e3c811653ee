pub mod storage;
pub mod types;

pub use storage::{load_firms, load_regions};
pub use types::{FirmRecord, FirmValuationInput, Region, RegionMetrics};
