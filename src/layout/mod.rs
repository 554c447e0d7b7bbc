//! Focus-independent geometry: the time scale and the bars laid out on it.

pub mod bars;
pub mod time_scale;

pub use bars::{row_order, Bar, BarLayout};
pub use time_scale::{Tick, TickGranularity, TimeScale};
