pub mod axis;
pub mod dataset;
pub mod plot_configs;
pub mod point;
pub mod range;
pub mod sample;
pub mod state;

pub use axis::*;
pub use dataset::*;
pub use plot_configs::*;
pub use point::*;
pub use range::*;
pub use sample::*;
pub use state::*;
