#[macro_use]
extern crate log;

mod class_gather;
pub mod plot;

pub use class_gather::ClassGather;
pub use plot::plot_classes;

pub type Series = Vec<(f64, f64)>;
