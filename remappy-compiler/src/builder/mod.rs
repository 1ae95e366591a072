mod layer_builder;
mod map_builder;

pub use layer_builder::LayerBuilder;
pub use map_builder::{MapBuilder, Stroke};
