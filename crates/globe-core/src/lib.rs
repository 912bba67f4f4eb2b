pub mod camera;
pub mod constants;
pub mod dataset;
pub mod error;
pub mod geo;
pub mod hover;
pub mod lifecycle;
pub mod marker;
pub mod mesh;
pub mod pick;
pub mod scene;
pub mod starfield;
pub mod texture;
pub mod tween;

pub use camera::*;
pub use constants::*;
pub use dataset::*;
pub use error::*;
pub use geo::*;
pub use hover::*;
pub use lifecycle::*;
pub use marker::*;
pub use pick::*;
pub use scene::*;
pub use tween::*;
