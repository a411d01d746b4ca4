pub mod clock;
pub mod constants;
pub mod curve;
pub mod error;
pub mod geometry;
pub mod interaction;
pub mod lifecycle;
pub mod projects;
pub mod registry;
pub mod scene;
pub mod stars;
pub mod tool;
pub mod viewport;

pub use clock::*;
pub use constants::*;
pub use curve::*;
pub use error::*;
pub use geometry::*;
pub use interaction::*;
pub use lifecycle::*;
pub use projects::*;
pub use registry::*;
pub use scene::*;
pub use tool::*;
pub use viewport::*;
