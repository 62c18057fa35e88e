pub mod math;
pub mod mesh;

mod color;
mod corner_radii;
mod error;
mod geometry;
mod material;
mod sprite;

pub use self::color::*;
pub use self::corner_radii::*;
pub use self::error::*;
pub use self::geometry::*;
pub use self::material::*;
pub use self::mesh::{Corner, Edge, FillMethod, FillSettings, Mesh, Quad, Vertex};
pub use self::sprite::*;
