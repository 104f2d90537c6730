//! Scene graph for the lighting demo.
//!
//! # Invariants
//! - Nodes are only ever appended; ids are dense and follow insertion order.
//! - Helpers derive their geometry from the light they watch at query time.

pub mod camera;
pub mod error;
pub mod helper;
pub mod light;
pub mod mesh;
pub mod scene;
pub mod tessellate;

pub use camera::PerspectiveCamera;
pub use error::SceneError;
pub use helper::{Helper, HelperKind, LineSegment};
pub use light::Light;
pub use mesh::{Geometry, MaterialHandle, Mesh, StandardMaterial};
pub use scene::{Node, NodeKind, Scene};
pub use tessellate::{MeshData, Vertex, tessellate};
