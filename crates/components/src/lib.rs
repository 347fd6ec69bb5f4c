//! The closed set of concrete components plus the template factory that
//! assembles them onto a fresh game object.
//!
//! Component kinds are fixed at build time; there is no plugin surface.
//! Every component applies document overrides through its `deserialize`
//! hook, and fields absent from an override block keep their current
//! values.

pub mod animator;
pub mod camera;
pub mod factory;
pub mod mesh;
pub mod model;
pub mod rigid_body;
pub mod transform;

pub use animator::AnimatorComponent;
pub use camera::{CameraComponent, FpsCameraComponent};
pub use factory::TemplateFactory;
pub use mesh::{MeshComponent, MeshShape};
pub use model::ModelComponent;
pub use rigid_body::RigidBodyComponent;
pub use transform::TransformComponent;
