use std::any::Any;

use serde_json::Value;

use crate::error::LevelError;

/// Discriminant for the closed set of component kinds.
///
/// The set is known at build time. `GameObject::get_component` matches on
/// this before downcasting, so type-directed lookup never has to inspect
/// runtime types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComponentKind {
    Transform,
    Camera,
    FpsCamera,
    Mesh,
    Model,
    Animator,
    RigidBody,
}

impl ComponentKind {
    /// Maps the component-name keys used by template and level documents.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "TransformComponent" => Some(Self::Transform),
            "CameraComponent" => Some(Self::Camera),
            "FPSCameraComponent" => Some(Self::FpsCamera),
            "MeshComponent" => Some(Self::Mesh),
            "ModelComponent" => Some(Self::Model),
            "AnimatorComponent" => Some(Self::Animator),
            "RigidBodyComponent" => Some(Self::RigidBody),
            _ => None,
        }
    }

    /// Document key for this kind, the inverse of [`ComponentKind::from_name`].
    pub fn name(&self) -> &'static str {
        match self {
            Self::Transform => "TransformComponent",
            Self::Camera => "CameraComponent",
            Self::FpsCamera => "FPSCameraComponent",
            Self::Mesh => "MeshComponent",
            Self::Model => "ModelComponent",
            Self::Animator => "AnimatorComponent",
            Self::RigidBody => "RigidBodyComponent",
        }
    }
}

/// A behavior unit attached to a game object.
///
/// Components attach through the template factory at creation time, get
/// `initialize`d with their owning object, are driven every frame, and
/// `terminate` when the object is destroyed. `deserialize` applies
/// per-instance overrides on top of whatever state the component already
/// holds; fields absent from the value keep their current settings.
pub trait Component: Any {
    fn kind(&self) -> ComponentKind;
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;

    fn initialize(&mut self) {}
    fn terminate(&mut self) {}
    fn update(&mut self, delta_time: f32) {
        let _ = delta_time;
    }
    fn render(&mut self) {}
    fn debug_ui(&mut self) {}
    fn deserialize(&mut self, value: &Value) -> Result<(), LevelError> {
        let _ = value;
        Ok(())
    }
}

/// Implemented by every concrete component so typed lookup can match on the
/// kind discriminant without an instance in hand.
pub trait TypedComponent: Component {
    const KIND: ComponentKind;
}
