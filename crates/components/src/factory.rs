use std::fs;
use std::path::Path;

use kiln_world::{ComponentKind, GameObject, GameObjectFactory, LevelError};
use serde_json::Value;
use tracing::debug;

use crate::{
    AnimatorComponent, CameraComponent, FpsCameraComponent, MeshComponent, ModelComponent,
    RigidBodyComponent, TransformComponent,
};

/// Builds a game object's component set from a JSON template on disk.
///
/// Template shape:
///
/// ```json
/// { "Components": { "TransformComponent": { }, "MeshComponent": { } } }
/// ```
///
/// Each block attaches the named component with its defaults and then runs
/// the component's own `deserialize` hook, so template values layer the
/// same way level overrides do later.
#[derive(Debug, Clone, Copy, Default)]
pub struct TemplateFactory;

impl GameObjectFactory for TemplateFactory {
    fn make(&self, template_path: &Path, object: &mut GameObject) -> Result<(), LevelError> {
        let text = fs::read_to_string(template_path).map_err(|source| LevelError::Io {
            path: template_path.to_path_buf(),
            source,
        })?;
        let doc: Value = serde_json::from_str(&text).map_err(|source| LevelError::Parse {
            path: template_path.to_path_buf(),
            source,
        })?;
        let components = doc
            .get("Components")
            .and_then(Value::as_object)
            .ok_or(LevelError::MissingSection("Components"))?;

        for (name, block) in components {
            let kind = ComponentKind::from_name(name)
                .ok_or_else(|| LevelError::UnknownComponent(name.clone()))?;
            attach_default(object, kind);
            let component = object
                .component_mut_by_kind(kind)
                .expect("component was just attached");
            component.deserialize(block)?;
        }
        debug!(
            template = %template_path.display(),
            components = object.component_count(),
            "template applied"
        );
        Ok(())
    }
}

fn attach_default(object: &mut GameObject, kind: ComponentKind) {
    match kind {
        ComponentKind::Transform => {
            object.add_component(TransformComponent::default());
        }
        ComponentKind::Camera => {
            object.add_component(CameraComponent::default());
        }
        ComponentKind::FpsCamera => {
            object.add_component(FpsCameraComponent::default());
        }
        ComponentKind::Mesh => {
            object.add_component(MeshComponent::default());
        }
        ComponentKind::Model => {
            object.add_component(ModelComponent::default());
        }
        ComponentKind::Animator => {
            object.add_component(AnimatorComponent::default());
        }
        ComponentKind::RigidBody => {
            object.add_component(RigidBodyComponent::default());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;
    use kiln_world::GameWorld;
    use std::io::Write;

    fn write_template(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    fn make_object(template: &str) -> (GameWorld, kiln_common::GameObjectHandle) {
        let file = write_template(template);
        let mut world = GameWorld::new();
        world.initialize(1);
        let handle = world
            .create_game_object(&TemplateFactory, file.path(), "subject")
            .unwrap()
            .unwrap();
        (world, handle)
    }

    #[test]
    fn attaches_components_with_template_values() {
        let (world, handle) = make_object(
            r#"{
                "Components": {
                    "TransformComponent": { "Position": [1.0, 2.0, 3.0] },
                    "MeshComponent": { "Shape": { "Cube": { "Size": 0.5 } } },
                    "RigidBodyComponent": { "Mass": 3.0 }
                }
            }"#,
        );
        let object = world.get_game_object(handle).unwrap();
        assert_eq!(object.component_count(), 3);
        assert_eq!(
            object.get_component::<TransformComponent>().map(|t| t.position()),
            Some(Vec3::new(1.0, 2.0, 3.0))
        );
        assert_eq!(
            object.get_component::<MeshComponent>().map(|m| m.shape),
            Some(crate::MeshShape::Cube { size: 0.5 })
        );
        assert_eq!(
            object.get_component::<RigidBodyComponent>().map(|b| b.mass),
            Some(3.0)
        );
    }

    #[test]
    fn unknown_component_name_is_fatal() {
        let file = write_template(r#"{ "Components": { "WarpDriveComponent": {} } }"#);
        let mut world = GameWorld::new();
        world.initialize(1);
        let err = world
            .create_game_object(&TemplateFactory, file.path(), "subject")
            .unwrap_err();
        assert!(matches!(err, LevelError::UnknownComponent(name) if name == "WarpDriveComponent"));
    }

    #[test]
    fn missing_template_file_is_fatal() {
        let mut world = GameWorld::new();
        world.initialize(1);
        let err = world
            .create_game_object(&TemplateFactory, "does/not/exist.json", "subject")
            .unwrap_err();
        assert!(matches!(err, LevelError::Io { .. }));
    }

    #[test]
    fn template_without_components_section_is_fatal() {
        let file = write_template(r#"{ "Nothing": true }"#);
        let mut world = GameWorld::new();
        world.initialize(1);
        let err = world
            .create_game_object(&TemplateFactory, file.path(), "subject")
            .unwrap_err();
        assert!(matches!(err, LevelError::MissingSection("Components")));
    }
}
