use std::path::Path;

use crate::error::LevelError;
use crate::object::GameObject;

/// Populates an empty game object's component set from a template
/// description on disk.
///
/// Implementations must be deterministic for the same template content and
/// fail with a [`LevelError`] when the template cannot be read or parsed.
pub trait GameObjectFactory {
    fn make(&self, template_path: &Path, object: &mut GameObject) -> Result<(), LevelError>;
}
