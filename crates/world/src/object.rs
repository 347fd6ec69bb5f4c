use kiln_common::GameObjectHandle;

use crate::component::{Component, ComponentKind, TypedComponent};

/// A named, composable bundle of components.
///
/// Owned exclusively by its pool slot. The pool constructs it empty, the
/// template factory populates it, and the caller initializes it explicitly.
/// Destruction always goes through the pool's deferred protocol; the pool
/// runs `terminate` exactly once during the destroy flush.
pub struct GameObject {
    name: String,
    handle: GameObjectHandle,
    components: Vec<Box<dyn Component>>,
    initialized: bool,
}

impl GameObject {
    pub(crate) fn new(name: String, handle: GameObjectHandle) -> Self {
        Self {
            name,
            handle,
            components: Vec::new(),
            initialized: false,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The handle this object was issued under. Stale once the object is
    /// destroyed, which the destroy flush relies on as a sanity check.
    pub fn handle(&self) -> GameObjectHandle {
        self.handle
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Attach a component. Components attach at creation time only;
    /// attaching after `initialize` is a caller bug.
    pub fn add_component<C: TypedComponent>(&mut self, component: C) -> &mut C {
        assert!(
            !self.initialized,
            "GameObject `{}`: components cannot be added after initialize",
            self.name
        );
        let index = self.components.len();
        self.components.push(Box::new(component));
        self.components[index]
            .as_any_mut()
            .downcast_mut()
            .expect("pushed component has the pushed type")
    }

    /// First attached component whose kind matches `C`, if any.
    pub fn get_component<C: TypedComponent>(&self) -> Option<&C> {
        self.components
            .iter()
            .find(|c| c.kind() == C::KIND)
            .and_then(|c| c.as_any().downcast_ref())
    }

    pub fn get_component_mut<C: TypedComponent>(&mut self) -> Option<&mut C> {
        self.components
            .iter_mut()
            .find(|c| c.kind() == C::KIND)
            .and_then(|c| c.as_any_mut().downcast_mut())
    }

    pub fn has_component(&self, kind: ComponentKind) -> bool {
        self.components.iter().any(|c| c.kind() == kind)
    }

    /// Type-erased lookup, used by the level loader's override pass.
    pub fn component_mut_by_kind(&mut self, kind: ComponentKind) -> Option<&mut dyn Component> {
        self.components
            .iter_mut()
            .find(|c| c.kind() == kind)
            .map(|c| c.as_mut())
    }

    pub fn component_count(&self) -> usize {
        self.components.len()
    }

    /// Initialize every component in attach order. Runs once; calling it
    /// twice is a caller bug.
    pub fn initialize(&mut self) {
        assert!(
            !self.initialized,
            "GameObject `{}`: already initialized",
            self.name
        );
        for component in &mut self.components {
            component.initialize();
        }
        self.initialized = true;
    }

    pub(crate) fn terminate(&mut self) {
        for component in &mut self.components {
            component.terminate();
        }
    }

    pub(crate) fn update(&mut self, delta_time: f32) {
        for component in &mut self.components {
            component.update(delta_time);
        }
    }

    pub(crate) fn render(&mut self) {
        for component in &mut self.components {
            component.render();
        }
    }

    pub(crate) fn debug_ui(&mut self) {
        for component in &mut self.components {
            component.debug_ui();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::any::Any;

    struct Marker {
        kind: ComponentKind,
        tag: u32,
        initialized: bool,
    }

    impl Marker {
        fn new(tag: u32) -> Self {
            Self {
                kind: ComponentKind::Mesh,
                tag,
                initialized: false,
            }
        }
    }

    impl Component for Marker {
        fn kind(&self) -> ComponentKind {
            self.kind
        }
        fn as_any(&self) -> &dyn Any {
            self
        }
        fn as_any_mut(&mut self) -> &mut dyn Any {
            self
        }
        fn initialize(&mut self) {
            self.initialized = true;
        }
    }

    impl TypedComponent for Marker {
        const KIND: ComponentKind = ComponentKind::Mesh;
    }

    fn object() -> GameObject {
        GameObject::new("test".into(), GameObjectHandle::new(0, 0))
    }

    #[test]
    fn typed_lookup_finds_attached_component() {
        let mut obj = object();
        obj.add_component(Marker::new(7));
        assert_eq!(obj.get_component::<Marker>().map(|m| m.tag), Some(7));
        assert!(obj.has_component(ComponentKind::Mesh));
        assert!(!obj.has_component(ComponentKind::Transform));
    }

    #[test]
    fn lookup_returns_first_match() {
        let mut obj = object();
        obj.add_component(Marker::new(1));
        obj.add_component(Marker::new(2));
        assert_eq!(obj.get_component::<Marker>().map(|m| m.tag), Some(1));
        assert_eq!(obj.component_count(), 2);
    }

    #[test]
    fn initialize_runs_component_hooks_in_order() {
        let mut obj = object();
        obj.add_component(Marker::new(0));
        assert!(!obj.is_initialized());
        obj.initialize();
        assert!(obj.is_initialized());
        assert!(obj.get_component::<Marker>().is_some_and(|m| m.initialized));
    }

    #[test]
    #[should_panic(expected = "cannot be added after initialize")]
    fn add_after_initialize_panics() {
        let mut obj = object();
        obj.initialize();
        obj.add_component(Marker::new(0));
    }

    #[test]
    #[should_panic(expected = "already initialized")]
    fn double_initialize_panics() {
        let mut obj = object();
        obj.initialize();
        obj.initialize();
    }
}
