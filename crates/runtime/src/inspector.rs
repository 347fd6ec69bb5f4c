use kiln_world::GameWorld;

/// Read-only queries against a world for tooling and debug output.
pub struct WorldInspector;

impl WorldInspector {
    /// Snapshot of the world's headline numbers.
    pub fn summary(world: &GameWorld) -> WorldSummary {
        WorldSummary {
            initialized: world.is_initialized(),
            capacity: world.pool().capacity(),
            live_objects: world.pool().live_count(),
            free_slots: world.pool().free_count(),
            pending_destroy: world.pool().pending_destroy_count(),
            services: world.service_count(),
        }
    }

    /// Names of all live objects, in slot-storage order.
    pub fn object_names(world: &GameWorld) -> Vec<String> {
        world.pool().iter().map(|o| o.name().to_string()).collect()
    }
}

/// Summary of world state for the inspector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorldSummary {
    pub initialized: bool,
    pub capacity: usize,
    pub live_objects: usize,
    pub free_slots: usize,
    pub pending_destroy: usize,
    pub services: usize,
}

impl std::fmt::Display for WorldSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "World: capacity={} live={} free={} pending_destroy={} services={} initialized={}",
            self.capacity,
            self.live_objects,
            self.free_slots,
            self.pending_destroy,
            self.services,
            self.initialized
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::UpdateService;

    #[test]
    fn summary_tracks_pool_and_services() {
        let mut world = GameWorld::new();
        world.add_service(UpdateService::default());
        world.initialize(3);
        world.pool_mut().create("a").unwrap();
        let doomed = world.pool_mut().create("b").map(|o| o.handle()).unwrap();
        world.destroy_game_object(doomed);

        let summary = WorldInspector::summary(&world);
        assert_eq!(summary.capacity, 3);
        assert_eq!(summary.live_objects, 2);
        assert_eq!(summary.free_slots, 1);
        assert_eq!(summary.pending_destroy, 1);
        assert_eq!(summary.services, 1);
        assert!(summary.initialized);
        assert!(summary.to_string().contains("capacity=3"));

        assert_eq!(WorldInspector::object_names(&world), vec!["a", "b"]);
    }
}
