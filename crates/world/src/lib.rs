//! Object-lifecycle and composition core: a generational handle pool, a
//! per-world service registry, and the deferred-destruction protocol that
//! keeps object references safe across a simulation frame.
//!
//! # Invariants
//! - A handle resolves only while its generation matches its slot's.
//! - Destruction is two-phase: invalidate on request, release on flush.
//! - The service set is fixed once the world initializes.

pub mod component;
pub mod error;
pub mod factory;
pub mod object;
pub mod pool;
pub mod service;
pub mod world;

pub use component::{Component, ComponentKind, TypedComponent};
pub use error::LevelError;
pub use factory::GameObjectFactory;
pub use object::GameObject;
pub use pool::GameObjectPool;
pub use service::{Service, ServiceRegistry};
pub use world::GameWorld;
