//! Abstract `Component` trait, typed component pools, and the registry that
//! assigns small-integer ids to component types.
//!
//! A component is a plain data record attached to exactly one entity at a
//! time. Instances are recycled through a per-type `ComponentPool`; the pool
//! owns free instances and an entity owns attached ones, never both.

use std::any::{Any, TypeId};
use std::collections::HashMap;

use crate::errors::Result;
use crate::utils::ObjectPool;

use super::bitset::MAX_COMPONENT_TYPES;

/// Small-integer identity of a registered component type, assigned in
/// registration order. Indexes the per-entity slot array and the pool table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ComponentType(pub(crate) usize);

impl ComponentType {
    /// Returns the underlying index.
    #[inline]
    pub fn index(self) -> usize {
        self.0
    }
}

/// Abstract component trait. Implementors are plain data with no behavior
/// beyond the optional reset hook, which is applied whenever a pooled
/// instance is recycled through `obtain`.
pub trait Component: Any {
    fn reset(&mut self) {}
}

/// Object-safe view of a boxed component, so instances can move between
/// pools and entity slots without generics. Blanket-implemented for every
/// `Component`.
pub trait ComponentObject: Any {
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
    fn into_any(self: Box<Self>) -> Box<dyn Any>;
}

impl<T: Component> ComponentObject for T {
    #[inline]
    fn as_any(&self) -> &dyn Any {
        self
    }

    #[inline]
    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    #[inline]
    fn into_any(self: Box<Self>) -> Box<dyn Any> {
        self
    }
}

/// A recycler for component instances of a single type. Wraps the generic
/// `ObjectPool` with the component's own reset hook.
pub struct ComponentPool<T: Component> {
    inner: ObjectPool<Box<T>>,
}

impl<T: Component> ComponentPool<T> {
    /// Constructs a new `ComponentPool` with the given factory.
    pub fn new<F>(mut factory: F) -> Self
    where
        F: FnMut() -> T + 'static,
    {
        ComponentPool {
            inner: ObjectPool::with_reset(move || Box::new(factory()), |v| v.reset()),
        }
    }

    /// Constructs a new `ComponentPool` pre-populated with `capacity` free
    /// instances.
    pub fn with_capacity<F>(mut factory: F, capacity: usize) -> Self
    where
        F: FnMut() -> T + 'static,
    {
        ComponentPool {
            inner: ObjectPool::with_capacity(move || Box::new(factory()), |v| v.reset(), capacity),
        }
    }

    /// Obtains a recycled or freshly constructed instance. The caller owns
    /// it until it is handed back with `free`.
    #[inline]
    pub fn obtain(&mut self) -> Box<T> {
        self.inner.obtain()
    }

    /// Returns an instance to the pool.
    #[inline]
    pub fn free(&mut self, v: Box<T>) {
        self.inner.free(v);
    }

    /// Returns the number of free instances currently held.
    #[inline]
    pub fn available(&self) -> usize {
        self.inner.available()
    }
}

impl<T: Component + Default> Default for ComponentPool<T> {
    fn default() -> Self {
        Self::new(T::default)
    }
}

/// Type-erased pool entry stored in the registry table.
trait AnyComponentPool: Any {
    fn free_object(&mut self, v: Box<dyn ComponentObject>);
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<T: Component> AnyComponentPool for ComponentPool<T> {
    fn free_object(&mut self, v: Box<dyn ComponentObject>) {
        if let Ok(v) = v.into_any().downcast::<T>() {
            self.free(v);
        }
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// Maps component-type identity to its dedicated pool. Creation and
/// destruction of component instances goes through this table.
pub(crate) struct ComponentRegistry {
    lookup: HashMap<TypeId, ComponentType>,
    pools: Vec<Box<dyn AnyComponentPool>>,
}

impl ComponentRegistry {
    pub fn new() -> Self {
        ComponentRegistry {
            lookup: HashMap::new(),
            pools: Vec::new(),
        }
    }

    /// Registers a pool for component type `T`, assigning the next
    /// `ComponentType` id. One pool per type, set once before use.
    pub fn register<T: Component>(&mut self, pool: ComponentPool<T>) -> Result<ComponentType> {
        if self.lookup.contains_key(&TypeId::of::<T>()) {
            return Err(format_err!(
                "A component pool for {} is already registered.",
                ::std::any::type_name::<T>()
            ));
        }

        if self.pools.len() >= MAX_COMPONENT_TYPES {
            return Err(format_err!(
                "Can not register more than {} component types.",
                MAX_COMPONENT_TYPES
            ));
        }

        let ty = ComponentType(self.pools.len());
        self.lookup.insert(TypeId::of::<T>(), ty);
        self.pools.push(Box::new(pool));

        info!(
            "[World] registers component pool {:?} for {}.",
            ty,
            ::std::any::type_name::<T>()
        );

        Ok(ty)
    }

    /// Returns the id assigned to component type `T`, if registered.
    #[inline]
    pub fn type_of<T: Component>(&self) -> Option<ComponentType> {
        self.lookup.get(&TypeId::of::<T>()).cloned()
    }

    /// Obtains an instance from the pool of `T`. Logs an error and returns
    /// `None` when no pool was registered for the type.
    pub fn create<T: Component>(&mut self) -> Option<Box<T>> {
        if let Some(ty) = self.type_of::<T>() {
            self.pools[ty.0]
                .as_any_mut()
                .downcast_mut::<ComponentPool<T>>()
                .map(ComponentPool::obtain)
        } else {
            error!(
                "[World] there is no pool for component type {}.",
                ::std::any::type_name::<T>()
            );
            None
        }
    }

    /// Returns an instance to the pool matching its own runtime type.
    /// Silently does nothing when no pool is registered for that type.
    pub fn free(&mut self, v: Box<dyn ComponentObject>) {
        let tid = v.as_any().type_id();
        if let Some(&ty) = self.lookup.get(&tid) {
            self.pools[ty.0].free_object(v);
        }
    }

    /// The number of registered component types.
    #[inline]
    pub fn len(&self) -> usize {
        self.pools.len()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[derive(Debug, Default, PartialEq)]
    struct Health {
        value: u32,
    }

    impl Component for Health {
        fn reset(&mut self) {
            self.value = 0;
        }
    }

    struct Unregistered;
    impl Component for Unregistered {}

    #[test]
    fn register_and_create() {
        let mut registry = ComponentRegistry::new();
        let ty = registry.register(ComponentPool::<Health>::default()).unwrap();
        assert_eq!(ty.index(), 0);
        assert_eq!(registry.len(), 1);

        let mut v = registry.create::<Health>().unwrap();
        v.value = 100;
        registry.free(v);

        // Recycled instances come back reset.
        let v = registry.create::<Health>().unwrap();
        assert_eq!(*v, Health { value: 0 });
    }

    #[test]
    fn duplicated_register() {
        let mut registry = ComponentRegistry::new();
        registry.register(ComponentPool::<Health>::default()).unwrap();
        assert!(registry.register(ComponentPool::<Health>::default()).is_err());
    }

    #[test]
    fn missing_pool() {
        let mut registry = ComponentRegistry::new();
        assert!(registry.create::<Unregistered>().is_none());

        // Freeing a component of an unregistered type is a no-op.
        registry.free(Box::new(Unregistered));
    }
}
