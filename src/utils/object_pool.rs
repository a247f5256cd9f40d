//! A generic recycler for reusable objects.
//!
//! The pool hands out a previously released instance when one is available,
//! and falls back to the supplied factory otherwise. Freed instances stay
//! allocated inside the pool, so the pool grows to the high-water mark of
//! concurrently obtained objects and never shrinks.
//!
//! Ownership is explicit: the pool owns free instances, the caller owns
//! obtained instances until they are handed back with `free`.

/// A reusable-object recycler parameterized over a construct closure and a
/// reset closure. The reset hook runs on every recycled instance right
/// before it is handed out again.
pub struct ObjectPool<T> {
    factory: Box<dyn FnMut() -> T>,
    reset: Box<dyn FnMut(&mut T)>,
    frees: Vec<T>,
}

impl<T> ObjectPool<T> {
    /// Constructs a new `ObjectPool` without a reset hook.
    pub fn new<F>(factory: F) -> Self
    where
        F: FnMut() -> T + 'static,
    {
        Self::with_reset(factory, |_| {})
    }

    /// Constructs a new `ObjectPool` with a reset hook that is applied to
    /// every instance recycled through `obtain`.
    pub fn with_reset<F, R>(factory: F, reset: R) -> Self
    where
        F: FnMut() -> T + 'static,
        R: FnMut(&mut T) + 'static,
    {
        ObjectPool {
            factory: Box::new(factory),
            reset: Box::new(reset),
            frees: Vec::new(),
        }
    }

    /// Pre-populates the free list with `capacity` fresh instances.
    pub fn with_capacity<F, R>(factory: F, reset: R, capacity: usize) -> Self
    where
        F: FnMut() -> T + 'static,
        R: FnMut(&mut T) + 'static,
    {
        let mut pool = Self::with_reset(factory, reset);
        pool.frees.reserve(capacity);
        for _ in 0..capacity {
            let v = (pool.factory)();
            pool.frees.push(v);
        }
        pool
    }

    /// Returns a recycled instance if one is available, or constructs a new
    /// one with the factory. Recycled instances pass through the reset hook
    /// first.
    pub fn obtain(&mut self) -> T {
        if let Some(mut v) = self.frees.pop() {
            (self.reset)(&mut v);
            v
        } else {
            (self.factory)()
        }
    }

    /// Returns an instance to the free list for future `obtain` calls.
    #[inline]
    pub fn free(&mut self, v: T) {
        self.frees.push(v);
    }

    /// Returns the number of free instances currently held by the pool.
    #[inline]
    pub fn available(&self) -> usize {
        self.frees.len()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn recycle() {
        let mut pool = ObjectPool::with_reset(|| 0i32, |v| *v = 0);

        let a = pool.obtain();
        assert_eq!(a, 0);
        assert_eq!(pool.available(), 0);

        pool.free(42);
        assert_eq!(pool.available(), 1);

        // Recycled instance goes through the reset hook.
        let b = pool.obtain();
        assert_eq!(b, 0);
        assert_eq!(pool.available(), 0);
    }

    #[test]
    fn factory_only_on_miss() {
        let constructed = Rc::new(Cell::new(0));
        let shadow = constructed.clone();

        let mut pool = ObjectPool::new(move || {
            shadow.set(shadow.get() + 1);
            0i32
        });

        let v1 = pool.obtain();
        let v2 = pool.obtain();
        assert_eq!(constructed.get(), 2);

        pool.free(v1);
        pool.free(v2);
        pool.obtain();
        pool.obtain();
        assert_eq!(constructed.get(), 2);
    }

    #[test]
    fn warm_up() {
        let mut pool = ObjectPool::with_capacity(|| 1i32, |_| {}, 8);
        assert_eq!(pool.available(), 8);

        for _ in 0..8 {
            pool.obtain();
        }
        assert_eq!(pool.available(), 0);

        // Exhausted pools keep growing through the factory.
        pool.obtain();
    }
}
