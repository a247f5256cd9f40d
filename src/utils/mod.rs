//! Commonly used utilities like pools.

pub mod object_pool;

pub use self::object_pool::ObjectPool;

pub mod prelude {
    pub use super::ObjectPool;
}
