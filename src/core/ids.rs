//! Identifier sources for decorators that tag predictions.

use uuid::Uuid;

/// Produces fresh identifiers.
///
/// Implementations are shared by every thread calling into a chain, so
/// `generate` must be callable concurrently without external locking.
pub trait IdGenerator: Send + Sync {
    fn generate(&self) -> String;
}

/// Random (version 4) UUIDs in the standard hyphenated form.
///
/// Backed by the operating system's random source, which needs no
/// coordination between threads.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidV4;

impl IdGenerator for UuidV4 {
    fn generate(&self) -> String {
        Uuid::new_v4().hyphenated().to_string()
    }
}

impl<F> IdGenerator for F
where
    F: Fn() -> String + Send + Sync,
{
    fn generate(&self) -> String {
        self()
    }
}
