//! Ports - trait definitions for external dependencies.
//! These are the "interfaces" that infrastructure must implement.

mod clock;
mod observer;
mod repository;

pub use clock::{Clock, SystemClock};
pub use observer::{NoopObserver, Operation, ServiceObserver};
pub use repository::PostRepository;
