//! Static-memory infrastructure shared by interrupt handlers and tasks: the
//! message pool and the slot queues built on top of it.
pub mod pool;
pub mod queue;
