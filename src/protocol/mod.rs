//! CAN side of the node: transport primitives, display protocol messages and
//! the management tasks.
pub mod managment;
pub mod messages;
pub mod transport;
