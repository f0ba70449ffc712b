//! Abstraction traits used by the transport layer (CAN controller and timer).
pub mod can_controller;
pub mod node_timer;
