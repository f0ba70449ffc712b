//! Node management: bus health and recovery, the presence handshake, command
//! routing, and the transmit/receive tasks built on them.
pub mod bus_health;
pub mod command_router;
pub mod digit_broadcaster;
pub mod join_handshake;
pub mod receive_runner;
pub mod transmit_runner;
