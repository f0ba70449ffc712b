//! `matrix-node` library: firmware logic of a CAN-controlled 8x8 bicolor LED
//! matrix in a `no_std` environment. The crate exposes the static-memory
//! infrastructure (message pool, queues), the CAN side (transport, bus
//! recovery, presence handshake, display commands) and the display pipeline
//! (glyphs, animation, rotation, row scan, idle demo).
#![no_std]
//==================================================================================
/// Shared data types, capacities and tuning policies.
pub mod core;
/// Transport and command errors.
pub mod error;
/// Message pool and slot queues shared by interrupts and tasks.
pub mod infra;
/// CAN protocol: transport, bus management and display commands.
pub mod protocol;
/// Bitmap buffers and everything that ends up on the LEDs.
pub mod display;
/// Main loop tying the display, the watchdog and the debug broadcaster together.
pub mod node;
//==================================================================================
