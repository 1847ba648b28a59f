//! Domain logic shared by the database and HTTP layers.
//!
//! Nothing in this crate touches the network or the database directly;
//! persistence-side operations are reached through [`routines::OrderRoutines`].

pub mod devolucion;
pub mod error;
pub mod pedido;
pub mod permissions;
pub mod roles;
pub mod routines;
pub mod types;
pub mod validation;
