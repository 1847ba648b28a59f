//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.
//!
//! Repositories for client-owned rows (orders, returns) take an optional
//! `cliente_id`: `None` means unscoped, `Some(id)` restricts every read to
//! rows linked to that client.

pub mod cliente_repo;
pub mod detalle_pedido_repo;
pub mod devolucion_repo;
pub mod pedido_repo;
pub mod producto_repo;
pub mod session_repo;
pub mod usuario_repo;

pub use cliente_repo::ClienteRepo;
pub use detalle_pedido_repo::DetallePedidoRepo;
pub use devolucion_repo::DevolucionRepo;
pub use pedido_repo::PedidoRepo;
pub use producto_repo::ProductoRepo;
pub use session_repo::SessionRepo;
pub use usuario_repo::UsuarioRepo;
