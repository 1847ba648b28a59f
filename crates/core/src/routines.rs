//! Database-resident order operations.
//!
//! Order registration and the sales total are computed by routines that
//! live in the database. The HTTP layer only sees this trait, so handlers
//! never build SQL for them and tests can substitute a fake.

use async_trait::async_trait;

use crate::error::CoreError;
use crate::pedido::NewOrderRegistration;
use crate::types::Money;

#[async_trait]
pub trait OrderRoutines: Send + Sync {
    /// Atomically create an order and its lines, computing subtotals and
    /// the order total and decrementing stock.
    ///
    /// Any routine failure is reported as [`CoreError::Operation`] with the
    /// database's message; nothing is persisted in that case.
    async fn register_order(&self, registration: &NewOrderRegistration) -> Result<(), CoreError>;

    /// Sum of all non-cancelled order totals.
    async fn sales_total(&self) -> Result<Money, CoreError>;
}
