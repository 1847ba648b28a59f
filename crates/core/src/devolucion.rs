//! Return (devolución) status set and its documented lifecycle.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Status of a product return.
///
/// Documented lifecycle: `solicitada -> {aprobada, rechazada}`,
/// `aprobada -> completada`. Moving to `aprobada` restocks the product
/// (database trigger).
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReturnStatus {
    #[default]
    Solicitada,
    Aprobada,
    Rechazada,
    Completada,
}

impl ReturnStatus {
    pub const ALL: [ReturnStatus; 4] = [
        ReturnStatus::Solicitada,
        ReturnStatus::Aprobada,
        ReturnStatus::Rechazada,
        ReturnStatus::Completada,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ReturnStatus::Solicitada => "solicitada",
            ReturnStatus::Aprobada => "aprobada",
            ReturnStatus::Rechazada => "rechazada",
            ReturnStatus::Completada => "completada",
        }
    }

    /// Whether `self -> next` follows the documented lifecycle.
    ///
    /// Staying in the same status is not a transition and returns `false`.
    pub fn is_documented_transition(self, next: ReturnStatus) -> bool {
        use ReturnStatus::*;
        matches!(
            (self, next),
            (Solicitada, Aprobada) | (Solicitada, Rechazada) | (Aprobada, Completada)
        )
    }
}

impl fmt::Display for ReturnStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReturnStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ReturnStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| {
                let valid: Vec<&str> = ReturnStatus::ALL.iter().map(|st| st.as_str()).collect();
                CoreError::invalid_field(
                    "estado",
                    format!(
                        "Invalid return status '{s}'. Must be one of: {}",
                        valid.join(", ")
                    ),
                )
            })
    }
}
