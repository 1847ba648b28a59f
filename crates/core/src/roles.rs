//! Typed actor roles.
//!
//! The string forms must match the `ck_usuarios_rol` check constraint in
//! `20250101000001_create_usuarios.sql`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

pub const ROLE_ADMINISTRADOR: &str = "administrador";
pub const ROLE_EMPLEADO: &str = "empleado";
pub const ROLE_CLIENTE: &str = "cliente";

/// The role carried by every authenticated actor.
///
/// Self-registered accounts default to [`Role::Cliente`].
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Administrador,
    Empleado,
    #[default]
    Cliente,
}

impl Role {
    pub const ALL: [Role; 3] = [Role::Administrador, Role::Empleado, Role::Cliente];

    pub fn as_str(self) -> &'static str {
        match self {
            Role::Administrador => ROLE_ADMINISTRADOR,
            Role::Empleado => ROLE_EMPLEADO,
            Role::Cliente => ROLE_CLIENTE,
        }
    }

    /// Administrators and employees form the staff.
    pub fn is_staff(self) -> bool {
        matches!(self, Role::Administrador | Role::Empleado)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            ROLE_ADMINISTRADOR => Ok(Role::Administrador),
            ROLE_EMPLEADO => Ok(Role::Empleado),
            ROLE_CLIENTE => Ok(Role::Cliente),
            other => Err(CoreError::invalid_field(
                "rol",
                format!(
                    "Invalid role '{other}'. Must be one of: {ROLE_ADMINISTRADOR}, {ROLE_EMPLEADO}, {ROLE_CLIENTE}"
                ),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn parse_round_trips_every_role() {
        for role in Role::ALL {
            assert_eq!(role.as_str().parse::<Role>().unwrap(), role);
        }
    }

    #[test]
    fn parse_rejects_unknown_role() {
        assert_matches!(
            "admin".parse::<Role>(),
            Err(CoreError::InvalidField { field: "rol", .. })
        );
    }

    #[test]
    fn parse_is_case_sensitive() {
        assert!("Administrador".parse::<Role>().is_err());
    }

    #[test]
    fn serde_uses_lowercase_names() {
        let json = serde_json::to_string(&Role::Empleado).unwrap();
        assert_eq!(json, "\"empleado\"");
        let role: Role = serde_json::from_str("\"cliente\"").unwrap();
        assert_eq!(role, Role::Cliente);
    }

    #[test]
    fn staff_is_admin_and_employee() {
        assert!(Role::Administrador.is_staff());
        assert!(Role::Empleado.is_staff());
        assert!(!Role::Cliente.is_staff());
    }
}
