//! Role-based permission table.
//!
//! Every (role, resource) pair maps to a set of allowed actions and the
//! scope those actions run under. Pairs absent from [`RULES`] are denied.

use crate::error::CoreError;
use crate::roles::Role;

/// Resources exposed through the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resource {
    Usuarios,
    Clientes,
    Productos,
    Pedidos,
    DetallePedidos,
    Devoluciones,
    /// The sales-total report.
    Ventas,
}

impl Resource {
    pub fn as_str(self) -> &'static str {
        match self {
            Resource::Usuarios => "usuarios",
            Resource::Clientes => "clientes",
            Resource::Productos => "productos",
            Resource::Pedidos => "pedidos",
            Resource::DetallePedidos => "detalle-pedidos",
            Resource::Devoluciones => "devoluciones",
            Resource::Ventas => "ventas",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    List,
    Retrieve,
    Create,
    Update,
    Delete,
    /// Return status transition (`cambiar-estado`).
    ChangeStatus,
}

impl Action {
    pub fn as_str(self) -> &'static str {
        match self {
            Action::List => "list",
            Action::Retrieve => "retrieve",
            Action::Create => "create",
            Action::Update => "update",
            Action::Delete => "delete",
            Action::ChangeStatus => "change-status",
        }
    }
}

/// Which rows an allowed action may touch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    /// Every row.
    All,
    /// Only rows linked to the actor's own client record.
    OwnClient,
}

/// One row of the permission table.
#[derive(Debug)]
pub struct Rule {
    pub role: Role,
    pub resource: Resource,
    pub actions: &'static [Action],
    pub scope: Scope,
}

const READ: &[Action] = &[Action::List, Action::Retrieve];
const CRUD: &[Action] = &[
    Action::List,
    Action::Retrieve,
    Action::Create,
    Action::Update,
    Action::Delete,
];
const CRUD_WITH_STATUS: &[Action] = &[
    Action::List,
    Action::Retrieve,
    Action::Create,
    Action::Update,
    Action::Delete,
    Action::ChangeStatus,
];
const READ_CREATE: &[Action] = &[Action::List, Action::Retrieve, Action::Create];
const REPORT: &[Action] = &[Action::Retrieve];

macro_rules! rule {
    ($role:ident, $resource:ident, $actions:expr, $scope:ident) => {
        Rule {
            role: Role::$role,
            resource: Resource::$resource,
            actions: $actions,
            scope: Scope::$scope,
        }
    };
}

/// The complete permission table.
pub const RULES: &[Rule] = &[
    // Administrator: everything.
    rule!(Administrador, Usuarios, CRUD, All),
    rule!(Administrador, Clientes, CRUD, All),
    rule!(Administrador, Productos, CRUD, All),
    rule!(Administrador, Pedidos, CRUD, All),
    rule!(Administrador, DetallePedidos, CRUD, All),
    rule!(Administrador, Devoluciones, CRUD_WITH_STATUS, All),
    rule!(Administrador, Ventas, REPORT, All),
    // Employee: no user management, read-only catalogue.
    rule!(Empleado, Clientes, CRUD, All),
    rule!(Empleado, Productos, READ, All),
    rule!(Empleado, Pedidos, CRUD, All),
    rule!(Empleado, DetallePedidos, CRUD, All),
    rule!(Empleado, Devoluciones, CRUD_WITH_STATUS, All),
    rule!(Empleado, Ventas, REPORT, All),
    // Client: catalogue plus their own orders and returns.
    rule!(Cliente, Productos, READ, All),
    rule!(Cliente, Pedidos, READ_CREATE, OwnClient),
    rule!(Cliente, Devoluciones, READ_CREATE, OwnClient),
];

/// Look up the scope granted to `role` for `action` on `resource`.
///
/// Returns `None` when the table has no matching grant.
pub fn lookup(role: Role, resource: Resource, action: Action) -> Option<Scope> {
    RULES
        .iter()
        .find(|r| r.role == role && r.resource == resource && r.actions.contains(&action))
        .map(|r| r.scope)
}

/// Like [`lookup`], but a missing grant becomes [`CoreError::Forbidden`].
pub fn authorize(role: Role, resource: Resource, action: Action) -> Result<Scope, CoreError> {
    lookup(role, resource, action).ok_or_else(|| {
        CoreError::Forbidden(format!(
            "Role '{role}' may not {} {}",
            action.as_str(),
            resource.as_str()
        ))
    })
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    const ALL_RESOURCES: [Resource; 7] = [
        Resource::Usuarios,
        Resource::Clientes,
        Resource::Productos,
        Resource::Pedidos,
        Resource::DetallePedidos,
        Resource::Devoluciones,
        Resource::Ventas,
    ];

    #[test]
    fn no_duplicate_role_resource_pairs() {
        for (i, a) in RULES.iter().enumerate() {
            for b in &RULES[i + 1..] {
                assert!(
                    !(a.role == b.role && a.resource == b.resource),
                    "duplicate rule for {:?}/{:?}",
                    a.role,
                    a.resource
                );
            }
        }
    }

    #[test]
    fn administrator_reaches_every_resource() {
        for resource in ALL_RESOURCES {
            let action = if resource == Resource::Ventas {
                Action::Retrieve
            } else {
                Action::Delete
            };
            assert_eq!(
                lookup(Role::Administrador, resource, action),
                Some(Scope::All),
                "{resource:?}"
            );
        }
    }

    #[test]
    fn employee_cannot_manage_users() {
        for action in CRUD {
            assert_matches!(
                authorize(Role::Empleado, Resource::Usuarios, *action),
                Err(CoreError::Forbidden(_))
            );
        }
    }

    #[test]
    fn product_reads_open_to_all_roles_writes_admin_only() {
        for role in Role::ALL {
            assert_eq!(lookup(role, Resource::Productos, Action::List), Some(Scope::All));
            assert_eq!(
                lookup(role, Resource::Productos, Action::Retrieve),
                Some(Scope::All)
            );
        }
        for action in [Action::Create, Action::Update, Action::Delete] {
            assert!(lookup(Role::Administrador, Resource::Productos, action).is_some());
            assert!(lookup(Role::Empleado, Resource::Productos, action).is_none());
            assert!(lookup(Role::Cliente, Resource::Productos, action).is_none());
        }
    }

    #[test]
    fn client_orders_and_returns_are_scoped() {
        for resource in [Resource::Pedidos, Resource::Devoluciones] {
            for action in READ_CREATE {
                assert_eq!(
                    lookup(Role::Cliente, resource, *action),
                    Some(Scope::OwnClient)
                );
            }
            assert!(lookup(Role::Cliente, resource, Action::Delete).is_none());
            assert!(lookup(Role::Cliente, resource, Action::Update).is_none());
        }
    }

    #[test]
    fn client_denied_staff_resources() {
        for resource in [
            Resource::Usuarios,
            Resource::Clientes,
            Resource::DetallePedidos,
            Resource::Ventas,
        ] {
            assert!(lookup(Role::Cliente, resource, Action::List).is_none());
            assert!(lookup(Role::Cliente, resource, Action::Retrieve).is_none());
        }
        assert!(lookup(Role::Cliente, Resource::Devoluciones, Action::ChangeStatus).is_none());
    }

    #[test]
    fn sales_report_is_staff_only() {
        for role in Role::ALL {
            assert_eq!(
                lookup(role, Resource::Ventas, Action::Retrieve).is_some(),
                role.is_staff()
            );
        }
    }

    #[test]
    fn forbidden_message_names_role_and_resource() {
        let err = authorize(Role::Cliente, Resource::Ventas, Action::Retrieve).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("cliente"), "{msg}");
        assert!(msg.contains("ventas"), "{msg}");
    }
}
