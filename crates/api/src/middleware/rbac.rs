//! Role-based access control.
//!
//! [`authorize`] consults the permission table in `comercio_core::permissions`
//! and, for client-scoped grants, resolves the caller's linked client record.
//! Handlers apply the returned [`Visibility`] at query level.

use comercio_core::error::CoreError;
use comercio_core::permissions::{self, Action, Resource, Scope};
use comercio_core::types::DbId;
use comercio_db::repositories::ClienteRepo;

use super::auth::AuthUser;
use crate::error::AppResult;
use crate::state::AppState;

/// Which rows an authorized request may see or touch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    /// Every row.
    All,
    /// Rows linked to this client only.
    Client(DbId),
    /// A client-scoped grant for an account with no linked client record.
    Nothing,
}

impl Visibility {
    /// Client filter for repository queries; `None` means unscoped.
    ///
    /// Callers must handle [`Visibility::Nothing`] before querying: it has
    /// no filter that can match, and each handler decides what that means
    /// (empty list, 404, 403).
    pub fn cliente_id(self) -> Option<DbId> {
        match self {
            Visibility::Client(id) => Some(id),
            Visibility::All | Visibility::Nothing => None,
        }
    }

    /// Ensure a write naming `cliente_id` stays within this visibility.
    pub fn ensure_client(self, cliente_id: Option<DbId>) -> Result<(), CoreError> {
        match self {
            Visibility::All => Ok(()),
            Visibility::Client(own) if cliente_id == Some(own) => Ok(()),
            Visibility::Client(_) | Visibility::Nothing => Err(CoreError::Forbidden(
                "Clients may only act on their own records".into(),
            )),
        }
    }
}

/// Check `user` may perform `action` on `resource`.
///
/// Fails with 403 when the permission table has no grant. For
/// [`Scope::OwnClient`] grants the caller's client record is looked up.
pub async fn authorize(
    state: &AppState,
    user: &AuthUser,
    resource: Resource,
    action: Action,
) -> AppResult<Visibility> {
    let scope = permissions::authorize(user.role, resource, action).inspect_err(|_| {
        tracing::debug!(
            user_id = user.user_id,
            role = %user.role,
            resource = resource.as_str(),
            action = action.as_str(),
            "Permission denied"
        );
    })?;

    match scope {
        Scope::All => Ok(Visibility::All),
        Scope::OwnClient => {
            let cliente = ClienteRepo::find_by_usuario_id(&state.pool, user.user_id).await?;
            Ok(cliente.map_or(Visibility::Nothing, |c| Visibility::Client(c.id)))
        }
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn client_filter_only_for_linked_clients() {
        assert_eq!(Visibility::All.cliente_id(), None);
        assert_eq!(Visibility::Client(7).cliente_id(), Some(7));
    }

    #[test]
    fn staff_may_write_any_client() {
        assert!(Visibility::All.ensure_client(Some(3)).is_ok());
        assert!(Visibility::All.ensure_client(None).is_ok());
    }

    #[test]
    fn client_may_only_write_own() {
        assert!(Visibility::Client(7).ensure_client(Some(7)).is_ok());
        assert_matches!(
            Visibility::Client(7).ensure_client(Some(8)),
            Err(CoreError::Forbidden(_))
        );
        assert_matches!(
            Visibility::Client(7).ensure_client(None),
            Err(CoreError::Forbidden(_))
        );
        assert_matches!(
            Visibility::Nothing.ensure_client(Some(7)),
            Err(CoreError::Forbidden(_))
        );
    }
}
