//! Single-entity page controllers: edit, create and the in-place quick edit.
//!
//! Each controller owns its field set. Submission goes through a phase flag
//! so a second submit while one is outstanding is ignored. Success
//! navigates back to the list with a refresh trigger; failure stores a
//! static message and keeps the form as typed.

use std::future::Future;

use tokio_util::sync::CancellationToken;
use tracing::{error, warn};

use crate::domain::ports::UsersGateway;
use crate::domain::transform::transform_user_data;
use crate::domain::{Route, UserId, UserView};

mod create;
mod edit;
mod quick_edit;

pub use create::{CreateUserController, CreateUserFields};
pub use edit::{EditUserController, EditUserFields};
pub use quick_edit::QuickEditController;

/// Lifecycle phase of an entity page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityPhase {
    /// Accepting input.
    Idle,
    /// Fetching the entity.
    Loading,
    /// A create or update is outstanding.
    Submitting,
    /// A delete is outstanding.
    Deleting,
}

/// Result of a submit or delete.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Leave the page for `Route`.
    Navigate(Route),
    /// The call failed; the page shows its error message.
    Failed,
    /// Another operation was outstanding, or nothing was confirmed.
    Ignored,
    /// The view was torn down first.
    Discarded,
}

/// Why an entity could not be mounted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MountFailure {
    /// Unknown id or a record without the expected shape.
    NotFound,
    /// Any other gateway failure.
    Failed,
    /// The view was torn down first.
    Discarded,
}

/// Await `fut` unless `token` is cancelled first or by the time it settles.
pub(crate) async fn cancellable<F>(token: &CancellationToken, fut: F) -> Option<F::Output>
where
    F: Future,
{
    let output = tokio::select! {
        biased;
        () = token.cancelled() => None,
        output = fut => Some(output),
    };
    output.filter(|_| !token.is_cancelled())
}

/// Fetch and transform one user.
///
/// # Errors
/// A 404 or shape error maps to [`MountFailure::NotFound`]; other gateway
/// errors to [`MountFailure::Failed`].
pub async fn fetch_user(
    gateway: &dyn UsersGateway,
    id: UserId,
    token: &CancellationToken,
) -> Result<UserView, MountFailure> {
    match cancellable(token, gateway.get(id)).await {
        None => Err(MountFailure::Discarded),
        Some(Ok(raw)) => Ok(transform_user_data(raw)),
        Some(Err(err)) if err.is_not_found() => {
            warn!(error = %err, user_id = %id, "user not found");
            Err(MountFailure::NotFound)
        }
        Some(Err(err)) => {
            error!(error = %err, user_id = %id, "failed to fetch user");
            Err(MountFailure::Failed)
        }
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use crate::domain::UserId;
    use crate::domain::transform::{RawBank, RawUser};

    pub(crate) fn raw_user(id: u64) -> RawUser {
        RawUser {
            first_name: Some("Emily".into()),
            last_name: Some("Johnson".into()),
            email: Some("emily.johnson@x.dummyjson.com".into()),
            phone: Some("+81 965-431-3024".into()),
            age: Some(29),
            gender: Some("female".into()),
            bank: Some(RawBank {
                iban: Some("DE89370400440532013000".into()),
                currency: Some("USD".into()),
                card_expire: Some("03/26".into()),
                ..RawBank::default()
            }),
            ..RawUser::with_id(UserId::new(id))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::{MockUsersGateway, UsersGatewayError};
    use rstest::rstest;

    #[rstest]
    #[case(UsersGatewayError::status(404_u16, "Not Found"), MountFailure::NotFound)]
    #[case(UsersGatewayError::invalid_shape("missing id"), MountFailure::NotFound)]
    #[case(UsersGatewayError::status(500_u16, "Internal Server Error"), MountFailure::Failed)]
    #[case(UsersGatewayError::transport("connection refused"), MountFailure::Failed)]
    #[tokio::test]
    async fn fetch_failures_are_classified(
        #[case] error: UsersGatewayError,
        #[case] expected: MountFailure,
    ) {
        let mut mock = MockUsersGateway::new();
        mock.expect_get().returning(move |_| Err(error.clone()));
        let result = fetch_user(&mock, UserId::new(1), &CancellationToken::new()).await;
        assert_eq!(result, Err(expected));
    }

    #[tokio::test]
    async fn cancelled_fetch_is_discarded() {
        let mut mock = MockUsersGateway::new();
        mock.expect_get()
            .times(0..=1)
            .returning(|id| Ok(test_support::raw_user(id.get())));
        let token = CancellationToken::new();
        token.cancel();
        let result = fetch_user(&mock, UserId::new(1), &token).await;
        assert_eq!(result, Err(MountFailure::Discarded));
    }
}
