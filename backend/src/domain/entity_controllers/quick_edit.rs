//! In-place edit from the users table.
//!
//! Edits the reduced [`UserFormData`] projection and saves it through
//! [`prepare_user_data_for_api`]. The account number is shown but stays the
//! user's IBAN; only name and currency change here.

use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use tracing::{error, info};

use super::{EntityPhase, MountFailure, SubmitOutcome, cancellable, fetch_user};
use crate::domain::form::{
    FieldChangeError, FieldDescriptor, FieldKind, FormState, account_type_options,
    currency_options,
};
use crate::domain::ports::UsersGateway;
use crate::domain::transform::prepare_user_data_for_api;
use crate::domain::{Locale, Route, UserFormData, UserId, UserMessage, UserView};

impl FormState for UserFormData {
    fn apply_change(&mut self, name: &str, value: &str) -> Result<(), FieldChangeError> {
        let slot = match name {
            "name" => &mut self.name,
            "currency" => &mut self.currency,
            "accountNumber" | "type" => return Err(FieldChangeError::read_only(name)),
            _ => return Err(FieldChangeError::unknown(name)),
        };
        value.clone_into(slot);
        Ok(())
    }
}

/// State of one quick-edit form.
pub struct QuickEditController {
    gateway: Arc<dyn UsersGateway>,
    locale: Locale,
    user: UserView,
    form: UserFormData,
    phase: EntityPhase,
    error: Option<UserMessage>,
}

impl QuickEditController {
    /// Mount on a user already loaded by the table.
    #[must_use]
    pub fn new(gateway: Arc<dyn UsersGateway>, locale: Locale, user: UserView) -> Self {
        Self {
            gateway,
            locale,
            form: UserFormData::from(&user),
            user,
            phase: EntityPhase::Idle,
            error: None,
        }
    }

    /// Fetch `id` and mount on it.
    ///
    /// # Errors
    /// See [`fetch_user`].
    pub async fn mount(
        gateway: Arc<dyn UsersGateway>,
        locale: Locale,
        id: UserId,
        token: &CancellationToken,
    ) -> Result<Self, MountFailure> {
        let user = fetch_user(gateway.as_ref(), id, token).await?;
        Ok(Self::new(gateway, locale, user))
    }

    /// Save the form.
    pub async fn submit(&mut self, token: &CancellationToken) -> SubmitOutcome {
        if self.phase != EntityPhase::Idle {
            return SubmitOutcome::Ignored;
        }
        let id = self.user.id();
        let payload = prepare_user_data_for_api(&self.form, &self.user);

        self.phase = EntityPhase::Submitting;
        self.error = None;
        let gateway = Arc::clone(&self.gateway);
        let result = cancellable(token, gateway.update(id, &payload)).await;
        self.phase = EntityPhase::Idle;

        match result {
            None => SubmitOutcome::Discarded,
            Some(Ok(())) => {
                info!(user_id = %id, "user updated from table");
                SubmitOutcome::Navigate(Route::list_after_mutation(self.locale, id))
            }
            Some(Err(err)) => {
                error!(error = %err, user_id = %id, "failed to update user from table");
                self.error = Some(UserMessage::UpdateFailed);
                SubmitOutcome::Failed
            }
        }
    }

    /// Discard the form.
    #[must_use]
    pub fn cancel(self) -> Route {
        Route::list(self.locale)
    }

    /// Inputs of the quick-edit form.
    #[must_use]
    pub fn field_descriptors(&self) -> Vec<FieldDescriptor> {
        vec![
            FieldDescriptor::new("accountNumber", "form.accountNumber", FieldKind::Text)
                .value(&self.form.account_number)
                .disabled(),
            FieldDescriptor::new("name", "form.name", FieldKind::Text)
                .value(&self.form.name)
                .required(),
            FieldDescriptor::new("currency", "form.currency", FieldKind::Select)
                .value(&self.form.currency)
                .options(currency_options())
                .required(),
            FieldDescriptor::new("type", "form.type", FieldKind::Select)
                .value(self.form.account_type().as_str())
                .options(account_type_options())
                .disabled(),
        ]
    }

    /// User being edited.
    #[must_use]
    pub fn user(&self) -> &UserView {
        &self.user
    }

    /// Form as typed.
    #[must_use]
    pub fn form(&self) -> &UserFormData {
        &self.form
    }

    /// Lifecycle phase.
    #[must_use]
    pub fn phase(&self) -> EntityPhase {
        self.phase
    }

    /// Inline error, if the last submit failed.
    #[must_use]
    pub fn error(&self) -> Option<UserMessage> {
        self.error
    }
}

impl FormState for QuickEditController {
    fn apply_change(&mut self, name: &str, value: &str) -> Result<(), FieldChangeError> {
        self.form.apply_change(name, value)
    }
}
