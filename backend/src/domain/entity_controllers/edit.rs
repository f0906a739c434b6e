//! Edit page controller.

use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use tracing::{error, info};

use super::{EntityPhase, MountFailure, SubmitOutcome, cancellable, fetch_user};
use crate::domain::form::{
    FieldChangeError, FieldDescriptor, FieldKind, FormState, account_type_options,
    currency_options, gender_options,
};
use crate::domain::ports::UsersGateway;
use crate::domain::{Locale, Route, UserEdit, UserId, UserMessage, UserView};

/// Editable fields of the edit page.
///
/// Email, gender and type are not here: they are read from the fetched user
/// every time the page renders.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditUserFields {
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Phone number.
    pub phone: String,
    /// Age as typed.
    pub age: String,
    /// Currency code.
    pub currency: String,
}

impl EditUserFields {
    fn seed(user: &UserView) -> Self {
        Self {
            first_name: user.first_name().to_owned(),
            last_name: user.last_name().to_owned(),
            phone: user.phone().to_owned(),
            age: user.age().to_string(),
            currency: user.currency().to_owned(),
        }
    }

    /// Overlay the typed values on `base`. An unparsable age keeps the
    /// existing one.
    #[must_use]
    pub fn merge_into(&self, base: UserEdit) -> UserEdit {
        UserEdit {
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            phone: self.phone.clone(),
            age: self.age.trim().parse().unwrap_or(base.age),
            currency: self.currency.clone(),
            ..base
        }
    }
}

impl FormState for EditUserFields {
    fn apply_change(&mut self, name: &str, value: &str) -> Result<(), FieldChangeError> {
        let slot = match name {
            "firstName" => &mut self.first_name,
            "lastName" => &mut self.last_name,
            "phone" => &mut self.phone,
            "age" => &mut self.age,
            "currency" => &mut self.currency,
            "email" | "gender" | "type" => return Err(FieldChangeError::read_only(name)),
            _ => return Err(FieldChangeError::unknown(name)),
        };
        value.clone_into(slot);
        Ok(())
    }
}

/// State of one edit page.
pub struct EditUserController {
    gateway: Arc<dyn UsersGateway>,
    locale: Locale,
    id: UserId,
    user: Option<UserView>,
    fields: EditUserFields,
    phase: EntityPhase,
    error: Option<UserMessage>,
    confirming_delete: bool,
}

impl EditUserController {
    /// Controller for `id`; call [`Self::mount`] before anything else.
    #[must_use]
    pub fn new(gateway: Arc<dyn UsersGateway>, locale: Locale, id: UserId) -> Self {
        Self {
            gateway,
            locale,
            id,
            user: None,
            fields: EditUserFields::default(),
            phase: EntityPhase::Idle,
            error: None,
            confirming_delete: false,
        }
    }

    /// Fetch the user and seed the editable fields.
    ///
    /// # Errors
    /// See [`fetch_user`]. A plain failure also sets
    /// [`UserMessage::LoadUserFailed`].
    pub async fn mount(&mut self, token: &CancellationToken) -> Result<(), MountFailure> {
        self.phase = EntityPhase::Loading;
        let fetched = fetch_user(self.gateway.as_ref(), self.id, token).await;
        self.phase = EntityPhase::Idle;
        match fetched {
            Ok(user) => {
                self.fields = EditUserFields::seed(&user);
                self.user = Some(user);
                Ok(())
            }
            Err(failure) => {
                if failure == MountFailure::Failed {
                    self.error = Some(UserMessage::LoadUserFailed);
                }
                Err(failure)
            }
        }
    }

    /// Save the editable fields.
    pub async fn submit(&mut self, token: &CancellationToken) -> SubmitOutcome {
        if self.phase != EntityPhase::Idle {
            return SubmitOutcome::Ignored;
        }
        let Some(user) = self.user.as_ref() else {
            return SubmitOutcome::Ignored;
        };
        let payload = self.fields.merge_into(UserEdit::from(user)).into_payload();

        self.phase = EntityPhase::Submitting;
        self.error = None;
        let gateway = Arc::clone(&self.gateway);
        let result = cancellable(token, gateway.update(self.id, &payload)).await;
        self.phase = EntityPhase::Idle;

        match result {
            None => SubmitOutcome::Discarded,
            Some(Ok(())) => {
                info!(user_id = %self.id, "user updated");
                SubmitOutcome::Navigate(Route::list_after_mutation(self.locale, self.id))
            }
            Some(Err(err)) => {
                error!(error = %err, user_id = %self.id, "failed to update user");
                self.error = Some(UserMessage::UpdateFailed);
                SubmitOutcome::Failed
            }
        }
    }

    /// Open the delete confirmation.
    pub fn request_delete(&mut self) {
        self.confirming_delete = true;
    }

    /// Dismiss the delete confirmation without side effects.
    pub fn cancel_delete(&mut self) {
        self.confirming_delete = false;
    }

    /// Delete the user. Ignored unless the confirmation is open.
    pub async fn confirm_delete(&mut self, token: &CancellationToken) -> SubmitOutcome {
        if !self.confirming_delete || self.phase != EntityPhase::Idle {
            return SubmitOutcome::Ignored;
        }
        self.phase = EntityPhase::Deleting;
        self.error = None;
        let gateway = Arc::clone(&self.gateway);
        let result = cancellable(token, gateway.delete(self.id)).await;
        self.phase = EntityPhase::Idle;
        self.confirming_delete = false;

        match result {
            None => SubmitOutcome::Discarded,
            Some(Ok(())) => {
                info!(user_id = %self.id, "user deleted");
                SubmitOutcome::Navigate(Route::list_after_mutation(self.locale, self.id))
            }
            Some(Err(err)) => {
                error!(error = %err, user_id = %self.id, "failed to delete user");
                self.error = Some(UserMessage::DeleteFailed);
                SubmitOutcome::Failed
            }
        }
    }

    /// Inputs of the edit form.
    #[must_use]
    pub fn field_descriptors(&self) -> Vec<FieldDescriptor> {
        let email = self.user.as_ref().map(UserView::email).unwrap_or_default();
        let gender = self.user.as_ref().map(UserView::gender).unwrap_or_default();
        let account_type = self
            .user
            .as_ref()
            .map(|user| user.account_type().as_str())
            .unwrap_or_default();
        vec![
            FieldDescriptor::new("firstName", "form.firstName", FieldKind::Text)
                .value(&self.fields.first_name)
                .required(),
            FieldDescriptor::new("lastName", "form.lastName", FieldKind::Text)
                .value(&self.fields.last_name)
                .required(),
            FieldDescriptor::new("email", "form.email", FieldKind::Email)
                .value(email)
                .disabled(),
            FieldDescriptor::new("phone", "form.phone", FieldKind::Tel).value(&self.fields.phone),
            FieldDescriptor::new("age", "form.age", FieldKind::Number)
                .value(&self.fields.age)
                .bounds(18, 100),
            FieldDescriptor::new("gender", "form.gender", FieldKind::Select)
                .value(gender)
                .options(gender_options())
                .disabled(),
            FieldDescriptor::new("currency", "form.currency", FieldKind::Select)
                .value(&self.fields.currency)
                .options(currency_options()),
            FieldDescriptor::new("type", "form.type", FieldKind::Select)
                .value(account_type)
                .options(account_type_options())
                .disabled(),
        ]
    }

    /// Target user id.
    #[must_use]
    pub fn id(&self) -> UserId {
        self.id
    }

    /// View locale.
    #[must_use]
    pub fn locale(&self) -> Locale {
        self.locale
    }

    /// Fetched user, once mounted.
    #[must_use]
    pub fn user(&self) -> Option<&UserView> {
        self.user.as_ref()
    }

    /// Editable fields as typed.
    #[must_use]
    pub fn fields(&self) -> &EditUserFields {
        &self.fields
    }

    /// Lifecycle phase.
    #[must_use]
    pub fn phase(&self) -> EntityPhase {
        self.phase
    }

    /// Inline error, if the last operation failed.
    #[must_use]
    pub fn error(&self) -> Option<UserMessage> {
        self.error
    }

    /// Whether the delete confirmation is open.
    #[must_use]
    pub fn is_confirming_delete(&self) -> bool {
        self.confirming_delete
    }
}

impl FormState for EditUserController {
    fn apply_change(&mut self, name: &str, value: &str) -> Result<(), FieldChangeError> {
        self.fields.apply_change(name, value)
    }
}
