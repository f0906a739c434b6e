//! Create page controller.

use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use tracing::{error, info};

use super::{EntityPhase, SubmitOutcome, cancellable};
use crate::domain::form::{
    FieldChangeError, FieldDescriptor, FieldKind, FormState, currency_options, gender_options,
};
use crate::domain::ports::UsersGateway;
use crate::domain::{Locale, Route, UserEdit, UserMessage};

/// Fields of the create form, all starting empty.
///
/// There is no type field: the type follows the id the API assigns.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CreateUserFields {
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Email address.
    pub email: String,
    /// Phone number.
    pub phone: String,
    /// Age as typed.
    pub age: String,
    /// Gender.
    pub gender: String,
    /// Currency code.
    pub currency: String,
}

impl CreateUserFields {
    /// Write model for the typed values. An unparsable age becomes `0`.
    #[must_use]
    pub fn to_edit(&self) -> UserEdit {
        UserEdit {
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            email: self.email.clone(),
            phone: self.phone.clone(),
            age: self.age.trim().parse().unwrap_or(0),
            gender: self.gender.clone(),
            currency: self.currency.clone(),
            account_number: String::new(),
        }
    }
}

impl FormState for CreateUserFields {
    fn apply_change(&mut self, name: &str, value: &str) -> Result<(), FieldChangeError> {
        let slot = match name {
            "firstName" => &mut self.first_name,
            "lastName" => &mut self.last_name,
            "email" => &mut self.email,
            "phone" => &mut self.phone,
            "age" => &mut self.age,
            "gender" => &mut self.gender,
            "currency" => &mut self.currency,
            "type" => return Err(FieldChangeError::read_only(name)),
            _ => return Err(FieldChangeError::unknown(name)),
        };
        value.clone_into(slot);
        Ok(())
    }
}

/// State of one create page.
pub struct CreateUserController {
    gateway: Arc<dyn UsersGateway>,
    locale: Locale,
    fields: CreateUserFields,
    phase: EntityPhase,
    error: Option<UserMessage>,
}

impl CreateUserController {
    /// Empty form.
    #[must_use]
    pub fn new(gateway: Arc<dyn UsersGateway>, locale: Locale) -> Self {
        Self {
            gateway,
            locale,
            fields: CreateUserFields::default(),
            phase: EntityPhase::Idle,
            error: None,
        }
    }

    /// POST the typed user.
    pub async fn submit(&mut self, token: &CancellationToken) -> SubmitOutcome {
        if self.phase != EntityPhase::Idle {
            return SubmitOutcome::Ignored;
        }
        let payload = self.fields.to_edit().into_payload();

        self.phase = EntityPhase::Submitting;
        self.error = None;
        let gateway = Arc::clone(&self.gateway);
        let result = cancellable(token, gateway.create(&payload)).await;
        self.phase = EntityPhase::Idle;

        match result {
            None => SubmitOutcome::Discarded,
            Some(Ok(Some(id))) => {
                info!(user_id = %id, "user created");
                SubmitOutcome::Navigate(Route::list_after_mutation(self.locale, id))
            }
            Some(Ok(None)) => {
                info!("user created without an id in the response");
                SubmitOutcome::Navigate(Route::list(self.locale))
            }
            Some(Err(err)) => {
                error!(error = %err, "failed to create user");
                self.error = Some(UserMessage::CreateFailed);
                SubmitOutcome::Failed
            }
        }
    }

    /// Inputs of the create form; every field is required.
    #[must_use]
    pub fn field_descriptors(&self) -> Vec<FieldDescriptor> {
        let fields = &self.fields;
        vec![
            FieldDescriptor::new("firstName", "form.firstName", FieldKind::Text)
                .value(&fields.first_name),
            FieldDescriptor::new("lastName", "form.lastName", FieldKind::Text)
                .value(&fields.last_name),
            FieldDescriptor::new("email", "form.email", FieldKind::Email).value(&fields.email),
            FieldDescriptor::new("phone", "form.phone", FieldKind::Tel).value(&fields.phone),
            FieldDescriptor::new("age", "form.age", FieldKind::Number)
                .value(&fields.age)
                .bounds(18, 100),
            FieldDescriptor::new("gender", "form.gender", FieldKind::Select)
                .value(&fields.gender)
                .options(gender_options()),
            FieldDescriptor::new("currency", "form.currency", FieldKind::Select)
                .value(&fields.currency)
                .options(currency_options()),
        ]
        .into_iter()
        .map(FieldDescriptor::required)
        .collect()
    }

    /// View locale.
    #[must_use]
    pub fn locale(&self) -> Locale {
        self.locale
    }

    /// Typed values.
    #[must_use]
    pub fn fields(&self) -> &CreateUserFields {
        &self.fields
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

impl FormState for CreateUserController {
    fn apply_change(&mut self, name: &str, value: &str) -> Result<(), FieldChangeError> {
        self.fields.apply_change(name, value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::UserId;
    use crate::domain::ports::{MockUsersGateway, UsersGatewayError};

    const TYPED: [(&str, &str); 7] = [
        ("firstName", "Layla"),
        ("lastName", "Al Harbi"),
        ("email", "layla@example.com"),
        ("phone", "+966 50 000 0000"),
        ("age", "31"),
        ("gender", "female"),
        ("currency", "SAR"),
    ];

    #[test]
    fn starts_empty_and_required() {
        let controller = CreateUserController::new(Arc::new(MockUsersGateway::new()), Locale::En);
        let descriptors = controller.field_descriptors();
        assert!(descriptors.iter().all(|f| f.required && f.value.is_empty()));
        assert!(descriptors.iter().all(|f| f.name != "type"));
    }

    #[tokio::test]
    async fn submit_posts_and_navigates_with_assigned_id() {
        let mut mock = MockUsersGateway::new();
        mock.expect_create()
            .withf(|payload| {
                payload.first_name.as_deref() == Some("Layla")
                    && payload.age == Some(31)
                    && payload.bank.as_ref().and_then(|b| b.iban.as_deref()).is_none()
            })
            .times(1)
            .returning(|_| Ok(Some(UserId::new(209))));
        let mut controller = CreateUserController::new(Arc::new(mock), Locale::Ar);
        controller.apply_all(TYPED).expect("known fields");

        let outcome = controller.submit(&CancellationToken::new()).await;

        assert_eq!(
            outcome,
            SubmitOutcome::Navigate(Route::list_after_mutation(Locale::Ar, UserId::new(209)))
        );
    }

    #[tokio::test]
    async fn failure_keeps_the_form() {
        let mut mock = MockUsersGateway::new();
        mock.expect_create()
            .returning(|_| Err(UsersGatewayError::transport("timed out")));
        let mut controller = CreateUserController::new(Arc::new(mock), Locale::En);
        controller.apply_all(TYPED).expect("known fields");

        assert_eq!(
            controller.submit(&CancellationToken::new()).await,
            SubmitOutcome::Failed
        );
        assert_eq!(controller.error(), Some(UserMessage::CreateFailed));
        assert_eq!(controller.fields().last_name, "Al Harbi");
    }

    #[test]
    fn type_cannot_be_chosen() {
        let mut fields = CreateUserFields::default();
        assert_eq!(
            fields.apply_change("type", "ATM"),
            Err(FieldChangeError::read_only("type"))
        );
    }
}
