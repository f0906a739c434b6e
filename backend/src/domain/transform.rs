//! Mapping between upstream records and the console's models.
//!
//! [`transform_user_data`] is total: every optional field gets a default, so a
//! sparse record (the list endpoint only selects a few fields) still yields a
//! complete [`UserView`].

use serde::{Deserialize, Serialize};

use crate::domain::user::{AccountType, Address, Bank, Company, UserEdit, UserFormData, UserId, UserView};

/// Currency assumed when the bank record carries none.
pub const DEFAULT_CURRENCY: &str = "SAR";
/// Card expiry assumed when the bank record carries none.
pub const DEFAULT_CARD_EXPIRE: &str = "12/25";
/// Card scheme assumed when the bank record carries none.
pub const DEFAULT_CARD_TYPE: &str = "VISA";
/// Gender sent when the existing record has none.
pub const FALLBACK_GENDER: &str = "other";

const SYNTHETIC_EMAIL_DOMAIN: &str = "example.com";

/// Bank record as returned upstream.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawBank {
    /// IBAN.
    pub iban: Option<String>,
    /// Currency code.
    pub currency: Option<String>,
    /// Card number.
    pub card_number: Option<String>,
    /// Card expiry.
    pub card_expire: Option<String>,
    /// Card scheme.
    pub card_type: Option<String>,
}

/// User record as returned upstream. Only `id` is required.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawUser {
    /// Upstream id.
    pub id: UserId,
    /// Given name.
    #[serde(default)]
    pub first_name: Option<String>,
    /// Family name.
    #[serde(default)]
    pub last_name: Option<String>,
    /// Email address.
    #[serde(default)]
    pub email: Option<String>,
    /// Phone number.
    #[serde(default)]
    pub phone: Option<String>,
    /// Age in years.
    #[serde(default)]
    pub age: Option<u32>,
    /// Gender.
    #[serde(default)]
    pub gender: Option<String>,
    /// Avatar URL.
    #[serde(default)]
    pub image: Option<String>,
    /// Bank record.
    #[serde(default)]
    pub bank: Option<RawBank>,
    /// Postal address.
    #[serde(default)]
    pub address: Option<Address>,
    /// Employer.
    #[serde(default)]
    pub company: Option<Company>,
}

impl RawUser {
    /// A record carrying nothing but its id.
    #[must_use]
    pub fn with_id(id: UserId) -> Self {
        Self {
            id,
            first_name: None,
            last_name: None,
            email: None,
            phone: None,
            age: None,
            gender: None,
            image: None,
            bank: None,
            address: None,
            company: None,
        }
    }
}

/// Bank sub-record of an outgoing payload.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BankPayload {
    /// IBAN, doubling as account number.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub iban: Option<String>,
    /// Currency code.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    /// Card number.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub card_number: Option<String>,
    /// Card expiry.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub card_expire: Option<String>,
    /// Card scheme.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub card_type: Option<String>,
}

/// JSON body for create and update calls. Unset fields are omitted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPayload {
    /// Given name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    /// Family name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    /// Login name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    /// Email address.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Phone number.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    /// Age in years.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age: Option<u32>,
    /// Gender.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    /// Derived account type of the record being saved.
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub account_type: Option<AccountType>,
    /// Bank fields.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bank: Option<BankPayload>,
}

fn synthetic_email(local_part: &str) -> String {
    format!("{local_part}@{SYNTHETIC_EMAIL_DOMAIN}")
}

/// Upstream sends `""` for some unset fields; those take the default too.
fn present(value: Option<String>) -> Option<String> {
    value.filter(|text| !text.is_empty())
}

/// Map an upstream record to the read model, defaulting every optional field.
///
/// Absent and empty values are treated alike.
///
/// # Examples
/// ```
/// use user_admin::domain::transform::{RawUser, transform_user_data};
/// use user_admin::domain::{AccountType, UserId};
///
/// let view = transform_user_data(RawUser::with_id(UserId::new(4)));
/// assert_eq!(view.phone(), "");
/// assert_eq!(view.age(), 0);
/// assert_eq!(view.bank().card_expire, "12/25");
/// assert_eq!(view.account_type(), AccountType::Atm);
/// ```
#[must_use]
pub fn transform_user_data(raw: RawUser) -> UserView {
    let RawUser {
        id,
        first_name,
        last_name,
        email,
        phone,
        age,
        gender,
        image,
        bank,
        address,
        company,
    } = raw;
    let bank = bank.unwrap_or_default();
    let iban = bank.iban.unwrap_or_default();
    let email = present(email).unwrap_or_else(|| synthetic_email(&iban));
    UserView {
        id,
        first_name: first_name.unwrap_or_default(),
        last_name: last_name.unwrap_or_default(),
        email,
        phone: phone.unwrap_or_default(),
        age: age.unwrap_or(0),
        gender: gender.unwrap_or_default(),
        image: image.unwrap_or_default(),
        bank: Bank {
            iban,
            currency: present(bank.currency).unwrap_or_else(|| DEFAULT_CURRENCY.to_owned()),
            card_number: bank.card_number.unwrap_or_default(),
            card_expire: present(bank.card_expire)
                .unwrap_or_else(|| DEFAULT_CARD_EXPIRE.to_owned()),
            card_type: present(bank.card_type).unwrap_or_else(|| DEFAULT_CARD_TYPE.to_owned()),
        },
        address,
        company,
    }
}

/// Element-wise [`transform_user_data`], preserving order.
#[must_use]
pub fn transform_users_list(raws: Vec<RawUser>) -> Vec<UserView> {
    raws.into_iter().map(transform_user_data).collect()
}

/// Split `"first rest of name"` on the first space.
///
/// # Examples
/// ```
/// use user_admin::domain::transform::split_full_name;
///
/// assert_eq!(split_full_name("John Smith"), ("John".into(), "Smith".into()));
/// assert_eq!(split_full_name("Madonna"), ("Madonna".into(), String::new()));
/// ```
#[must_use]
pub fn split_full_name(name: &str) -> (String, String) {
    match name.split_once(' ') {
        Some((first, rest)) => (first.to_owned(), rest.to_owned()),
        None => (name.to_owned(), String::new()),
    }
}

/// Build the update payload for the in-place edit form.
///
/// Username and email are synthesized from the account number, which also
/// becomes the IBAN and card number. Gender and card expiry come from the
/// existing record.
#[must_use]
pub fn prepare_user_data_for_api(form: &UserFormData, existing: &UserView) -> UserPayload {
    let (first_name, last_name) = split_full_name(&form.name);
    let gender = if existing.gender().is_empty() {
        FALLBACK_GENDER.to_owned()
    } else {
        existing.gender().to_owned()
    };
    let card_expire = if existing.bank().card_expire.is_empty() {
        DEFAULT_CARD_EXPIRE.to_owned()
    } else {
        existing.bank().card_expire.clone()
    };
    UserPayload {
        first_name: Some(first_name),
        last_name: Some(last_name),
        username: Some(form.account_number.clone()),
        email: Some(synthetic_email(&form.account_number)),
        gender: Some(gender),
        account_type: Some(existing.account_type()),
        bank: Some(BankPayload {
            iban: Some(form.account_number.clone()),
            currency: Some(form.currency.clone()),
            card_number: Some(form.account_number.clone()),
            card_expire: Some(card_expire),
            card_type: Some(DEFAULT_CARD_TYPE.to_owned()),
        }),
        ..UserPayload::default()
    }
}

impl UserEdit {
    /// Payload for the edit and create pages.
    ///
    /// An empty account number leaves `bank.iban` untouched upstream.
    #[must_use]
    pub fn into_payload(self) -> UserPayload {
        let iban = (!self.account_number.is_empty()).then_some(self.account_number);
        UserPayload {
            first_name: Some(self.first_name),
            last_name: Some(self.last_name),
            email: Some(self.email),
            phone: Some(self.phone),
            age: Some(self.age),
            gender: Some(self.gender),
            bank: Some(BankPayload {
                iban,
                currency: Some(self.currency),
                ..BankPayload::default()
            }),
            ..UserPayload::default()
        }
    }
}
