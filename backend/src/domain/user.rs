//! User read and write models.
//!
//! [`UserView`] is what views display. Its derived fields (account number,
//! currency, account type) are computed from the bank record and the id and
//! cannot be set. [`UserEdit`] carries only true inputs; editing the account
//! number overwrites `bank.iban`. [`UserFormData`] is the reduced projection
//! used by the in-place edit from the table.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Upstream user identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(u64);

impl UserId {
    /// Wrap a raw id.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Raw value.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Account type shown in the table. Always derived from the id's parity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AccountType {
    /// Even ids.
    #[serde(rename = "ATM")]
    Atm,
    /// Odd ids.
    #[serde(rename = "POS")]
    Pos,
}

impl AccountType {
    /// Both variants in display order.
    pub const ALL: [Self; 2] = [Self::Atm, Self::Pos];

    /// Even id → ATM, odd id → POS.
    ///
    /// # Examples
    /// ```
    /// use user_admin::domain::{AccountType, UserId};
    ///
    /// assert_eq!(AccountType::for_id(UserId::new(4)), AccountType::Atm);
    /// assert_eq!(AccountType::for_id(UserId::new(7)), AccountType::Pos);
    /// ```
    #[must_use]
    pub const fn for_id(id: UserId) -> Self {
        if id.get().is_multiple_of(2) { Self::Atm } else { Self::Pos }
    }

    /// Display and wire value.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Atm => "ATM",
            Self::Pos => "POS",
        }
    }
}

impl fmt::Display for AccountType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Bank record with every field defaulted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Bank {
    /// Doubles as the account number.
    pub iban: String,
    /// ISO currency code.
    pub currency: String,
    /// Card number.
    pub card_number: String,
    /// Card expiry, `MM/YY`.
    pub card_expire: String,
    /// Card scheme.
    pub card_type: String,
}

/// Geographic position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    /// Latitude.
    pub lat: f64,
    /// Longitude.
    pub lng: f64,
}

/// Free-form postal address.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Address {
    /// Street line.
    pub address: Option<String>,
    /// City.
    pub city: Option<String>,
    /// State or region.
    pub state: Option<String>,
    /// Postal code.
    pub postal_code: Option<String>,
    /// Country.
    pub country: Option<String>,
    /// Position, when known.
    pub coordinates: Option<Coordinates>,
}

impl Address {
    /// Non-empty parts joined with `", "`.
    #[must_use]
    pub fn one_line(&self) -> Option<String> {
        let parts: Vec<&str> = [
            &self.address,
            &self.city,
            &self.state,
            &self.postal_code,
            &self.country,
        ]
        .into_iter()
        .filter_map(|part| part.as_deref())
        .filter(|part| !part.trim().is_empty())
        .collect();
        (!parts.is_empty()).then(|| parts.join(", "))
    }
}

/// Free-form employer record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Company {
    /// Company name.
    pub name: Option<String>,
    /// Department.
    pub department: Option<String>,
    /// Job title.
    pub title: Option<String>,
    /// Company address.
    pub address: Option<Address>,
}

/// Read model displayed by every view.
#[derive(Debug, Clone, PartialEq)]
pub struct UserView {
    pub(crate) id: UserId,
    pub(crate) first_name: String,
    pub(crate) last_name: String,
    pub(crate) email: String,
    pub(crate) phone: String,
    pub(crate) age: u32,
    pub(crate) gender: String,
    pub(crate) image: String,
    pub(crate) bank: Bank,
    pub(crate) address: Option<Address>,
    pub(crate) company: Option<Company>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct UserRecord<'a> {
    id: UserId,
    first_name: &'a str,
    last_name: &'a str,
    email: &'a str,
    phone: &'a str,
    age: u32,
    gender: &'a str,
    image: &'a str,
    account_number: &'a str,
    currency: &'a str,
    #[serde(rename = "type")]
    account_type: AccountType,
    bank: &'a Bank,
    #[serde(skip_serializing_if = "Option::is_none")]
    address: Option<&'a Address>,
    #[serde(skip_serializing_if = "Option::is_none")]
    company: Option<&'a Company>,
}

impl UserView {
    /// Identifier.
    #[must_use]
    pub fn id(&self) -> UserId {
        self.id
    }

    /// Given name.
    #[must_use]
    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    /// Family name.
    #[must_use]
    pub fn last_name(&self) -> &str {
        &self.last_name
    }

    /// `"first last"`, trimmed.
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_owned()
    }

    /// Email address.
    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Phone number.
    #[must_use]
    pub fn phone(&self) -> &str {
        &self.phone
    }

    /// Age in years; `0` when unknown.
    #[must_use]
    pub fn age(&self) -> u32 {
        self.age
    }

    /// Gender as reported upstream.
    #[must_use]
    pub fn gender(&self) -> &str {
        &self.gender
    }

    /// Avatar URL; empty when unknown.
    #[must_use]
    pub fn image(&self) -> &str {
        &self.image
    }

    /// Bank record.
    #[must_use]
    pub fn bank(&self) -> &Bank {
        &self.bank
    }

    /// Postal address, when present.
    #[must_use]
    pub fn address(&self) -> Option<&Address> {
        self.address.as_ref()
    }

    /// Employer, when present.
    #[must_use]
    pub fn company(&self) -> Option<&Company> {
        self.company.as_ref()
    }

    /// Derived from `bank.iban`.
    #[must_use]
    pub fn account_number(&self) -> &str {
        &self.bank.iban
    }

    /// Derived from `bank.currency`.
    #[must_use]
    pub fn currency(&self) -> &str {
        &self.bank.currency
    }

    /// Derived from the id's parity.
    #[must_use]
    pub fn account_type(&self) -> AccountType {
        AccountType::for_id(self.id)
    }

    /// Apply true inputs, producing a new view.
    ///
    /// The account number lands in `bank.iban`; derived fields follow.
    #[must_use]
    pub fn apply_edit(&self, edit: &UserEdit) -> Self {
        let mut next = self.clone();
        next.first_name.clone_from(&edit.first_name);
        next.last_name.clone_from(&edit.last_name);
        next.email.clone_from(&edit.email);
        next.phone.clone_from(&edit.phone);
        next.age = edit.age;
        next.gender.clone_from(&edit.gender);
        next.bank.currency.clone_from(&edit.currency);
        next.bank.iban.clone_from(&edit.account_number);
        next
    }

    /// Flat JSON record including derived fields, keyed like the table
    /// columns. Feeds the generic-mapping renderer.
    #[must_use]
    pub fn to_record(&self) -> Value {
        let record = UserRecord {
            id: self.id,
            first_name: &self.first_name,
            last_name: &self.last_name,
            email: &self.email,
            phone: &self.phone,
            age: self.age,
            gender: &self.gender,
            image: &self.image,
            account_number: self.account_number(),
            currency: self.currency(),
            account_type: self.account_type(),
            bank: &self.bank,
            address: self.address.as_ref(),
            company: self.company.as_ref(),
        };
        serde_json::to_value(record).unwrap_or(Value::Null)
    }
}

/// Write model: the true inputs of a user.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserEdit {
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Email address.
    pub email: String,
    /// Phone number.
    pub phone: String,
    /// Age in years.
    pub age: u32,
    /// Gender.
    pub gender: String,
    /// ISO currency code, stored as `bank.currency`.
    pub currency: String,
    /// Account number, stored as `bank.iban`.
    pub account_number: String,
}

impl From<&UserView> for UserEdit {
    fn from(view: &UserView) -> Self {
        Self {
            first_name: view.first_name.clone(),
            last_name: view.last_name.clone(),
            email: view.email.clone(),
            phone: view.phone.clone(),
            age: view.age,
            gender: view.gender.clone(),
            currency: view.bank.currency.clone(),
            account_number: view.bank.iban.clone(),
        }
    }
}

/// Reduced projection edited in place from the table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserFormData {
    /// Account number; saved as `bank.iban`.
    pub account_number: String,
    /// `"first last"`; split on the first space when saved.
    pub name: String,
    /// ISO currency code.
    pub currency: String,
    account_type: AccountType,
}

impl UserFormData {
    /// Derived type shown read-only on the form.
    #[must_use]
    pub fn account_type(&self) -> AccountType {
        self.account_type
    }
}

impl From<&UserView> for UserFormData {
    fn from(view: &UserView) -> Self {
        Self {
            account_number: view.account_number().to_owned(),
            name: view.full_name(),
            currency: view.currency().to_owned(),
            account_type: view.account_type(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::transform::{RawUser, transform_user_data};

    fn view(id: u64) -> UserView {
        transform_user_data(RawUser {
            first_name: Some("Emily".into()),
            last_name: Some("Johnson".into()),
            ..RawUser::with_id(UserId::new(id))
        })
    }

    #[test]
    fn apply_edit_overwrites_iban_and_keeps_type_derived() {
        let original = view(4);
        let mut edit = UserEdit::from(&original);
        edit.account_number = "SA0380000000608010167519".into();
        edit.currency = "USD".into();

        let next = original.apply_edit(&edit);

        assert_eq!(next.account_number(), "SA0380000000608010167519");
        assert_eq!(next.bank().iban, "SA0380000000608010167519");
        assert_eq!(next.currency(), "USD");
        assert_eq!(next.account_type(), AccountType::Atm);
        assert_eq!(UserEdit::from(&next), edit);
    }

    #[test]
    fn record_carries_derived_fields() {
        let record = view(7).to_record();
        assert_eq!(record["type"], "POS");
        assert_eq!(record["accountNumber"], "");
        assert_eq!(record["currency"], "SAR");
        assert_eq!(record["bank"]["cardType"], "VISA");
        assert!(record.get("company").is_none());
    }

    #[test]
    fn form_data_composes_full_name() {
        let form = UserFormData::from(&view(3));
        assert_eq!(form.name, "Emily Johnson");
        assert_eq!(form.account_type(), AccountType::Pos);
    }

    #[test]
    fn one_line_address_skips_blanks() {
        let address = Address {
            address: Some("626 Main Street".into()),
            city: Some(" ".into()),
            country: Some("United States".into()),
            ..Address::default()
        };
        assert_eq!(
            address.one_line().as_deref(),
            Some("626 Main Street, United States")
        );
        assert_eq!(Address::default().one_line(), None);
    }
}
