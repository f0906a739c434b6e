//! Declarative form fields and uniform change wiring.
//!
//! Forms describe their inputs as [`FieldDescriptor`]s; the HTTP layer renders
//! them without knowing which form they belong to. Submitted values come back
//! through [`FormState::apply_change`], one field at a time.
//!
//! A select field without a value shows a placeholder labelled by the message
//! key `form.select{Name}` (see [`placeholder_key`]). New select fields must
//! add that key to every catalog.

use thiserror::Error;

/// Currencies offered by the currency selects.
pub const CURRENCIES: [&str; 3] = ["SAR", "USD", "EUR"];

/// Input kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// `<input type="text">`.
    Text,
    /// `<input type="email">`.
    Email,
    /// `<input type="tel">`.
    Tel,
    /// `<input type="number">`.
    Number,
    /// `<select>`.
    Select,
}

impl FieldKind {
    /// HTML `type` attribute for input kinds; `None` for selects.
    #[must_use]
    pub const fn input_type(self) -> Option<&'static str> {
        match self {
            Self::Text => Some("text"),
            Self::Email => Some("email"),
            Self::Tel => Some("tel"),
            Self::Number => Some("number"),
            Self::Select => None,
        }
    }
}

/// Label of a select option.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OptionLabel {
    /// Shown as is, e.g. currency codes.
    Literal(String),
    /// Resolved through the message catalog.
    Message(String),
}

/// One `<option>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption {
    /// Submitted value.
    pub value: String,
    /// Display label.
    pub label: OptionLabel,
}

impl SelectOption {
    /// Option whose label is its value.
    #[must_use]
    pub fn literal(value: impl Into<String>) -> Self {
        let value = value.into();
        Self {
            label: OptionLabel::Literal(value.clone()),
            value,
        }
    }

    /// Option labelled by a message key.
    #[must_use]
    pub fn message(value: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: OptionLabel::Message(key.into()),
        }
    }
}

/// Description of one form input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDescriptor {
    /// Message key of the label.
    pub label_key: String,
    /// Form field name, also the `FormState` key.
    pub name: String,
    /// Input kind.
    pub kind: FieldKind,
    /// Current value.
    pub value: String,
    /// Native `required`.
    pub required: bool,
    /// Rendered read-only and never submitted.
    pub disabled: bool,
    /// Options of a select.
    pub options: Vec<SelectOption>,
    /// Message key of an input placeholder.
    pub placeholder_key: Option<String>,
    /// Native `min` of number inputs.
    pub min: Option<i64>,
    /// Native `max` of number inputs.
    pub max: Option<i64>,
}

impl FieldDescriptor {
    /// Start a descriptor with an empty value.
    #[must_use]
    pub fn new(name: impl Into<String>, label_key: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            label_key: label_key.into(),
            name: name.into(),
            kind,
            value: String::new(),
            required: false,
            disabled: false,
            options: Vec::new(),
            placeholder_key: None,
            min: None,
            max: None,
        }
    }

    /// Set the current value.
    #[must_use]
    pub fn value(mut self, value: impl Into<String>) -> Self {
        self.value = value.into();
        self
    }

    /// Mark required.
    #[must_use]
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Mark disabled.
    #[must_use]
    pub fn disabled(mut self) -> Self {
        self.disabled = true;
        self
    }

    /// Set select options.
    #[must_use]
    pub fn options(mut self, options: Vec<SelectOption>) -> Self {
        self.options = options;
        self
    }

    /// Set a placeholder message key.
    #[must_use]
    pub fn placeholder(mut self, key: impl Into<String>) -> Self {
        self.placeholder_key = Some(key.into());
        self
    }

    /// Set numeric bounds.
    #[must_use]
    pub fn bounds(mut self, min: i64, max: i64) -> Self {
        self.min = Some(min);
        self.max = Some(max);
        self
    }

    /// Placeholder option key for an empty select.
    #[must_use]
    pub fn select_placeholder_key(&self) -> Option<String> {
        (self.kind == FieldKind::Select && self.value.is_empty())
            .then(|| placeholder_key(&self.name))
    }
}

/// `form.select` followed by the capitalized field name.
///
/// # Examples
/// ```
/// use user_admin::domain::form::placeholder_key;
///
/// assert_eq!(placeholder_key("currency"), "form.selectCurrency");
/// assert_eq!(placeholder_key("type"), "form.selectType");
/// ```
#[must_use]
pub fn placeholder_key(name: &str) -> String {
    let mut chars = name.chars();
    let capitalized: String = chars
        .next()
        .map(|first| first.to_uppercase().chain(chars).collect())
        .unwrap_or_default();
    format!("form.select{capitalized}")
}

/// Currency select options.
#[must_use]
pub fn currency_options() -> Vec<SelectOption> {
    CURRENCIES.into_iter().map(SelectOption::literal).collect()
}

/// Gender select options.
#[must_use]
pub fn gender_options() -> Vec<SelectOption> {
    vec![
        SelectOption::message("male", "form.male"),
        SelectOption::message("female", "form.female"),
    ]
}

/// Account type select options.
#[must_use]
pub fn account_type_options() -> Vec<SelectOption> {
    crate::domain::AccountType::ALL
        .into_iter()
        .map(|kind| SelectOption::literal(kind.as_str()))
        .collect()
}

/// Rejected field change.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldChangeError {
    /// The form has no field of that name.
    #[error("unknown form field `{name}`")]
    UnknownField {
        /// Submitted name.
        name: String,
    },
    /// The field is display-only.
    #[error("form field `{name}` is read only")]
    ReadOnly {
        /// Submitted name.
        name: String,
    },
}

impl FieldChangeError {
    pub(crate) fn unknown(name: &str) -> Self {
        Self::UnknownField {
            name: name.to_owned(),
        }
    }

    pub(crate) fn read_only(name: &str) -> Self {
        Self::ReadOnly {
            name: name.to_owned(),
        }
    }
}

/// Uniform change wiring implemented by every form model.
pub trait FormState {
    /// Apply one named value.
    ///
    /// # Errors
    /// Unknown and read-only names are rejected without changing state.
    fn apply_change(&mut self, name: &str, value: &str) -> Result<(), FieldChangeError>;

    /// Apply submitted pairs in order, stopping at the first rejection.
    ///
    /// # Errors
    /// See [`FormState::apply_change`].
    fn apply_all<'a, I>(&mut self, pairs: I) -> Result<(), FieldChangeError>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
        Self: Sized,
    {
        pairs
            .into_iter()
            .try_for_each(|(name, value)| self.apply_change(name, value))
    }
}
