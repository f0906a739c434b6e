//! Table column descriptors.
//!
//! Columns form a closed set. Behaviour lives in dispatch functions, one per
//! output target, rather than on the descriptors:
//! - header cells resolve [`ColumnDescriptor::label_key`];
//! - data cells go through [`data_cell`];
//! - the generic key/value mapping goes through [`generic_cell`].

use serde_json::Value;

use crate::domain::{UserId, UserView};

/// Identifies a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColumnKey {
    /// `bank.iban`.
    AccountNumber,
    /// First and last name.
    Name,
    /// Email address.
    Email,
    /// `bank.currency`.
    Currency,
    /// Derived ATM/POS type.
    Type,
    /// Row controls rather than data.
    Actions,
}

impl ColumnKey {
    /// Key of the column in [`UserView::to_record`].
    #[must_use]
    pub const fn record_key(self) -> &'static str {
        match self {
            Self::AccountNumber => "accountNumber",
            Self::Name => "name",
            Self::Email => "email",
            Self::Currency => "currency",
            Self::Type => "type",
            Self::Actions => "actions",
        }
    }
}

/// Static description of one column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnDescriptor {
    /// Column identity.
    pub key: ColumnKey,
    /// Message key of the header label.
    pub label_key: &'static str,
    /// CSS width, when fixed.
    pub width: Option<&'static str>,
    /// Declared sortable. No sorting is implemented.
    pub sortable: bool,
}

/// Columns of the users table, in display order.
pub const USER_TABLE_COLUMNS: [ColumnDescriptor; 6] = [
    ColumnDescriptor {
        key: ColumnKey::AccountNumber,
        label_key: "table.columns.accountNumber",
        width: Some("22%"),
        sortable: true,
    },
    ColumnDescriptor {
        key: ColumnKey::Name,
        label_key: "table.columns.name",
        width: Some("20%"),
        sortable: true,
    },
    ColumnDescriptor {
        key: ColumnKey::Email,
        label_key: "table.columns.email",
        width: None,
        sortable: true,
    },
    ColumnDescriptor {
        key: ColumnKey::Currency,
        label_key: "table.columns.currency",
        width: Some("10%"),
        sortable: false,
    },
    ColumnDescriptor {
        key: ColumnKey::Type,
        label_key: "table.columns.type",
        width: Some("8%"),
        sortable: false,
    },
    ColumnDescriptor {
        key: ColumnKey::Actions,
        label_key: "table.columns.actions",
        width: Some("16%"),
        sortable: false,
    },
];

/// Content of a data cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CellValue {
    /// Plain text.
    Text(String),
    /// Row controls for the given user.
    Actions(UserId),
}

/// Data-cell dispatch.
#[must_use]
pub fn data_cell(key: ColumnKey, user: &UserView) -> CellValue {
    match key {
        ColumnKey::AccountNumber => CellValue::Text(user.account_number().to_owned()),
        ColumnKey::Name => CellValue::Text(user.full_name()),
        ColumnKey::Email => CellValue::Text(user.email().to_owned()),
        ColumnKey::Currency => CellValue::Text(user.currency().to_owned()),
        ColumnKey::Type => CellValue::Text(user.account_type().to_string()),
        ColumnKey::Actions => CellValue::Actions(user.id()),
    }
}

/// Generic-mapping dispatch over a flat record.
///
/// Strings pass through, numbers and booleans are formatted, objects and
/// arrays are stringified as JSON, and missing values render empty.
#[must_use]
pub fn generic_cell(key: ColumnKey, record: &Value) -> String {
    match key {
        ColumnKey::Actions => String::new(),
        ColumnKey::Name => {
            let first = record.get("firstName").map(stringify).unwrap_or_default();
            let last = record.get("lastName").map(stringify).unwrap_or_default();
            format!("{first} {last}").trim().to_owned()
        }
        other => record
            .get(other.record_key())
            .map(stringify)
            .unwrap_or_default(),
    }
}

/// Text form of a JSON value for display.
#[must_use]
pub fn stringify(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(text) => text.clone(),
        Value::Bool(_) | Value::Number(_) | Value::Array(_) | Value::Object(_) => {
            value.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::transform::{RawBank, RawUser, transform_user_data};
    use rstest::rstest;
    use serde_json::json;

    fn user() -> UserView {
        transform_user_data(RawUser {
            first_name: Some("Ann".into()),
            last_name: Some("Lee".into()),
            bank: Some(RawBank {
                iban: Some("GB29NWBK60161331926819".into()),
                currency: Some("EUR".into()),
                ..RawBank::default()
            }),
            ..RawUser::with_id(UserId::new(12))
        })
    }

    #[rstest]
    #[case(ColumnKey::AccountNumber, CellValue::Text("GB29NWBK60161331926819".into()))]
    #[case(ColumnKey::Name, CellValue::Text("Ann Lee".into()))]
    #[case(ColumnKey::Currency, CellValue::Text("EUR".into()))]
    #[case(ColumnKey::Type, CellValue::Text("ATM".into()))]
    #[case(ColumnKey::Actions, CellValue::Actions(UserId::new(12)))]
    fn data_cells_read_view(#[case] key: ColumnKey, #[case] expected: CellValue) {
        assert_eq!(data_cell(key, &user()), expected);
    }

    #[test]
    fn generic_cells_agree_with_data_cells_for_text_columns() {
        let view = user();
        let record = view.to_record();
        for column in USER_TABLE_COLUMNS {
            if let CellValue::Text(text) = data_cell(column.key, &view) {
                assert_eq!(generic_cell(column.key, &record), text, "{:?}", column.key);
            }
        }
    }

    #[test]
    fn generic_cell_stringifies_objects() {
        let record = json!({"currency": {"code": "SAR"}, "type": 3});
        assert_eq!(generic_cell(ColumnKey::Currency, &record), r#"{"code":"SAR"}"#);
        assert_eq!(generic_cell(ColumnKey::Type, &record), "3");
        assert_eq!(generic_cell(ColumnKey::Email, &record), "");
    }

    #[test]
    fn actions_is_the_last_column() {
        assert_eq!(
            USER_TABLE_COLUMNS.last().map(|c| c.key),
            Some(ColumnKey::Actions)
        );
    }
}
