//! Domain primitives, controllers and ports.
//!
//! Purpose: hold everything the admin console knows about users without
//! depending on HTTP or on the upstream API's wire format beyond the raw
//! record shape.
//!
//! Public surface:
//! - `UserView` / `UserEdit` / `UserFormData`: read model, write model and
//!   the reduced in-place edit projection.
//! - `transform`: raw record → view mapping and payload preparation.
//! - `UsersTableController`: list view state machine.
//! - `entity_controllers`: create, edit and quick-edit page controllers.
//! - `ports`: gateway and message catalog ports.

pub mod columns;
pub mod entity_controllers;
pub mod error;
pub mod form;
pub mod locale;
pub mod messages;
pub mod ports;
pub mod routes;
pub mod table_controller;
pub mod trace_id;
pub mod transform;
pub mod user;

pub use self::columns::{CellValue, ColumnDescriptor, ColumnKey, USER_TABLE_COLUMNS};
pub use self::error::{Error, ErrorCode, TRACE_ID_HEADER};
pub use self::form::{FieldChangeError, FieldDescriptor, FieldKind, FormState, SelectOption};
pub use self::locale::{Locale, LocaleError, TextDirection};
pub use self::messages::{Messages, MessagesError, UserMessage};
pub use self::routes::Route;
pub use self::table_controller::{
    LoadOutcome, PageInputResult, TablePhase, TableSettings, UsersTableController,
};
pub use self::trace_id::TraceId;
pub use self::user::{
    AccountType, Address, Bank, Company, Coordinates, UserEdit, UserFormData, UserId, UserView,
};

/// Convenient result alias for handlers and startup code.
pub type ApiResult<T> = Result<T, Error>;
