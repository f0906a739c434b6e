//! Domain ports and their in-memory implementations.

mod macros;
pub(crate) use macros::define_port_error;

mod fixture_users;
mod message_catalog;
mod users_gateway;

pub use fixture_users::{FixtureUsersGateway, SEED_USER_COUNT, seed_user};
#[cfg(test)]
pub use message_catalog::MockMessageCatalogSource;
pub use message_catalog::{Catalogs, MessageCatalogError, MessageCatalogSource};
#[cfg(test)]
pub use users_gateway::MockUsersGateway;
pub use users_gateway::{UsersGateway, UsersGatewayError, UsersPage};
