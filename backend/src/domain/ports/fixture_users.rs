//! In-memory sandbox for [`UsersGateway`].
//!
//! Mirrors the upstream sandbox: reads serve a fixed seed, mutations report
//! success for known ids but never change what later reads return. Used by
//! `fixture_mode` and by tests.

use async_trait::async_trait;

use super::{UsersGateway, UsersGatewayError, UsersPage};
use crate::domain::UserId;
use crate::domain::transform::{RawBank, RawUser, UserPayload};
use crate::domain::user::{Address, Company, Coordinates};

const FIRST_NAMES: [&str; 12] = [
    "Emily", "Michael", "Sophia", "James", "Emma", "Olivia", "Alexander", "Ava", "Ethan",
    "Isabella", "Liam", "Mia",
];
const LAST_NAMES: [&str; 9] = [
    "Johnson", "Williams", "Brown", "Davis", "Miller", "Wilson", "Moore", "Taylor", "Anderson",
];
const CURRENCIES: [&str; 3] = ["SAR", "USD", "EUR"];
const DEPARTMENTS: [&str; 4] = ["Engineering", "Support", "Marketing", "Legal"];

/// Number of records in [`FixtureUsersGateway::seeded`].
pub const SEED_USER_COUNT: u64 = 25;

/// Sandbox users gateway.
#[derive(Debug, Clone)]
pub struct FixtureUsersGateway {
    users: Vec<RawUser>,
}

impl FixtureUsersGateway {
    /// Serve exactly `users`, in order.
    #[must_use]
    pub fn new(users: Vec<RawUser>) -> Self {
        Self { users }
    }

    /// Deterministic seed of [`SEED_USER_COUNT`] users with ids `1..=25`.
    #[must_use]
    pub fn seeded() -> Self {
        Self::new((1..=SEED_USER_COUNT).map(seed_user).collect())
    }

    fn find(&self, id: UserId) -> Result<&RawUser, UsersGatewayError> {
        self.users
            .iter()
            .find(|user| user.id == id)
            .ok_or_else(|| UsersGatewayError::status(404_u16, "Not Found"))
    }
}

impl Default for FixtureUsersGateway {
    fn default() -> Self {
        Self::seeded()
    }
}

/// Seed record for `id`.
#[must_use]
pub fn seed_user(id: u64) -> RawUser {
    let index = usize::try_from(id).unwrap_or(0);
    let first = pick(&FIRST_NAMES, index);
    let last = pick(&LAST_NAMES, index);
    let iban = format!("SA{:02}8000000060801016{:04}", rem(id, 97), id);
    RawUser {
        first_name: Some(first.to_owned()),
        last_name: Some(last.to_owned()),
        email: Some(format!(
            "{}.{}@x.dummyjson.com",
            first.to_lowercase(),
            last.to_lowercase()
        )),
        phone: Some(format!("+966 55 {:03} {:04}", rem(id, 1000), rem(id * 37, 10_000))),
        age: Some(u32::try_from(20 + rem(id, 45)).unwrap_or(30)),
        gender: Some(if id.is_multiple_of(3) { "male" } else { "female" }.to_owned()),
        image: Some(format!("https://dummyjson.com/icon/{}/128", first.to_lowercase())),
        bank: Some(RawBank {
            card_number: Some(format!("4000 0000 0000 {id:04}")),
            card_expire: Some(format!("{:02}/28", rem(id, 12) + 1)),
            card_type: Some("Visa".to_owned()),
            currency: Some(pick(&CURRENCIES, index).to_owned()),
            iban: Some(iban),
        }),
        address: Some(Address {
            address: Some(format!("{} Main Street", 100 + id)),
            city: Some("Riyadh".to_owned()),
            country: Some("Saudi Arabia".to_owned()),
            coordinates: Some(Coordinates {
                lat: f64::from(u32::try_from(id).unwrap_or(0)).mul_add(0.001, 24.7136),
                lng: 46.6753,
            }),
            ..Address::default()
        }),
        company: (!id.is_multiple_of(4)).then(|| Company {
            name: Some(format!("{last} Holdings")),
            department: Some(pick(&DEPARTMENTS, index).to_owned()),
            title: Some("Analyst".to_owned()),
            address: None,
        }),
        ..RawUser::with_id(UserId::new(id))
    }
}

fn rem(value: u64, modulus: u64) -> u64 {
    value.checked_rem(modulus).unwrap_or(0)
}

fn pick<'a>(options: &[&'a str], index: usize) -> &'a str {
    options.iter().cycle().nth(index).copied().unwrap_or_default()
}

#[async_trait]
impl UsersGateway for FixtureUsersGateway {
    async fn list(&self, limit: u32, skip: u64) -> Result<UsersPage, UsersGatewayError> {
        let start = usize::try_from(skip).unwrap_or(usize::MAX);
        let users = self
            .users
            .iter()
            .skip(start)
            .take(usize::try_from(limit).unwrap_or(usize::MAX))
            .cloned()
            .collect();
        Ok(UsersPage {
            users,
            total: u64::try_from(self.users.len()).unwrap_or(u64::MAX),
            skip,
            limit,
        })
    }

    async fn get(&self, id: UserId) -> Result<RawUser, UsersGatewayError> {
        self.find(id).cloned()
    }

    async fn create(&self, _payload: &UserPayload) -> Result<Option<UserId>, UsersGatewayError> {
        let next = self.users.iter().map(|user| user.id.get()).max().unwrap_or(0) + 1;
        Ok(Some(UserId::new(next)))
    }

    async fn update(&self, id: UserId, _payload: &UserPayload) -> Result<(), UsersGatewayError> {
        self.find(id).map(|_| ())
    }

    async fn delete(&self, id: UserId) -> Result<(), UsersGatewayError> {
        self.find(id).map(|_| ())
    }
}
