//! Fixtures shared by the service tests.

use crate::cache::{CacheGateway, InMemoryCache};
use chrono::{Duration as ChronoDuration, Utc};
use hospeda_core::{
    AccountStatus, Email, Location, NewProperty, NewUser, Property, PropertyKind, User, UserId,
    UserRole,
};
use hospeda_repository::memory::{
    InMemoryBookingRepository, InMemoryPropertyRepository, InMemoryReviewRepository,
    InMemoryStore, InMemoryUserRepository,
};
use hospeda_repository::{PropertyRepository, UserRepository};
use hospeda_security::{Claims, ClaimsSubject, PasswordHasher, TokenType};
use std::sync::Arc;
use std::time::Duration;

/// One store, four repositories and a toggleable cache.
pub struct Harness {
    pub store: Arc<InMemoryStore>,
    pub cache: Arc<InMemoryCache>,
    pub gateway: CacheGateway,
    pub users: Arc<InMemoryUserRepository>,
    pub properties: Arc<InMemoryPropertyRepository>,
    pub bookings: Arc<InMemoryBookingRepository>,
    pub reviews: Arc<InMemoryReviewRepository>,
}

impl Harness {
    pub fn new() -> Self {
        let store = InMemoryStore::new();
        let cache = Arc::new(InMemoryCache::new());
        let gateway = CacheGateway::new(cache.clone(), Duration::from_millis(200));

        Self {
            users: Arc::new(InMemoryUserRepository::new(store.clone())),
            properties: Arc::new(InMemoryPropertyRepository::new(store.clone())),
            bookings: Arc::new(InMemoryBookingRepository::new(store.clone())),
            reviews: Arc::new(InMemoryReviewRepository::new(store.clone())),
            store,
            cache,
            gateway,
        }
    }

    pub async fn user(&self, email: &str, role: UserRole) -> User {
        self.users
            .create(&NewUser {
                name: "Test User".to_string(),
                email: Email::new(email).unwrap(),
                password_hash: "not-a-real-hash".to_string(),
                role,
                status: AccountStatus::Active,
            })
            .await
            .unwrap()
    }

    pub async fn property(&self, owner_id: UserId, city: &str) -> Property {
        self.properties
            .create(&NewProperty {
                owner_id,
                title: format!("Departamento en {city}"),
                description: None,
                location: location(city),
                price: 120.0,
                kind: PropertyKind::Apartment,
                available: true,
                images: vec![],
            })
            .await
            .unwrap()
    }

    /// Store reads served so far.
    pub fn reads(&self) -> usize {
        self.store.read_count()
    }
}

pub fn location(city: &str) -> Location {
    Location {
        province: "Buenos Aires".to_string(),
        city: city.to_string(),
        address: "Calle Falsa 123".to_string(),
    }
}

pub fn claims_for(user: &User) -> Claims {
    claims(user.id, user.role)
}

pub fn claims(id: UserId, role: UserRole) -> Claims {
    let subject = ClaimsSubject {
        user_id: id,
        email: "caller@example.com",
        role,
    };
    Claims::issue(
        &subject,
        TokenType::Access,
        "hospeda",
        "hospeda-api",
        Utc::now() + ChronoDuration::hours(1),
    )
}

/// Cheap Argon2 parameters so tests stay fast.
pub fn fast_hasher() -> Arc<PasswordHasher> {
    Arc::new(PasswordHasher::with_cost(1))
}
