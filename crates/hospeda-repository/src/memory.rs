//! In-memory repositories for service and HTTP tests.
//!
//! All four repositories share one [`InMemoryStore`] so that deletes cascade
//! the way the MySQL foreign keys do, and unique keys (user email, one review
//! per tenant and property) are enforced the same way.

use crate::traits::{BookingRepository, PropertyRepository, ReviewRepository, UserRepository};
use async_trait::async_trait;
use chrono::Utc;
use hospeda_core::{
    Booking, BookingId, BookingStatus, HospedaError, HospedaResult, NewBooking, NewProperty,
    NewReview, NewUser, Property, PropertyId, Review, ReviewId, User, UserId,
};
use parking_lot::RwLock;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicI64, AtomicUsize, Ordering};
use std::sync::Arc;

#[derive(Default)]
struct Tables {
    users: BTreeMap<UserId, User>,
    properties: BTreeMap<PropertyId, Property>,
    bookings: BTreeMap<BookingId, Booking>,
    reviews: BTreeMap<ReviewId, Review>,
}

impl Tables {
    fn remove_property_cascade(&mut self, id: PropertyId) -> bool {
        self.bookings.retain(|_, b| b.property_id != id);
        self.reviews.retain(|_, r| r.property_id != id);
        self.properties.remove(&id).is_some()
    }
}

/// Shared backing store for the in-memory repositories.
#[derive(Default)]
pub struct InMemoryStore {
    tables: RwLock<Tables>,
    next_id: AtomicI64,
    reads: AtomicUsize,
}

impl InMemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Number of read queries served so far.
    ///
    /// Lets tests tell a cache hit (no read) from a fall-through to the store.
    #[must_use]
    pub fn read_count(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }

    fn next_id(&self) -> i64 {
        self.next_id.fetch_add(1, Ordering::SeqCst) + 1
    }

    fn record_read(&self) {
        self.reads.fetch_add(1, Ordering::SeqCst);
    }

    fn read<T>(&self, f: impl FnOnce(&Tables) -> T) -> T {
        self.record_read();
        f(&self.tables.read())
    }
}

/// Sorts newest first, breaking timestamp ties by descending id.
fn newest_first<T, K: Ord, I: Ord>(mut items: Vec<T>, key: impl Fn(&T) -> (K, I)) -> Vec<T> {
    items.sort_by(|a, b| key(b).cmp(&key(a)));
    items
}

/// In-memory [`UserRepository`].
#[derive(Clone)]
pub struct InMemoryUserRepository {
    store: Arc<InMemoryStore>,
}

impl InMemoryUserRepository {
    #[must_use]
    pub fn new(store: Arc<InMemoryStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_all(&self) -> HospedaResult<Vec<User>> {
        let users = self.store.read(|t| t.users.values().cloned().collect());
        Ok(newest_first(users, |u: &User| (u.registered_at, u.id)))
    }

    async fn find_by_id(&self, id: UserId) -> HospedaResult<Option<User>> {
        Ok(self.store.read(|t| t.users.get(&id).cloned()))
    }

    async fn find_by_email(&self, email: &str) -> HospedaResult<Option<User>> {
        let email = email.trim().to_lowercase();
        Ok(self
            .store
            .read(|t| t.users.values().find(|u| u.email.as_str() == email).cloned()))
    }

    async fn exists_by_email(&self, email: &str) -> HospedaResult<bool> {
        Ok(self.find_by_email(email).await?.is_some())
    }

    async fn create(&self, user: &NewUser) -> HospedaResult<User> {
        let mut tables = self.store.tables.write();
        if tables.users.values().any(|u| u.email == user.email) {
            return Err(HospedaError::conflict(format!(
                "Duplicate entry '{}' for key 'uq_users_email'",
                user.email
            )));
        }

        let created = User {
            id: UserId(self.store.next_id()),
            name: user.name.clone(),
            email: user.email.clone(),
            password_hash: user.password_hash.clone(),
            role: user.role,
            status: user.status,
            registered_at: Utc::now(),
        };
        tables.users.insert(created.id, created.clone());
        Ok(created)
    }

    async fn update(&self, user: &User) -> HospedaResult<User> {
        let mut tables = self.store.tables.write();
        if tables
            .users
            .values()
            .any(|u| u.id != user.id && u.email == user.email)
        {
            return Err(HospedaError::conflict(format!(
                "Duplicate entry '{}' for key 'uq_users_email'",
                user.email
            )));
        }

        let stored = tables
            .users
            .get_mut(&user.id)
            .ok_or_else(|| HospedaError::not_found("User", user.id))?;
        *stored = User {
            registered_at: stored.registered_at,
            ..user.clone()
        };
        Ok(stored.clone())
    }

    async fn delete(&self, id: UserId) -> HospedaResult<bool> {
        let mut tables = self.store.tables.write();
        if tables.users.remove(&id).is_none() {
            return Ok(false);
        }

        let owned: Vec<PropertyId> = tables
            .properties
            .values()
            .filter(|p| p.owner_id == id)
            .map(|p| p.id)
            .collect();
        for property_id in owned {
            tables.remove_property_cascade(property_id);
        }
        tables.bookings.retain(|_, b| b.tenant_id != id);
        tables.reviews.retain(|_, r| r.tenant_id != id);
        Ok(true)
    }
}

/// In-memory [`PropertyRepository`].
#[derive(Clone)]
pub struct InMemoryPropertyRepository {
    store: Arc<InMemoryStore>,
}

impl InMemoryPropertyRepository {
    #[must_use]
    pub fn new(store: Arc<InMemoryStore>) -> Self {
        Self { store }
    }

    fn select(&self, filter: impl Fn(&Property) -> bool) -> Vec<Property> {
        let properties = self.store.read(|t| {
            t.properties
                .values()
                .filter(|p| filter(p))
                .cloned()
                .collect()
        });
        newest_first(properties, |p: &Property| (p.published_at, p.id))
    }
}

#[async_trait]
impl PropertyRepository for InMemoryPropertyRepository {
    async fn find_all(&self) -> HospedaResult<Vec<Property>> {
        Ok(self.select(|_| true))
    }

    async fn find_by_id(&self, id: PropertyId) -> HospedaResult<Option<Property>> {
        Ok(self.store.read(|t| t.properties.get(&id).cloned()))
    }

    async fn find_by_owner(&self, owner_id: UserId) -> HospedaResult<Vec<Property>> {
        Ok(self.select(|p| p.owner_id == owner_id))
    }

    async fn find_by_location(&self, location: &str) -> HospedaResult<Vec<Property>> {
        Ok(self.select(|p| p.location.matches(location)))
    }

    async fn create(&self, property: &NewProperty) -> HospedaResult<Property> {
        let mut tables = self.store.tables.write();
        if !tables.users.contains_key(&property.owner_id) {
            return Err(HospedaError::Database(
                "foreign key constraint fails (fk_properties_owner)".to_string(),
            ));
        }

        let created = Property {
            id: PropertyId(self.store.next_id()),
            owner_id: property.owner_id,
            title: property.title.clone(),
            description: property.description.clone(),
            location: property.location.clone(),
            price: property.price,
            kind: property.kind,
            available: property.available,
            published_at: Utc::now(),
            images: property.images.clone(),
        };
        tables.properties.insert(created.id, created.clone());
        Ok(created)
    }

    async fn update(&self, property: &Property) -> HospedaResult<Property> {
        let mut tables = self.store.tables.write();
        let stored = tables
            .properties
            .get_mut(&property.id)
            .ok_or_else(|| HospedaError::not_found("Property", property.id))?;
        *stored = Property {
            owner_id: stored.owner_id,
            published_at: stored.published_at,
            ..property.clone()
        };
        Ok(stored.clone())
    }

    async fn delete(&self, id: PropertyId) -> HospedaResult<bool> {
        Ok(self.store.tables.write().remove_property_cascade(id))
    }
}

/// In-memory [`BookingRepository`].
#[derive(Clone)]
pub struct InMemoryBookingRepository {
    store: Arc<InMemoryStore>,
}

impl InMemoryBookingRepository {
    #[must_use]
    pub fn new(store: Arc<InMemoryStore>) -> Self {
        Self { store }
    }

    fn select(&self, filter: impl Fn(&Tables, &Booking) -> bool) -> Vec<Booking> {
        let bookings = self.store.read(|t| {
            t.bookings
                .values()
                .filter(|b| filter(t, b))
                .cloned()
                .collect()
        });
        newest_first(bookings, |b: &Booking| (b.requested_at, b.id))
    }
}

#[async_trait]
impl BookingRepository for InMemoryBookingRepository {
    async fn find_all(&self) -> HospedaResult<Vec<Booking>> {
        Ok(self.select(|_, _| true))
    }

    async fn find_by_id(&self, id: BookingId) -> HospedaResult<Option<Booking>> {
        Ok(self.store.read(|t| t.bookings.get(&id).cloned()))
    }

    async fn find_by_tenant(&self, tenant_id: UserId) -> HospedaResult<Vec<Booking>> {
        Ok(self.select(|_, b| b.tenant_id == tenant_id))
    }

    async fn find_by_property(&self, property_id: PropertyId) -> HospedaResult<Vec<Booking>> {
        Ok(self.select(|_, b| b.property_id == property_id))
    }

    async fn find_by_owner(&self, owner_id: UserId) -> HospedaResult<Vec<Booking>> {
        Ok(self.select(|t, b| {
            t.properties
                .get(&b.property_id)
                .is_some_and(|p| p.owner_id == owner_id)
        }))
    }

    async fn create(&self, booking: &NewBooking) -> HospedaResult<Booking> {
        let mut tables = self.store.tables.write();
        if !tables.properties.contains_key(&booking.property_id)
            || !tables.users.contains_key(&booking.tenant_id)
        {
            return Err(HospedaError::Database(
                "foreign key constraint fails (bookings)".to_string(),
            ));
        }

        let created = Booking {
            id: BookingId(self.store.next_id()),
            property_id: booking.property_id,
            tenant_id: booking.tenant_id,
            start_date: booking.start_date,
            end_date: booking.end_date,
            status: BookingStatus::Pending,
            requested_at: Utc::now(),
        };
        tables.bookings.insert(created.id, created.clone());
        Ok(created)
    }

    async fn update(&self, booking: &Booking) -> HospedaResult<Booking> {
        let mut tables = self.store.tables.write();
        let stored = tables
            .bookings
            .get_mut(&booking.id)
            .ok_or_else(|| HospedaError::not_found("Booking", booking.id))?;
        stored.start_date = booking.start_date;
        stored.end_date = booking.end_date;
        stored.status = booking.status;
        Ok(stored.clone())
    }

    async fn delete(&self, id: BookingId) -> HospedaResult<bool> {
        Ok(self.store.tables.write().bookings.remove(&id).is_some())
    }
}

/// In-memory [`ReviewRepository`].
#[derive(Clone)]
pub struct InMemoryReviewRepository {
    store: Arc<InMemoryStore>,
}

impl InMemoryReviewRepository {
    #[must_use]
    pub fn new(store: Arc<InMemoryStore>) -> Self {
        Self { store }
    }

    fn select(&self, filter: impl Fn(&Review) -> bool) -> Vec<Review> {
        let reviews = self.store.read(|t| {
            t.reviews
                .values()
                .filter(|r| filter(r))
                .cloned()
                .collect()
        });
        newest_first(reviews, |r: &Review| (r.created_at, r.id))
    }
}

#[async_trait]
impl ReviewRepository for InMemoryReviewRepository {
    async fn find_all(&self) -> HospedaResult<Vec<Review>> {
        Ok(self.select(|_| true))
    }

    async fn find_by_id(&self, id: ReviewId) -> HospedaResult<Option<Review>> {
        Ok(self.store.read(|t| t.reviews.get(&id).cloned()))
    }

    async fn find_by_property(&self, property_id: PropertyId) -> HospedaResult<Vec<Review>> {
        Ok(self.select(|r| r.property_id == property_id))
    }

    async fn find_by_tenant(&self, tenant_id: UserId) -> HospedaResult<Vec<Review>> {
        Ok(self.select(|r| r.tenant_id == tenant_id))
    }

    async fn find_by_tenant_and_property(
        &self,
        tenant_id: UserId,
        property_id: PropertyId,
    ) -> HospedaResult<Option<Review>> {
        Ok(self.store.read(|t| {
            t.reviews
                .values()
                .find(|r| r.tenant_id == tenant_id && r.property_id == property_id)
                .cloned()
        }))
    }

    async fn create(&self, review: &NewReview) -> HospedaResult<Review> {
        let mut tables = self.store.tables.write();
        if tables
            .reviews
            .values()
            .any(|r| r.tenant_id == review.tenant_id && r.property_id == review.property_id)
        {
            return Err(HospedaError::conflict(
                "Duplicate entry for key 'uq_reviews_tenant_property'",
            ));
        }

        let created = Review {
            id: ReviewId(self.store.next_id()),
            property_id: review.property_id,
            tenant_id: review.tenant_id,
            rating: review.rating,
            comment: review.comment.clone(),
            created_at: Utc::now(),
        };
        tables.reviews.insert(created.id, created.clone());
        Ok(created)
    }

    async fn update(&self, review: &Review) -> HospedaResult<Review> {
        let mut tables = self.store.tables.write();
        let stored = tables
            .reviews
            .get_mut(&review.id)
            .ok_or_else(|| HospedaError::not_found("Review", review.id))?;
        stored.rating = review.rating;
        stored.comment = review.comment.clone();
        Ok(stored.clone())
    }

    async fn delete(&self, id: ReviewId) -> HospedaResult<bool> {
        Ok(self.store.tables.write().reviews.remove(&id).is_some())
    }
}
