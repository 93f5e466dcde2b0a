//! Integration tests for the MySQL repositories.
//!
//! These run against a real MySQL database using testcontainers and are
//! ignored by default. Run with `cargo test -- --ignored` when Docker is up.

mod common;

use chrono::NaiveDate;
use common::TestDatabase;
use hospeda_core::{
    AccountStatus, BookingStatus, Email, HospedaError, Location, NewBooking, NewProperty,
    NewReview, NewUser, PropertyKind, UserId, UserRole,
};
use hospeda_repository::{
    BookingRepository, MySqlBookingRepository, MySqlPropertyRepository, MySqlReviewRepository,
    MySqlUserRepository, PropertyRepository, ReviewRepository, UserRepository,
};

fn new_user(email: &str, role: UserRole) -> NewUser {
    NewUser {
        name: "Integration User".to_string(),
        email: Email::new(email).unwrap(),
        password_hash: "hashed_password_123".to_string(),
        role,
        status: AccountStatus::Active,
    }
}

fn new_property(owner_id: UserId) -> NewProperty {
    NewProperty {
        owner_id,
        title: "Casa con jardín".to_string(),
        description: Some("Three bedrooms".to_string()),
        location: Location {
            province: "Mendoza".to_string(),
            city: "Godoy Cruz".to_string(),
            address: "Av. San Martín 100".to_string(),
        },
        price: 250.0,
        kind: PropertyKind::House,
        available: true,
        images: vec!["https://img.example.com/1.jpg".to_string()],
    }
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_user_create_find_update_delete() {
    let db = TestDatabase::new().await;
    let repo = MySqlUserRepository::new(db.pool());

    let created = repo
        .create(&new_user("owner@example.com", UserRole::Owner))
        .await
        .expect("Failed to create user");
    assert_eq!(created.role, UserRole::Owner);
    assert_eq!(created.status, AccountStatus::Active);

    let found = repo
        .find_by_email("OWNER@example.com")
        .await
        .expect("Query failed")
        .expect("User not found");
    assert_eq!(found.id, created.id);

    let mut changed = found.clone();
    changed.name = "Renamed".to_string();
    let updated = repo.update(&changed).await.expect("Failed to update");
    assert_eq!(updated.name, "Renamed");

    assert!(repo.delete(created.id).await.expect("Failed to delete"));
    assert!(repo.find_by_id(created.id).await.expect("Query failed").is_none());
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_duplicate_email_is_conflict() {
    let db = TestDatabase::new().await;
    let repo = MySqlUserRepository::new(db.pool());

    repo.create(&new_user("dup@example.com", UserRole::Tenant))
        .await
        .expect("Failed to create user");
    let err = repo
        .create(&new_user("dup@example.com", UserRole::Tenant))
        .await
        .unwrap_err();

    assert!(matches!(err, HospedaError::Conflict(_)));
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_property_json_columns_and_location_search() {
    let db = TestDatabase::new().await;
    let users = MySqlUserRepository::new(db.pool());
    let properties = MySqlPropertyRepository::new(db.pool());

    let owner = users
        .create(&new_user("landlord@example.com", UserRole::Owner))
        .await
        .unwrap();
    let created = properties.create(&new_property(owner.id)).await.unwrap();

    assert_eq!(created.location.city, "Godoy Cruz");
    assert_eq!(created.images.len(), 1);
    assert_eq!(properties.find_by_location("godoy cruz").await.unwrap().len(), 1);
    assert_eq!(properties.find_by_location("MENDOZA").await.unwrap().len(), 1);
    assert!(properties.find_by_location("Salta").await.unwrap().is_empty());
    assert_eq!(properties.find_by_owner(owner.id).await.unwrap().len(), 1);
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_deleting_owner_cascades_to_dependents() {
    let db = TestDatabase::new().await;
    let users = MySqlUserRepository::new(db.pool());
    let properties = MySqlPropertyRepository::new(db.pool());
    let bookings = MySqlBookingRepository::new(db.pool());
    let reviews = MySqlReviewRepository::new(db.pool());

    let owner = users.create(&new_user("o@example.com", UserRole::Owner)).await.unwrap();
    let tenant = users.create(&new_user("t@example.com", UserRole::Tenant)).await.unwrap();
    let property = properties.create(&new_property(owner.id)).await.unwrap();

    let booking = bookings
        .create(&NewBooking {
            property_id: property.id,
            tenant_id: tenant.id,
            start_date: NaiveDate::from_ymd_opt(2025, 2, 1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2025, 2, 3).unwrap(),
        })
        .await
        .unwrap();
    assert_eq!(booking.status, BookingStatus::Pending);
    assert_eq!(bookings.find_by_owner(owner.id).await.unwrap().len(), 1);

    reviews
        .create(&NewReview {
            property_id: property.id,
            tenant_id: tenant.id,
            rating: 5,
            comment: "Excelente".to_string(),
        })
        .await
        .unwrap();

    assert!(users.delete(owner.id).await.unwrap());

    assert!(properties.find_by_id(property.id).await.unwrap().is_none());
    assert!(bookings.find_by_tenant(tenant.id).await.unwrap().is_empty());
    assert!(reviews.find_by_tenant(tenant.id).await.unwrap().is_empty());
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_second_review_is_conflict() {
    let db = TestDatabase::new().await;
    let users = MySqlUserRepository::new(db.pool());
    let properties = MySqlPropertyRepository::new(db.pool());
    let reviews = MySqlReviewRepository::new(db.pool());

    let owner = users.create(&new_user("o2@example.com", UserRole::Owner)).await.unwrap();
    let tenant = users.create(&new_user("t2@example.com", UserRole::Tenant)).await.unwrap();
    let property = properties.create(&new_property(owner.id)).await.unwrap();
    let review = NewReview {
        property_id: property.id,
        tenant_id: tenant.id,
        rating: 3,
        comment: String::new(),
    };

    reviews.create(&review).await.unwrap();
    let err = reviews.create(&review).await.unwrap_err();
    assert!(matches!(err, HospedaError::Conflict(_)));
}
