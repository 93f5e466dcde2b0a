//! Application state for Axum handlers.

use hospeda_core::HealthCheck;
use hospeda_service::{AuthService, BookingService, PropertyService, ReviewService, UserService};
use std::sync::Arc;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub user_service: Arc<dyn UserService>,
    pub property_service: Arc<dyn PropertyService>,
    pub booking_service: Arc<dyn BookingService>,
    pub review_service: Arc<dyn ReviewService>,
    pub auth_service: Arc<dyn AuthService>,
    /// Dependencies reported by `/ready`.
    pub health_checks: Arc<Vec<Arc<dyn HealthCheck>>>,
}

impl AppState {
    /// Creates a new application state.
    pub fn new(
        user_service: Arc<dyn UserService>,
        property_service: Arc<dyn PropertyService>,
        booking_service: Arc<dyn BookingService>,
        review_service: Arc<dyn ReviewService>,
        auth_service: Arc<dyn AuthService>,
    ) -> Self {
        Self {
            user_service,
            property_service,
            booking_service,
            review_service,
            auth_service,
            health_checks: Arc::new(Vec::new()),
        }
    }

    /// Registers the dependencies the readiness endpoint reports on.
    #[must_use]
    pub fn with_health_checks(mut self, checks: Vec<Arc<dyn HealthCheck>>) -> Self {
        self.health_checks = Arc::new(checks);
        self
    }
}
