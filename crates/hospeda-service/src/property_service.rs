//! Property service trait definition.

use crate::dto::{CreatePropertyRequest, PropertyResponse, UpdatePropertyRequest};
use async_trait::async_trait;
use hospeda_core::{HospedaResult, PropertyId, UserId};
use hospeda_security::Claims;

/// Property service trait.
#[async_trait]
pub trait PropertyService: Send + Sync {
    async fn list_properties(&self) -> HospedaResult<Vec<PropertyResponse>>;

    async fn get_property(&self, id: PropertyId) -> HospedaResult<PropertyResponse>;

    /// Listings of one owner; unknown owners are a 404.
    async fn list_by_owner(&self, owner_id: UserId) -> HospedaResult<Vec<PropertyResponse>>;

    /// Case-insensitive search on city or province.
    async fn search_by_location(&self, location: &str) -> HospedaResult<Vec<PropertyResponse>>;

    async fn create_property(
        &self,
        caller: &Claims,
        request: CreatePropertyRequest,
    ) -> HospedaResult<PropertyResponse>;

    /// Only the owner or an admin may update.
    async fn update_property(
        &self,
        caller: &Claims,
        id: PropertyId,
        request: UpdatePropertyRequest,
    ) -> HospedaResult<PropertyResponse>;

    /// Only the owner or an admin may delete. Bookings and reviews go with it.
    async fn delete_property(&self, caller: &Claims, id: PropertyId) -> HospedaResult<()>;
}
