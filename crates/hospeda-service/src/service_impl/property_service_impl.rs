//! Property service implementation.

use crate::cache::{cache_keys, CacheGateway, EntityKind, Mutation};
use crate::dto::{CreatePropertyRequest, PropertyResponse, UpdatePropertyRequest};
use crate::property_service::PropertyService;
use async_trait::async_trait;
use hospeda_core::{
    HospedaError, HospedaResult, NewProperty, Property, PropertyId, UserId, ValidateExt,
};
use hospeda_repository::{PropertyRepository, UserRepository};
use hospeda_security::{Claims, ClaimsExt};
use std::sync::Arc;
use tracing::{debug, info};

/// Cache-backed property service.
pub struct PropertyServiceImpl {
    property_repository: Arc<dyn PropertyRepository>,
    user_repository: Arc<dyn UserRepository>,
    cache: CacheGateway,
}

impl PropertyServiceImpl {
    /// Creates a new property service.
    pub fn new(
        property_repository: Arc<dyn PropertyRepository>,
        user_repository: Arc<dyn UserRepository>,
        cache: CacheGateway,
    ) -> Self {
        Self {
            property_repository,
            user_repository,
            cache,
        }
    }

    async fn load(&self, id: PropertyId) -> HospedaResult<Property> {
        self.property_repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| HospedaError::not_found("Property", id))
    }

    async fn ensure_user_exists(&self, id: UserId) -> HospedaResult<()> {
        match self.user_repository.find_by_id(id).await? {
            Some(_) => Ok(()),
            None => Err(HospedaError::not_found("User", id)),
        }
    }
}

fn to_responses(properties: Vec<Property>) -> Vec<PropertyResponse> {
    properties.into_iter().map(PropertyResponse::from).collect()
}

#[async_trait]
impl PropertyService for PropertyServiceImpl {
    async fn list_properties(&self) -> HospedaResult<Vec<PropertyResponse>> {
        debug!("Listing properties");

        self.cache
            .read_through(
                &cache_keys::all_properties(),
                cache_keys::PROPERTY_LIST_TTL,
                || async { Ok(to_responses(self.property_repository.find_all().await?)) },
            )
            .await
    }

    async fn get_property(&self, id: PropertyId) -> HospedaResult<PropertyResponse> {
        debug!("Getting property: {}", id);

        self.cache
            .read_through(&cache_keys::property_by_id(id), cache_keys::PROPERTY_TTL, || async {
                self.load(id).await.map(PropertyResponse::from)
            })
            .await
    }

    async fn list_by_owner(&self, owner_id: UserId) -> HospedaResult<Vec<PropertyResponse>> {
        debug!("Listing properties of owner: {}", owner_id);

        self.cache
            .read_through(
                &cache_keys::properties_by_owner(owner_id),
                cache_keys::PROPERTY_LIST_TTL,
                || async {
                    self.ensure_user_exists(owner_id).await?;
                    Ok(to_responses(
                        self.property_repository.find_by_owner(owner_id).await?,
                    ))
                },
            )
            .await
    }

    async fn search_by_location(&self, location: &str) -> HospedaResult<Vec<PropertyResponse>> {
        let term = location.trim();
        if term.is_empty() {
            return Err(HospedaError::validation("A location to search for is required"));
        }
        debug!("Searching properties in: {}", term);

        self.cache
            .read_through(
                &cache_keys::properties_by_location(term),
                cache_keys::PROPERTY_LIST_TTL,
                || async {
                    Ok(to_responses(
                        self.property_repository.find_by_location(term).await?,
                    ))
                },
            )
            .await
    }

    async fn create_property(
        &self,
        caller: &Claims,
        request: CreatePropertyRequest,
    ) -> HospedaResult<PropertyResponse> {
        debug!("Creating property: {}", request.title);
        request.validate_request()?;

        // Admins may publish on behalf of an owner
        let owner_id = match request.owner_id {
            Some(owner_id) if caller.role.is_admin() => {
                self.ensure_user_exists(owner_id).await?;
                owner_id
            }
            _ => caller.user_id(),
        };

        let property = self
            .property_repository
            .create(&NewProperty {
                owner_id,
                title: request.title,
                description: request.description,
                location: request.location,
                price: request.price,
                kind: request.kind,
                available: request.available.unwrap_or(true),
                images: request.images.unwrap_or_default(),
            })
            .await?;

        self.cache.invalidate(EntityKind::Property, Mutation::Create);

        info!("Property created: {} by owner {}", property.id, owner_id);
        Ok(PropertyResponse::from(property))
    }

    async fn update_property(
        &self,
        caller: &Claims,
        id: PropertyId,
        request: UpdatePropertyRequest,
    ) -> HospedaResult<PropertyResponse> {
        debug!("Updating property: {}", id);
        request.validate_request()?;

        let mut property = self.load(id).await?;
        caller.require_owner_or_admin(property.owner_id, "property")?;

        request.apply_to(&mut property);
        let updated = self.property_repository.update(&property).await?;

        self.cache.invalidate(EntityKind::Property, Mutation::Update);

        info!("Property updated: {}", id);
        Ok(PropertyResponse::from(updated))
    }

    async fn delete_property(&self, caller: &Claims, id: PropertyId) -> HospedaResult<()> {
        debug!("Deleting property: {}", id);

        let property = self.load(id).await?;
        caller.require_owner_or_admin(property.owner_id, "property")?;

        if !self.property_repository.delete(id).await? {
            return Err(HospedaError::not_found("Property", id));
        }

        self.cache.invalidate(EntityKind::Property, Mutation::Delete);

        info!("Property deleted: {}", id);
        Ok(())
    }
}

impl std::fmt::Debug for PropertyServiceImpl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PropertyServiceImpl").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{claims, claims_for, location, Harness};
    use hospeda_core::{PropertyKind, UserRole};
    use std::time::Duration;

    fn service(h: &Harness) -> PropertyServiceImpl {
        PropertyServiceImpl::new(h.properties.clone(), h.users.clone(), h.gateway.clone())
    }

    fn create_request(city: &str) -> CreatePropertyRequest {
        CreatePropertyRequest {
            owner_id: None,
            title: "Monoambiente luminoso".to_string(),
            description: None,
            location: location(city),
            price: 55.0,
            kind: PropertyKind::Apartment,
            available: None,
            images: None,
        }
    }

    #[tokio::test]
    async fn test_list_is_cached_until_a_property_changes() {
        let h = Harness::new();
        let service = service(&h);
        let owner = h.user("owner@example.com", UserRole::Owner).await;
        h.property(owner.id, "Rosario").await;

        assert_eq!(service.list_properties().await.unwrap().len(), 1);
        h.gateway.flush().await;
        let reads = h.reads();
        assert_eq!(service.list_properties().await.unwrap().len(), 1);
        assert_eq!(h.reads(), reads);

        service
            .create_property(&claims_for(&owner), create_request("Rosario"))
            .await
            .unwrap();
        h.gateway.flush().await;

        assert_eq!(service.list_properties().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_property_mutation_fan_out_leaves_users_alone() {
        let h = Harness::new();
        let service = service(&h);
        let owner = h.user("owner@example.com", UserRole::Owner).await;
        let property = h.property(owner.id, "Salta").await;
        let ttl = Duration::from_secs(60);
        for key in ["property:1", "properties:all", "properties:owner:7", "user:3"] {
            h.gateway.set(key, &"cached", ttl).await;
        }

        service
            .update_property(
                &claims_for(&owner),
                property.id,
                UpdatePropertyRequest {
                    price: Some(80.0),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        h.gateway.flush().await;

        assert_eq!(h.cache.keys(), vec!["user:3".to_string()]);
    }

    #[tokio::test]
    async fn test_only_owner_or_admin_may_update() {
        let h = Harness::new();
        let service = service(&h);
        let owner = h.user("owner@example.com", UserRole::Owner).await;
        let other = h.user("other@example.com", UserRole::Owner).await;
        let property = h.property(owner.id, "Salta").await;

        let err = service
            .update_property(&claims_for(&other), property.id, UpdatePropertyRequest::default())
            .await
            .unwrap_err();
        assert!(matches!(err, HospedaError::Forbidden(_)));

        let err = service
            .delete_property(&claims_for(&other), property.id)
            .await
            .unwrap_err();
        assert!(matches!(err, HospedaError::Forbidden(_)));

        service
            .delete_property(&claims(UserId(900), UserRole::Admin), property.id)
            .await
            .unwrap();
        assert!(service.get_property(property.id).await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn test_owner_cannot_publish_for_someone_else() {
        let h = Harness::new();
        let service = service(&h);
        let owner = h.user("owner@example.com", UserRole::Owner).await;
        let other = h.user("other@example.com", UserRole::Owner).await;

        let mut request = create_request("Ushuaia");
        request.owner_id = Some(other.id);
        let created = service
            .create_property(&claims_for(&owner), request.clone())
            .await
            .unwrap();
        assert_eq!(created.owner_id, owner.id);
        assert!(created.available);

        let admin = claims(UserId(900), UserRole::Admin);
        let created = service.create_property(&admin, request).await.unwrap();
        assert_eq!(created.owner_id, other.id);
    }

    #[tokio::test]
    async fn test_admin_publishing_for_unknown_owner_is_not_found() {
        let h = Harness::new();
        let mut request = create_request("Ushuaia");
        request.owner_id = Some(UserId(404));

        let err = service(&h)
            .create_property(&claims(UserId(900), UserRole::Admin), request)
            .await
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_list_by_unknown_owner_is_not_found() {
        let h = Harness::new();
        let err = service(&h).list_by_owner(UserId(5)).await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_search_by_location_is_case_insensitive_and_shares_cache_key() {
        let h = Harness::new();
        let service = service(&h);
        let owner = h.user("owner@example.com", UserRole::Owner).await;
        h.property(owner.id, "Bariloche").await;
        h.property(owner.id, "Mendoza").await;

        assert_eq!(service.search_by_location("bariloche").await.unwrap().len(), 1);
        h.gateway.flush().await;
        let reads = h.reads();
        assert_eq!(service.search_by_location(" BARILOCHE ").await.unwrap().len(), 1);
        assert_eq!(h.reads(), reads);

        assert!(service.search_by_location("   ").await.is_err());
    }

    #[tokio::test]
    async fn test_delete_clears_dependent_booking_views() {
        let h = Harness::new();
        let service = service(&h);
        let owner = h.user("owner@example.com", UserRole::Owner).await;
        let property = h.property(owner.id, "Tandil").await;
        h.gateway
            .set(&format!("bookings:property:{}", property.id), &"cached", Duration::from_secs(60))
            .await;

        service.delete_property(&claims_for(&owner), property.id).await.unwrap();
        h.gateway.flush().await;
        assert!(h.cache.is_empty());
    }

    #[tokio::test]
    async fn test_service_answers_from_store_while_cache_is_down() {
        let h = Harness::new();
        let service = service(&h);
        let owner = h.user("owner@example.com", UserRole::Owner).await;
        let property = h.property(owner.id, "Jujuy").await;
        h.cache.set_available(false);

        let fetched = service.get_property(property.id).await.unwrap();
        assert_eq!(fetched.title, property.title);

        let created = service
            .create_property(&claims_for(&owner), create_request("Jujuy"))
            .await
            .unwrap();
        h.gateway.flush().await;
        assert_eq!(service.list_by_owner(owner.id).await.unwrap().len(), 2);
        assert!(service.get_property(created.id).await.is_ok());
    }
}
