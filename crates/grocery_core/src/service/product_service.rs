//! Product use-case service.
//!
//! # Responsibility
//! - Enforce name uniqueness on create.
//! - Forward every other operation to the repository unmodified.
//!
//! # Invariants
//! - A duplicate name on create never reaches `ProductRepository::save`.
//! - Update performs no merge; callers pass the fully merged record.
//! - Service layer remains storage-agnostic.

use crate::model::product::{Product, ProductId, ProductValidationError};
use crate::repo::product_repo::{ProductRepository, RepoError};
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Service error for product use-cases.
#[derive(Debug)]
pub enum ServiceError {
    /// Another stored product already uses this name.
    DuplicateName(String),
    /// Required fields are missing or blank.
    Validation(ProductValidationError),
    /// The target row vanished before it could be written.
    NotFound(ProductId),
    /// `update` was called with a record that was never persisted.
    MissingId,
    /// Persistence-layer failure.
    Storage(RepoError),
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DuplicateName(name) => write!(f, "Product found with name: {name}"),
            Self::Validation(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "product not found: {id}"),
            Self::MissingId => write!(f, "product id is required for update"),
            Self::Storage(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Storage(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for ServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::DuplicateName(name) => Self::DuplicateName(name),
            RepoError::NotFound(id) => Self::NotFound(id),
            other => Self::Storage(other),
        }
    }
}

impl From<ProductValidationError> for ServiceError {
    fn from(value: ProductValidationError) -> Self {
        Self::Validation(value)
    }
}

/// Product service facade over repository implementations.
pub struct ProductService<R: ProductRepository> {
    repo: R,
}

impl<R: ProductRepository> ProductService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Persists a new product after checking its name is unused.
    ///
    /// Any caller-supplied id is discarded so create always inserts.
    pub fn create(&self, product: &Product) -> ServiceResult<Product> {
        product.validate()?;

        if self.repo.find_by_name(&product.name)?.is_some() {
            warn!("event=product_create module=service status=rejected reason=duplicate_name");
            return Err(ServiceError::DuplicateName(product.name.clone()));
        }

        let mut unsaved = product.clone();
        unsaved.id = None;
        let saved = self.repo.save(&unsaved)?;
        info!(
            "event=product_create module=service status=ok id={}",
            saved.id.unwrap_or_default()
        );
        Ok(saved)
    }

    /// Lists every stored product.
    pub fn list(&self) -> ServiceResult<Vec<Product>> {
        Ok(self.repo.find_all()?)
    }

    /// Lists products whose category equals `category` exactly.
    pub fn list_by_category(&self, category: &str) -> ServiceResult<Vec<Product>> {
        Ok(self.repo.find_by_category(category)?)
    }

    /// Lists products with a positive remaining quantity.
    pub fn list_in_stock(&self) -> ServiceResult<Vec<Product>> {
        Ok(self.repo.find_remaining_in_stock()?)
    }

    pub fn get_by_id(&self, id: ProductId) -> ServiceResult<Option<Product>> {
        Ok(self.repo.find_by_id(id)?)
    }

    /// Replaces the stored record carrying `product.id`.
    ///
    /// Uniqueness is not re-checked here; a rename onto a taken name is only
    /// rejected by the storage-level unique index.
    pub fn update(&self, product: &Product) -> ServiceResult<Product> {
        product.validate()?;
        let id = product.id.ok_or(ServiceError::MissingId)?;

        let saved = self.repo.save(product)?;
        info!("event=product_update module=service status=ok id={id}");
        Ok(saved)
    }

    /// Deletes by id; absent ids are not an error.
    pub fn delete_by_id(&self, id: ProductId) -> ServiceResult<()> {
        self.repo.delete_by_id(id)?;
        info!("event=product_delete module=service status=ok id={id}");
        Ok(())
    }
}
