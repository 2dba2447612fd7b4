use super::domain::{RentalId, RentalProperty};
use crate::repository::RepositoryError;

/// Storage abstraction for rental properties.
pub trait RentalRepository: Send + Sync {
    fn insert(&self, property: RentalProperty) -> Result<RentalProperty, RepositoryError>;
    fn update(&self, property: RentalProperty) -> Result<(), RepositoryError>;
    fn fetch(&self, id: &RentalId) -> Result<Option<RentalProperty>, RepositoryError>;
    fn remove(&self, id: &RentalId) -> Result<(), RepositoryError>;
    fn list(&self) -> Result<Vec<RentalProperty>, RepositoryError>;
}
