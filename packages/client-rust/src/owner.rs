//! Owner-delegation dispatch for metadata items.
//!
//! A metadata item belongs either to a user-scoped store or to the
//! application-scoped store. Its mutating operations are forwarded to whichever
//! owner it was built with; both owners implement [`MetadataStore`], so the
//! item never needs to know which one it has.

use nimbus_core::{Location, MetadataRecord, PreconditionError};

use crate::call::Call;
use crate::domain::metadata::{AppMetadata, UserMetadata};

/// Operations shared by the user-scoped and application-scoped stores.
pub trait MetadataStore {
    /// Create or overwrite `key`.
    ///
    /// # Errors
    ///
    /// Returns [`PreconditionError::Empty`] for an empty key.
    fn set(
        &self,
        key: &str,
        value: &str,
        location: Option<Location>,
        app_tag: &str,
    ) -> Result<Call<bool>, PreconditionError>;

    /// Remove `key`.
    ///
    /// # Errors
    ///
    /// Returns [`PreconditionError::Empty`] for an empty key.
    fn delete(&self, key: &str) -> Result<Call<bool>, PreconditionError>;

    /// Fetch one item. An absent key resolves to `None`.
    ///
    /// # Errors
    ///
    /// Returns [`PreconditionError::Empty`] for an empty key.
    fn get(&self, key: &str) -> Result<Call<Option<MetadataItem>>, PreconditionError>;

    /// Fetch every item of the store.
    fn get_all(&self) -> Call<Vec<MetadataItem>>;
}

/// The store an item belongs to. Fixed at construction.
#[derive(Debug, Clone)]
pub enum Owner {
    User(UserMetadata),
    App(AppMetadata),
}

/// A metadata value bound to its owning store.
#[derive(Debug, Clone)]
pub struct MetadataItem {
    record: MetadataRecord,
    owner: Owner,
}

impl MetadataItem {
    #[must_use]
    pub fn new(owner: Owner, record: MetadataRecord) -> Self {
        Self { record, owner }
    }

    /// Build from two optional owners, exactly one of which must be set.
    ///
    /// # Errors
    ///
    /// Returns [`PreconditionError::AmbiguousOwner`] when both or neither are set.
    pub fn from_owners(
        user: Option<UserMetadata>,
        app: Option<AppMetadata>,
        record: MetadataRecord,
    ) -> Result<Self, PreconditionError> {
        let owner = match (user, app) {
            (Some(user), None) => Owner::User(user),
            (None, Some(app)) => Owner::App(app),
            _ => return Err(PreconditionError::AmbiguousOwner),
        };
        Ok(Self::new(owner, record))
    }

    #[must_use]
    pub fn key(&self) -> &str {
        &self.record.key
    }

    #[must_use]
    pub fn value(&self) -> &str {
        &self.record.value
    }

    #[must_use]
    pub fn app_tag(&self) -> &str {
        &self.record.app_tag
    }

    #[must_use]
    pub fn record(&self) -> &MetadataRecord {
        &self.record
    }

    #[must_use]
    pub fn owner(&self) -> &Owner {
        &self.owner
    }

    /// The stored coordinate, when one was recorded and is valid.
    #[must_use]
    pub fn location(&self) -> Option<Location> {
        match (self.record.latitude, self.record.longitude) {
            (Some(lat), Some(lon)) => Location::new(lat, lon).ok(),
            _ => None,
        }
    }

    /// Store `value` under this item's key, keeping its location and tag.
    ///
    /// # Errors
    ///
    /// Same as [`MetadataStore::set`].
    pub fn set(&self, value: &str) -> Result<Call<bool>, PreconditionError> {
        let location = self.location();
        let (key, tag) = (self.key(), self.app_tag());
        match &self.owner {
            Owner::User(store) => store.set(key, value, location, tag),
            Owner::App(store) => store.set(key, value, location, tag),
        }
    }

    /// Delete this item from its owning store.
    ///
    /// # Errors
    ///
    /// Same as [`MetadataStore::delete`].
    pub fn delete(&self) -> Result<Call<bool>, PreconditionError> {
        match &self.owner {
            Owner::User(store) => store.delete(self.key()),
            Owner::App(store) => store.delete(self.key()),
        }
    }
}
