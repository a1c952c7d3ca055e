//! User-scoped and application-scoped metadata stores.

use nimbus_core::{decode, Location, MetadataRecord, PreconditionError, RemoteCall, Tolerance};

use crate::call::Call;
use crate::gate::{require_non_empty, AuthRequirement, Capability, Gate};
use crate::owner::{MetadataItem, MetadataStore, Owner};

/// Remote procedure names.
pub mod method {
    pub const USER_SET: &str = "MetaData_UserMetaDataValue_Set";
    pub const USER_GET: &str = "MetaData_UserMetaDataValue_Get";
    pub const USER_GET_ALL: &str = "MetaData_UserMetaDataValue_GetAll";
    pub const USER_DELETE: &str = "MetaData_UserMetaDataValue_Delete";
    pub const APP_SET: &str = "MetaData_ApplicationMetaDataValue_Set";
    pub const APP_GET: &str = "MetaData_ApplicationMetaDataValue_Get";
    pub const APP_GET_ALL: &str = "MetaData_ApplicationMetaDataValue_GetAll";
    pub const APP_DELETE: &str = "MetaData_ApplicationMetaDataValue_Delete";
}

/// The procedure names one store uses.
struct Procedures {
    set: &'static str,
    get: &'static str,
    get_all: &'static str,
    delete: &'static str,
}

const USER: Procedures = Procedures {
    set: method::USER_SET,
    get: method::USER_GET,
    get_all: method::USER_GET_ALL,
    delete: method::USER_DELETE,
};

const APP: Procedures = Procedures {
    set: method::APP_SET,
    get: method::APP_GET,
    get_all: method::APP_GET_ALL,
    delete: method::APP_DELETE,
};

fn set_call(
    base: RemoteCall,
    key: &str,
    value: &str,
    location: Option<Location>,
    app_tag: &str,
) -> RemoteCall {
    let (lat, lon) = location.map_or((0.0, 0.0), |l| (l.latitude(), l.longitude()));
    base.param("MetaKey", key)
        .param("MetaValue", value)
        .param("MetaLatitude", lat.to_string())
        .param("MetaLongitude", lon.to_string())
        .param("ApplicationTag", app_tag)
}

// ---------------------------------------------------------------------------
// UserMetadata
// ---------------------------------------------------------------------------

/// Metadata owned by the signed-in user.
#[derive(Debug, Clone)]
pub struct UserMetadata {
    gate: Gate,
}

impl UserMetadata {
    /// # Errors
    ///
    /// Returns [`PreconditionError::MissingSession`] without a session.
    pub fn new(capability: Capability) -> Result<Self, PreconditionError> {
        Gate::new(capability, AuthRequirement::Session).map(|gate| Self { gate })
    }

    pub(crate) fn from_gate(gate: Gate) -> Self {
        Self { gate }
    }

    fn owner(&self) -> Owner {
        Owner::User(self.clone())
    }
}

impl MetadataStore for UserMetadata {
    fn set(
        &self,
        key: &str,
        value: &str,
        location: Option<Location>,
        app_tag: &str,
    ) -> Result<Call<bool>, PreconditionError> {
        require_non_empty("key", key)?;
        let call = set_call(self.gate.user_request(USER.set), key, value, location, app_tag);
        Ok(self.gate.dispatch(call, Tolerance::Strict, decode::flag))
    }

    fn delete(&self, key: &str) -> Result<Call<bool>, PreconditionError> {
        require_non_empty("key", key)?;
        let call = self.gate.user_request(USER.delete).param("MetaKey", key);
        Ok(self.gate.dispatch(call, Tolerance::Strict, decode::flag))
    }

    fn get(&self, key: &str) -> Result<Call<Option<MetadataItem>>, PreconditionError> {
        require_non_empty("key", key)?;
        let call = self.gate.user_request(USER.get).param("MetaKey", key);
        let owner = self.owner();
        Ok(self
            .gate
            .dispatch(call, Tolerance::Strict, decode::first_record::<MetadataRecord>)
            .map(move |record| record.map(|r| MetadataItem::new(owner, r))))
    }

    fn get_all(&self) -> Call<Vec<MetadataItem>> {
        let call = self.gate.user_request(USER.get_all);
        let owner = self.owner();
        self.gate
            .dispatch(call, Tolerance::Strict, decode::records::<MetadataRecord>)
            .map(move |records| bind(&owner, records))
    }
}

// ---------------------------------------------------------------------------
// AppMetadata
// ---------------------------------------------------------------------------

/// Metadata owned by the application, shared by all of its users.
#[derive(Debug, Clone)]
pub struct AppMetadata {
    gate: Gate,
}

impl AppMetadata {
    /// Works with or without a session; only application credentials are sent.
    ///
    /// # Errors
    ///
    /// Never fails today; kept fallible so the gate stays the only constructor path.
    pub fn new(capability: Capability) -> Result<Self, PreconditionError> {
        Gate::new(capability, AuthRequirement::Optional).map(|gate| Self { gate })
    }

    pub(crate) fn from_gate(gate: Gate) -> Self {
        Self { gate }
    }

    fn owner(&self) -> Owner {
        Owner::App(self.clone())
    }
}

impl MetadataStore for AppMetadata {
    fn set(
        &self,
        key: &str,
        value: &str,
        location: Option<Location>,
        app_tag: &str,
    ) -> Result<Call<bool>, PreconditionError> {
        require_non_empty("key", key)?;
        let call = set_call(self.gate.request(APP.set), key, value, location, app_tag);
        Ok(self.gate.dispatch(call, Tolerance::Strict, decode::flag))
    }

    fn delete(&self, key: &str) -> Result<Call<bool>, PreconditionError> {
        require_non_empty("key", key)?;
        let call = self.gate.request(APP.delete).param("MetaKey", key);
        Ok(self.gate.dispatch(call, Tolerance::Strict, decode::flag))
    }

    fn get(&self, key: &str) -> Result<Call<Option<MetadataItem>>, PreconditionError> {
        require_non_empty("key", key)?;
        let call = self.gate.request(APP.get).param("MetaKey", key);
        let owner = self.owner();
        Ok(self
            .gate
            .dispatch(call, Tolerance::Strict, decode::first_record::<MetadataRecord>)
            .map(move |record| record.map(|r| MetadataItem::new(owner, r))))
    }

    fn get_all(&self) -> Call<Vec<MetadataItem>> {
        let call = self.gate.request(APP.get_all);
        let owner = self.owner();
        self.gate
            .dispatch(call, Tolerance::Strict, decode::records::<MetadataRecord>)
            .map(move |records| bind(&owner, records))
    }
}

fn bind(owner: &Owner, records: Vec<MetadataRecord>) -> Vec<MetadataItem> {
    records
        .into_iter()
        .map(|record| MetadataItem::new(owner.clone(), record))
        .collect()
}
