//! Check-ins and place search.

use nimbus_core::{decode, CheckIn, Location, Place, PreconditionError, RemoteCall, Tolerance};

use crate::call::Call;
use crate::gate::{require_positive, AuthRequirement, Capability, Gate};

pub mod method {
    pub const CHECK_IN: &str = "GeoLocation_Checkin_Add";
    pub const CHECK_INS: &str = "GeoLocation_Checkins_Get";
    pub const SEARCH: &str = "GeoLocation_Location_Search";
}

fn at(call: RemoteCall, location: Location) -> RemoteCall {
    call.param("Latitude", location.latitude().to_string())
        .param("Longitude", location.longitude().to_string())
}

#[derive(Debug, Clone)]
pub struct Geolocation {
    gate: Gate,
}

impl Geolocation {
    /// # Errors
    ///
    /// Returns [`PreconditionError::MissingSession`] without a session.
    pub fn new(capability: Capability) -> Result<Self, PreconditionError> {
        Gate::new(capability, AuthRequirement::Session).map(|gate| Self { gate })
    }

    pub(crate) fn from_gate(gate: Gate) -> Self {
        Self { gate }
    }

    pub fn check_in(&self, location: Location, comment: &str, app_tag: &str) -> Call<bool> {
        let call = at(self.gate.user_request(method::CHECK_IN), location)
            .param("Comment", comment)
            .param("ApplicationTag", app_tag);
        self.gate.dispatch(call, Tolerance::Strict, decode::flag)
    }

    /// [`check_in`](Self::check_in) from raw coordinates.
    ///
    /// # Errors
    ///
    /// Returns [`PreconditionError::OutOfRange`] for an invalid coordinate.
    pub fn check_in_at(
        &self,
        latitude: f64,
        longitude: f64,
        comment: &str,
        app_tag: &str,
    ) -> Result<Call<bool>, PreconditionError> {
        let location = Location::new(latitude, longitude)?;
        Ok(self.check_in(location, comment, app_tag))
    }

    /// Check-ins made after `after`; `None` for all.
    pub fn check_ins(&self, after: Option<&str>) -> Call<Vec<CheckIn>> {
        let mut call = self.gate.user_request(method::CHECK_INS);
        if let Some(after) = after {
            call = call.param("AfterDate", after);
        }
        self.gate
            .dispatch(call, Tolerance::Strict, decode::records::<CheckIn>)
    }

    /// Up to `limit` places within `radius_meters` of `location`, nearest first.
    ///
    /// # Errors
    ///
    /// Returns [`PreconditionError::Zero`] for a zero radius or limit.
    pub fn find_places(
        &self,
        location: Location,
        radius_meters: u32,
        limit: u32,
    ) -> Result<Call<Vec<Place>>, PreconditionError> {
        require_positive("radius_meters", radius_meters)?;
        require_positive("limit", limit)?;
        let call = at(self.gate.user_request(method::SEARCH), location)
            .param("RadiusInMeters", radius_meters.to_string())
            .param("MaxResults", limit.to_string());
        Ok(self
            .gate
            .dispatch(call, Tolerance::Strict, decode::records::<Place>))
    }
}
