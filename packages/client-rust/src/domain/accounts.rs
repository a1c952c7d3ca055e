//! Accounts: the signed-in user and public profile lookups.

use std::sync::Arc;

use nimbus_core::{
    decode, PhotoAlbum, PreconditionError, Session, SessionToken, Tolerance, UserId, UserProfile,
};

use crate::call::Call;
use crate::domain::commerce::Commerce;
use crate::domain::friends::Friends;
use crate::domain::geolocation::Geolocation;
use crate::domain::messages::Messages;
use crate::domain::metadata::UserMetadata;
use crate::domain::pictures::{self, PhotoAlbums, VirtualAlbums};
use crate::gate::{params, AuthRequirement, Capability, ClientContext, Gate};

pub mod method {
    pub const RECOVER: &str = "UserAccount_Profile_Recover";
    pub const CREATE: &str = "UserAccount_Profile_Create";
    pub const DELETE: &str = "UserAccount_Profile_Delete";
    pub const GET_FROM_TOKEN: &str = "UserAccount_Profile_GetFromUserToken";
    pub const GET_FROM_USER_ID: &str = "UserAccount_Profile_GetFromUserID";
}

/// Fetch the profile behind `token` and bind it into an [`AuthenticatedUser`].
/// An unknown token resolves to `None`.
pub(crate) fn from_token(
    context: Arc<ClientContext>,
    token: SessionToken,
) -> Call<Option<AuthenticatedUser>> {
    let gate = Gate::anonymous(Arc::clone(&context));
    let call = gate
        .request(method::GET_FROM_TOKEN)
        .param(params::USER_TOKEN, token.expose());
    gate.dispatch(call, Tolerance::Strict, decode::first_record::<UserProfile>)
        .map(move |profile| {
            profile.map(|profile| AuthenticatedUser {
                session: Session::new(token, profile.user_id),
                context,
                profile,
            })
        })
}

// ---------------------------------------------------------------------------
// AuthenticatedUser
// ---------------------------------------------------------------------------

/// A signed-in user. Every domain object it hands out shares its session.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    context: Arc<ClientContext>,
    session: Session,
    profile: UserProfile,
}

impl AuthenticatedUser {
    #[must_use]
    pub fn profile(&self) -> &UserProfile {
        &self.profile
    }

    #[must_use]
    pub fn session(&self) -> &Session {
        &self.session
    }

    #[must_use]
    pub fn user_id(&self) -> UserId {
        self.session.user_id
    }

    fn gate(&self) -> Gate {
        Gate::signed_in(Arc::clone(&self.context), self.session.clone())
    }

    #[must_use]
    pub fn friends(&self) -> Friends {
        Friends::from_gate(self.gate())
    }

    #[must_use]
    pub fn messages(&self) -> Messages {
        Messages::from_gate(self.gate())
    }

    #[must_use]
    pub fn metadata(&self) -> UserMetadata {
        UserMetadata::from_gate(self.gate())
    }

    #[must_use]
    pub fn photo_albums(&self) -> PhotoAlbums {
        PhotoAlbums::from_gate(self.gate())
    }

    #[must_use]
    pub fn virtual_albums(&self) -> VirtualAlbums {
        VirtualAlbums::from_gate(self.gate())
    }

    #[must_use]
    pub fn geolocation(&self) -> Geolocation {
        Geolocation::from_gate(self.gate())
    }

    #[must_use]
    pub fn commerce(&self) -> Commerce {
        Commerce::from_gate(self.gate())
    }

    /// Re-fetch the profile with the same session token. Resolves to `None`
    /// when the token is no longer valid.
    pub fn refresh(&self) -> Call<Option<AuthenticatedUser>> {
        from_token(Arc::clone(&self.context), self.session.token.clone())
    }

    /// Permanently delete the account. The session is unusable afterwards.
    pub fn delete_account(&self) -> Call<bool> {
        let gate = self.gate();
        let call = gate.user_request(method::DELETE);
        gate.dispatch(call, Tolerance::Strict, decode::flag)
    }
}

// ---------------------------------------------------------------------------
// Profiles
// ---------------------------------------------------------------------------

/// Public profile lookups. Works with or without a session.
#[derive(Debug, Clone)]
pub struct Profiles {
    gate: Gate,
}

impl Profiles {
    /// # Errors
    ///
    /// Never fails: profiles only optionally use a session.
    pub fn new(capability: Capability) -> Result<Self, PreconditionError> {
        Gate::new(capability, AuthRequirement::Optional).map(|gate| Self { gate })
    }

    pub(crate) fn from_gate(gate: Gate) -> Self {
        Self { gate }
    }

    /// Public profile of `user_id`; `None` when the service returns no record.
    pub fn find(&self, user_id: UserId) -> Call<Option<UserProfile>> {
        let call = self
            .gate
            .user_request(method::GET_FROM_USER_ID)
            .param("TargetUserID", user_id.to_string());
        self.gate
            .dispatch(call, Tolerance::Strict, decode::first_record::<UserProfile>)
    }

    /// Photo albums of `user_id`, identified by the session token when
    /// signed in and by the bare user id otherwise.
    ///
    /// # Errors
    ///
    /// Same as [`Gate::credential`]; never fails since `user_id` is the fallback.
    pub fn photo_albums_of(&self, user_id: UserId) -> Result<Call<Vec<PhotoAlbum>>, PreconditionError> {
        let call = self
            .gate
            .identified_request(pictures::method::ALBUM_GET_ALL_FROM_USER, Some(user_id))?;
        Ok(self
            .gate
            .dispatch(call, Tolerance::Strict, decode::records::<PhotoAlbum>))
    }
}
