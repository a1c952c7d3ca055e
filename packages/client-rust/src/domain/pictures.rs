//! Photo albums and virtual albums.
//!
//! Creating an album is a multi-step operation: the create call only returns
//! the new id, so the album itself is fetched afterwards. A virtual album is
//! assembled from its header record and a second call listing its pictures.

use nimbus_core::{
    decode, PhotoAlbum, Picture, PreconditionError, Tolerance, VirtualAlbum, VirtualAlbumInfo,
};

use crate::call::Call;
use crate::gate::{require_non_empty, AuthRequirement, Capability, Gate};
use crate::orchestrate::{Chain, Step};

pub mod method {
    pub const ALBUM_CREATE: &str = "Pictures_PhotoAlbum_Create";
    pub const ALBUM_GET: &str = "Pictures_PhotoAlbum_Get";
    pub const ALBUM_GET_ALL: &str = "Pictures_PhotoAlbum_GetAll";
    pub const ALBUM_GET_ALL_FROM_USER: &str = "Pictures_PhotoAlbum_GetAllFromUser";
    pub const ALBUM_DELETE: &str = "Pictures_PhotoAlbum_Delete";
    pub const PHOTO_DELETE: &str = "Pictures_Photo_Delete";
    pub const PHOTO_SET_APP_TAG: &str = "Pictures_Photo_SetAppTag";
    pub const VIRTUAL_CREATE: &str = "Pictures_VirtualAlbum_Create";
    pub const VIRTUAL_GET: &str = "Pictures_VirtualAlbum_Get";
    pub const VIRTUAL_GET_PICTURES: &str = "Pictures_VirtualAlbum_GetAllPictures";
    pub const VIRTUAL_ADD_PHOTO: &str = "Pictures_VirtualAlbum_AddPhoto";
    pub const VIRTUAL_REMOVE_PHOTO: &str = "Pictures_VirtualAlbum_RemovePhoto";
    pub const VIRTUAL_DELETE: &str = "Pictures_VirtualAlbum_Delete";
}

const ALBUM_ID: &str = "AlbumID";
const PHOTO_ID: &str = "PhotoID";
const VIRTUAL_ALBUM_ID: &str = "VirtualAlbumID";
const APPLICATION_TAG: &str = "ApplicationTag";

// ---------------------------------------------------------------------------
// PhotoAlbums
// ---------------------------------------------------------------------------

/// Photo albums owned by the signed-in user.
#[derive(Debug, Clone)]
pub struct PhotoAlbums {
    gate: Gate,
}

impl PhotoAlbums {
    /// # Errors
    ///
    /// Returns [`PreconditionError::MissingSession`] without a session.
    pub fn new(capability: Capability) -> Result<Self, PreconditionError> {
        Gate::new(capability, AuthRequirement::Session).map(|gate| Self { gate })
    }

    pub(crate) fn from_gate(gate: Gate) -> Self {
        Self { gate }
    }

    /// Create an album and fetch it back.
    ///
    /// # Errors
    ///
    /// Returns [`PreconditionError::Empty`] for a blank name.
    pub fn create(
        &self,
        name: &str,
        public: bool,
        app_tag: &str,
    ) -> Result<Call<Option<PhotoAlbum>>, PreconditionError> {
        require_non_empty("name", name)?;
        let call = self
            .gate
            .user_request(method::ALBUM_CREATE)
            .param("AlbumName", name)
            .param("IsPublic", if public { "1" } else { "0" })
            .param(APPLICATION_TAG, app_tag);
        let created = self
            .gate
            .dispatch(call, Tolerance::Strict, decode::scalar::<u64>);

        let albums = self.clone();
        Ok(Chain::start(created)
            .then(move |album_id| Step::Issue(albums.get(album_id)))
            .finish())
    }

    pub fn get(&self, album_id: u64) -> Call<Option<PhotoAlbum>> {
        let call = self
            .gate
            .user_request(method::ALBUM_GET)
            .param(ALBUM_ID, album_id.to_string());
        self.gate
            .dispatch(call, Tolerance::Strict, decode::first_record::<PhotoAlbum>)
    }

    pub fn get_all(&self) -> Call<Vec<PhotoAlbum>> {
        let call = self.gate.user_request(method::ALBUM_GET_ALL);
        self.gate
            .dispatch(call, Tolerance::Strict, decode::records::<PhotoAlbum>)
    }

    pub fn delete(&self, album_id: u64) -> Call<bool> {
        let call = self
            .gate
            .user_request(method::ALBUM_DELETE)
            .param(ALBUM_ID, album_id.to_string());
        self.gate.dispatch(call, Tolerance::Strict, decode::flag)
    }

    /// Deleting an already-deleted picture is a no-op success.
    pub fn delete_picture(&self, picture_id: u64) -> Call<bool> {
        let call = self
            .gate
            .user_request(method::PHOTO_DELETE)
            .param(PHOTO_ID, picture_id.to_string());
        self.gate
            .dispatch(call, Tolerance::NegativeOneIsBenign, decode::flag)
    }

    /// Re-tagging with the current tag is a no-op success.
    pub fn set_app_tag(&self, picture_id: u64, app_tag: &str) -> Call<bool> {
        let call = self
            .gate
            .user_request(method::PHOTO_SET_APP_TAG)
            .param(PHOTO_ID, picture_id.to_string())
            .param(APPLICATION_TAG, app_tag);
        self.gate
            .dispatch(call, Tolerance::NegativeOneIsBenign, decode::flag)
    }
}

// ---------------------------------------------------------------------------
// VirtualAlbums
// ---------------------------------------------------------------------------

/// Virtual albums: named collections referencing pictures from any album.
#[derive(Debug, Clone)]
pub struct VirtualAlbums {
    gate: Gate,
}

impl VirtualAlbums {
    /// # Errors
    ///
    /// Returns [`PreconditionError::MissingSession`] without a session.
    pub fn new(capability: Capability) -> Result<Self, PreconditionError> {
        Gate::new(capability, AuthRequirement::Session).map(|gate| Self { gate })
    }

    pub(crate) fn from_gate(gate: Gate) -> Self {
        Self { gate }
    }

    /// Create a virtual album, then fetch its header and pictures.
    ///
    /// Resolves to `None` when the new album cannot be fetched back.
    ///
    /// # Errors
    ///
    /// Returns [`PreconditionError::Empty`] for a blank name.
    pub fn create(
        &self,
        name: &str,
        app_tag: &str,
    ) -> Result<Call<Option<VirtualAlbum>>, PreconditionError> {
        require_non_empty("name", name)?;
        let call = self
            .gate
            .user_request(method::VIRTUAL_CREATE)
            .param("AlbumName", name)
            .param(APPLICATION_TAG, app_tag);
        let created = self
            .gate
            .dispatch(call, Tolerance::Strict, decode::scalar::<u64>);

        let albums = self.clone();
        Ok(Chain::start(created)
            .then(move |album_id| Step::Issue(albums.get(album_id)))
            .finish())
    }

    /// Fetch a virtual album with its pictures.
    pub fn get(&self, album_id: u64) -> Call<Option<VirtualAlbum>> {
        let call = self
            .gate
            .user_request(method::VIRTUAL_GET)
            .param(VIRTUAL_ALBUM_ID, album_id.to_string());
        let header = self.gate.dispatch(
            call,
            Tolerance::Strict,
            decode::first_record::<VirtualAlbumInfo>,
        );

        let albums = self.clone();
        Chain::start(header)
            .then(move |info| match info {
                None => Step::Resolve(None),
                Some(info) => Step::Issue(
                    albums
                        .pictures(info.id)
                        .map(move |pictures| Some(VirtualAlbum { info, pictures })),
                ),
            })
            .finish()
    }

    fn pictures(&self, album_id: u64) -> Call<Vec<Picture>> {
        let call = self
            .gate
            .user_request(method::VIRTUAL_GET_PICTURES)
            .param(VIRTUAL_ALBUM_ID, album_id.to_string());
        self.gate
            .dispatch(call, Tolerance::Strict, decode::records::<Picture>)
    }

    pub fn add_picture(&self, album_id: u64, picture_id: u64) -> Call<bool> {
        let call = self
            .gate
            .user_request(method::VIRTUAL_ADD_PHOTO)
            .param(VIRTUAL_ALBUM_ID, album_id.to_string())
            .param(PHOTO_ID, picture_id.to_string());
        self.gate.dispatch(call, Tolerance::Strict, decode::flag)
    }

    /// Removing a picture the album does not reference is a no-op success.
    pub fn remove_picture(&self, album_id: u64, picture_id: u64) -> Call<bool> {
        let call = self
            .gate
            .user_request(method::VIRTUAL_REMOVE_PHOTO)
            .param(VIRTUAL_ALBUM_ID, album_id.to_string())
            .param(PHOTO_ID, picture_id.to_string());
        self.gate
            .dispatch(call, Tolerance::NegativeOneIsBenign, decode::flag)
    }

    pub fn delete(&self, album_id: u64) -> Call<bool> {
        let call = self
            .gate
            .user_request(method::VIRTUAL_DELETE)
            .param(VIRTUAL_ALBUM_ID, album_id.to_string());
        self.gate.dispatch(call, Tolerance::Strict, decode::flag)
    }
}
