use serde::Deserialize;

use crate::decode::de;
use crate::error::PreconditionError;
use crate::session::UserId;

/// A validated WGS84 coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Location {
    latitude: f64,
    longitude: f64,
}

impl Location {
    /// Validate and build a coordinate.
    ///
    /// # Errors
    ///
    /// Returns [`PreconditionError::OutOfRange`] when latitude is outside ±90
    /// or longitude outside ±180 (NaN included).
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, PreconditionError> {
        check_range("latitude", latitude, 90.0)?;
        check_range("longitude", longitude, 180.0)?;
        Ok(Self {
            latitude,
            longitude,
        })
    }

    #[must_use]
    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    #[must_use]
    pub fn longitude(&self) -> f64 {
        self.longitude
    }
}

fn check_range(name: &'static str, value: f64, bound: f64) -> Result<(), PreconditionError> {
    if (-bound..=bound).contains(&value) {
        Ok(())
    } else {
        Err(PreconditionError::OutOfRange {
            name,
            value,
            min: -bound,
            max: bound,
        })
    }
}

/// Public profile of an account.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct UserProfile {
    #[serde(rename = "userID", deserialize_with = "de::from_str")]
    pub user_id: UserId,
    #[serde(rename = "userName")]
    pub name: String,
    #[serde(rename = "userEmail", default)]
    pub email: String,
    #[serde(rename = "userGender", default)]
    pub gender: String,
    #[serde(rename = "userAge", deserialize_with = "de::opt_from_str", default)]
    pub age: Option<u32>,
    #[serde(rename = "statusID", deserialize_with = "de::opt_from_str", default)]
    pub status: Option<i32>,
    #[serde(rename = "profilePictureUrl", default)]
    pub picture_url: String,
    #[serde(rename = "createdDate", default)]
    pub created_on: String,
}

/// A friend (or pending friend request) of the signed-in user.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct Friend {
    #[serde(rename = "friendID", deserialize_with = "de::from_str")]
    pub user_id: UserId,
    #[serde(rename = "friendName", default)]
    pub name: String,
    #[serde(rename = "friendStatus", default)]
    pub status: String,
    #[serde(rename = "lastLoginDate", default)]
    pub last_login: String,
}

/// A direct message.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct Message {
    #[serde(rename = "messageID", deserialize_with = "de::from_str")]
    pub id: u64,
    #[serde(rename = "fromUserID", deserialize_with = "de::from_str")]
    pub from: UserId,
    #[serde(rename = "toUserID", deserialize_with = "de::from_str")]
    pub to: UserId,
    #[serde(rename = "messageString", default)]
    pub text: String,
    #[serde(rename = "dateSent", default)]
    pub sent_on: String,
    #[serde(rename = "applicationTag", default)]
    pub app_tag: String,
}

/// One metadata value as stored by either the user or the application store.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct MetadataRecord {
    #[serde(rename = "metaKey")]
    pub key: String,
    #[serde(rename = "metaValue", default)]
    pub value: String,
    #[serde(rename = "metaLatitude", deserialize_with = "de::opt_from_str", default)]
    pub latitude: Option<f64>,
    #[serde(rename = "metaLongitude", deserialize_with = "de::opt_from_str", default)]
    pub longitude: Option<f64>,
    #[serde(rename = "appTag", default)]
    pub app_tag: String,
    #[serde(rename = "lastUpdateDate", default)]
    pub updated_on: String,
}

/// A photo album.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct PhotoAlbum {
    #[serde(rename = "albumID", deserialize_with = "de::from_str")]
    pub id: u64,
    #[serde(rename = "albumName", default)]
    pub name: String,
    #[serde(rename = "userID", deserialize_with = "de::from_str")]
    pub owner: UserId,
    #[serde(rename = "isPublic", deserialize_with = "de::flag", default)]
    pub is_public: bool,
    #[serde(rename = "createdDate", default)]
    pub created_on: String,
}

/// A picture, either in a photo album or referenced by a virtual album.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct Picture {
    #[serde(rename = "photoID", deserialize_with = "de::from_str")]
    pub id: u64,
    #[serde(rename = "fullPhotoURL", default)]
    pub full_url: String,
    #[serde(rename = "thumbnailPhotoURL", default)]
    pub thumbnail_url: String,
    #[serde(rename = "photoComment", default)]
    pub comment: String,
    #[serde(rename = "applicationTag", default)]
    pub app_tag: String,
    #[serde(rename = "latitude", deserialize_with = "de::opt_from_str", default)]
    pub latitude: Option<f64>,
    #[serde(rename = "longitude", deserialize_with = "de::opt_from_str", default)]
    pub longitude: Option<f64>,
    #[serde(rename = "addedOn", default)]
    pub added_on: String,
}

/// Header record of a virtual album.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct VirtualAlbumInfo {
    #[serde(rename = "virtualAlbumID", deserialize_with = "de::from_str")]
    pub id: u64,
    #[serde(rename = "name", default)]
    pub name: String,
    #[serde(rename = "userID", deserialize_with = "de::from_str")]
    pub owner: UserId,
    #[serde(rename = "applicationTag", default)]
    pub app_tag: String,
    #[serde(rename = "createdDateTime", default)]
    pub created_on: String,
}

/// A virtual album together with the pictures it references.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct VirtualAlbum {
    pub info: VirtualAlbumInfo,
    pub pictures: Vec<Picture>,
}

/// A place returned by a location search.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct Place {
    #[serde(rename = "geoID", deserialize_with = "de::from_str")]
    pub id: u64,
    #[serde(rename = "name", default)]
    pub name: String,
    #[serde(rename = "address", default)]
    pub address: String,
    #[serde(rename = "city", default)]
    pub city: String,
    #[serde(rename = "latitude", deserialize_with = "de::from_str")]
    pub latitude: f64,
    #[serde(rename = "longitude", deserialize_with = "de::from_str")]
    pub longitude: f64,
    #[serde(rename = "distanceInMeters", deserialize_with = "de::opt_from_str", default)]
    pub distance_meters: Option<f64>,
}

/// A check-in made by the signed-in user.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct CheckIn {
    #[serde(rename = "placeName", default)]
    pub place_name: String,
    #[serde(rename = "comment", default)]
    pub comment: String,
    #[serde(rename = "latitude", deserialize_with = "de::from_str")]
    pub latitude: f64,
    #[serde(rename = "longitude", deserialize_with = "de::from_str")]
    pub longitude: f64,
    #[serde(rename = "checkinDate", default)]
    pub checked_in_on: String,
    #[serde(rename = "appTag", default)]
    pub app_tag: String,
}

/// An item offered in the application store.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct StoreItem {
    #[serde(rename = "storeItemID", deserialize_with = "de::from_str")]
    pub id: u64,
    #[serde(rename = "itemName", default)]
    pub name: String,
    #[serde(rename = "itemDescription", default)]
    pub description: String,
    #[serde(rename = "itemPrice", default)]
    pub price: String,
    #[serde(rename = "itemAvailableFlag", deserialize_with = "de::flag", default)]
    pub available: bool,
    #[serde(rename = "appData", default)]
    pub app_data: String,
}

/// A purchase receipt.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct Receipt {
    #[serde(rename = "receiptID", deserialize_with = "de::from_str")]
    pub id: u64,
    #[serde(rename = "storeItemID", deserialize_with = "de::from_str")]
    pub store_item_id: u64,
    #[serde(rename = "itemQuantity", deserialize_with = "de::from_str")]
    pub quantity: u32,
    #[serde(rename = "totalCost", default)]
    pub total_cost: String,
    #[serde(rename = "historyDateTime", default)]
    pub purchased_on: String,
    #[serde(rename = "appData", default)]
    pub app_data: String,
}
