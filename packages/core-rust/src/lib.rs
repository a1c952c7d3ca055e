//! `Nimbus` Core — result envelopes, error classification, the transport seam,
//! session values and decoded record types.

pub mod classify;
pub mod decode;
pub mod envelope;
pub mod error;
pub mod error_code;
pub mod session;
pub mod transport;
pub mod types;

pub use classify::{classify, classify_outcome, ErrorClass, Tolerance};
pub use envelope::Envelope;
pub use error::{DecodeError, PreconditionError, SdkError, ServiceError};
pub use error_code::ErrorCode;
pub use session::{Session, SessionToken, UserId};
pub use transport::{RawPayload, RawReply, Record, RemoteCall, Transport};
pub use types::{
    CheckIn, Friend, Location, Message, MetadataRecord, PhotoAlbum, Picture, Place, Receipt,
    StoreItem, UserProfile, VirtualAlbum, VirtualAlbumInfo,
};
