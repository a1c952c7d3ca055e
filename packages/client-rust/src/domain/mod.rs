//! Domain objects, one module per service area.
//!
//! Every object holds a [`Gate`](crate::gate::Gate) and returns [`Call`](crate::call::Call)s.
//! Objects that need a signed-in user can only be built from a capability
//! carrying a session; the rest work with application credentials alone.
//!
//! Each module exposes the remote procedure names it uses in a `method`
//! submodule so tests and transports can match on them.

pub mod accounts;
pub mod commerce;
pub mod friends;
pub mod geolocation;
pub mod messages;
pub mod metadata;
pub mod pictures;

pub use accounts::{AuthenticatedUser, Profiles};
pub use commerce::Commerce;
pub use friends::Friends;
pub use geolocation::Geolocation;
pub use messages::Messages;
pub use metadata::{AppMetadata, UserMetadata};
pub use pictures::{PhotoAlbums, VirtualAlbums};
