//! `Nimbus` Client — authenticated domain objects over a pluggable transport.
//!
//! Layers, outermost first:
//!
//! 1. **Client** (`client`): application credentials, login, session resume
//! 2. **Domain objects** (`domain`): friends, messages, metadata, pictures, ...
//! 3. **Gate** (`gate`): construction-time session check, request building
//! 4. **Orchestration** (`orchestrate`): dependent multi-step calls
//! 5. **Call pipeline** (`pipeline`): Tower layers in front of the [`Transport`](nimbus_core::Transport)
//!
//! Every operation returns a [`Call`]; await it, or with the
//! `legacy-callbacks` feature hand it a callback.

pub mod call;
pub mod client;
pub mod config;
pub mod domain;
pub mod gate;
#[cfg(feature = "legacy-callbacks")]
pub mod legacy;
pub mod orchestrate;
pub mod owner;
pub mod pipeline;

#[cfg(test)]
mod test_support;

// Re-export key types for convenient access.
pub use call::{Call, EnvelopeFuture};
pub use client::Client;
pub use config::{ClientConfig, ConfigError};
pub use domain::{
    AppMetadata, AuthenticatedUser, Commerce, Friends, Geolocation, Messages, PhotoAlbums,
    Profiles, UserMetadata, VirtualAlbums,
};
pub use gate::{AuthRequirement, Capability, Credential, Gate};
#[cfg(feature = "legacy-callbacks")]
pub use legacy::{CallHandle, CallbackParams};
pub use orchestrate::{Chain, Step};
pub use owner::{MetadataItem, MetadataStore, Owner};
pub use pipeline::{build_call_pipeline, CallPipeline};
