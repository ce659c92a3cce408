// ABOUTME: Typed client for the Persona backend used by the presentation tier
// ABOUTME: Validates drafts locally before any request and tracks list-view state

pub mod client;
pub mod error;
pub mod listing;
pub mod resource;

pub use client::PersonaClient;
pub use error::{ClientError, ClientResult};
pub use listing::Listing;
pub use resource::Resource;
