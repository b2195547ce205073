//! Cross-space link resolution.
//!
//! - `link` - persisted `CrossSpaceLink` record and field value envelope
//! - `outcome` - `ResolveOutcome` / `CrossSpaceEntryData`
//! - `resolver` - hydration against the registry and client cache
//! - `tracker` - `LinkWatcher`, re-resolves on dependency change

mod link;
mod outcome;
mod resolver;
mod tracker;


pub use link::{CrossSpaceLink, LINK_TYPE, LinkParseError};
pub use outcome::{CrossSpaceEntryData, ResolveOutcome};
pub use resolver::{default_locale, resolve, resolve_with};
pub use tracker::LinkWatcher;
