//! Remote space configurations.
//!
//! | Module     | Purpose                                         |
//! |------------|-------------------------------------------------|
//! | `config`   | `SpaceConfiguration`, drafts, composite ids     |
//! | `registry` | Ordered registry with duplicate detection       |
//! | `params`   | Installation parameter store (`spaceConfigs`)   |

mod config;
mod params;
mod registry;

pub use config::{
    Credentials, DEFAULT_ENVIRONMENT, SpaceConfiguration, SpaceDraft, SpaceSummary, composite_id,
    normalize_environment,
};
pub use params::{InstallationParameters, load_parameters, persist_parameters};
pub use registry::SpaceConfigRegistry;
