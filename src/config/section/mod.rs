//! Configuration section definitions.
//!
//! | Module     | TOML Section   | Purpose                          |
//! |------------|----------------|----------------------------------|
//! | `provider` | `[provider]`   | API roots and request timeout    |
//! | `search`   | `[search]`     | Picker debounce                  |
//! | `storage`  | `[storage]`    | Installation parameter file      |

mod provider;
mod search;
mod storage;

pub use provider::ProviderConfig;
pub use search::SearchConfig;
pub use storage::StorageConfig;
