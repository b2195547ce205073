//! Entry search for the picker.
//!
//! | Module       | Purpose                                          |
//! |--------------|--------------------------------------------------|
//! | `filter`     | Content-type dropdown                            |
//! | `debouncer`  | Trailing-edge input timing                       |
//! | `state`      | Published view and empty states                  |
//! | `controller` | Actor issuing requests, discarding stale replies |
//! | `session`    | Handle owning the actor                          |
//! | `picker`     | Command loop ending in insert or cancel          |

mod controller;
mod debouncer;
mod filter;
mod picker;
mod session;
mod state;

pub use controller::SearchMsg;
pub use debouncer::DEBOUNCE_MS;
pub use filter::{ANY_CONTENT_TYPE, ContentTypeFilter, FilterOption, content_type_options};
pub use picker::{PickerInput, pick};
pub use session::SearchSession;
pub use state::{EmptyState, SearchPhase, SearchView};
