//! Subset extraction
//!
//! Selects elements with a [`Selector`], pulls each one and its ancestors
//! into a fresh model through the [`IdentityMap`], and rebuilds containment
//! and aggregation records from the parent -> children sets gathered on the
//! way up.

mod accumulator;
mod ascend;
mod error;
mod filter;
mod finalize;
mod identity;
mod options;
mod patcher;
mod session;

pub use accumulator::{PendingEntry, PendingSets, RelationAccumulator};
pub use error::{PatchError, PatchResult};
pub use filter::{FilterConfig, FilterMode, Selector};
pub use finalize::FinalizeSummary;
pub use identity::IdentityMap;
pub use options::{default_output_name, ensure_extension, parse_keywords, ModelOptions, StorySelection};
pub use patcher::{extract, patch, select_elements, Extraction, PatchOutcome};
pub use session::PatchSession;
