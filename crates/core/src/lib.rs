//! Domain model and editor-side logic for pagesmith: configuration
//! documents, the section builder, debounced persistence, draft recovery,
//! variant weight budgets, and upload constraints.

pub mod builder;
pub mod config;
pub mod debounce;
pub mod draft_cache;
pub mod events;
pub mod section_id;
pub mod upload;
pub mod variant;
