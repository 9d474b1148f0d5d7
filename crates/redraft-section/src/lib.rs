//! redraft-section - Document decomposition and the section store
//!
//! The data layer of the editorial engine:
//! - Classifies markup nodes into a closed set of semantic types
//! - Segments a rendered document into addressable, independently editable
//!   sections
//! - Owns the ordered section store with index-preserving mutations
//! - Derives the assembled document and its plain-text length on demand
//!
//! # Example
//!
//! ```rust,ignore
//! use redraft_section::{SectionStore, Segmenter};
//!
//! let segmenter = Segmenter::new();
//! let store = SectionStore::from_sections(
//!     segmenter.segment("<h2>Title</h2><p>Hello world</p>"),
//! );
//!
//! assert_eq!(store.len(), 2);
//! assert_eq!(store.character_count(), 16);
//! ```

#![warn(unreachable_pub)]

// Core modules
pub mod classify;
pub mod error;
pub mod markup;
pub mod section;
pub mod section_type;
pub mod segment;
pub mod store;

// Re-exports for convenience
pub use classify::classify;
pub use error::SectionError;
pub use markup::{first_image_src, strip_tags, HtmlParser, MarkupParser, RawNode};
pub use section::{Section, SectionId};
pub use section_type::SectionType;
pub use segment::Segmenter;
pub use store::{Generation, SectionStore};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
