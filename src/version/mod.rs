//! Tagged version resolution for dependency declarations
//!
//! Given the published versions of a package (newest first) and the version
//! expression a manifest requests, this module computes the small labeled list
//! shown next to the dependency: what the request resolves to, the latest
//! stable release, and one entry per pre-release channel.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐     ┌──────────────┐     ┌──────────────┐     ┌──────────┐
//! │  Classifier  │────▶│   Resolver   │────▶│  Assembler   │────▶│  Filter  │
//! │ (channels)   │     │ (satisfies)  │     │   (sort)     │     │ (names)  │
//! └──────────────┘     └──────────────┘     └──────────────┘     └──────────┘
//!         │                    │
//!         ▼                    ▼
//! ┌──────────────┐     ┌──────────────┐
//! │    Semver    │     │    Range     │
//! │ (parse, cmp) │     │ (npm ranges) │
//! └──────────────┘     └──────────────┘
//! ```
//!
//! # Modules
//!
//! - [`classifier`]: Splits versions into stable releases and pre-release channels
//! - [`resolver`]: Computes the `satisfies` entry and its flags
//! - [`tags`]: Assembles, sorts and runs the whole pipeline
//! - [`filter`]: Restricts channel entries to an allow-list
//! - [`range`]: npm-style range expressions
//! - [`semver`]: Version parsing, ordering and channel names
//! - [`error`]: Error types for range parsing and configuration
//! - [`types`]: Common types like `TaggedVersion`

pub mod classifier;
pub mod error;
pub mod filter;
pub mod range;
pub mod resolver;
pub mod semver;
pub mod tags;
pub mod types;

pub use classifier::classify;
pub use filter::filter_tags;
pub use resolver::{latest_entry, resolve};
pub use tags::{assemble, build_tagged_versions};
pub use types::{Classification, MatchOutcome, TaggedVersion};
