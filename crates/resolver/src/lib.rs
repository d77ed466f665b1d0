//! # Resolver Crate
//!
//! Turns free-text title queries into ranked recommendations.
//!
//! ## Main Components
//!
//! - [`TitleResolver`]: borrows a built similarity engine and answers queries
//! - [`fuzzy`]: 0-100 fuzzy title scoring with a strict match threshold
//!
//! ## Example Usage
//!
//! ```ignore
//! use engine::SimilarityEngine;
//! use resolver::TitleResolver;
//!
//! let engine = SimilarityEngine::build(&corpus);
//! let resolver = TitleResolver::new(&engine);
//!
//! for title in resolver.resolve("dark knight", 5) {
//!     println!("{}", title);
//! }
//! ```

pub mod fuzzy;
pub mod resolve;

pub use fuzzy::{FuzzyMatch, MATCH_THRESHOLD, score};
pub use resolve::{DEFAULT_NEIGHBORS, Recommendation, TitleResolver};
