//! # History Crate
//!
//! Loads a personal ratings log and samples well-rated titles from it,
//! so the recommender can be seeded from real viewing history.
//!
//! ## Main Components
//!
//! - [`RatingLog`]: parsed log with uniform random sampling over
//!   eligible entries
//! - [`sample_favorite`]: one-shot, degradable load-and-sample helper
//!
//! ## Example Usage
//!
//! ```ignore
//! use history::{DEFAULT_MIN_RATING, RatingLog};
//! use std::collections::HashSet;
//! use std::path::Path;
//!
//! let log = RatingLog::load(Path::new("ratings.csv"))?;
//!
//! let mut seen = HashSet::new();
//! if let Some(title) = log.sample(DEFAULT_MIN_RATING, &seen) {
//!     println!("Because you liked {}...", title);
//!     seen.insert(title.to_string());
//! }
//! ```

pub mod error;
pub mod log;

pub use error::{HistoryError, Result};
pub use log::{DEFAULT_MIN_RATING, LogEntry, RatingLog, sample_favorite};
