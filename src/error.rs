//! Error handling for checked map access

use thiserror::Error;

/// Error returned by the checked access methods [`at`] and [`at_mut`].
///
/// [`at`]: crate::OpenHashMap::at
/// [`at_mut`]: crate::OpenHashMap::at_mut
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessError {
    /// The requested key has no live entry in the table
    #[error("key not found")]
    KeyNotFound,
}
