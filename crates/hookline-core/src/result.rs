//! Convenience result type alias for Hookline.

use crate::error::AppError;

/// A specialized `Result` type for Hookline operations.
///
/// The hook registry itself never fails; this alias covers the edges
/// (configuration loading, plan validation) where failure is possible.
pub type AppResult<T> = Result<T, AppError>;
