//! # contract: the row sink seam
//!
//! The orchestration in [`crate::format`] produces rows; where they end up is
//! behind the [`RowSink`] trait. The production implementation is
//! [`crate::table::TabWriter`]; tests use the generated `MockRowSink` to check
//! row order and shape without touching the filesystem.

use mockall::automock;

use crate::error::Result;

/// Receives table rows in output order. `None` cells render empty.
#[cfg_attr(any(test, feature = "test-export-mocks"), automock)]
pub trait RowSink {
    fn write_row(&mut self, row: &[Option<String>]) -> Result<()>;

    /// Flushes anything buffered. Called once after the last row.
    fn finish(&mut self) -> Result<()>;
}
