//! Page window derived from `from`/`size` query parameters

use crate::error::{AppError, AppResult};

/// Offset/limit pair for a list query. The offset snaps to the start of the
/// page containing `from` (integer division), so `from=7, size=5` reads the
/// window starting at 5. `sort` names a column for descending order; `None`
/// keeps the store's natural id order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    pub limit: i64,
    pub offset: i64,
    pub sort: Option<&'static str>,
}

impl PageWindow {
    pub fn new(from: i64, size: i64, sort: Option<&'static str>) -> AppResult<Self> {
        if from < 0 || size <= 0 {
            return Err(AppError::Validation(format!(
                "Invalid page bounds: from={}, size={}",
                from, size
            )));
        }
        Ok(PageWindow {
            limit: size,
            offset: (from / size) * size,
            sort,
        })
    }

    /// ORDER BY fragment for this window.
    pub fn order_clause(&self) -> String {
        match self.sort {
            Some(column) => format!("ORDER BY {} DESC", column),
            None => "ORDER BY id".to_string(),
        }
    }
}
