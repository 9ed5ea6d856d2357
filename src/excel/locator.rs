//! Anchor cell lookup

use crate::excel::grid::{cell_text, CellPos, Sheet};
use crate::error::{RecalError, RecalResult};

/// Position of the first cell, in row-major order, whose text contains `marker`
pub fn find_first_cell(sheet: &Sheet, marker: &str) -> Option<CellPos> {
    sheet.rows().find_map(|(row, cells)| {
        cells
            .iter()
            .position(|cell| cell_text(cell).contains(marker))
            .map(|col| CellPos::new(row, col as u32))
    })
}

/// Like [`find_first_cell`], failing when the marker is absent
pub fn require_cell(sheet: &Sheet, marker: &str) -> RecalResult<CellPos> {
    let pos = find_first_cell(sheet, marker).ok_or_else(|| RecalError::AnchorNotFound {
        marker: marker.to_string(),
        sheet: sheet.name().to_string(),
    })?;
    tracing::debug!(marker, sheet = sheet.name(), cell = %pos, "located anchor");
    Ok(pos)
}
