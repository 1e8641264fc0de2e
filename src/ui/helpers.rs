use anyhow::Error;
use ratatui::layout::{Constraint, Direction, Layout, Rect};

use crate::db::StoreError;

/// Produce a rectangle centered within `area` that spans the requested percent
/// of the width and height. Used for modal dialogs.
pub(crate) fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(area);

    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(horizontal[1]);

    vertical[1]
}

/// Extract the most relevant message from a chained error. The typed store
/// error carries the librarian-facing wording, so prefer it when present and
/// fall back to the root cause otherwise.
pub(crate) fn surface_error(err: &Error) -> String {
    if let Some(store_err) = err.chain().find_map(|cause| cause.downcast_ref::<StoreError>()) {
        return store_err.to_string();
    }
    err.chain()
        .last()
        .map(|cause| cause.to_string())
        .unwrap_or_else(|| err.to_string())
}
