//! Reusable UI components

mod card;
mod format_badge;

pub use card::{card, detail_row, empty_state, primary_button, secondary_button, section_header};
pub use format_badge::FormatBadge;
