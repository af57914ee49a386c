//! Layout helpers: split the terminal area into regions.

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Primary screen layout: the hero stage and a bottom status bar.
pub struct AppLayout {
    pub stage_area: Rect,
    pub status_area: Rect,
}

impl AppLayout {
    /// Compute the layout from the full terminal area.
    pub fn from_area(area: Rect) -> Self {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(1),    // stage (takes all remaining space)
                Constraint::Length(1), // status bar
            ])
            .split(area);

        Self {
            stage_area: chunks[0],
            status_area: chunks[1],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_bar_is_one_row() {
        let layout = AppLayout::from_area(Rect::new(0, 0, 120, 60));
        assert_eq!(layout.stage_area, Rect::new(0, 0, 120, 59));
        assert_eq!(layout.status_area, Rect::new(0, 59, 120, 1));
    }
}
