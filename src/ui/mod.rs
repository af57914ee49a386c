//! UI / rendering layer: everything that touches Ratatui widgets.
//!
//! This layer turns a core [`Frame`](crate::core::carousel::Frame) into
//! cells on the terminal.  No file I/O and no animation state live here.

pub mod canvas;
pub mod caption;
pub mod indicator;
pub mod layout;
pub mod popup;
pub mod stage;
pub mod theme;
