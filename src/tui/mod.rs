//! Terminal layout editor for `sdash edit`.
//!
//! Hosts one [`LayoutStore`](crate::store::LayoutStore) per session and
//! renders the dashboard grid with ratatui, turning crossterm keyboard and
//! mouse input into drag, resize, remove, preset and picker operations.

pub mod app;
pub mod event;
pub mod geometry;
pub mod ui;

#[cfg(test)]
mod test_utils;
