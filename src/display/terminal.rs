// src/display/terminal.rs
//! Terminal rendering of the resident tile set

use crate::{
    error::Result,
    grid::{GridIndex, IndexRange},
    tiles::{TileDelta, TileStore},
};
use chrono::Local;
use crossterm::{
    cursor::MoveTo,
    execute,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal::{Clear, ClearType},
};
use std::{collections::HashSet, io::Write};

/// Largest window, in cells, that is drawn cell by cell.
pub const MAX_DRAWN_COLUMNS: u128 = 72;
pub const MAX_DRAWN_ROWS: u128 = 32;

/// What one character of the drawn map stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellState {
    Empty,
    Resident,
    Added,
    Removed,
}

impl CellState {
    pub fn symbol(&self) -> char {
        match self {
            CellState::Empty => '.',
            CellState::Resident => '#',
            CellState::Added => '+',
            CellState::Removed => '-',
        }
    }

    fn color(&self) -> Color {
        match self {
            CellState::Empty => Color::DarkGrey,
            CellState::Resident => Color::White,
            CellState::Added => Color::Green,
            CellState::Removed => Color::Red,
        }
    }
}

/// Cell states of `window`, northernmost row first.
pub fn cell_rows<T, F>(store: &TileStore<T, F>, delta: &TileDelta<T>, window: &IndexRange) -> Vec<Vec<CellState>> {
    let added: HashSet<GridIndex> = delta.added_indices().collect();
    let removed: HashSet<GridIndex> = delta.removed_indices().collect();

    (window.y1..=window.y2)
        .rev()
        .map(|y| {
            (window.x1..=window.x2)
                .map(|x| {
                    let index = GridIndex::new(x, y);
                    if added.contains(&index) {
                        CellState::Added
                    } else if removed.contains(&index) {
                        CellState::Removed
                    } else if store.contains(index) {
                        CellState::Resident
                    } else {
                        CellState::Empty
                    }
                })
                .collect()
        })
        .collect()
}

pub struct TerminalDisplay {
    clear_screen: bool,
}

impl TerminalDisplay {
    pub fn new() -> Self {
        Self { clear_screen: true }
    }

    /// Draw below the previous output instead of clearing the screen.
    pub fn scrolling() -> Self {
        Self { clear_screen: false }
    }

    /// Render one step of a moving view.
    pub fn render<T, F>(
        &self,
        stdout: &mut impl Write,
        step: usize,
        store: &TileStore<T, F>,
        delta: &TileDelta<T>,
        window: &IndexRange,
    ) -> Result<()> {
        if self.clear_screen {
            execute!(stdout, Clear(ClearType::All), MoveTo(0, 0))?;
        }

        // Header
        execute!(
            stdout,
            SetForegroundColor(Color::Green),
            Print("=".repeat(60)),
            Print("\n"),
            Print("Map Grid - Resident Tiles"),
            Print("\n"),
            Print("=".repeat(60)),
            Print("\n"),
            ResetColor
        )?;

        let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S");
        execute!(stdout, Print(format!("Last Update: {} (step {})\n\n", timestamp, step)))?;

        self.render_summary_section(stdout, store, delta)?;
        self.render_map_section(stdout, store, delta, window)?;

        execute!(
            stdout,
            SetForegroundColor(Color::Green),
            Print("=".repeat(60)),
            Print("\n"),
            ResetColor
        )?;
        stdout.flush()?;
        Ok(())
    }

    fn render_summary_section<T, F>(
        &self,
        stdout: &mut impl Write,
        store: &TileStore<T, F>,
        delta: &TileDelta<T>,
    ) -> Result<()> {
        execute!(
            stdout,
            SetForegroundColor(Color::Yellow),
            Print("TILES:\n"),
            ResetColor
        )?;

        execute!(
            stdout,
            Print(format!("  Added:    {:>8}\n", delta.added.len())),
            Print(format!("  Removed:  {:>8}\n", delta.removed.len())),
            Print(format!("  Resident: {:>8}\n\n", store.len()))
        )?;
        Ok(())
    }

    fn render_map_section<T, F>(
        &self,
        stdout: &mut impl Write,
        store: &TileStore<T, F>,
        delta: &TileDelta<T>,
        window: &IndexRange,
    ) -> Result<()> {
        execute!(
            stdout,
            SetForegroundColor(Color::Cyan),
            Print(format!("MAP ({}):\n", window)),
            ResetColor
        )?;

        if window.width() > MAX_DRAWN_COLUMNS || window.height() > MAX_DRAWN_ROWS {
            execute!(
                stdout,
                Print(format!(
                    "  {} x {} cells, too large to draw\n\n",
                    window.width(),
                    window.height()
                ))
            )?;
            return Ok(());
        }

        for row in cell_rows(store, delta, window) {
            execute!(stdout, Print("  "))?;
            for state in row {
                execute!(stdout, SetForegroundColor(state.color()), Print(state.symbol()))?;
            }
            execute!(stdout, ResetColor, Print("\n"))?;
        }

        execute!(
            stdout,
            Print("\n  # resident  + added  - removed  . empty\n\n")
        )?;
        Ok(())
    }
}

impl Default for TerminalDisplay {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{config::GridConfig, geo::Region};

    fn symbols(rows: &[Vec<CellState>]) -> Vec<String> {
        rows.iter().map(|row| row.iter().map(CellState::symbol).collect()).collect()
    }

    #[test]
    fn test_cell_rows_mark_delta() {
        let mut config = GridConfig::with_tile_span(1.0);
        config.origin_lat = 0.5;
        config.origin_lon = 0.5;
        let mut store = TileStore::with_fn(&config, |_, _| Ok(())).unwrap();

        store.update(&Region::new(0.5, 1.5, 0.5, 2.5)).unwrap();
        let delta = store.update(&Region::new(0.5, 2.5, 0.5, 2.5)).unwrap();

        let window = IndexRange::new(GridIndex::new(0, -1), GridIndex::new(4, 1));
        let rows = cell_rows(&store, &delta, &window);

        assert_eq!(symbols(&rows), vec![".....", "-##+.", "....."]);
    }

    #[test]
    fn test_render_writes_summary() {
        let mut config = GridConfig::with_tile_span(1.0);
        config.origin_lat = 0.5;
        config.origin_lon = 0.5;
        let mut store = TileStore::with_fn(&config, |_, _| Ok(())).unwrap();
        let delta = store.update(&Region::new(0.5, 0.5, 0.5, 0.5)).unwrap();

        let mut out = Vec::new();
        let window = IndexRange::new(GridIndex::new(-1, -1), GridIndex::new(1, 1));
        TerminalDisplay::scrolling().render(&mut out, 3, &store, &delta, &window).unwrap();

        let text = String::from_utf8_lossy(&out);
        assert!(text.contains("Map Grid - Resident Tiles"));
        assert!(text.contains("step 3"));
        assert!(text.contains("Resident:        1"));
        assert!(text.contains("+"));
    }

    #[test]
    fn test_large_window_is_not_drawn() {
        let mut config = GridConfig::with_tile_span(1.0);
        config.origin_lat = 0.5;
        config.origin_lon = 0.5;
        let store = TileStore::with_fn(&config, |_, _| Ok(())).unwrap();
        let delta = TileDelta::default();

        let mut out = Vec::new();
        let window = IndexRange::new(GridIndex::new(0, 0), GridIndex::new(500, 1));
        TerminalDisplay::scrolling().render(&mut out, 0, &store, &delta, &window).unwrap();

        assert!(String::from_utf8_lossy(&out).contains("too large to draw"));
    }
}
