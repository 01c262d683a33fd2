//! Crossterm presenter
//!
//! Draws the 600x600 canvas as a 60x12 cell grid (10 px per column, one lane
//! per row) with a status line above and a banner line below. Frames are
//! double-buffered and only changed cells are written.

use std::io::{self, Write};

use crossterm::{
    cursor, execute, queue,
    style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    terminal::{
        self, BeginSynchronizedUpdate, DisableLineWrap, EnableLineWrap, EndSynchronizedUpdate,
        EnterAlternateScreen, LeaveAlternateScreen,
    },
};
use glam::Vec2;

use crate::consts::{CANVAS_SIZE, ROW_HEIGHT};
use crate::sim::{Band, Category, GameState, Shape};
use crate::view::{Hud, Presenter, SceneGraph};

/// Canvas pixels per terminal column
pub const PX_PER_COL: f32 = 10.0;
/// Playfield size in cells
pub const FIELD_COLS: u16 = (CANVAS_SIZE / PX_PER_COL) as u16;
pub const FIELD_ROWS: u16 = (CANVAS_SIZE / ROW_HEIGHT) as u16;
/// Status line above, banner line below
const HUD_ROWS: u16 = 1;
const FOOTER_ROWS: u16 = 1;

/// Smallest terminal that fits the whole playfield
pub const MIN_TERM_W: u16 = FIELD_COLS;
pub const MIN_TERM_H: u16 = FIELD_ROWS + HUD_ROWS + FOOTER_ROWS;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct FrameCell {
    pub ch: char,
    pub fg: Color,
    pub bg: Color,
}

const BLANK: FrameCell = FrameCell {
    ch: ' ',
    fg: Color::White,
    bg: Color::Black,
};

const GOAL_BG: Color = Color::Rgb { r: 7, g: 14, b: 12 };
const RIVER_BG: Color = Color::Rgb { r: 7, g: 12, b: 20 };
const ROAD_BG: Color = Color::Rgb { r: 10, g: 10, b: 14 };
const START_BG: Color = Color::Rgb { r: 10, g: 16, b: 10 };
const HUD_FG: Color = Color::Rgb {
    r: 160,
    g: 255,
    b: 210,
};
const CAR_FG: Color = Color::Rgb {
    r: 255,
    g: 160,
    b: 90,
};
const LOG_FG: Color = Color::Rgb {
    r: 170,
    g: 120,
    b: 70,
};
const MEDAL_FG: Color = Color::Rgb {
    r: 255,
    g: 220,
    b: 80,
};
const FROG_FG: Color = Color::Rgb {
    r: 180,
    g: 255,
    b: 120,
};
const PARKED_FG: Color = Color::Rgb {
    r: 90,
    g: 160,
    b: 70,
};

/// Playfield cell a canvas position falls in, wrapping horizontally
pub fn cell_of(pos: Vec2) -> (u16, u16) {
    let col = ((pos.x / PX_PER_COL).floor() as i32).rem_euclid(FIELD_COLS as i32);
    let row = ((pos.y / ROW_HEIGHT).floor() as i32).clamp(0, FIELD_ROWS as i32 - 1);
    (col as u16, row as u16)
}

/// Background colour of a playfield row
fn row_bg(row: u16) -> Color {
    if row == FIELD_ROWS - 1 {
        return START_BG;
    }
    let mid_y = row as f32 * ROW_HEIGHT + ROW_HEIGHT / 2.0;
    match Band::of(Vec2::new(0.0, mid_y)) {
        Band::Road => ROAD_BG,
        Band::River => RIVER_BG,
        Band::Safe => GOAL_BG,
    }
}

/// Terminal front-end implementing [`Presenter`]
pub struct TerminalPresenter<W: Write> {
    out: W,
    w: u16,
    h: u16,
    origin_x: u16,
    prev: Vec<FrameCell>,
    cur: Vec<FrameCell>,
    scene: SceneGraph,
    session_best: Option<u32>,
}

impl<W: Write> TerminalPresenter<W> {
    pub fn new(out: W, w: u16, h: u16) -> Self {
        let mut presenter = Self {
            out,
            w: 0,
            h: 0,
            origin_x: 0,
            prev: Vec::new(),
            cur: Vec::new(),
            scene: SceneGraph::new(),
            session_best: None,
        };
        presenter.resize(w, h);
        presenter
    }

    /// Reallocate buffers; the next frame repaints everything
    pub fn resize(&mut self, w: u16, h: u16) {
        self.w = w;
        self.h = h;
        self.origin_x = w.saturating_sub(FIELD_COLS) / 2;
        // Previous frame differs from any real cell so the first flush is full
        let stale = FrameCell {
            ch: '\0',
            ..BLANK
        };
        self.prev = vec![stale; (w as usize) * (h as usize)];
        self.cur = vec![BLANK; (w as usize) * (h as usize)];
    }

    /// Best score across finished runs, shown on the status line
    pub fn set_session_best(&mut self, best: Option<u32>) {
        self.session_best = best;
    }

    pub fn fits(&self) -> bool {
        self.w >= MIN_TERM_W && self.h >= MIN_TERM_H
    }

    /// Cell of the current frame (screen coordinates)
    pub fn cell(&self, x: u16, y: u16) -> Option<FrameCell> {
        if x >= self.w || y >= self.h {
            return None;
        }
        Some(self.cur[(y as usize) * (self.w as usize) + (x as usize)])
    }

    fn put(&mut self, x: u16, y: u16, ch: char, fg: Color, bg: Color) {
        if x >= self.w || y >= self.h {
            return;
        }
        let i = (y as usize) * (self.w as usize) + (x as usize);
        self.cur[i] = FrameCell { ch, fg, bg };
    }

    fn put_str(&mut self, x: u16, y: u16, s: &str, fg: Color, bg: Color) {
        let mut xx = x;
        for ch in s.chars() {
            if xx >= self.w {
                break;
            }
            self.put(xx, y, ch, fg, bg);
            xx += 1;
        }
    }

    /// Draw a glyph onto the playfield, keeping the lane background
    fn put_field(&mut self, col: u16, row: u16, ch: char, fg: Color) {
        let x = self.origin_x + col % FIELD_COLS;
        let y = HUD_ROWS + row;
        self.put(x, y, ch, fg, row_bg(row));
    }

    /// Build the next frame into the back buffer
    pub fn compose(&mut self, state: &GameState) {
        self.scene.update(state);
        for c in &mut self.cur {
            *c = BLANK;
        }

        if !self.fits() {
            self.put_str(0, 0, "Terminal too small. Try at least 60x14.", HUD_FG, Color::Black);
            return;
        }

        for row in 0..FIELD_ROWS {
            for col in 0..FIELD_COLS {
                self.put_field(col, row, ' ', Color::White);
            }
        }

        let mut glyphs = Vec::new();
        for category in [Category::Platform, Category::Obstacle] {
            for (_, node) in self.scene.nodes_of(category) {
                if let Shape::Rect { width, .. } = node.shape {
                    let (col, row) = cell_of(node.pos);
                    let span = (width / PX_PER_COL).round().max(1.0) as u16;
                    let (ch, fg) = match category {
                        Category::Platform => ('=', LOG_FG),
                        _ => ('#', CAR_FG),
                    };
                    for dx in 0..span {
                        glyphs.push((col + dx, row, ch, fg));
                    }
                }
            }
        }
        for (_, node) in self.scene.nodes_of(Category::GoalMarker) {
            let (col, row) = cell_of(node.pos);
            glyphs.push((col, row, '*', MEDAL_FG));
        }
        for (id, node) in self.scene.visible_tokens(state) {
            let (col, row) = cell_of(node.pos);
            let fg = if id == state.token.id {
                FROG_FG
            } else {
                PARKED_FG
            };
            glyphs.push((col, row, '@', fg));
        }
        for (col, row, ch, fg) in glyphs {
            self.put_field(col, row, ch, fg);
        }

        let hud = Hud::from_state(state, self.session_best);
        self.put_str(self.origin_x, 0, &hud.line(), HUD_FG, Color::Black);

        let footer_y = HUD_ROWS + FIELD_ROWS;
        if hud.game_over {
            let banner = "GAME OVER - Enter to restart";
            let x = self.origin_x + FIELD_COLS.saturating_sub(banner.len() as u16) / 2;
            self.put_str(x, footer_y, banner, Color::Black, Color::Red);
        } else {
            self.put_str(
                self.origin_x,
                footer_y,
                "arrows: hop  enter: restart  q: quit",
                HUD_FG,
                Color::Black,
            );
        }
    }

    /// Write changed cells to the terminal
    pub fn flush_diff(&mut self) -> io::Result<()> {
        queue!(self.out, BeginSynchronizedUpdate)?;
        let mut cur_fg = None::<Color>;
        let mut cur_bg = None::<Color>;

        for y in 0..self.h {
            let row_off = (y as usize) * (self.w as usize);
            for x in 0..self.w {
                let i = row_off + (x as usize);
                let a = self.cur[i];
                if a == self.prev[i] {
                    continue;
                }
                queue!(self.out, cursor::MoveTo(x, y))?;
                if cur_fg != Some(a.fg) {
                    queue!(self.out, SetForegroundColor(a.fg))?;
                    cur_fg = Some(a.fg);
                }
                if cur_bg != Some(a.bg) {
                    queue!(self.out, SetBackgroundColor(a.bg))?;
                    cur_bg = Some(a.bg);
                }
                queue!(self.out, Print(a.ch))?;
            }
        }

        queue!(self.out, ResetColor, EndSynchronizedUpdate)?;
        self.out.flush()?;
        self.prev.copy_from_slice(&self.cur);
        Ok(())
    }
}

impl<W: Write> Presenter for TerminalPresenter<W> {
    fn present(&mut self, state: &GameState) -> io::Result<()> {
        self.compose(state);
        self.flush_diff()
    }
}

/// Switch the terminal into raw, full-screen mode
pub fn enter<W: Write>(out: &mut W) -> io::Result<()> {
    terminal::enable_raw_mode()?;
    execute!(
        out,
        EnterAlternateScreen,
        cursor::Hide,
        DisableLineWrap,
        terminal::Clear(terminal::ClearType::All)
    )
}

/// Restore the terminal; errors are ignored so cleanup always runs to the end
pub fn leave<W: Write>(out: &mut W) {
    let _ = execute!(
        out,
        EnableLineWrap,
        cursor::Show,
        LeaveAlternateScreen,
        ResetColor
    );
    let _ = terminal::disable_raw_mode();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::Entity;

    fn presenter() -> TerminalPresenter<Vec<u8>> {
        TerminalPresenter::new(Vec::new(), MIN_TERM_W, MIN_TERM_H)
    }

    fn field_cell(p: &TerminalPresenter<Vec<u8>>, pos: Vec2) -> FrameCell {
        let (col, row) = cell_of(pos);
        p.cell(p.origin_x + col, HUD_ROWS + row).unwrap()
    }

    #[test]
    fn test_cell_mapping() {
        assert_eq!(cell_of(Vec2::new(300.0, 575.0)), (30, 11));
        assert_eq!(cell_of(Vec2::new(100.0, 75.0)), (10, 1));
        assert_eq!(cell_of(Vec2::new(599.9, 0.0)), (59, 0));
        // Traffic placed past the right edge before its first tick
        assert_eq!(cell_of(Vec2::new(800.0, 350.0)), (20, 7));
    }

    #[test]
    fn test_grid_size() {
        assert_eq!(FIELD_COLS, 60);
        assert_eq!(FIELD_ROWS, 12);
    }

    #[test]
    fn test_compose_initial_frame() {
        let mut p = presenter();
        let state = GameState::initial();
        p.compose(&state);

        let frog = field_cell(&p, state.token.pos);
        assert_eq!(frog.ch, '@');
        assert_eq!(frog.fg, FROG_FG);
        assert_eq!(frog.bg, START_BG);

        let medal = &state.goal_markers[0];
        assert_eq!(field_cell(&p, medal.pos).ch, '*');

        let car = state.obstacles.last().unwrap();
        let cell = field_cell(&p, car.pos);
        assert_eq!(cell.ch, '#');
        assert_eq!(cell.bg, ROAD_BG);

        let log = state.platforms.last().unwrap();
        let cell = field_cell(&p, log.pos);
        assert_eq!(cell.ch, '=');
        assert_eq!(cell.bg, RIVER_BG);

        let status: String = (0..MIN_TERM_W)
            .filter_map(|x| p.cell(x, 0))
            .map(|c| c.ch)
            .collect();
        assert!(status.starts_with("Moves 0  Score 0  High 0"));
    }

    #[test]
    fn test_parked_token_drawn_on_goal() {
        let mut p = presenter();
        let mut state = GameState::initial();
        state.token = state.token.with_pos(Vec2::new(300.0, 75.0));
        p.compose(&state);

        state.token = Entity::token(1);
        state.goals_captured = 1;
        p.compose(&state);

        let parked = field_cell(&p, Vec2::new(300.0, 75.0));
        assert_eq!(parked.ch, '@');
        assert_eq!(parked.fg, PARKED_FG);
        assert_eq!(field_cell(&p, Vec2::new(300.0, 575.0)).fg, FROG_FG);
    }

    #[test]
    fn test_game_over_banner() {
        let mut p = presenter();
        let state = GameState {
            is_game_over: true,
            ..GameState::initial()
        };
        p.compose(&state);
        let footer: String = (0..MIN_TERM_W)
            .filter_map(|x| p.cell(x, MIN_TERM_H - 1))
            .map(|c| c.ch)
            .collect();
        assert!(footer.contains("GAME OVER"));
    }

    #[test]
    fn test_flush_writes_only_changes() {
        let mut p = presenter();
        let state = GameState::initial();
        p.present(&state).unwrap();
        let first = p.out.len();
        assert!(first > 0);

        p.out.clear();
        p.present(&state).unwrap();
        let second = p.out.len();
        assert!(second < first);
    }

    #[test]
    fn test_too_small() {
        let mut p = TerminalPresenter::new(Vec::new(), 40, 10);
        assert!(!p.fits());
        p.compose(&GameState::initial());
        assert_eq!(p.cell(0, 0).map(|c| c.ch), Some('T'));
    }
}
