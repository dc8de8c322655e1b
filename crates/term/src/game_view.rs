//! GameView: draws a [`GameSnapshot`] into a framebuffer.
//!
//! Pure (no I/O). The snapshot board already carries the falling piece, so
//! the view never looks at the authoritative game state.
//!
//! Layout, left to right: the bordered well, then a side panel with score,
//! cleared lines and the upcoming pieces. A status line sits under the well.

use crate::core::{GameSnapshot, Shape};
use crate::fb::{FrameBuffer, Glyph, GlyphStyle, Rgb};
use crate::types::{PieceKind, BOARD_HEIGHT, BOARD_WIDTH};

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

const WELL_BG: Rgb = Rgb::new(30, 30, 40);
const SCREEN_BG: Rgb = Rgb::new(0, 0, 0);

const BORDER: GlyphStyle = GlyphStyle::new(Rgb::new(200, 200, 200), SCREEN_BG);
const EMPTY: GlyphStyle = GlyphStyle::new(Rgb::new(90, 90, 100), WELL_BG).dim();
const LABEL: GlyphStyle = GlyphStyle::new(Rgb::new(220, 220, 220), SCREEN_BG).bold();
const VALUE: GlyphStyle = GlyphStyle::new(Rgb::new(200, 200, 200), SCREEN_BG);
const BANNER: GlyphStyle = GlyphStyle::new(Rgb::new(255, 255, 255), SCREEN_BG).bold();

pub const STATUS_IDLE: &str = "ENTER to start";
pub const STATUS_PAUSED: &str = "PAUSED";
pub const STATUS_GAME_OVER: &str = "GAME OVER";

/// Block color per piece kind
pub fn piece_color(kind: PieceKind) -> Rgb {
    match kind {
        PieceKind::I => Rgb::new(80, 220, 220),
        PieceKind::O => Rgb::new(240, 220, 80),
        PieceKind::T => Rgb::new(200, 120, 220),
        PieceKind::S => Rgb::new(100, 220, 120),
        PieceKind::Z => Rgb::new(220, 80, 80),
        PieceKind::J => Rgb::new(80, 120, 220),
        PieceKind::L => Rgb::new(255, 165, 0),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameView {
    /// Terminal columns per board cell
    cell_w: u16,
}

impl Default for GameView {
    fn default() -> Self {
        // Two columns per cell keeps blocks roughly square.
        Self { cell_w: 2 }
    }
}

impl GameView {
    pub fn new(cell_w: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
        }
    }

    /// Outer size of the bordered well
    pub fn well_size(&self) -> (u16, u16) {
        (
            BOARD_WIDTH as u16 * self.cell_w + 2,
            BOARD_HEIGHT as u16 + 2,
        )
    }

    /// Render into a reused framebuffer, resizing it to the viewport.
    pub fn render_into(&self, snap: &GameSnapshot, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(Glyph::default());

        let (frame_w, frame_h) = self.well_size();
        // Center the well and its status line.
        let origin_x = viewport.width.saturating_sub(frame_w) / 2;
        let origin_y = viewport.height.saturating_sub(frame_h + 1) / 2;

        self.draw_border(fb, origin_x, origin_y, frame_w, frame_h);

        for (row, cells) in snap.board.iter().enumerate() {
            for (column, cell) in cells.iter().enumerate() {
                let x = origin_x + 1 + column as u16 * self.cell_w;
                let y = origin_y + 1 + row as u16;
                match cell {
                    Some(kind) => self.draw_block(fb, x, y, *kind),
                    None => {
                        fb.fill_rect(x, y, self.cell_w, 1, ' ', EMPTY);
                        fb.put_char(x, y, '·', EMPTY);
                    }
                }
            }
        }

        self.draw_panel(fb, snap, origin_x + frame_w + 2, origin_y);

        if let Some(status) = status_text(snap) {
            let text_w = status.chars().count() as u16;
            let x = origin_x + frame_w.saturating_sub(text_w) / 2;
            fb.put_str(x, origin_y + frame_h, status, BANNER);
        }
    }

    /// Allocating convenience wrapper around [`GameView::render_into`]
    pub fn render(&self, snap: &GameSnapshot, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, viewport, &mut fb);
        fb
    }

    fn draw_border(&self, fb: &mut FrameBuffer, x: u16, y: u16, w: u16, h: u16) {
        let right = x + w - 1;
        let bottom = y + h - 1;

        fb.put_char(x, y, '┌', BORDER);
        fb.put_char(right, y, '┐', BORDER);
        fb.put_char(x, bottom, '└', BORDER);
        fb.put_char(right, bottom, '┘', BORDER);
        for dx in x + 1..right {
            fb.put_char(dx, y, '─', BORDER);
            fb.put_char(dx, bottom, '─', BORDER);
        }
        for dy in y + 1..bottom {
            fb.put_char(x, dy, '│', BORDER);
            fb.put_char(right, dy, '│', BORDER);
        }
    }

    fn draw_block(&self, fb: &mut FrameBuffer, x: u16, y: u16, kind: PieceKind) {
        let style = GlyphStyle::new(piece_color(kind), WELL_BG).bold();
        fb.fill_rect(x, y, self.cell_w, 1, '█', style);
    }

    fn draw_panel(&self, fb: &mut FrameBuffer, snap: &GameSnapshot, x: u16, y: u16) {
        if x >= fb.width() {
            return;
        }

        fb.put_str(x, y, "SCORE", LABEL);
        fb.put_u32(x, y + 1, snap.score, VALUE);

        fb.put_str(x, y + 3, "LINES", LABEL);
        fb.put_u32(x, y + 4, snap.lines, VALUE);

        fb.put_str(x, y + 6, "NEXT", LABEL);
        let mut py = y + 7;
        for kind in snap.upcoming {
            self.draw_preview(fb, x, py, kind);
            py += 3;
        }
    }

    /// Spawn orientation, trimmed to its occupied rows (at most two)
    fn draw_preview(&self, fb: &mut FrameBuffer, x: u16, y: u16, kind: PieceKind) {
        let shape = Shape::of(kind);
        let top = shape.cells().map(|(r, _)| r).min().unwrap_or(0);
        for (r, c) in shape.cells() {
            let px = x + c as u16 * self.cell_w;
            let py = y + (r - top) as u16;
            self.draw_block(fb, px, py, kind);
        }
    }
}

/// Status line for a snapshot; `None` while playing
pub fn status_text(snap: &GameSnapshot) -> Option<&'static str> {
    if snap.paused {
        Some(STATUS_PAUSED)
    } else if snap.playing {
        None
    } else if snap.game_over {
        Some(STATUS_GAME_OVER)
    } else {
        Some(STATUS_IDLE)
    }
}
