//! GameView: maps a session [`Snapshot`] into a terminal framebuffer.
//!
//! Pure, no I/O. Each field cell is `cell_w` x `cell_h` glyphs; the field's
//! own border cells double as the frame.

use crate::core::pieces;
use crate::core::Snapshot;
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::types::{Cell, PieceKind, Rotation, FIELD_HEIGHT, FIELD_WIDTH};

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

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorY {
    Center,
    Top,
}

const PLAY_BG: Rgb = Rgb::new(24, 24, 32);
const PANEL_BG: Rgb = Rgb::new(0, 0, 0);

/// Side panel needs at least this many columns to be drawn
const PANEL_MIN_WIDTH: u16 = 10;

pub struct GameView {
    cell_w: u16,
    cell_h: u16,
    anchor_y: AnchorY,
}

impl Default for GameView {
    fn default() -> Self {
        // 2x1 roughly squares typical terminal glyphs.
        Self::new(2, 1)
    }
}

impl GameView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
            cell_h: cell_h.max(1),
            anchor_y: AnchorY::Center,
        }
    }

    pub fn with_anchor_y(mut self, anchor_y: AnchorY) -> Self {
        self.anchor_y = anchor_y;
        self
    }

    /// Top-left corner of the field in viewport coordinates
    pub fn field_origin(&self, viewport: Viewport) -> (u16, u16) {
        let field_w = FIELD_WIDTH as u16 * self.cell_w;
        let field_h = FIELD_HEIGHT as u16 * self.cell_h;
        // Leave room for the side panel when centering.
        let total_w = field_w + 2 + PANEL_MIN_WIDTH;
        let x = viewport.width.saturating_sub(total_w) / 2;
        let y = match self.anchor_y {
            AnchorY::Center => viewport.height.saturating_sub(field_h) / 2,
            AnchorY::Top => 0,
        };
        (x, y)
    }

    /// Render into an existing framebuffer, resizing it to the viewport.
    pub fn render_into(&self, snap: &Snapshot, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::new(Rgb::new(220, 220, 220), PANEL_BG).glyph(' '));

        let origin = self.field_origin(viewport);

        for (y, row) in snap.field.iter().enumerate() {
            for (x, &code) in row.iter().enumerate() {
                let cell = Cell::from_code(code).unwrap_or(Cell::Empty);
                self.draw_field_cell(fb, origin, x as u16, y as u16, cell);
            }
        }

        if let Some(active) = snap.active {
            for (x, y) in active.field_cells() {
                if x >= 0 && y >= 0 && x < FIELD_WIDTH as i8 && y < FIELD_HEIGHT as i8 {
                    self.draw_block(fb, origin, x as u16, y as u16, active.kind);
                }
            }
        }

        self.draw_side_panel(fb, snap, viewport, origin);

        if snap.game_over {
            self.draw_overlay_text(fb, origin, "GAME OVER");
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &Snapshot, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, viewport, &mut fb);
        fb
    }

    fn draw_field_cell(
        &self,
        fb: &mut FrameBuffer,
        origin: (u16, u16),
        x: u16,
        y: u16,
        cell: Cell,
    ) {
        match cell {
            Cell::Empty => {
                let style = CellStyle::new(Rgb::new(70, 70, 80), PLAY_BG).dim();
                self.fill_cell(fb, origin, x, y, '·', style);
            }
            Cell::Border => {
                let style = CellStyle::new(Rgb::new(120, 120, 130), Rgb::new(60, 60, 70));
                self.fill_cell(fb, origin, x, y, '▒', style);
            }
            Cell::Line => {
                let style = CellStyle::new(Rgb::new(255, 255, 255), PLAY_BG).bold();
                self.fill_cell(fb, origin, x, y, '=', style);
            }
            Cell::Block(kind) => self.draw_block(fb, origin, x, y, kind),
        }
    }

    fn draw_block(
        &self,
        fb: &mut FrameBuffer,
        origin: (u16, u16),
        x: u16,
        y: u16,
        kind: PieceKind,
    ) {
        let style = CellStyle::new(piece_color(kind), PLAY_BG).bold();
        self.fill_cell(fb, origin, x, y, '█', style);
    }

    fn fill_cell(
        &self,
        fb: &mut FrameBuffer,
        origin: (u16, u16),
        x: u16,
        y: u16,
        ch: char,
        style: CellStyle,
    ) {
        let px = origin.0 + x * self.cell_w;
        let py = origin.1 + y * self.cell_h;
        fb.fill_rect(px, py, self.cell_w, self.cell_h, ch, style);
    }

    fn draw_side_panel(
        &self,
        fb: &mut FrameBuffer,
        snap: &Snapshot,
        viewport: Viewport,
        origin: (u16, u16),
    ) {
        let panel_x = origin.0 + FIELD_WIDTH as u16 * self.cell_w + 2;
        if panel_x >= viewport.width || viewport.width - panel_x < PANEL_MIN_WIDTH {
            return;
        }

        let label = CellStyle::new(Rgb::new(220, 220, 220), PANEL_BG).bold();
        let value = CellStyle::new(Rgb::new(200, 200, 200), PANEL_BG);

        let mut y = origin.1;
        fb.put_str(panel_x, y, "SCORE", label);
        fb.put_u32(panel_x, y + 1, snap.score, value);
        y += 3;

        fb.put_str(panel_x, y, "SPEED", label);
        fb.put_u32(panel_x, y + 1, snap.level, value);
        y += 3;

        fb.put_str(panel_x, y, "PIECES", label);
        fb.put_u32(panel_x, y + 1, snap.piece_count, value);
        y += 3;

        fb.put_str(panel_x, y, "HOLD", label);
        y += 1;
        match snap.hold {
            Some(kind) => {
                fb.put_str(panel_x + 5, y - 1, kind.as_str(), value);
                let style = CellStyle::new(piece_color(kind), PANEL_BG).bold();
                for (dx, dy) in pieces::cells(kind, Rotation::North) {
                    let px = panel_x + dx as u16 * self.cell_w;
                    let py = y + dy as u16 * self.cell_h;
                    fb.fill_rect(px, py, self.cell_w, self.cell_h, '█', style);
                }
            }
            None => fb.put_str(panel_x, y, "-", value),
        }
    }

    fn draw_overlay_text(&self, fb: &mut FrameBuffer, origin: (u16, u16), text: &str) {
        let field_w = FIELD_WIDTH as u16 * self.cell_w;
        let field_h = FIELD_HEIGHT as u16 * self.cell_h;
        let text_w = text.chars().count() as u16;
        let x = origin.0 + field_w.saturating_sub(text_w) / 2;
        let y = origin.1 + field_h / 2;
        let style = CellStyle::new(Rgb::new(255, 255, 255), Rgb::new(140, 20, 20)).bold();
        fb.put_str(x, y, text, style);
    }
}

fn piece_color(kind: PieceKind) -> Rgb {
    match kind {
        PieceKind::I => Rgb::new(80, 220, 220),
        PieceKind::T => Rgb::new(200, 120, 220),
        PieceKind::O => Rgb::new(240, 220, 80),
        PieceKind::Z => Rgb::new(220, 80, 80),
        PieceKind::S => Rgb::new(100, 220, 120),
        PieceKind::L => Rgb::new(255, 165, 0),
        PieceKind::J => Rgb::new(80, 120, 220),
    }
}
