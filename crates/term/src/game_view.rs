//! GameView: draws a `GameSnapshot` into a framebuffer.
//!
//! Pure and deterministic, so layouts can be asserted in tests.

use crate::core::{default_color, ActiveSnapshot, GameSnapshot, PieceCatalog};
use crate::fb::{FrameBuffer, Glyph, Style};
use crate::types::{PieceName, Rgb};

const FIELD_BG: Rgb = Rgb::new(30, 30, 40);
const PANEL_WIDTH: u16 = 14;

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

/// Field, side panel and overlays for one game.
#[derive(Debug, Clone)]
pub struct GameView {
    /// Terminal columns per field cell
    cell_w: u16,
    /// Terminal rows per field cell
    cell_h: u16,
    palette: [Rgb; 7],
}

impl GameView {
    /// Colors come from `catalog`; names it lacks use their default color.
    pub fn new(catalog: &PieceCatalog) -> Self {
        let palette = PieceName::ALL.map(|name| catalog.color(name).unwrap_or(default_color(name)));
        // 2x1 keeps cells roughly square in most terminal fonts.
        Self {
            cell_w: 2,
            cell_h: 1,
            palette,
        }
    }

    pub fn with_cell_size(mut self, cell_w: u16, cell_h: u16) -> Self {
        self.cell_w = cell_w.max(1);
        self.cell_h = cell_h.max(1);
        self
    }

    pub fn color(&self, name: PieceName) -> Rgb {
        self.palette[name as usize]
    }

    /// Outer size of the bordered field.
    pub fn frame_size(&self, snap: &GameSnapshot) -> (u16, u16) {
        let w = clamp_u16(snap.width).saturating_mul(self.cell_w).saturating_add(2);
        let h = clamp_u16(snap.height).saturating_mul(self.cell_h).saturating_add(2);
        (w, h)
    }

    /// Render into an existing framebuffer, resizing it to `viewport`.
    pub fn render_into(&self, snap: &GameSnapshot, username: &str, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(Glyph::default());

        let (frame_w, frame_h) = self.frame_size(snap);
        let with_panel = viewport.width >= frame_w.saturating_add(PANEL_WIDTH + 2);
        let total_w = if with_panel { frame_w + PANEL_WIDTH + 2 } else { frame_w };
        let x0 = viewport.width.saturating_sub(total_w) / 2;
        let y0 = viewport.height.saturating_sub(frame_h) / 2;

        let field = Style::new(Rgb::new(90, 90, 100), FIELD_BG).dim();
        fb.fill_rect(x0 + 1, y0 + 1, frame_w - 2, frame_h - 2, ' ', field);
        fb.draw_box(x0, y0, frame_w, frame_h, Style::new(Rgb::new(200, 200, 200), Rgb::new(0, 0, 0)));

        // A field larger than u16 terminal space is clipped to what the frame holds.
        let cols = clamp_u16(snap.width).min((frame_w - 2) / self.cell_w);
        let rows = clamp_u16(snap.height).min((frame_h - 2) / self.cell_h);
        for cy in 0..rows {
            for cx in 0..cols {
                match snap.cell(usize::from(cy), usize::from(cx)) {
                    Some(name) => self.draw_block(fb, x0, y0, cx, cy, name),
                    None => self.fill_cell(fb, x0, y0, cx, cy, '·', field),
                }
            }
        }

        if let Some(active) = &snap.active {
            for (row, col) in active.cells() {
                // Cells still in the spawn buffer are not drawn.
                let (Ok(cy), Ok(cx)) = (u16::try_from(row), u16::try_from(col)) else {
                    continue;
                };
                if cy < rows && cx < cols {
                    self.draw_block(fb, x0, y0, cx, cy, active.name);
                }
            }
        }

        if with_panel {
            self.draw_panel(fb, snap, username, x0 + frame_w + 2, y0);
        }

        if snap.game_over {
            let text = "GAME OVER";
            let x = x0 + frame_w.saturating_sub(text.len() as u16) / 2;
            let style = Style::new(Rgb::new(255, 255, 255), Rgb::new(0, 0, 0)).bold();
            fb.put_str(x, y0.saturating_add(frame_h / 2), text, style);
        }
    }

    /// Allocate a framebuffer and render into it.
    pub fn render(&self, snap: &GameSnapshot, username: &str, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, username, viewport, &mut fb);
        fb
    }

    fn draw_panel(&self, fb: &mut FrameBuffer, snap: &GameSnapshot, username: &str, x: u16, y0: u16) {
        let label = Style::default().bold();
        let value = Style::new(Rgb::new(200, 200, 200), Rgb::new(0, 0, 0));

        let mut y = y0;
        fb.put_str(x, y, "USER", label);
        y += 1;
        let name: String = username.chars().take(PANEL_WIDTH as usize).collect();
        fb.put_str(x, y, &name, value);
        y += 2;

        fb.put_str(x, y, "SCORE", label);
        y += 1;
        fb.put_u64(x, y, snap.score, value);
        y += 2;

        fb.put_str(x, y, "LEVEL", label);
        y += 1;
        fb.put_u64(x, y, u64::from(snap.level), value);
        y += 2;

        fb.put_str(x, y, "NEXT", label);
        y += 1;
        self.draw_preview(fb, &snap.next, x, y);
    }

    /// Next piece drawn from its topmost occupied row.
    fn draw_preview(&self, fb: &mut FrameBuffer, next: &ActiveSnapshot, x: u16, y: u16) {
        let top = next.shape.occupied().map(|(r, _)| r).min().unwrap_or(0);
        let style = Style::new(self.color(next.name), Rgb::new(0, 0, 0)).bold();
        for (r, c) in next.shape.occupied() {
            let px = x + c as u16 * self.cell_w;
            let py = y + (r - top) as u16 * self.cell_h;
            fb.fill_rect(px, py, self.cell_w, self.cell_h, '█', style);
        }
    }

    fn draw_block(&self, fb: &mut FrameBuffer, x0: u16, y0: u16, col: u16, row: u16, name: PieceName) {
        let style = Style::new(self.color(name), FIELD_BG).bold();
        self.fill_cell(fb, x0, y0, col, row, '█', style);
    }

    fn fill_cell(&self, fb: &mut FrameBuffer, x0: u16, y0: u16, col: u16, row: u16, ch: char, style: Style) {
        let px = x0.saturating_add(1).saturating_add(col.saturating_mul(self.cell_w));
        let py = y0.saturating_add(1).saturating_add(row.saturating_mul(self.cell_h));
        fb.fill_rect(px, py, self.cell_w, self.cell_h, ch, style);
    }
}

fn clamp_u16(n: usize) -> u16 {
    u16::try_from(n).unwrap_or(u16::MAX)
}
