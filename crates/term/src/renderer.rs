//! TerminalRenderer: writes framebuffers to the real terminal.
//!
//! The first frame is drawn in full. After that only runs of glyphs that
//! differ from the previous frame are re-emitted.

use std::io::{self, Write};

use anyhow::Result;
use crossterm::{
    cursor,
    style::{
        Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor,
    },
    terminal, QueueableCommand,
};

use crate::fb::{FrameBuffer, Style};
use crate::types::Rgb;

pub struct TerminalRenderer {
    out: io::Stdout,
    /// What the terminal currently shows; `None` forces a full redraw
    shown: Option<FrameBuffer>,
    scratch: Vec<u8>,
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl TerminalRenderer {
    pub fn new() -> Self {
        Self {
            out: io::stdout(),
            shown: None,
            scratch: Vec::with_capacity(32 * 1024),
        }
    }

    /// Raw mode, alternate screen, hidden cursor.
    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        self.scratch.clear();
        self.scratch.queue(terminal::EnterAlternateScreen)?;
        self.scratch.queue(cursor::Hide)?;
        self.scratch.queue(terminal::DisableLineWrap)?;
        self.flush()
    }

    /// Undo [`TerminalRenderer::enter`].
    pub fn exit(&mut self) -> Result<()> {
        self.scratch.clear();
        self.scratch.queue(ResetColor)?;
        self.scratch.queue(SetAttribute(Attribute::Reset))?;
        self.scratch.queue(terminal::EnableLineWrap)?;
        self.scratch.queue(cursor::Show)?;
        self.scratch.queue(terminal::LeaveAlternateScreen)?;
        self.flush()?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    /// Redraw everything on the next frame (after a resize, say).
    pub fn invalidate(&mut self) {
        self.shown = None;
    }

    /// Present `frame` and take ownership of its contents.
    ///
    /// `frame` is swapped with the previously shown buffer, so the caller can
    /// draw the next frame into it without allocating.
    pub fn present(&mut self, frame: &mut FrameBuffer) -> Result<()> {
        self.scratch.clear();
        match self.shown.as_ref() {
            Some(prev) if prev.width() == frame.width() && prev.height() == frame.height() => {
                encode_diff(prev, frame, &mut self.scratch)?;
            }
            _ => encode_full(frame, &mut self.scratch)?,
        }
        self.flush()?;

        let same_size = self
            .shown
            .as_ref()
            .is_some_and(|prev| prev.width() == frame.width() && prev.height() == frame.height());
        if !same_size {
            self.shown = Some(FrameBuffer::new(frame.width(), frame.height()));
        }

        if let Some(prev) = self.shown.as_mut() {
            std::mem::swap(prev, frame);
        }
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        self.out.write_all(&self.scratch)?;
        self.out.flush()?;
        Ok(())
    }
}

/// Encode a full redraw of `frame` into `out`.
pub fn encode_full(frame: &FrameBuffer, out: &mut Vec<u8>) -> Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;
    let mut style = None;
    for y in 0..frame.height() {
        out.queue(cursor::MoveTo(0, y))?;
        emit_run(frame, 0, y, frame.width(), &mut style, out)?;
    }
    finish(out)
}

/// Encode only the glyphs of `next` that differ from `prev`.
///
/// Both buffers must have the same dimensions.
pub fn encode_diff(prev: &FrameBuffer, next: &FrameBuffer, out: &mut Vec<u8>) -> Result<()> {
    let mut style = None;
    for (x, y, len) in changed_runs(prev, next) {
        out.queue(cursor::MoveTo(x, y))?;
        emit_run(next, x, y, len, &mut style, out)?;
    }
    finish(out)
}

fn emit_run(
    frame: &FrameBuffer,
    x: u16,
    y: u16,
    len: u16,
    current: &mut Option<Style>,
    out: &mut Vec<u8>,
) -> Result<()> {
    for dx in 0..len {
        let glyph = frame.get(x + dx, y).unwrap_or_default();
        if *current != Some(glyph.style) {
            apply_style(glyph.style, out)?;
            *current = Some(glyph.style);
        }
        out.queue(Print(glyph.ch))?;
    }
    Ok(())
}

fn finish(out: &mut Vec<u8>) -> Result<()> {
    out.queue(ResetColor)?;
    out.queue(SetAttribute(Attribute::Reset))?;
    Ok(())
}

fn apply_style(style: Style, out: &mut Vec<u8>) -> Result<()> {
    out.queue(SetAttribute(Attribute::Reset))?;
    out.queue(SetForegroundColor(to_color(style.fg)))?;
    out.queue(SetBackgroundColor(to_color(style.bg)))?;
    if style.bold {
        out.queue(SetAttribute(Attribute::Bold))?;
    }
    if style.dim {
        out.queue(SetAttribute(Attribute::Dim))?;
    }
    Ok(())
}

fn to_color(rgb: Rgb) -> Color {
    Color::Rgb {
        r: rgb.r,
        g: rgb.g,
        b: rgb.b,
    }
}

/// Horizontal runs `(x, y, len)` where the two frames differ.
fn changed_runs(prev: &FrameBuffer, next: &FrameBuffer) -> Vec<(u16, u16, u16)> {
    let mut runs = Vec::new();
    for y in 0..next.height() {
        let mut start = None;
        for x in 0..=next.width() {
            let differs = x < next.width() && prev.get(x, y) != next.get(x, y);
            match (start, differs) {
                (None, true) => start = Some(x),
                (Some(s), false) => {
                    runs.push((s, y, x - s));
                    start = None;
                }
                _ => {}
            }
        }
    }
    runs
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fb::Glyph;

    #[test]
    fn adjacent_changes_coalesce() {
        let prev = FrameBuffer::new(6, 2);
        let mut next = FrameBuffer::new(6, 2);
        for x in 1..=3 {
            next.set(x, 0, Glyph::new('X', Style::default()));
        }
        next.set(5, 1, Glyph::new('Y', Style::default()));

        assert_eq!(changed_runs(&prev, &next), vec![(1, 0, 3), (5, 1, 1)]);
    }

    #[test]
    fn style_change_counts_as_difference() {
        let prev = FrameBuffer::new(2, 1);
        let mut next = FrameBuffer::new(2, 1);
        next.set(0, 0, Glyph::new(' ', Style::default().bold()));
        assert_eq!(changed_runs(&prev, &next), vec![(0, 0, 1)]);
    }

    #[test]
    fn identical_frames_encode_no_glyphs() {
        let a = FrameBuffer::new(4, 4);
        let mut out = Vec::new();
        encode_diff(&a, &a.clone(), &mut out).unwrap();

        let mut reset_only = Vec::new();
        finish(&mut reset_only).unwrap();
        assert_eq!(out, reset_only);
    }

    #[test]
    fn full_encode_contains_text() {
        let mut fb = FrameBuffer::new(5, 1);
        fb.put_str(0, 0, "SCORE", Style::default());
        let mut out = Vec::new();
        encode_full(&fb, &mut out).unwrap();
        let text = String::from_utf8_lossy(&out);
        assert!(text.contains('S') && text.contains('E'));
    }
}
