//! Terminal rasterizer
//!
//! World space is scaled onto a half-block pixel grid: every terminal cell
//! shows two stacked pixels using '▀' with separate fg/bg colors. Text (score,
//! overlays) is printed on top after the pixels.

use std::io::{self, Write};

use crossterm::{
    cursor, queue,
    style::{self, Color},
};
use glam::IVec2;

use super::{DrawCommand, Frame, Overlay};
use crate::consts::*;
use crate::sim::PipeKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    fn color(self) -> Color {
        Color::Rgb {
            r: self.0,
            g: self.1,
            b: self.2,
        }
    }
}

// ── Colors ──────────────────────────────────────────────────────────────────

pub const SKY: Rgb = Rgb(28, 30, 58);
pub const SKYLINE: Rgb = Rgb(44, 46, 84);
pub const GROUND: Rgb = Rgb(92, 64, 51);
pub const GROUND_TOP: Rgb = Rgb(84, 168, 55);
pub const PIPE: Rgb = Rgb(100, 170, 40);
pub const PIPE_CAP: Rgb = Rgb(60, 100, 20);
pub const GHOST: Rgb = Rgb(235, 235, 245);
pub const GHOST_WING: Rgb = Rgb(190, 190, 215);
pub const GHOST_EYE: Rgb = Rgb(20, 20, 20);
const TEXT: Color = Color::White;
const TEXT_ACCENT: Color = Color::Yellow;

// ── Pixel buffer ────────────────────────────────────────────────────────────

/// Pixel grid, `h` is twice the terminal row count
#[derive(Debug, Clone)]
pub struct PixelBuf {
    w: usize,
    h: usize,
    px: Vec<Rgb>,
}

impl PixelBuf {
    pub fn new(w: usize, h: usize) -> Self {
        Self {
            w,
            h,
            px: vec![SKY; w * h],
        }
    }

    fn resize(&mut self, w: usize, h: usize) {
        self.w = w;
        self.h = h;
        self.px.resize(w * h, SKY);
    }

    fn set(&mut self, x: i32, y: i32, c: Rgb) {
        if x >= 0 && y >= 0 && (x as usize) < self.w && (y as usize) < self.h {
            self.px[y as usize * self.w + x as usize] = c;
        }
    }

    pub fn get(&self, x: usize, y: usize) -> Rgb {
        self.px[y * self.w + x]
    }

    fn fill_rect(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, c: Rgb) {
        let (x0, x1) = (x0.max(0), x1.min(self.w as i32));
        let (y0, y1) = (y0.max(0), y1.min(self.h as i32));
        for y in y0..y1 {
            for x in x0..x1 {
                self.set(x, y, c);
            }
        }
    }

    fn render(&self, out: &mut impl Write) -> io::Result<()> {
        queue!(out, cursor::MoveTo(0, 0))?;
        let rows = self.h / 2;
        for row in 0..rows {
            queue!(out, cursor::MoveTo(0, row as u16))?;
            let mut prev: Option<(Rgb, Rgb)> = None;
            for col in 0..self.w {
                let top = self.get(col, row * 2);
                let bot = self.get(col, row * 2 + 1);
                if prev != Some((top, bot)) {
                    queue!(
                        out,
                        style::SetForegroundColor(top.color()),
                        style::SetBackgroundColor(bot.color())
                    )?;
                    prev = Some((top, bot));
                }
                queue!(out, style::Print('\u{2580}'))?; // ▀
            }
        }
        queue!(out, style::ResetColor)
    }
}

/// A line of text in cell coordinates
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Label {
    pub col: u16,
    pub row: u16,
    pub text: String,
    pub color: Color,
}

/// Rasterizes frames onto a terminal-sized grid
#[derive(Debug, Clone)]
pub struct TerminalRenderer {
    cols: u16,
    rows: u16,
    buf: PixelBuf,
    labels: Vec<Label>,
}

impl TerminalRenderer {
    pub fn new(cols: u16, rows: u16) -> Self {
        let (cols, rows) = (cols.max(1), rows.max(1));
        Self {
            cols,
            rows,
            buf: PixelBuf::new(cols as usize, rows as usize * 2),
            labels: Vec::new(),
        }
    }

    pub fn resize(&mut self, cols: u16, rows: u16) {
        self.cols = cols.max(1);
        self.rows = rows.max(1);
        self.buf.resize(self.cols as usize, self.rows as usize * 2);
    }

    pub fn pixels(&self) -> &PixelBuf {
        &self.buf
    }

    pub fn labels(&self) -> &[Label] {
        &self.labels
    }

    /// World position -> pixel position
    fn to_px(&self, p: IVec2) -> IVec2 {
        IVec2::new(
            (p.x * self.buf.w as i32).div_euclid(WIN_WIDTH),
            (p.y * self.buf.h as i32).div_euclid(WIN_HEIGHT),
        )
    }

    fn fill_world(&mut self, min: IVec2, size: IVec2, c: Rgb) {
        let a = self.to_px(min);
        let b = self.to_px(min + size);
        // Keep thin things visible
        let b = b.max(a + IVec2::ONE);
        self.buf.fill_rect(a.x, a.y, b.x, b.y, c);
    }

    fn label(&mut self, col: u16, row: u16, text: String, color: Color) {
        self.labels.push(Label {
            col,
            row,
            text,
            color,
        });
    }

    fn centered(&mut self, row: u16, text: &str, color: Color) {
        let col = (self.cols / 2).saturating_sub(text.chars().count() as u16 / 2);
        self.label(col, row, text.to_string(), color);
    }

    /// Paint a frame into the pixel buffer and label list
    pub fn rasterize(&mut self, frame: &Frame) {
        self.labels.clear();
        for command in &frame.commands {
            match *command {
                DrawCommand::Background => self.draw_background(),
                DrawCommand::Ground { pos } => self.draw_ground(pos),
                DrawCommand::Pipe { kind, pos } => self.draw_pipe(kind, pos),
                DrawCommand::Ghost {
                    pos,
                    pose,
                    rotation,
                } => self.draw_ghost(pos, pose, rotation),
                DrawCommand::Score(score) => self.label(1, 0, format!("Score: {}", score), TEXT),
                DrawCommand::HighScore(best) => {
                    let text = format!("High Score: {}", best);
                    let col = self.cols.saturating_sub(text.chars().count() as u16 + 1);
                    self.label(col, 0, text, TEXT);
                }
                DrawCommand::Overlay(overlay) => self.draw_overlay(overlay),
            }
        }
    }

    /// Rasterize and write a frame
    pub fn draw(&mut self, frame: &Frame, out: &mut impl Write) -> io::Result<()> {
        self.rasterize(frame);
        self.buf.render(out)?;
        for label in &self.labels {
            queue!(
                out,
                cursor::MoveTo(label.col, label.row),
                style::SetForegroundColor(label.color),
                style::Print(&label.text)
            )?;
        }
        queue!(out, style::ResetColor)?;
        out.flush()
    }

    fn draw_background(&mut self) {
        let h = self.buf.h;
        for y in 0..h {
            // Darker band towards the horizon
            let c = if y * 3 > h * 2 { SKYLINE } else { SKY };
            for x in 0..self.buf.w {
                self.buf.set(x as i32, y as i32, c);
            }
        }
    }

    fn draw_ground(&mut self, pos: IVec2) {
        self.fill_world(pos, IVec2::new(GROUND_WIDTH, GROUND_HEIGHT), GROUND);
        self.fill_world(pos, IVec2::new(GROUND_WIDTH, 1), GROUND_TOP);
    }

    fn draw_pipe(&mut self, kind: PipeKind, pos: IVec2) {
        let size = IVec2::new(PIPE_WIDTH, PIPE_HEIGHT);
        self.fill_world(pos, size, PIPE);
        // Cap on the gap-facing end
        let cap_h = PIPE_HEIGHT / 40;
        let cap_y = match kind {
            PipeKind::Top => pos.y + PIPE_HEIGHT - cap_h,
            PipeKind::Bottom => pos.y,
        };
        self.fill_world(IVec2::new(pos.x, cap_y), IVec2::new(PIPE_WIDTH, cap_h), PIPE_CAP);
    }

    fn draw_ghost(&mut self, pos: IVec2, pose: u32, rotation: f32) {
        let size = IVec2::new(GHOST_WIDTH, GHOST_HEIGHT);
        self.fill_world(pos, size, GHOST);

        let a = self.to_px(pos);
        let b = self.to_px(pos + size).max(a + IVec2::ONE);

        // Wing: up, mid, down
        let wing_y = match pose {
            0 => a.y,
            1 => (a.y + b.y) / 2,
            _ => b.y - 1,
        };
        self.buf.set(a.x, wing_y, GHOST_WING);

        // Eye leans with the tilt
        let tilt = (rotation / 30.0).clamp(-1.0, 1.0).round() as i32;
        let eye_y = ((a.y + b.y) / 2 - tilt).clamp(a.y, b.y - 1);
        self.buf.set(b.x - 1, eye_y, GHOST_EYE);
    }

    fn draw_overlay(&mut self, overlay: Overlay) {
        let mid = self.rows / 2;
        match overlay {
            Overlay::Start => {
                self.centered(mid.saturating_sub(2), "F L A P P Y   G H O S T", TEXT_ACCENT);
                self.centered(mid, "Press SPACE to start", TEXT);
                self.centered(mid + 1, "Q to quit", TEXT);
            }
            Overlay::GameOver => {
                self.centered(mid.saturating_sub(1), "G A M E   O V E R", TEXT_ACCENT);
                self.centered(mid + 1, "Press SPACE to continue", TEXT);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame(commands: Vec<DrawCommand>) -> Frame {
        Frame { commands }
    }

    #[test]
    fn test_ground_fills_bottom_rows() {
        let mut r = TerminalRenderer::new(40, 20);
        r.rasterize(&frame(vec![
            DrawCommand::Background,
            DrawCommand::Ground {
                pos: IVec2::new(0, GROUND_Y),
            },
        ]));
        let px = r.pixels();
        assert_eq!(px.get(20, 39), GROUND);
        assert_eq!(px.get(20, 0), SKY);
    }

    #[test]
    fn test_offscreen_entities_are_clipped() {
        let mut r = TerminalRenderer::new(40, 20);
        r.rasterize(&frame(vec![
            DrawCommand::Background,
            DrawCommand::Pipe {
                kind: PipeKind::Top,
                pos: IVec2::new(-WIN_WIDTH, -600),
            },
            DrawCommand::Pipe {
                kind: PipeKind::Bottom,
                pos: IVec2::new(WIN_WIDTH + 10, 400),
            },
        ]));
        assert_eq!(r.pixels().get(0, 0), SKY);
    }

    #[test]
    fn test_ghost_is_drawn_at_anchor() {
        let mut r = TerminalRenderer::new(551, 360);
        r.rasterize(&frame(vec![
            DrawCommand::Background,
            DrawCommand::Ghost {
                pos: IVec2::new(80, 230),
                pose: 1,
                rotation: 0.0,
            },
        ]));
        assert_eq!(r.pixels().get(100, 240), GHOST);
    }

    #[test]
    fn test_text_labels() {
        let mut r = TerminalRenderer::new(80, 24);
        r.rasterize(&frame(vec![
            DrawCommand::Score(7),
            DrawCommand::HighScore(12),
            DrawCommand::Overlay(Overlay::GameOver),
        ]));
        let texts: Vec<&str> = r.labels().iter().map(|l| l.text.as_str()).collect();
        assert!(texts.contains(&"Score: 7"));
        assert!(texts.contains(&"High Score: 12"));
        assert!(texts.contains(&"G A M E   O V E R"));
        let high = r.labels().iter().find(|l| l.text.starts_with("High")).unwrap();
        assert_eq!(high.col as usize + high.text.len() + 1, 80);
    }

    #[test]
    fn test_draw_writes_output() {
        let mut r = TerminalRenderer::new(20, 10);
        let mut out = Vec::new();
        r.draw(&frame(vec![DrawCommand::Background, DrawCommand::Score(3)]), &mut out)
            .unwrap();
        let text = String::from_utf8_lossy(&out);
        assert!(text.contains("Score: 3"));
        assert!(text.contains('\u{2580}'));
    }
}
