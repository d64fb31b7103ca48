//! Terminal display: shows the color buffer with half-block characters
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute, queue,
    style::{self, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    terminal, QueueableCommand,
};
use log::{debug, warn};
use std::io::{self, stdout, Stdout, Write};
use std::time::{Duration, Instant};
use wire3d_core::{Color, Display, PixelBuffer};

/// Upper half block: foreground paints the top half of a cell, background the bottom.
const HALF_BLOCK: char = '\u{2580}';

/// Rows kept free at the top of the screen for the status line
const STATUS_ROWS: u16 = 1;

/// Reduce `buffer` by `scale` along both axes, keeping the brightest pixel of
/// every `scale` x `scale` block so one pixel wide lines stay visible.
///
/// Returns the reduced pixels row-major together with the reduced width.
pub fn downsample(buffer: &PixelBuffer, scale: u32) -> (Vec<Color>, usize) {
    let scale = scale.max(1) as usize;
    let width = buffer.width() as usize / scale;
    let height = buffer.height() as usize / scale;
    let mut reduced = vec![Color::BLACK; width * height];

    for (y, row) in buffer.rows().take(height * scale).enumerate() {
        let out_row = &mut reduced[(y / scale) * width..(y / scale + 1) * width];
        for (out, block) in out_row.iter_mut().zip(row.chunks_exact(scale)) {
            for &pixel in block {
                let pixel = Color(pixel);
                if pixel.brightness() > out.brightness() {
                    *out = pixel;
                }
            }
        }
    }

    (reduced, width)
}

/// Pixel resolution for a terminal of `cols` x `rows` cells, one row of which
/// holds the status line. `None` when it does not fit in `u32`.
pub fn buffer_size(cols: u16, rows: u16, scale: u32) -> Option<(u32, u32)> {
    let width = u32::from(cols).checked_mul(scale)?;
    let height = u32::from(rows.saturating_sub(STATUS_ROWS))
        .checked_mul(2)?
        .checked_mul(scale)?;
    Some((width, height))
}

/// Whether the loop should keep going after `key`.
fn keep_running(key: KeyEvent) -> bool {
    if key.kind == KeyEventKind::Release {
        return true;
    }
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') => false,
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => false,
        _ => true,
    }
}

fn to_terminal(color: Color) -> style::Color {
    style::Color::Rgb {
        r: color.r(),
        g: color.g(),
        b: color.b(),
    }
}

/// A [`Display`] that owns the terminal for as long as it lives.
///
/// Creating it switches to raw mode and the alternate screen; dropping it
/// switches back, even when the render loop bailed out with an error.
pub struct TerminalDisplay {
    out: Stdout,
    cols: u16,
    scale: u32,
    width: u32,
    height: u32,
    last_present: Instant,
    frame_count: u32,
    fps: f32,
}

impl TerminalDisplay {
    pub fn new(scale: u32) -> io::Result<Self> {
        let (cols, rows) = terminal::size()?;
        if rows <= STATUS_ROWS || cols == 0 {
            return Err(io::Error::new(
                io::ErrorKind::Other,
                format!("terminal too small: {}x{}", cols, rows),
            ));
        }
        let scale = scale.max(1);
        let (width, height) = buffer_size(cols, rows, scale).ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("scale {} is too large for a {}x{} terminal", scale, cols, rows),
            )
        })?;

        terminal::enable_raw_mode()?;
        let mut out = stdout();
        if let Err(e) = execute!(out, terminal::EnterAlternateScreen, cursor::Hide) {
            let _ = terminal::disable_raw_mode();
            return Err(e);
        }
        debug!("terminal {}x{} cells, {}x pixel scale", cols, rows, scale);

        Ok(Self {
            out,
            cols,
            scale,
            width,
            height,
            last_present: Instant::now(),
            frame_count: 0,
            fps: 0.0,
        })
    }

    fn update_fps(&mut self) {
        self.frame_count += 1;
        let elapsed = self.last_present.elapsed();
        if elapsed >= Duration::from_secs(1) {
            self.fps = self.frame_count as f32 / elapsed.as_secs_f32();
            self.frame_count = 0;
            self.last_present = Instant::now();
        }
    }

    fn draw_status(&mut self) -> io::Result<()> {
        let mut status = format!(
            "wire3d | {}x{} px | FPS: {:.1} | Q/Esc=Quit",
            self.width,
            self.height,
            self.fps
        );
        status.truncate(self.cols as usize);
        queue!(
            self.out,
            cursor::MoveTo(0, 0),
            ResetColor,
            terminal::Clear(terminal::ClearType::CurrentLine),
            SetForegroundColor(style::Color::Yellow),
            Print(status),
            ResetColor
        )
    }
}

impl Display for TerminalDisplay {
    type Error = io::Error;

    fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn poll_input(&mut self) -> io::Result<bool> {
        while event::poll(Duration::from_millis(0))? {
            match event::read()? {
                Event::Key(key) => {
                    if !keep_running(key) {
                        return Ok(false);
                    }
                }
                Event::Resize(cols, rows) => {
                    warn!(
                        "terminal resized to {}x{}, the color buffer keeps its size",
                        cols, rows
                    );
                }
                _ => {}
            }
        }
        Ok(true)
    }

    fn present(&mut self, buffer: &PixelBuffer) -> io::Result<()> {
        let (pixels, width) = downsample(buffer, self.scale);
        let cell_rows = pixels.len() / width.max(1) / 2;

        let mut current: Option<(Color, Color)> = None;
        for row in 0..cell_rows {
            self.out.queue(cursor::MoveTo(0, row as u16 + STATUS_ROWS))?;
            let top = &pixels[(row * 2) * width..(row * 2 + 1) * width];
            let bottom = &pixels[(row * 2 + 1) * width..(row * 2 + 2) * width];
            for (&upper, &lower) in top.iter().zip(bottom) {
                if current != Some((upper, lower)) {
                    self.out.queue(SetForegroundColor(to_terminal(upper)))?;
                    self.out.queue(SetBackgroundColor(to_terminal(lower)))?;
                    current = Some((upper, lower));
                }
                self.out.queue(Print(HALF_BLOCK))?;
            }
        }

        self.update_fps();
        self.draw_status()?;
        self.out.flush()
    }
}

impl Drop for TerminalDisplay {
    fn drop(&mut self) {
        let _ = execute!(
            self.out,
            ResetColor,
            terminal::LeaveAlternateScreen,
            cursor::Show
        );
        let _ = terminal::disable_raw_mode();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_downsample_keeps_thin_lines() {
        let mut buffer = PixelBuffer::new(8, 4).unwrap();
        let green = Color(0xFF00_FF00);
        buffer.set_pixel(5, 3, green);

        let (pixels, width) = downsample(&buffer, 4);
        assert_eq!(width, 2);
        assert_eq!(pixels, vec![Color::BLACK, green]);
    }

    #[test]
    fn test_downsample_prefers_brighter_pixel() {
        let mut buffer = PixelBuffer::new(2, 2).unwrap();
        buffer.set_pixel(0, 0, Color(0xFF33_3333));
        buffer.set_pixel(1, 1, Color(0xFFFF_FF00));

        let (pixels, _) = downsample(&buffer, 2);
        assert_eq!(pixels, vec![Color(0xFFFF_FF00)]);
    }

    #[test]
    fn test_downsample_scale_one_is_identity() {
        let mut buffer = PixelBuffer::new(3, 2).unwrap();
        buffer.set_pixel(2, 1, Color::WHITE);

        let (pixels, width) = downsample(&buffer, 1);
        assert_eq!(width, 3);
        assert_eq!(pixels.len(), 6);
        assert_eq!(pixels[5], Color::WHITE);
    }

    #[test]
    fn test_buffer_size_reserves_status_row() {
        assert_eq!(buffer_size(80, 24, 4), Some((320, 184)));
        assert_eq!(buffer_size(80, 24, 1), Some((80, 46)));
    }

    #[test]
    fn test_buffer_size_rejects_overflowing_scale() {
        assert_eq!(buffer_size(80, 24, u32::MAX), None);
        assert_eq!(buffer_size(1, 2, u32::MAX / 2 + 1), None);
    }

    #[test]
    fn test_quit_keys() {
        assert!(!keep_running(KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE)));
        assert!(!keep_running(KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE)));
        assert!(!keep_running(KeyEvent::new(
            KeyCode::Char('c'),
            KeyModifiers::CONTROL
        )));
        assert!(keep_running(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::NONE)));
        assert!(keep_running(KeyEvent::new(KeyCode::Up, KeyModifiers::NONE)));
    }

    #[test]
    fn test_terminal_color_channels() {
        assert_eq!(
            to_terminal(Color(0xFF12_3456)),
            style::Color::Rgb {
                r: 0x12,
                g: 0x34,
                b: 0x56
            }
        );
    }
}
