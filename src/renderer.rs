use std::io;

use hachi_core::MonochromeDisplay;

/// How lit and unlit pixels are shown.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FrameStyle {
    pub on: char,
    pub off: char,
    pub outline: bool,
    pub scale: usize,
}

impl Default for FrameStyle {
    fn default() -> Self {
        Self {
            on: '#',
            off: ' ',
            outline: true,
            scale: 1,
        }
    }
}

impl FrameStyle {
    pub fn view<'a>(&self, framebuffer: &'a MonochromeDisplay) -> FrameView<'a> {
        FrameView {
            framebuffer,
            on: self.on,
            off: self.off,
            outline: self.outline,
            scale: self.scale.max(1),
        }
    }
}

/// One frame handed to a [`Renderer`].
#[derive(Clone, Copy, Debug)]
pub struct FrameView<'a> {
    pub framebuffer: &'a MonochromeDisplay,
    pub on: char,
    pub off: char,
    pub outline: bool,
    pub scale: usize,
}

pub trait Renderer {
    fn draw(&mut self, frame: &FrameView<'_>) -> io::Result<()>;
}

/// Draws frames as lines of text, each pixel `scale` characters wide and
/// `scale` lines tall.
#[derive(Debug)]
pub struct TextRenderer<W: io::Write> {
    out: W,
}

impl<W: io::Write> TextRenderer<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }
}

impl<W: io::Write> Renderer for TextRenderer<W> {
    fn draw(&mut self, frame: &FrameView<'_>) -> io::Result<()> {
        let scale = frame.scale.max(1);
        let width = frame.framebuffer.width() * scale;
        let border = format!("+{}+\n", "-".repeat(width));

        let mut text = String::with_capacity((width + 3) * (frame.framebuffer.height() * scale + 2));
        if frame.outline {
            text.push_str(&border);
        }
        for row in frame.framebuffer.rows() {
            let mut line = String::with_capacity(width + 3);
            if frame.outline {
                line.push('|');
            }
            for pixel in row {
                let glyph = if *pixel { frame.on } else { frame.off };
                line.extend(std::iter::repeat(glyph).take(scale));
            }
            if frame.outline {
                line.push('|');
            }
            line.push('\n');
            for _ in 0..scale {
                text.push_str(&line);
            }
        }
        if frame.outline {
            text.push_str(&border);
        }

        self.out.write_all(text.as_bytes())?;
        self.out.flush()
    }
}
