//! Guard for colored terminal output.
//!
//! A `ColorOutput` resets the terminal style when it is created and again when
//! it is dropped, so a diagnostic can never leak its color into whatever is
//! printed next. Each function writing colored text creates its own guard from
//! the raw writer.
//!
//! NOT thread-safe.
use std::{fmt, io};
use termcolor::{Color, ColorSpec, WriteColor};

pub struct ColorOutput<'a> {
    writer: &'a mut dyn WriteColor,
    spec: ColorSpec,
}

impl<'a> ColorOutput<'a> {
    pub fn new(writer: &'a mut dyn WriteColor) -> Self {
        writer.reset().ok();

        Self {
            writer,
            spec: ColorSpec::new(),
        }
    }

    pub fn set_color(&mut self, color: Option<Color>) {
        // ignore coloring failures using ok()
        self.spec.set_fg(color);
        self.writer.set_color(&self.spec).ok();
    }

    pub fn set_bold(&mut self, yes: bool) {
        self.spec.set_bold(yes);
        self.writer.set_color(&self.spec).ok();
    }

    /// Writes `text` in the given style and restores the previous style.
    pub fn write_styled(
        &mut self,
        color: Option<Color>,
        bold: bool,
        text: impl fmt::Display,
    ) -> io::Result<()> {
        let previous = self.spec.clone();
        self.set_color(color);
        self.set_bold(bold);
        let result = write!(self.writer, "{}", text);
        self.spec = previous;
        self.writer.set_color(&self.spec).ok();
        result
    }

    pub fn writer(&mut self) -> &mut dyn WriteColor {
        self.writer
    }
}

impl<'a> Drop for ColorOutput<'a> {
    fn drop(&mut self) {
        self.writer.reset().ok();
    }
}
