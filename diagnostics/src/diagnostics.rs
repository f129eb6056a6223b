//! The diagnostics object controls the output of errors, warnings and notes
//! generated while loading a program and checking its expressions. It also
//! tracks the number of messages per level for flow control.
//!
//! This implementation is NOT thread-safe.

use failure::AsFail;
use std::{cell::RefCell, collections::HashMap};
use termcolor::{Color, WriteColor};
use utils::color::ColorOutput;

/// Instead of writing messages directly to stdout, they are collected in
/// this object.
///
/// This has several advantages:
/// - the output level can be adapted by users.
/// - we have a single source responsible for formatting messages.
pub struct Diagnostics {
    message_count: RefCell<HashMap<MessageLevel, usize>>,
    writer: RefCell<Box<dyn WriteColor>>,
}

impl Diagnostics {
    pub fn new(writer: Box<dyn WriteColor>) -> Self {
        Self {
            writer: RefCell::new(writer),
            message_count: RefCell::new(HashMap::new()),
        }
    }

    /// True when an error message was emitted, false
    /// if only warnings were emitted.
    pub fn errored(&self) -> bool {
        self.count(MessageLevel::Error) > 0
    }

    pub fn count(&self, level: MessageLevel) -> usize {
        self.message_count
            .borrow()
            .get(&level)
            .cloned()
            .unwrap_or(0)
    }

    pub fn write_statistics(&self) {
        let mut writer = self.writer.borrow_mut();
        let mut output = ColorOutput::new(&mut **writer);

        output.set_bold(true);

        if self.errored() {
            output.set_color(MessageLevel::Error.color());
            writeln!(
                output.writer(),
                "Type checking aborted due to {}",
                match self.count(MessageLevel::Error) {
                    1 => "an error".to_string(),
                    n => format!("{} errors", n),
                }
            )
            .ok();
        } else {
            output.set_color(Some(Color::Green));
            writeln!(
                output.writer(),
                "Type checking finished successfully {}",
                match self.count(MessageLevel::Warning) {
                    0 => "without warnings".to_string(),
                    1 => "with a warning".to_string(),
                    n => format!("with {} warnings", n),
                }
            )
            .ok();
        }
    }

    /// Generate a message that is printed to the writer given in the `new`
    /// constructor. Most of the time this will be stderr.
    pub fn emit(&self, level: MessageLevel, kind: &dyn AsFail) {
        self.emit_message(&Message {
            level,
            text: kind.as_fail().to_string(),
            note: None,
        });
    }

    /// Like `emit`, followed by an indented note line, e.g. the expression
    /// the message refers to.
    pub fn emit_with_note(&self, level: MessageLevel, kind: &dyn AsFail, note: &str) {
        self.emit_message(&Message {
            level,
            text: kind.as_fail().to_string(),
            note: Some(note.to_string()),
        });
    }

    pub fn error(&self, kind: &dyn AsFail) {
        self.emit(MessageLevel::Error, kind)
    }

    pub fn warning(&self, kind: &dyn AsFail) {
        self.emit(MessageLevel::Warning, kind)
    }

    /// Plain informational output, not counted towards errors or warnings.
    pub fn info(&self, text: &str) {
        self.emit_message(&Message {
            level: MessageLevel::Info,
            text: text.to_string(),
            note: None,
        });
    }

    fn emit_message(&self, msg: &Message) {
        let mut writer = self.writer.borrow_mut();
        msg.write_colored(&mut **writer);
        self.increment_level_count(msg.level);
    }

    fn increment_level_count(&self, level: MessageLevel) {
        let mut message_count = self.message_count.borrow_mut();
        let counter = message_count.entry(level).or_insert(0);
        *counter += 1;
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum MessageLevel {
    Error,
    Warning,
    Info,
}

impl MessageLevel {
    fn color(self) -> Option<Color> {
        // Don't be confused by the return type. `None` means default color!
        match self {
            MessageLevel::Error => Some(Color::Red),
            MessageLevel::Warning => Some(Color::Yellow),
            MessageLevel::Info => Some(Color::Cyan),
        }
    }

    fn name(self) -> &'static str {
        match self {
            MessageLevel::Error => "error",
            MessageLevel::Warning => "warning",
            MessageLevel::Info => "info",
        }
    }
}

struct Message {
    level: MessageLevel,
    text: String,
    note: Option<String>,
}

const NOTE_MARKER: &str = "  --> ";
const HIGHLIGHT: Option<Color> = Some(Color::Cyan);

impl Message {
    fn write_colored(&self, writer: &mut dyn WriteColor) {
        let mut output = ColorOutput::new(writer);
        output
            .write_styled(self.level.color(), true, format!("{}: ", self.level.name()))
            .ok();
        writeln!(output.writer(), "{}", self.text).ok();

        if let Some(note) = &self.note {
            output.write_styled(HIGHLIGHT, true, NOTE_MARKER).ok();
            writeln!(output.writer(), "{}", note).ok();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use failure::Fail;
    use std::{
        io::{self, Write},
        rc::Rc,
    };
    use termcolor::NoColor;

    #[derive(Clone, Default)]
    struct SharedBuffer(Rc<RefCell<Vec<u8>>>);

    impl SharedBuffer {
        fn contents(&self) -> String {
            String::from_utf8(self.0.borrow().clone()).unwrap()
        }
    }

    impl Write for SharedBuffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.borrow_mut().write(buf)
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[derive(Debug, Fail)]
    #[fail(display = "Shape has no method named paint")]
    struct MissingPaint;

    fn diagnostics() -> (Diagnostics, SharedBuffer) {
        let buffer = SharedBuffer::default();
        let diagnostics = Diagnostics::new(Box::new(NoColor::new(buffer.clone())));
        (diagnostics, buffer)
    }

    #[test]
    fn counts_messages_per_level() {
        let (diagnostics, _) = diagnostics();
        assert!(!diagnostics.errored());

        diagnostics.warning(&MissingPaint);
        assert!(!diagnostics.errored());

        diagnostics.error(&MissingPaint);
        diagnostics.error(&MissingPaint);
        diagnostics.info("checked 3 expressions");

        assert!(diagnostics.errored());
        assert_eq!(2, diagnostics.count(MessageLevel::Error));
        assert_eq!(1, diagnostics.count(MessageLevel::Warning));
        assert_eq!(1, diagnostics.count(MessageLevel::Info));
    }

    #[test]
    fn writes_level_message_and_note() {
        let (diagnostics, buffer) = diagnostics();
        diagnostics.emit_with_note(MessageLevel::Error, &MissingPaint, "s.paint()");

        assert_eq!(
            "error: Shape has no method named paint\n  --> s.paint()\n",
            buffer.contents()
        );
    }

    #[test]
    fn statistics_summarize_errors() {
        let (diagnostics, buffer) = diagnostics();
        diagnostics.error(&MissingPaint);
        diagnostics.write_statistics();

        assert!(buffer
            .contents()
            .ends_with("Type checking aborted due to an error\n"));
    }

    #[test]
    fn statistics_summarize_success() {
        let (diagnostics, buffer) = diagnostics();
        diagnostics.warning(&MissingPaint);
        diagnostics.write_statistics();

        assert!(buffer
            .contents()
            .ends_with("Type checking finished successfully with a warning\n"));
    }
}
