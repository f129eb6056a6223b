use crate::{loader, program::ProgramDesc};
use diagnostics::{Diagnostics, MessageLevel};
use failure::{Error, Fail};
use std::{
    fs, io,
    path::{Path, PathBuf},
    process::exit,
};
use termcolor::{ColorChoice, StandardStream, WriteColor};
use type_checking::ExprTypeChecker;

#[derive(Debug, Fail)]
pub enum DriverError {
    #[fail(display = "cannot read {:?}", path)]
    CannotRead {
        path: PathBuf,
        #[cause]
        cause: io::Error,
    },
    #[fail(display = "invalid program description")]
    InvalidProgram {
        #[cause]
        cause: serde_json::Error,
    },
    #[fail(
        display = "cannot check expression #{}: the program has {} expressions",
        requested, available
    )]
    NoSuchExpression { requested: usize, available: usize },
}

pub struct Driver {
    /// Errors, notes and the final summary. Defaults to stderr.
    diagnostics: Diagnostics,
    /// Static types of well-typed expressions. Defaults to stdout.
    writer_out: Box<dyn WriteColor>,
    print_types: bool,
    keep_going: bool,
    /// 1-based index of the only expression to check.
    check_only: Option<usize>,
}

impl Default for Driver {
    fn default() -> Self {
        Self {
            diagnostics: Diagnostics::new(Box::new(StandardStream::stderr(ColorChoice::Auto))),
            writer_out: Box::new(StandardStream::stdout(ColorChoice::Auto)),
            print_types: false,
            keep_going: false,
            check_only: None,
        }
    }
}

impl Driver {
    #[cfg(test)]
    pub fn set_writer_err(mut self, writer: Box<dyn WriteColor>) -> Self {
        self.diagnostics = Diagnostics::new(writer);
        self
    }

    #[cfg(test)]
    pub fn set_writer_out(mut self, writer: Box<dyn WriteColor>) -> Self {
        self.writer_out = writer;
        self
    }

    pub fn print_types(mut self, yes: bool) -> Self {
        self.print_types = yes;
        self
    }

    pub fn keep_going(mut self, yes: bool) -> Self {
        self.keep_going = yes;
        self
    }

    pub fn check_only(mut self, index: Option<usize>) -> Self {
        self.check_only = index;
        self
    }

    /// True if no error was reported so far.
    pub fn succeeded(&self) -> bool {
        !self.diagnostics.errored()
    }

    pub fn check_file<P: AsRef<Path>>(&mut self, path: P) -> Result<(), Error> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|cause| DriverError::CannotRead {
            path: path.to_path_buf(),
            cause,
        })?;
        self.check_json(&json)
    }

    /// Loads the program described by `json` and checks its expressions.
    ///
    /// Type errors and load errors are reported through the diagnostics and
    /// do not make this fail, use [`Driver::succeeded`] to find out about
    /// them. `Err` is returned if the input cannot be read at all.
    pub fn check_json(&mut self, json: &str) -> Result<(), Error> {
        let desc =
            ProgramDesc::from_json(json).map_err(|cause| DriverError::InvalidProgram { cause })?;

        let program = match loader::load(&desc, &self.diagnostics) {
            Ok(program) => program,
            Err(aborted) => {
                log::debug!("{}", aborted);
                self.diagnostics.write_statistics();
                return Ok(());
            }
        };

        let selected: Vec<_> = match self.check_only {
            Some(requested) if requested == 0 || requested > program.expressions.len() => {
                return Err(DriverError::NoSuchExpression {
                    requested,
                    available: program.expressions.len(),
                }
                .into());
            }
            Some(requested) => vec![&program.expressions[requested - 1]],
            None => program.expressions.iter().collect(),
        };

        let checker = ExprTypeChecker::new(&program.type_system);
        for (i, expr) in selected.iter().enumerate() {
            match checker.check_types(expr) {
                Ok(()) => {
                    if self.print_types {
                        writeln!(self.writer_out, "{} : {}", expr, checker.static_type(expr))?;
                    }
                }
                Err(err) => {
                    self.diagnostics
                        .emit_with_note(MessageLevel::Error, &err, &expr.to_string());

                    let remaining = selected.len() - i - 1;
                    if !self.keep_going && remaining > 0 {
                        self.diagnostics.info(&format!(
                            "skipped {} remaining expressions, use --keep-going to check them",
                            remaining
                        ));
                        break;
                    }
                }
            }
        }

        self.diagnostics.write_statistics();
        Ok(())
    }
}

/// Print an error in a format intended for end users and terminate
/// the program.
pub fn exit_process_with_error(err: &Error) -> ! {
    let mut stderr = io::stderr();
    // nothing left to report to if stderr is gone
    print_error(&mut stderr, err).ok();
    exit(1);
}

/// Print error objects in a format intended for end users
pub fn print_error(writer: &mut dyn io::Write, err: &Error) -> Result<(), Error> {
    writeln!(writer, "error: {}", err.as_fail())?;
    for cause in err.iter_causes() {
        writeln!(writer, "caused by: {}", cause)?;
    }
    Ok(())
}
