#![warn(rust_2018_idioms)]
#![warn(clippy::print_stdout)]

//! `jtc` checks the expressions of a JSON program description for static
//! type errors.
//!
//! Set `RUST_LOG=debug` to see what the loader and the checker are doing.

mod driver;
mod loader;
mod program;

use crate::driver::{exit_process_with_error, Driver};
use std::{path::PathBuf, process::exit};
use structopt::StructOpt;

#[derive(StructOpt)]
#[structopt(name = "jtc")]
struct Opt {
    /// Print `<expression> : <type>` for every well-typed expression
    #[structopt(long = "print-types")]
    print_types: bool,
    /// Check all expressions instead of stopping at the first ill-typed one
    #[structopt(long = "keep-going")]
    keep_going: bool,
    /// Only check the N-th expression (counting from 1)
    #[structopt(long = "check-only", value_name = "N")]
    check_only: Option<usize>,
    /// The program description
    #[structopt(name = "FILE", parse(from_os_str))]
    file: PathBuf,
}

fn main() {
    env_logger::init();
    let opt = Opt::from_args();

    let mut driver = Driver::default()
        .print_types(opt.print_types)
        .keep_going(opt.keep_going)
        .check_only(opt.check_only);

    if let Err(err) = driver.check_file(&opt.file) {
        exit_process_with_error(&err);
    }

    exit(if driver.succeeded() { 0 } else { 1 });
}
