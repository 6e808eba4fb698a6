//! A tool to chart hourly per-endpoint API usage from request logs.
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

use std::io::{Read, Write};
use std::io::{stderr, stdin, stdout};
use usage_lens_lib::{Host, run};

/// Default host backed by the real process streams.
#[derive(Debug, Clone, Default)]
pub struct RealHost;

#[cfg_attr(coverage_nightly, coverage(off))]
impl Host for RealHost {
    fn output(&mut self) -> impl Write {
        stdout()
    }

    fn error(&mut self) -> impl Write {
        stderr()
    }

    fn input(&mut self) -> impl Read {
        stdin()
    }

    fn exit(&mut self, code: i32) {
        std::process::exit(code);
    }
}

#[cfg_attr(coverage_nightly, coverage(off))]
fn main() -> Result<(), ohno::AppError> {
    run(&mut RealHost, std::env::args())
}
