use std::io::{self, Stderr, Stdout, Write};

pub struct OtpWriter {
    pub out: Stdout,
    pub err: Stderr,
}

impl OtpWriter {
    pub fn new() -> Self {
        OtpWriter {
            out: io::stdout(),
            err: io::stderr(),
        }
    }
}

/// Output sink for subcommands: codes and listings go to `write`, prompts
/// and diagnostics to `write_err`.
pub trait OutErr {
    fn write_err(&mut self, s: &str);
    fn write(&mut self, s: &str);
}

impl OutErr for OtpWriter {
    fn write_err(&mut self, s: &str) {
        let result = self.err.write_all(s.as_bytes()).and_then(|_| self.err.flush());
        if let Err(e) = result {
            tracing::warn!(error = %e, "unable to write to stderr");
        }
    }

    fn write(&mut self, s: &str) {
        let result = self.out.write_all(s.as_bytes()).and_then(|_| self.out.flush());
        if let Err(e) = result {
            tracing::warn!(error = %e, "unable to write to stdout");
        }
    }
}
