use std::fmt;

/// Diagnostic sink used by [`Client`](super::Client).
pub trait Logger: Send + Sync {
    fn print(&self, message: &str);

    fn print_fmt(&self, args: fmt::Arguments<'_>) {
        self.print(&args.to_string());
    }
}

/// Discards everything. This is the default.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopLogger;

impl Logger for NoopLogger {
    fn print(&self, _message: &str) {}

    fn print_fmt(&self, _args: fmt::Arguments<'_>) {}
}

/// Forwards to the [`log`] crate at debug level, under the `danbooru` target.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogLogger;

impl Logger for LogLogger {
    fn print(&self, message: &str) {
        log::debug!(target: "danbooru", "{}", message);
    }

    fn print_fmt(&self, args: fmt::Arguments<'_>) {
        log::debug!(target: "danbooru", "{}", args);
    }
}
