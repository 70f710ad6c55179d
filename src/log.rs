use std::env;
use std::sync::LazyLock;

#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[repr(u8)]
enum Level {
    Error = 0,
    Warn = 1,
}

static OPENING_TREE_LOG: LazyLock<Level> = LazyLock::new(|| {
    env::var("OPENING_TREE_LOG")
        .map(|raw| match raw.to_ascii_lowercase().as_str() {
            "warn" | "warning" => Level::Warn,
            _ => Level::Error,
        })
        .unwrap_or(Level::Error)
});

macro_rules! log {
    ($level:expr, $prefix:expr, $msg:expr) => {
        if *OPENING_TREE_LOG >= $level {
            eprintln!(concat!($prefix, ": {}"), $msg.as_ref());
        }
    };
}

pub fn error(msg: impl AsRef<str>) {
    log!(Level::Error, "ERROR", msg);
}

pub fn warn(msg: impl AsRef<str>) {
    log!(Level::Warn, "WARN", msg);
}
