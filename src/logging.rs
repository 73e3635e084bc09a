//! Tracing setup. Logs go to stderr so they never interleave with frames on stdout.

use tracing_subscriber::EnvFilter;

/// Default filter for a `-v` count, used when `RUST_LOG` is unset.
pub fn default_directive(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "ghtail=warn",
        1 => "ghtail=info",
        2 => "ghtail=debug",
        _ => "ghtail=trace",
    }
}

pub fn init(verbosity: u8) {
    let env_filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::new(default_directive(verbosity)),
    };

    // A second init (e.g. from tests) is harmless.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbosity_raises_level() {
        assert_eq!(default_directive(0), "ghtail=warn");
        assert_eq!(default_directive(2), "ghtail=debug");
        assert_eq!(default_directive(9), "ghtail=trace");
    }
}
