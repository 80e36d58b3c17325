use env_logger::{Builder, Env};

/// Default filter when `RUST_LOG` is not set.
pub fn default_filter(verbose: bool) -> &'static str {
    if verbose {
        "pug_client=debug,pug_cli=debug,warn"
    } else {
        "warn"
    }
}

/// Initialise env_logger for the binary. `RUST_LOG` always takes precedence.
pub fn init_logging(verbose: bool) {
    let env = Env::default().default_filter_or(default_filter(verbose));
    // try_init fails when a logger is already installed.
    let _ = Builder::from_env(env)
        .format_timestamp(None)
        .format_target(verbose)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_filter() {
        assert_eq!(default_filter(false), "warn");
        assert!(default_filter(true).contains("pug_client=debug"));
    }

    #[test]
    fn test_init_logging_twice_is_harmless() {
        init_logging(false);
        init_logging(true);
        log::debug!("logger initialised");
    }
}
