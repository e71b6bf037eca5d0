use std::env::{self, VarError};
use std::path::PathBuf;

use crate::tracing::InitError;

/// Default filter when neither `G2V_LOG` nor `RUST_LOG` is set. Stdout is
/// reserved for command results, so the default stays quiet.
pub const DEFAULT_LOG_FILTER: &str = "warn";

/// Runtime knobs read from the process environment.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RuntimeConfig {
    /// `tracing_subscriber::EnvFilter` directives.
    pub log_filter: String,
    /// Destination for a Chrome trace file, if requested.
    pub chrome_trace: Option<PathBuf>,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            log_filter: DEFAULT_LOG_FILTER.to_string(),
            chrome_trace: None,
        }
    }
}

impl RuntimeConfig {
    /// Builds a configuration snapshot from environment variables.
    ///
    /// `G2V_LOG` wins over `RUST_LOG`; `G2V_TRACE_CHROME` enables the Chrome
    /// trace layer when it holds a non-blank path.
    pub fn from_env() -> Result<Self, InitError> {
        let log_filter = match non_blank_var("G2V_LOG")? {
            Some(filter) => filter,
            None => non_blank_var("RUST_LOG")?.unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string()),
        };
        let chrome_trace = non_blank_var("G2V_TRACE_CHROME")?.map(PathBuf::from);
        Ok(Self {
            log_filter,
            chrome_trace,
        })
    }
}

fn non_blank_var(key: &'static str) -> Result<Option<String>, InitError> {
    match env::var(key) {
        Ok(raw) if !raw.trim().is_empty() => Ok(Some(raw.trim().to_string())),
        Ok(_) => Ok(None),
        Err(VarError::NotPresent) => Ok(None),
        Err(err) => Err(InitError::Env { key, source: err }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::panic::{catch_unwind, resume_unwind, AssertUnwindSafe};
    use std::sync::{Mutex, OnceLock};

    fn with_env(vars: &[(&str, Option<&str>)], test: impl FnOnce()) {
        static GUARD: OnceLock<Mutex<()>> = OnceLock::new();
        let _lock = GUARD
            .get_or_init(|| Mutex::new(()))
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        let snapshot: Vec<(String, Option<String>)> = vars
            .iter()
            .map(|(key, value)| {
                let previous = env::var(key).ok();
                match value {
                    Some(val) => env::set_var(key, val),
                    None => env::remove_var(key),
                }
                ((*key).to_string(), previous)
            })
            .collect();

        let result = catch_unwind(AssertUnwindSafe(test));

        for (key, value) in snapshot {
            match value {
                Some(val) => env::set_var(&key, val),
                None => env::remove_var(&key),
            }
        }

        if let Err(err) = result {
            resume_unwind(err);
        }
    }

    #[test]
    fn defaults_are_quiet_without_chrome() {
        with_env(
            &[
                ("G2V_LOG", None),
                ("RUST_LOG", None),
                ("G2V_TRACE_CHROME", None),
            ],
            || {
                let cfg = RuntimeConfig::from_env().unwrap();
                assert_eq!(cfg, RuntimeConfig::default());
                assert_eq!(cfg.log_filter, "warn");
            },
        );
    }

    #[test]
    fn g2v_log_overrides_rust_log() {
        with_env(
            &[("G2V_LOG", Some("g2v_core=debug")), ("RUST_LOG", Some("info"))],
            || {
                let cfg = RuntimeConfig::from_env().unwrap();
                assert_eq!(cfg.log_filter, "g2v_core=debug");
            },
        );
    }

    #[test]
    fn rust_log_is_the_fallback() {
        with_env(&[("G2V_LOG", Some("   ")), ("RUST_LOG", Some("trace"))], || {
            let cfg = RuntimeConfig::from_env().unwrap();
            assert_eq!(cfg.log_filter, "trace");
        });
    }

    #[test]
    fn blank_chrome_path_disables_trace() {
        with_env(&[("G2V_TRACE_CHROME", Some(""))], || {
            assert_eq!(RuntimeConfig::from_env().unwrap().chrome_trace, None);
        });
        with_env(&[("G2V_TRACE_CHROME", Some("/tmp/g2v.json"))], || {
            assert_eq!(
                RuntimeConfig::from_env().unwrap().chrome_trace,
                Some(PathBuf::from("/tmp/g2v.json"))
            );
        });
    }
}
