//! Shared helpers for integration tests.

use std::sync::{Mutex, PoisonError};

/// Process environment is global; tests that touch it take turns.
static ENV_MUTEX: Mutex<()> = Mutex::new(());

/// Apply `vars` (`Some` sets, `None` unsets), run `body`, then put every
/// touched variable back, even if `body` panics.
pub fn with_scoped_env<T>(vars: &[(&str, Option<&str>)], body: impl FnOnce() -> T) -> T {
    let _turn = ENV_MUTEX.lock().unwrap_or_else(PoisonError::into_inner);
    let _restore = EnvRestore::apply(vars);
    body()
}

/// Previous values, written back on drop.
struct EnvRestore {
    previous: Vec<(String, Option<String>)>,
}

impl EnvRestore {
    fn apply(vars: &[(&str, Option<&str>)]) -> Self {
        let mut previous: Vec<(String, Option<String>)> = Vec::with_capacity(vars.len());
        for (name, value) in vars {
            if !previous.iter().any(|(seen, _)| seen == name) {
                previous.push((name.to_string(), std::env::var(name).ok()));
            }
            set_or_unset(name, *value);
        }
        Self { previous }
    }
}

impl Drop for EnvRestore {
    fn drop(&mut self) {
        for (name, value) in self.previous.drain(..) {
            set_or_unset(&name, value.as_deref());
        }
    }
}

fn set_or_unset(name: &str, value: Option<&str>) {
    match value {
        Some(value) => std::env::set_var(name, value),
        None => std::env::remove_var(name),
    }
}

