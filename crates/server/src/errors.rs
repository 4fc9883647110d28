use std::fmt;

use deadpool_sqlite::HookError;

/// Fails a pool hook with the debug output of `err`
pub fn hook_error<E: fmt::Debug>(err: E) -> HookError {
    HookError::Message(format!("{err:?}"))
}
