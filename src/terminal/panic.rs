//! Panic hook that gives the user their shell back before the panic message
//! is printed.

use super::setup::emergency_restore;
use std::panic;

/// Chain a terminal-restoring step in front of the current panic hook.
///
/// Install it after `color_eyre::install()` so the report hook is the one
/// being wrapped.
pub fn setup_panic_hook() {
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        emergency_restore();
        original_hook(panic_info);
    }));
}
