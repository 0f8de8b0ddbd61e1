//! A small handful of helper macros

#[cfg(test)]
use std::sync::atomic::AtomicBool;

#[cfg(test)]
pub(crate) static DEBUG: AtomicBool = AtomicBool::new(false);

#[cfg(test)]
macro_rules! enable_debug {
    () => {{
        $crate::macros::DEBUG.store(true, std::sync::atomic::Ordering::SeqCst);
    }};
}

#[cfg(test)]
macro_rules! disable_debug {
    () => {{
        $crate::macros::DEBUG.store(false, std::sync::atomic::Ordering::SeqCst);
    }};
}

// Trace output for the fix-up walks. Compiled out entirely outside of tests, and silent within
// tests unless `enable_debug!()` has been called.
macro_rules! debug_println {
    ($($args:tt)*) => {
        #[cfg(test)]
        {
            if $crate::macros::DEBUG.load(std::sync::atomic::Ordering::SeqCst) {
                println!($($args)*);
            }
        };
    };
}

// Panics with a message naming the tree operation that found its precondition broken. These are
// programming errors inside the crate, never something a caller can trigger.
macro_rules! broken_invariant {
    ($($args:tt)+) => {
        panic!("internal error: {}", format_args!($($args)+))
    };
}
