use once_cell::sync::Lazy;

/// Global debug mode flag, initialized once at startup
pub static DEBUG_MODE: Lazy<bool> = Lazy::new(|| std::env::var("TIERLINE_DEBUG").is_ok());

/// Conditional debug output macro
///
/// Prints to stderr only when `TIERLINE_DEBUG` is set. The environment is read
/// once, so calling this inside the calculator costs a single flag check.
///
/// # Examples
///
/// ```
/// use tierline::debug_println;
///
/// let breakpoints = 10;
/// debug_println!("calculated {} breakpoints", breakpoints);
/// ```
#[macro_export]
macro_rules! debug_println {
    ($($arg:tt)*) => {
        if *$crate::utils::debug::DEBUG_MODE {
            eprintln!($($arg)*);
        }
    };
}
