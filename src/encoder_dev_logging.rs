// CODEGEN LOGGING MACROS
// Function builds, type registration and import materialization
#[macro_export]
#[cfg(feature = "show_codegen")]
macro_rules! codegen_log {
    ($($arg:tt)*) => {
        saying::say!($($arg)*);
    };
}

#[macro_export]
#[cfg(not(feature = "show_codegen"))]
macro_rules! codegen_log {
    ($($arg:tt)*) => {
        // Nothing
    };
}

// SECTION LOGGING MACROS
#[macro_export]
#[cfg(feature = "show_sections")]
macro_rules! section_log {
    ($($arg:tt)*) => {
        saying::say!($($arg)*);
    };
}

#[macro_export]
#[cfg(not(feature = "show_sections"))]
macro_rules! section_log {
    ($($arg:tt)*) => {
        // Nothing
    };
}
