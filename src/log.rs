/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */
//! Logging and terminal output macros.

/// Accessing log output on Android is more difficult than on other platforms;
/// logcat requires a separate device. As an alternative, let's write to a file
/// too.
#[cfg(target_os = "android")]
static LOG_FILE: std::sync::OnceLock<std::fs::File> = std::sync::OnceLock::new();

/// Set up log file. Only the first call has any effect.
#[cfg(all(target_os = "android", feature = "sdl"))]
pub fn setup_log_file(path: &std::path::Path) -> std::io::Result<()> {
    let file = std::fs::File::create(path)?;
    let _ = LOG_FILE.set(file);
    Ok(())
}

/// Only for internal use by the logging macros.
#[cfg(target_os = "android")]
pub fn get_log_file() -> Option<&'static std::fs::File> {
    LOG_FILE.get()
}

/// Prints a log message unconditionally. Use this for errors or warnings.
///
/// The message is prefixed with the module path, so it is clear where it comes
/// from.
macro_rules! log {
    ($($arg:tt)+) => {
        echo!("{}: {}", module_path!(), format_args!($($arg)+));
    }
}

/// Like [log], but prints the message only if debugging is enabled for the
/// module where it is used. This can be used for verbose things only needed
/// when debugging, like the outcome of every extension check.
macro_rules! log_dbg {
    ($($arg:tt)+) => {
        if $crate::log::ENABLED_MODULES.contains(&module_path!()) {
            log!($($arg)*);
        }
    }
}

/// Print a message (with implicit newline). This should be used for all
/// output of the library and the demo.
///
/// Prefer use [log] or [log_dbg] for errors and warnings while rendering.
macro_rules! echo {
    ($($arg:tt)+) => {
        {
            #[cfg(target_os = "android")]
            {
                let formatted_str = format!($($arg)+);
                #[cfg(feature = "sdl")]
                sdl2::log::log(&formatted_str);
                if let Some(mut log_file) = $crate::log::get_log_file() {
                    use std::io::Write;
                    let _ = log_file.write_all(formatted_str.as_bytes());
                    let _ = log_file.write_all(b"\n");
                }
            }
            #[cfg(not(target_os = "android"))]
            eprintln!($($arg)+);
        }
    };
    () => {
        {
            #[cfg(target_os = "android")]
            {
                #[cfg(feature = "sdl")]
                sdl2::log::log("");
                if let Some(mut log_file) = $crate::log::get_log_file() {
                    use std::io::Write;
                    let _ = log_file.write_all(b"\n");
                }
            }
            #[cfg(not(target_os = "android"))]
            eprintln!("");
        }
    }
}

/// Put modules to enable [log_dbg] for here, e.g. "rdpgl::render::hardware"
/// to see which hardware profile was picked and why.
pub const ENABLED_MODULES: &[&str] = &[];
