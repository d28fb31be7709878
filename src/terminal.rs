use std::env;

// Fallback when neither COLUMNS nor the tty reports a width
const DEFAULT_TERMINAL_WIDTH: usize = 80;

// Width of the terminal attached to stdout
#[must_use]
pub fn terminal_width() -> usize {
    columns_from_env()
        .or_else(columns_from_tty)
        .unwrap_or(DEFAULT_TERMINAL_WIDTH)
}

// An explicit COLUMNS value overrides the tty
fn columns_from_env() -> Option<usize> {
    env::var("COLUMNS")
        .ok()
        .and_then(|value| parse_columns(&value))
}

#[must_use]
pub fn parse_columns(value: &str) -> Option<usize> {
    value.trim().parse::<usize>().ok().filter(|columns| *columns > 0)
}

#[cfg(unix)]
fn columns_from_tty() -> Option<usize> {
    let mut size = libc::winsize {
        ws_row: 0,
        ws_col: 0,
        ws_xpixel: 0,
        ws_ypixel: 0,
    };

    // SAFETY: TIOCGWINSZ only writes into the winsize struct we pass.
    let result = unsafe { libc::ioctl(libc::STDOUT_FILENO, libc::TIOCGWINSZ, &mut size) };

    if result == 0 && size.ws_col > 0 {
        Some(usize::from(size.ws_col))
    } else {
        None
    }
}

#[cfg(not(unix))]
fn columns_from_tty() -> Option<usize> {
    None
}
