//! Terminal detection and the per-command rendering context.

use std::io::IsTerminal;

use chrono_tz::Tz;

use super::mode::OutputMode;

/// Output flags a command received.
#[derive(Debug, Clone, Copy, Default)]
pub struct UiFlags<'a> {
    pub json: bool,
    pub format: Option<&'a str>,
    pub no_color: bool,
    pub ascii: bool,
}

/// What the process is attached to, probed once per command.
#[derive(Debug, Clone, Default)]
pub struct Terminal {
    pub stdout_tty: bool,
    pub stdin_tty: bool,
    pub stderr_tty: bool,
    pub dumb: bool,
    pub no_color_env: bool,
    pub columns: Option<usize>,
}

impl Terminal {
    pub fn probe() -> Self {
        Self {
            stdout_tty: std::io::stdout().is_terminal(),
            stdin_tty: std::io::stdin().is_terminal(),
            stderr_tty: std::io::stderr().is_terminal(),
            dumb: std::env::var("TERM").is_ok_and(|v| v == "dumb"),
            no_color_env: std::env::var_os("NO_COLOR").is_some(),
            columns: terminal_width(),
        }
    }
}

/// Rendering decisions shared by every output helper.
#[derive(Debug, Clone)]
pub struct UiContext {
    /// Prompts may be shown (stdin and stdout are both terminals)
    pub interactive: bool,
    /// Spinners may be drawn on stderr
    pub animate: bool,
    pub color: bool,
    pub unicode: bool,
    /// Terminal width (columns)
    pub width: usize,
    pub mode: OutputMode,
    /// Display timezone for timestamps (UTC when unset)
    pub timezone: Option<Tz>,
}

impl UiContext {
    /// Probe the terminal and resolve the context for `flags`.
    pub fn from_env(flags: UiFlags<'_>) -> Self {
        Self::resolve(flags, &Terminal::probe())
    }

    pub fn resolve(flags: UiFlags<'_>, term: &Terminal) -> Self {
        let is_tty = term.stdout_tty;
        let mode = OutputMode::resolve(flags.json, flags.format, is_tty, term.dumb);

        // NO_COLOR, --no-color and TERM=dumb all switch color off.
        let color = is_tty && !flags.no_color && !term.no_color_env && !term.dumb;

        Self {
            interactive: is_tty && term.stdin_tty,
            animate: is_tty && term.stderr_tty && mode == OutputMode::Pretty,
            color,
            unicode: !flags.ascii,
            width: term.columns.unwrap_or(80),
            mode,
            timezone: None,
        }
    }

    pub fn with_timezone(mut self, timezone: Option<Tz>) -> Self {
        self.timezone = timezone;
        self
    }

    pub fn is_interactive(&self) -> bool {
        self.interactive
    }

    pub fn allows_animation(&self) -> bool {
        self.animate
    }
}

fn terminal_width() -> Option<usize> {
    if let Some(width) = std::env::var("COLUMNS")
        .ok()
        .and_then(|cols| cols.parse::<usize>().ok())
        .filter(|w| *w > 0)
    {
        return Some(width);
    }

    #[cfg(unix)]
    {
        use std::mem::MaybeUninit;

        let mut winsize = MaybeUninit::<libc::winsize>::uninit();
        // SAFETY: TIOCGWINSZ only writes into the provided winsize buffer
        let result =
            unsafe { libc::ioctl(libc::STDOUT_FILENO, libc::TIOCGWINSZ, winsize.as_mut_ptr()) };
        if result == 0 {
            let ws = unsafe { winsize.assume_init() };
            if ws.ws_col > 0 {
                return Some(ws.ws_col as usize);
            }
        }
    }

    None
}
