//! Spinner shown on stderr while waiting on the backend.

use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

use super::context::UiContext;
use super::theme::spinner_frames;

/// A spinner for indeterminate progress. Inert unless animation is allowed.
pub struct Spinner {
    bar: Option<ProgressBar>,
}

impl Spinner {
    pub fn new(ctx: &UiContext, message: &str) -> Self {
        if !ctx.allows_animation() {
            return Self { bar: None };
        }

        let pb = ProgressBar::new_spinner();
        let template = if ctx.color {
            "{spinner:.cyan} {msg}..."
        } else {
            "{spinner} {msg}..."
        };
        if let Ok(style) = ProgressStyle::default_spinner().template(template) {
            let mut frames: Vec<&str> = spinner_frames(ctx.unicode).to_vec();
            // indicatif uses the last frame as the finished state
            frames.push("");
            pb.set_style(style.tick_strings(&frames));
        }
        pb.set_message(message.to_string());
        Self { bar: Some(pb) }
    }

    pub fn start(self) -> Self {
        if let Some(bar) = &self.bar {
            bar.enable_steady_tick(Duration::from_millis(80));
        }
        self
    }

    /// Stop and erase the spinner line.
    pub fn finish(&self) {
        if let Some(bar) = &self.bar {
            bar.finish_and_clear();
        }
    }
}

impl Drop for Spinner {
    fn drop(&mut self) {
        self.finish();
    }
}

/// Run `work` with a spinner visible for its duration.
pub fn with_spinner<T>(ctx: &UiContext, message: &str, work: impl FnOnce() -> T) -> T {
    let spinner = Spinner::new(ctx, message).start();
    let result = work();
    spinner.finish();
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::OutputMode;

    #[test]
    fn test_spinner_inert_without_tty() {
        let ctx = UiContext {
            interactive: false,
            animate: false,
            color: false,
            unicode: false,
            width: 80,
            mode: OutputMode::Plain,
            timezone: None,
        };
        let spinner = Spinner::new(&ctx, "Contacting backend");
        assert!(spinner.bar.is_none());
        assert_eq!(with_spinner(&ctx, "Working", || 42), 42);
    }
}
