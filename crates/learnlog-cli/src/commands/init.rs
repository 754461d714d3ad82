//! `learnlog init`: write the config file, prompting on a terminal.

use std::path::PathBuf;

use dialoguer::{theme::ColorfulTheme, Completion, Confirm, FuzzySelect, Input, Select};
use learnlog_core::store::DEFAULT_TIMEOUT_SECS;
use learnlog_core::VERSION;

use crate::app::{expand_tilde, resolve_config_path, validate_remote_url, AppContext};
use crate::cli::InitArgs;
use crate::config::{
    clamp_timeout, default_offline_path, write_config, LearnlogConfig, LocalSection,
    RemoteSection, UiSection,
};
use crate::constants::DEFAULT_REMOTE_URL;
use crate::errors::CliError;
use crate::helpers::parse_timezone;
use crate::ui::theme::{styled, styles};
use crate::ui::{badge, hint, print, Badge, OutputMode, UiContext};

const AUTO_TIMEZONE: &str = "Auto (UTC)";
const OTHER_EDITOR: &str = "Other...";

/// Print a step indicator for the wizard flow.
fn print_step(ctx: &UiContext, step: usize, total: usize, title: &str, detail: &str) {
    if !ctx.mode.is_pretty() {
        return;
    }
    let progress = format!("{}/{}", step, total);
    println!(
        "{}  {}",
        styled(&progress, styles::dim(), ctx.color),
        styled(title, styles::bold(), ctx.color)
    );
    println!("    {}", styled(detail, styles::dim(), ctx.color));
}

fn timezone_options() -> Vec<String> {
    let mut zones: Vec<String> = chrono_tz::TZ_VARIANTS
        .iter()
        .map(|tz| tz.to_string())
        .filter(|tz| tz != "UTC")
        .collect();
    zones.sort();
    zones.insert(0, "UTC".to_string());
    zones.insert(0, AUTO_TIMEZONE.to_string());
    zones
}

fn command_exists(cmd: &str) -> bool {
    std::process::Command::new("sh")
        .arg("-c")
        .arg(format!("command -v {} >/dev/null 2>&1", cmd))
        .status()
        .map(|status| status.success())
        .unwrap_or(false)
}

fn editor_command_name(value: &str) -> Option<&str> {
    value.split_whitespace().next().filter(|s| !s.is_empty())
}

/// `$EDITOR` first, then whichever common editors are on PATH.
fn available_editors() -> Vec<String> {
    let mut editors = Vec::new();
    if let Ok(editor) = std::env::var("EDITOR") {
        if editor_command_name(&editor).is_some_and(command_exists) {
            editors.push(editor);
        }
    }
    for candidate in ["code --wait", "zed --wait", "nvim", "vim", "vi", "nano", "emacs"] {
        let Some(name) = editor_command_name(candidate) else {
            continue;
        };
        let known = editors.iter().any(|e| editor_command_name(e) == Some(name));
        if !known && command_exists(name) {
            editors.push(candidate.to_string());
        }
    }
    editors
}

/// Tab completion for filesystem paths in the snapshot prompt.
struct PathCompletion;

impl Completion for PathCompletion {
    fn get(&self, input: &str) -> Option<String> {
        if input.trim().is_empty() {
            return None;
        }
        let separator = std::path::MAIN_SEPARATOR;
        let (typed_dir, prefix) = match input.rsplit_once(separator) {
            Some((dir, file)) => (format!("{}{}", dir, separator), file),
            None => (String::new(), input),
        };
        let search_dir = if typed_dir.is_empty() {
            std::env::current_dir().ok()?
        } else {
            expand_tilde(&typed_dir)
        };

        let mut matches: Vec<(bool, String)> = std::fs::read_dir(&search_dir)
            .ok()?
            .filter_map(|entry| entry.ok())
            .filter_map(|entry| {
                let name = entry.file_name().to_string_lossy().to_string();
                if !name.starts_with(prefix) {
                    return None;
                }
                let is_dir = entry.file_type().map(|t| t.is_dir()).unwrap_or(false);
                Some((is_dir, name))
            })
            .collect();
        // Directories first, then alphabetical.
        matches.sort_by(|a, b| b.0.cmp(&a.0).then_with(|| a.1.cmp(&b.1)));
        let (is_dir, name) = matches.into_iter().next()?;

        let mut suggestion = format!("{}{}", typed_dir, name);
        if is_dir {
            suggestion.push(separator);
        }
        Some(suggestion)
    }
}

/// Collected answers, before they become a config.
struct InitAnswers {
    remote_url: String,
    timeout_seconds: u64,
    auth: bool,
    snapshot: Option<PathBuf>,
    timezone: Option<String>,
    editor: Option<String>,
}

pub fn handle_init(ctx: &AppContext, args: &InitArgs) -> anyhow::Result<()> {
    let ui = ctx.ui_context(false, None);
    let interactive = ui.is_interactive() && !args.no_input;
    let config_path = resolve_config_path()?;

    if config_path.exists() && !args.force {
        let overwrite = interactive
            && Confirm::new()
                .with_prompt(format!(
                    "Config already exists at {}. Overwrite?",
                    config_path.display()
                ))
                .default(false)
                .interact()?;
        if !overwrite {
            return Err(CliError::invalid_input(format!(
                "Config already exists at {}\nHint: Pass --force to overwrite it.",
                config_path.display()
            ))
            .into());
        }
    }

    if !ctx.quiet() && ui.mode.is_pretty() {
        let title = styled("Learnlog", styles::bold(), ui.color);
        println!("{} \u{00B7} init", title);
        println!("{}", styled(&format!("v{}", VERSION), styles::dim(), ui.color));
        println!();
    }

    let answers = if interactive {
        prompt_answers(ctx, &ui, args)?
    } else {
        answers_from_flags(ctx, args)
    };

    validate_remote_url(&answers.remote_url)?;
    let timezone = match answers.timezone.as_deref() {
        Some(value) => parse_timezone(value)?.map(|tz| tz.to_string()),
        None => None,
    };

    let config = LearnlogConfig {
        remote: RemoteSection {
            url: answers.remote_url.trim().trim_end_matches('/').to_string(),
            timeout_seconds: clamp_timeout(answers.timeout_seconds),
            auth: answers.auth,
        },
        local: LocalSection {
            path: answers
                .snapshot
                .as_ref()
                .map(|p| p.to_string_lossy().to_string()),
        },
        ui: UiSection {
            timezone,
            editor: answers.editor.filter(|e| !e.trim().is_empty()),
        },
    };
    write_config(&config_path, &config)?;

    if ctx.quiet() {
        return Ok(());
    }
    let snapshot = match &answers.snapshot {
        Some(path) => path.clone(),
        None => default_offline_path()?,
    };
    match ui.mode {
        OutputMode::Pretty => {
            println!();
            print(
                &ui,
                &badge(
                    &ui,
                    Badge::Ok,
                    &format!("Config written to {}", config_path.display()),
                ),
            );
            print(
                &ui,
                &badge(&ui, Badge::Info, &format!("Backend {}", config.remote.url)),
            );
            print(
                &ui,
                &badge(
                    &ui,
                    Badge::Info,
                    &format!("Offline snapshot {}", snapshot.display()),
                ),
            );
            println!();
            let next = if config.remote.auth {
                "learnlog register  \u{00B7}  learnlog login  \u{00B7}  learnlog --help"
            } else {
                "learnlog add \"<title>\"  \u{00B7}  learnlog list  \u{00B7}  learnlog --help"
            };
            print(&ui, &hint(&ui, next));
        }
        OutputMode::Plain | OutputMode::Json => {
            println!("status=ok");
            println!("config_path={}", config_path.display());
            println!("backend={}", config.remote.url);
            println!("snapshot={}", snapshot.display());
            println!("auth={}", config.remote.auth);
        }
    }
    Ok(())
}

fn answers_from_flags(ctx: &AppContext, args: &InitArgs) -> InitAnswers {
    let cli = ctx.cli();
    InitAnswers {
        remote_url: args
            .remote_url
            .clone()
            .or_else(|| cli.url.clone())
            .unwrap_or_else(|| DEFAULT_REMOTE_URL.to_string()),
        timeout_seconds: args.timeout.unwrap_or(DEFAULT_TIMEOUT_SECS),
        auth: args.auth,
        snapshot: args
            .snapshot
            .clone()
            .or_else(|| cli.offline_path.clone())
            .map(|p| expand_tilde(&p)),
        timezone: args.timezone.clone(),
        editor: args.editor.clone(),
    }
}

fn prompt_answers(
    ctx: &AppContext,
    ui: &UiContext,
    args: &InitArgs,
) -> anyhow::Result<InitAnswers> {
    let mut answers = answers_from_flags(ctx, args);
    let theme = ColorfulTheme::default();
    let total = 3;

    if args.remote_url.is_none() {
        print_step(ui, 1, total, "Backend", "Where entries are stored while online.");
        answers.remote_url = Input::with_theme(&theme)
            .with_prompt("Backend URL")
            .default(answers.remote_url.clone())
            .validate_with(|value: &String| {
                validate_remote_url(value).map_err(|e| e.to_string())
            })
            .interact_text()?;
        if !args.auth {
            answers.auth = Confirm::with_theme(&theme)
                .with_prompt("Does the backend require login?")
                .default(false)
                .interact()?;
        }
        println!();
    }

    if args.snapshot.is_none() && ctx.cli().offline_path.is_none() {
        print_step(
            ui,
            2,
            total,
            "Offline snapshot",
            "Entries created while the backend is unreachable are kept here.",
        );
        let default_path = default_offline_path()?;
        let input: String = Input::with_theme(&theme)
            .with_prompt("Snapshot file")
            .completion_with(&PathCompletion)
            .default(default_path.to_string_lossy().to_string())
            .interact_text()?;
        let chosen = expand_tilde(input.trim());
        answers.snapshot = (chosen != default_path).then_some(chosen);
        println!();
    }

    if args.timezone.is_none() || args.editor.is_none() {
        print_step(
            ui,
            3,
            total,
            "Preferences",
            "Display timezone and the editor for entry content.",
        );
    }
    if args.timezone.is_none() {
        let zones = timezone_options();
        let selection = FuzzySelect::with_theme(&theme)
            .with_prompt("Timezone")
            .default(0)
            .items(&zones)
            .interact()?;
        answers.timezone = zones
            .get(selection)
            .filter(|zone| zone.as_str() != AUTO_TIMEZONE)
            .cloned();
    }
    if args.editor.is_none() {
        let mut choices = available_editors();
        choices.push(OTHER_EDITOR.to_string());
        let selection = Select::with_theme(&theme)
            .with_prompt("Default editor")
            .default(0)
            .items(&choices)
            .interact()?;
        answers.editor = match choices.get(selection).map(String::as_str) {
            Some(OTHER_EDITOR) | None => {
                let value: String = Input::with_theme(&theme)
                    .with_prompt("Editor command")
                    .allow_empty(true)
                    .interact_text()?;
                Some(value)
            }
            Some(choice) => Some(choice.to_string()),
        };
    }

    Ok(answers)
}
