//! Add entry command handler.

use chrono::{NaiveTime, Utc};

use learnlog_core::store::{Entry, EntryDraft};

use crate::app::{announce_offline, AppContext};
use crate::cli::AddArgs;
use crate::errors::CliError;
use crate::helpers::{collect_tags, parse_date_arg, prompt_text, read_entry_content, resolve_image};
use crate::ui::{format_entry_date, print, receipt, with_spinner, UiContext};

pub fn handle_add(ctx: &AppContext, args: &AddArgs) -> anyhow::Result<()> {
    let ui = ctx.ui_context(false, None);
    let interactive = ui.is_interactive() && !args.no_input;

    let title = match args.title.clone().filter(|t| !t.trim().is_empty()) {
        Some(title) => title,
        None if interactive => prompt_text("Title", None)?,
        None => {
            return Err(CliError::invalid_input(
                "Title is required\nHint: Run `learnlog add \"<title>\" --content \"...\"`.",
            )
            .into())
        }
    };

    let date = match args.date.as_deref() {
        Some(value) => parse_date_arg("--date", value)?,
        None => Utc::now().date_naive().and_time(NaiveTime::MIN).and_utc(),
    };
    let image = args.image.as_deref().map(resolve_image).transpose()?;

    let content = read_entry_content(args.no_input, args.content.clone(), ctx.editor()?, None)?
        .ok_or_else(|| {
            CliError::invalid_input(
                "Entry content is required\nHint: Pass --content, pipe text on stdin, or set $EDITOR.",
            )
        })?;

    let draft = EntryDraft::new(title, content, date)
        .with_tags(collect_tags(&args.tag))
        .with_image(image);
    draft.validate()?;

    let mut journal = ctx.open_journal(&ui)?;
    let before = journal.mode();
    let entry = with_spinner(&ui, "Saving entry", || journal.create(&draft))?;
    announce_offline(ctx, &ui, &journal, before);

    print_saved(ctx, &ui, &entry);
    Ok(())
}

fn print_saved(ctx: &AppContext, ui: &UiContext, entry: &Entry) {
    if ctx.quiet() {
        println!("{}", entry.id);
        return;
    }
    let title = if entry.id.is_local() {
        "Entry saved locally"
    } else {
        "Entry saved"
    };
    let stored = entry.provenance().to_string();
    let date = format_entry_date(&entry.date);
    print(
        ui,
        &receipt(
            ui,
            title,
            &[("ID", entry.id.as_str()), ("Stored", stored.as_str()), ("Date", date.as_str())],
        ),
    );
}
