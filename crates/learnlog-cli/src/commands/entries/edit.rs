use std::io::IsTerminal;

use crate::app::{announce_offline, resolve_entry, AppContext};
use crate::cli::EditArgs;
use crate::helpers::{collect_tags, parse_date_arg, read_entry_content, resolve_image};
use crate::ui::{badge, print, receipt, with_spinner, Badge};

pub fn handle_edit(ctx: &AppContext, args: &EditArgs) -> anyhow::Result<()> {
    let ui = ctx.ui_context(false, None);

    let date = args
        .date
        .as_deref()
        .map(|value| parse_date_arg("--date", value))
        .transpose()?;
    let image = args.image.as_deref().map(resolve_image).transpose()?;

    let mut journal = ctx.open_journal(&ui)?;
    let (id, existing) = resolve_entry(&journal, &args.id)?;

    let mut draft = existing.to_draft();
    if let Some(title) = &args.title {
        draft.title = title.clone();
    }
    if args.clear_tags {
        draft.tags.clear();
    } else if !args.tag.is_empty() {
        draft.tags = collect_tags(&args.tag);
    }
    if let Some(date) = date {
        draft.date = date;
    }
    if args.clear_image {
        draft.image = None;
    } else if image.is_some() {
        draft.image = image;
    }

    // With no field flags on a terminal, edit the content in $EDITOR.
    let field_flags = args.title.is_some()
        || !args.tag.is_empty()
        || args.clear_tags
        || args.date.is_some()
        || args.image.is_some()
        || args.clear_image;
    let stdin_piped = !std::io::stdin().is_terminal();
    if args.content.is_some() || stdin_piped || (!field_flags && !args.no_input) {
        if let Some(content) = read_entry_content(
            args.no_input,
            args.content.clone(),
            ctx.editor()?,
            Some(&existing.content),
        )? {
            draft.content = content;
        }
    }

    if draft == existing.to_draft() {
        if !ctx.quiet() {
            print(&ui, &badge(&ui, Badge::Info, "Nothing to change"));
        }
        return Ok(());
    }

    let before = journal.mode();
    let updated = with_spinner(&ui, "Saving entry", || journal.update(&id, &draft))?;
    announce_offline(ctx, &ui, &journal, before);

    if ctx.quiet() {
        println!("{}", updated.id);
    } else {
        let stored = updated.provenance().to_string();
        print(
            &ui,
            &receipt(
                &ui,
                "Entry updated",
                &[("ID", updated.id.as_str()), ("Stored", stored.as_str())],
            ),
        );
    }
    Ok(())
}
