//! Text and table output formatting for entries.

use learnlog_core::store::{Entry, Provenance};

use crate::ui::theme::{styled, styles};
use crate::ui::{
    badge, blank_line, describe_image, divider, format_entry_date, format_timestamp, hint, kv, print,
    simple_table, single_line, truncate, wrap, Badge, Column, UiContext,
};

const LIST_COLUMNS: [Column; 4] = [
    Column::new("ID"),
    Column::new("Date"),
    Column::new("Title"),
    Column::new("Tags"),
];

/// Print entries as a table (pretty) or tab-separated rows (plain).
///
/// `total` is the number of matches before `--limit` was applied.
pub fn print_entry_list(ctx: &UiContext, entries: &[&Entry], total: usize, quiet: bool) {
    if entries.is_empty() {
        if !quiet && ctx.mode.is_pretty() {
            print(ctx, &badge(ctx, Badge::Info, "No entries found"));
            print(ctx, &hint(ctx, "learnlog add \"<title>\" --content \"...\""));
        }
        return;
    }

    let rows: Vec<Vec<String>> = entries
        .iter()
        .map(|entry| {
            let mut id = entry.id.to_string();
            if ctx.mode.is_pretty() && entry.provenance() == Provenance::Local {
                id = styled(&id, styles::warning(), ctx.color);
            }
            let title = if ctx.mode.is_pretty() {
                truncate(&single_line(&entry.title), 48)
            } else {
                single_line(&entry.title)
            };
            vec![
                id,
                format_entry_date(&entry.date),
                title,
                entry.tags.join(","),
            ]
        })
        .collect();

    print(ctx, &simple_table(ctx, &LIST_COLUMNS, &rows));

    if !quiet && ctx.mode.is_pretty() {
        if total > entries.len() {
            blank_line(ctx);
            print(
                ctx,
                &hint(
                    ctx,
                    &format!(
                        "Showing {} of {}; use --limit or --all to see more",
                        entries.len(),
                        total
                    ),
                ),
            );
        } else if entries.iter().any(|e| e.provenance() == Provenance::Local) {
            blank_line(ctx);
            print(
                ctx,
                &hint(ctx, "Local entries are kept offline; run `learnlog publish` to push them"),
            );
        }
    }
}

/// Print a single entry: metadata block, then the content.
pub fn print_entry(ctx: &UiContext, entry: &Entry, quiet: bool) {
    if !quiet {
        let pretty = ctx.mode.is_pretty();
        if pretty {
            print(ctx, &styled(&entry.title, styles::bold(), ctx.color));
        } else {
            print(ctx, &kv(ctx, "title", &single_line(&entry.title)));
        }
        print(ctx, &kv(ctx, "ID", entry.id.as_str()));
        print(ctx, &kv(ctx, "Stored", &entry.provenance().to_string()));
        print(ctx, &kv(ctx, "Date", &format_entry_date(&entry.date)));
        if !entry.tags.is_empty() {
            print(ctx, &kv(ctx, "Tags", &entry.tags.join(", ")));
        }
        if let Some(image) = &entry.image {
            print(ctx, &kv(ctx, "Image", &describe_image(image)));
        }
        if let Some(created) = &entry.created_at {
            print(
                ctx,
                &kv(ctx, "Created", &format_timestamp(created, ctx.timezone, pretty)),
            );
        }
        if let Some(updated) = &entry.updated_at {
            print(
                ctx,
                &kv(ctx, "Updated", &format_timestamp(updated, ctx.timezone, pretty)),
            );
        }
        if pretty {
            print(ctx, &divider(ctx));
        } else {
            println!();
        }
    }

    if ctx.mode.is_pretty() {
        for line in wrap(&entry.content, ctx.width.clamp(20, 100)) {
            println!("{}", line);
        }
    } else {
        println!("{}", entry.content);
    }
}
