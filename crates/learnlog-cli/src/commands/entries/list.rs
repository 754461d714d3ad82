use learnlog_core::store::EntryFilter;

use crate::app::AppContext;
use crate::cli::ListArgs;
use crate::constants::DEFAULT_LIST_LIMIT;
use crate::helpers::{parse_date_arg, parse_output_format, parse_until_arg};
use crate::output::{entries_json, print_entry_list, print_json};

pub fn handle_list(ctx: &AppContext, args: &ListArgs) -> anyhow::Result<()> {
    let format = parse_output_format(args.format.as_deref())?;
    let ui = ctx.ui_context(args.json, format.map(|f| f.as_str()));

    let mut filter = EntryFilter::new();
    if let Some(tag) = &args.tag {
        filter = filter.tag(tag.clone());
    }
    if let Some(value) = &args.since {
        filter = filter.since(parse_date_arg("--since", value)?);
    }
    if let Some(value) = &args.until {
        filter = filter.until(parse_until_arg("--until", value)?);
    }

    let journal = ctx.open_journal(&ui)?;
    let matching = filter.apply(journal.entries());
    let total = matching.len();

    let limit = match (args.all, args.limit) {
        (true, _) => total,
        (false, Some(limit)) => limit,
        (false, None) => DEFAULT_LIST_LIMIT,
    };
    let shown: Vec<_> = matching.into_iter().take(limit).collect();

    if ui.mode.is_json() {
        return print_json(&entries_json(&shown));
    }
    print_entry_list(&ui, &shown, total, ctx.quiet());
    Ok(())
}
