use crate::app::{resolve_entry, AppContext};
use crate::cli::ShowArgs;
use crate::output::{entry_json, print_entry, print_json};

pub fn handle_show(ctx: &AppContext, args: &ShowArgs) -> anyhow::Result<()> {
    let ui = ctx.ui_context(args.json, None);
    let journal = ctx.open_journal(&ui)?;

    let (_, entry) = resolve_entry(&journal, &args.id)?;

    if ui.mode.is_json() {
        return print_json(&entry_json(&entry));
    }
    print_entry(&ui, &entry, ctx.quiet());
    Ok(())
}
