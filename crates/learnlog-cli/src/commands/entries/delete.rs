use dialoguer::Confirm;

use crate::app::{announce_offline, resolve_entry, AppContext};
use crate::cli::DeleteArgs;
use crate::errors::CliError;
use crate::ui::{badge, print, truncate, with_spinner, Badge, OutputMode};

pub fn handle_delete(ctx: &AppContext, args: &DeleteArgs) -> anyhow::Result<()> {
    let ui = ctx.ui_context(false, None);
    let mut journal = ctx.open_journal(&ui)?;
    let (id, entry) = resolve_entry(&journal, &args.id)?;

    if !args.yes {
        if !ui.is_interactive() {
            return Err(CliError::invalid_input(
                "Refusing to delete without confirmation\nHint: Pass --yes to delete non-interactively.",
            )
            .into());
        }
        let confirmed = Confirm::new()
            .with_prompt(format!("Delete \"{}\" ({})?", truncate(&entry.title, 40), id))
            .default(false)
            .interact()?;
        if !confirmed {
            if !ctx.quiet() {
                match ui.mode {
                    OutputMode::Pretty => print(&ui, &badge(&ui, Badge::Info, "Cancelled")),
                    OutputMode::Plain | OutputMode::Json => println!("status=cancelled"),
                }
            }
            return Ok(());
        }
    }

    let before = journal.mode();
    with_spinner(&ui, "Deleting entry", || journal.delete(&id))?;
    announce_offline(ctx, &ui, &journal, before);

    if !ctx.quiet() {
        match ui.mode {
            OutputMode::Pretty => print(
                &ui,
                &badge(&ui, Badge::Ok, &format!("Deleted \"{}\"", entry.title)),
            ),
            OutputMode::Plain | OutputMode::Json => {
                println!("status=ok");
                println!("deleted={}", id);
            }
        }
    }
    Ok(())
}
