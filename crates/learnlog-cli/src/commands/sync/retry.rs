use learnlog_core::SyncMode;

use crate::app::{build_journal, AppContext};
use crate::errors::CliError;
use crate::ui::{badge, hint, print, with_spinner, Badge};

pub fn handle_retry(ctx: &AppContext) -> anyhow::Result<()> {
    let ui = ctx.ui_context(false, None);
    let mut journal = build_journal(ctx, true)?;

    let mode = with_spinner(&ui, "Contacting backend", || journal.retry())?;
    if mode == SyncMode::Offline {
        return Err(CliError::remote_unavailable(
            format!("Backend {} is still unreachable", journal.remote().base_url()),
            "Hint: Check the URL with `learnlog status`; entries keep going to the offline snapshot.",
        )
        .into());
    }

    if ctx.quiet() {
        return Ok(());
    }
    if ui.mode.is_pretty() {
        print(
            &ui,
            &badge(
                &ui,
                Badge::Ok,
                &format!("Back online ({} entries)", journal.entries().len()),
            ),
        );
    } else {
        println!("status=ok");
        println!("mode={}", mode);
        println!("entries={}", journal.entries().len());
    }

    let pending = journal.local().count();
    if pending > 0 {
        print(
            &ui,
            &hint(
                &ui,
                &format!("{} local entries can be pushed with `learnlog publish`", pending),
            ),
        );
    }
    Ok(())
}
