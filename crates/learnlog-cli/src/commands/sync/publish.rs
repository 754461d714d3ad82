use dialoguer::Confirm;
use learnlog_core::SyncMode;

use crate::app::{announce_offline, AppContext};
use crate::cli::PublishArgs;
use crate::errors::CliError;
use crate::ui::{badge, hint, print, receipt, with_spinner, Badge, OutputMode};

pub fn handle_publish(ctx: &AppContext, args: &PublishArgs) -> anyhow::Result<()> {
    let ui = ctx.ui_context(false, None);
    let mut journal = ctx.open_journal(&ui)?;

    let pending = journal.local().count();
    if pending == 0 {
        if !ctx.quiet() {
            match ui.mode {
                OutputMode::Pretty => print(&ui, &badge(&ui, Badge::Info, "Nothing to publish")),
                OutputMode::Plain | OutputMode::Json => {
                    println!("status=ok");
                    println!("published=0");
                }
            }
        }
        return Ok(());
    }

    if !journal.is_online() {
        return Err(CliError::remote_unavailable(
            format!(
                "Backend {} is unreachable; {} local entries were kept",
                journal.remote().base_url(),
                pending
            ),
            "Hint: Run `learnlog retry` once the backend is back.",
        )
        .into());
    }

    if !args.yes && ui.is_interactive() {
        let confirmed = Confirm::new()
            .with_prompt(format!("Publish {} local entries to the backend?", pending))
            .default(true)
            .interact()?;
        if !confirmed {
            if !ctx.quiet() {
                print(&ui, &badge(&ui, Badge::Info, "Cancelled"));
            }
            return Ok(());
        }
    }

    let report = with_spinner(&ui, "Publishing entries", || journal.publish_local())?;
    announce_offline(ctx, &ui, &journal, SyncMode::Online);

    if !ctx.quiet() {
        if ui.mode.is_pretty() {
            let pairs: Vec<(String, String)> = report
                .published
                .iter()
                .map(|(local, remote)| (local.to_string(), remote.to_string()))
                .collect();
            let items: Vec<(&str, &str)> = pairs
                .iter()
                .map(|(local, remote)| (local.as_str(), remote.as_str()))
                .collect();
            let title = format!("Published {} of {} entries", report.published.len(), pending);
            print(&ui, &receipt(&ui, &title, &items));
            if report.remaining > 0 {
                print(
                    &ui,
                    &hint(
                        &ui,
                        &format!("{} entries left in the offline snapshot", report.remaining),
                    ),
                );
            }
        } else {
            let status = if report.error.is_some() { "partial" } else { "ok" };
            println!("status={}", status);
            println!("published={}", report.published.len());
            println!("remaining={}", report.remaining);
            for (local, remote) in &report.published {
                println!("{}\t{}", local, remote);
            }
        }
    }

    match report.error {
        Some(e) => Err(e.into()),
        None => Ok(()),
    }
}
