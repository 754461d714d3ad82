use crate::app::AppContext;
use crate::ui::{badge, print, Badge, OutputMode};

pub fn handle_logout(ctx: &AppContext) -> anyhow::Result<()> {
    let ui = ctx.ui_context(false, None);
    let removed = ctx.session_store()?.clear()?;

    if ctx.quiet() {
        return Ok(());
    }
    match ui.mode {
        OutputMode::Pretty => {
            let message = if removed { "Logged out" } else { "No session to remove" };
            print(&ui, &badge(&ui, Badge::Ok, message));
        }
        OutputMode::Plain | OutputMode::Json => {
            println!("status=ok");
            println!("removed={}", removed);
        }
    }
    Ok(())
}
