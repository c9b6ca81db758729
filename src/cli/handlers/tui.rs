use anyhow::Result;

use super::CommandContext;

pub fn handle_tui(ctx: CommandContext, manual: bool) -> Result<()> {
    crate::tui::run_tui(&ctx.config, manual)?;
    Ok(())
}
