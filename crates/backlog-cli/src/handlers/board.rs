use backlog_engine::ConversionReport;
use serde_json::json;

use crate::context::CliContext;
use crate::output;

/// The `--limit` flag is folded into the config before the controller exists.
pub async fn handle_boards(ctx: &mut CliContext) -> anyhow::Result<()> {
    let boards = match ctx.controller.load_boards().await {
        Ok(boards) => boards.to_vec(),
        Err(err) => ctx.fail(&err),
    };
    let notifications = ctx.notifications();
    output::output_list(boards, notifications);
    Ok(())
}

pub async fn handle_convert(
    ctx: &mut CliContext,
    items: Vec<String>,
    board: Option<String>,
) -> anyhow::Result<()> {
    select(ctx, &items).await;
    match ctx.controller.convert_to_existing_board(board).await {
        Ok(report) => report_success(ctx, report),
        Err(err) => ctx.fail(&err),
    }
    Ok(())
}

pub async fn handle_weekly(
    ctx: &mut CliContext,
    items: Vec<String>,
    title: Option<String>,
) -> anyhow::Result<()> {
    select(ctx, &items).await;
    match ctx.controller.start_weekly_board(title.as_deref()).await {
        Ok(report) => report_success(ctx, report),
        Err(err) => ctx.fail(&err),
    }
    Ok(())
}

/// Select the given ids. Nothing is fetched for an empty selection, so the
/// "select items first" check fires without touching the network.
async fn select(ctx: &mut CliContext, items: &[String]) {
    if items.is_empty() {
        return;
    }
    ctx.load().await;
    for id in items {
        if !ctx.controller.items().contains(id) {
            output::output_error(&format!("Backlog item not found: {}", id), ctx.notifications());
        }
        if !ctx.controller.selection().contains(id) {
            ctx.controller.toggle_selection(id);
        }
    }
}

fn report_success(ctx: &mut CliContext, report: ConversionReport) {
    let notifications = ctx.notifications();
    output::output_success(
        json!({
            "moved": report.moved,
            "message": report.message,
            "remaining": ctx.controller.items().len(),
        }),
        notifications,
    );
}
