use backlog_domain::{FieldUpdate, ItemUpdate, NewBacklogItem};
use backlog_engine::ReorderOutcome;
use serde_json::json;

use crate::cli::{AddArgs, EditArgs, ListArgs};
use crate::context::CliContext;
use crate::handlers::parse_priority;
use crate::output;

pub async fn handle_list(ctx: &mut CliContext, args: ListArgs) -> anyhow::Result<()> {
    if let Some(priority) = &args.priority {
        ctx.controller.set_priority(Some(parse_priority(priority)?));
    }
    if let Some(search) = args.search {
        ctx.controller.set_search(search);
    }
    ctx.load().await;

    let items: Vec<_> = ctx
        .controller
        .visible_items()
        .into_iter()
        .cloned()
        .collect();
    let notifications = ctx.notifications();
    output::output_list(items, notifications);
    Ok(())
}

pub async fn handle_move(ctx: &mut CliContext, item: String, onto: String) -> anyhow::Result<()> {
    ctx.load().await;

    // A stale or self drag is ignored, not an error.
    let outcome = ctx.controller.reorder(&item, &onto);
    ctx.controller.settle().await;

    let notifications = ctx.notifications();
    if let Some(failed) = notifications.iter().find(|n| n.is_error()) {
        let message = failed.message.clone();
        output::output_error(&message, notifications);
    }

    let (from, to) = match outcome {
        ReorderOutcome::Applied { plan, .. } => (Some(plan.from), Some(plan.to)),
        ReorderOutcome::Ignored => (None, None),
    };
    output::output_success(
        json!({
            "moved": from.is_some(),
            "from": from,
            "to": to,
            "order": ctx.controller.items().ids(),
        }),
        notifications,
    );
    Ok(())
}

pub async fn handle_add(ctx: &mut CliContext, args: AddArgs) -> anyhow::Result<()> {
    let mut item = NewBacklogItem::new(args.title, parse_priority(&args.priority)?);
    item.story_points = args.points;

    match ctx.controller.create_item(item).await {
        Ok(created) => {
            let notifications = ctx.notifications();
            output::output_success(&created, notifications);
        }
        Err(err) => ctx.fail(&err),
    }
    Ok(())
}

pub async fn handle_edit(ctx: &mut CliContext, args: EditArgs) -> anyhow::Result<()> {
    let update = build_item_update(&args)?;
    match ctx.controller.update_item(&args.id, update).await {
        Ok(updated) => {
            let notifications = ctx.notifications();
            output::output_success(&updated, notifications);
        }
        Err(err) => ctx.fail(&err),
    }
    Ok(())
}

pub async fn handle_remove(ctx: &mut CliContext, id: String) -> anyhow::Result<()> {
    match ctx.controller.delete_item(&id).await {
        Ok(()) => {
            let notifications = ctx.notifications();
            output::output_success(json!({ "deleted": id }), notifications);
        }
        Err(err) => ctx.fail(&err),
    }
    Ok(())
}

fn build_item_update(args: &EditArgs) -> anyhow::Result<ItemUpdate> {
    let priority = match &args.priority {
        Some(p) => Some(parse_priority(p)?),
        None => None,
    };
    let story_points = if args.clear_points {
        FieldUpdate::Clear
    } else {
        args.points
            .map(FieldUpdate::Set)
            .unwrap_or(FieldUpdate::NoChange)
    };
    Ok(ItemUpdate {
        title: args.title.clone(),
        priority,
        story_points,
    })
}
