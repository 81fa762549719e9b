//! Task dispatcher
//!
//! Routes a parsed page to the handler for its task's state. `TaskKind` is a
//! closed enum, so every state has exactly one handler and there is no
//! fallback branch.

use crate::crawler::handlers::{self, ExtractError, HandlerContext, HandlerOutput};
use crate::crawler::parser::parse_document;
use crate::task::{Task, TaskKind};
use scraper::Html;

/// Invokes the handler selected by `task.kind`
pub fn dispatch(
    task: &Task,
    document: &Html,
    ctx: HandlerContext<'_>,
) -> Result<HandlerOutput, ExtractError> {
    match &task.kind {
        TaskKind::ListingKb => Ok(handlers::listing_kb(document, ctx)),
        TaskKind::DetailKb(ticket) => handlers::detail_kb(task, ticket, document, ctx),
        TaskKind::ListingForum => Ok(handlers::listing_forum(document, ctx)),
        TaskKind::DetailForum(ticket) => handlers::detail_forum(task, ticket, document, ctx),
    }
}

/// Parses `body` and dispatches it
///
/// The document tree is not `Send`, so it is created and dropped here rather
/// than held by the async pipeline.
pub fn dispatch_page(
    task: &Task,
    body: &str,
    ctx: HandlerContext<'_>,
) -> Result<HandlerOutput, ExtractError> {
    let document = parse_document(body);
    dispatch(task, &document, ctx)
}
