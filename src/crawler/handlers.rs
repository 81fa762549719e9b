//! Extraction handlers, one per task type
//!
//! | From | Produces |
//! |------|----------|
//! | `ListingKb` | one `DetailKb` per table-of-contents anchor |
//! | `DetailKb` | an artifact (article markdown) |
//! | `ListingForum` | one `DetailForum` per solved thread, plus at most one `ListingForum` for the next page |
//! | `DetailForum` | an artifact (question and answers markdown) |
//!
//! Handlers are synchronous and side-effect free apart from drawing sequence
//! ids; the pipeline writes the returned artifact afterwards.

use crate::crawler::parser::{
    discover_links, fragment_to_markdown, page_title, DiscoveredLink, Selectors,
};
use crate::output::{Artifact, ArtifactMetadata};
use crate::task::{ArtifactTicket, SequenceAllocator, Task};
use scraper::{Html, Selector};
use thiserror::Error;

/// Per-task extraction failures
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("No content matched selector `{selector}` on {url}")]
    MissingContent { url: String, selector: &'static str },

    #[error("Markdown conversion failed for {url}: {message}")]
    Markdown { url: String, message: String },
}

/// Shared, read-only state every handler needs
#[derive(Debug, Clone, Copy)]
pub struct HandlerContext<'a> {
    pub selectors: &'a Selectors,
    pub sequence: &'a SequenceAllocator,
}

/// What a handler hands back to the pipeline
#[derive(Debug, Default)]
pub struct HandlerOutput {
    /// Tasks for the next round
    pub followups: Vec<Task>,

    /// Artifact to write, for terminal handlers
    pub artifact: Option<Artifact>,
}

impl HandlerOutput {
    fn followups(followups: Vec<Task>) -> Self {
        Self {
            followups,
            artifact: None,
        }
    }

    fn artifact(artifact: Artifact) -> Self {
        Self {
            followups: Vec::new(),
            artifact: Some(artifact),
        }
    }
}

/// Knowledge-base table of contents: one article task per anchor
pub fn listing_kb(document: &Html, ctx: HandlerContext<'_>) -> HandlerOutput {
    let followups = discover_links(document, &ctx.selectors.kb_toc_links)
        .into_iter()
        .map(|DiscoveredLink { href, title }| Task::detail_kb(href, title, ctx.sequence))
        .collect::<Vec<_>>();

    tracing::debug!("Discovered {} knowledge-base articles", followups.len());
    HandlerOutput::followups(followups)
}

/// Knowledge-base article: the article container becomes the document
pub fn detail_kb(
    task: &Task,
    ticket: &ArtifactTicket,
    document: &Html,
    ctx: HandlerContext<'_>,
) -> Result<HandlerOutput, ExtractError> {
    let article = document
        .select(&ctx.selectors.kb_article)
        .next()
        .ok_or_else(|| ExtractError::MissingContent {
            url: task.url.clone(),
            selector: "kb_article",
        })?;

    let markdown = convert(task, &article.inner_html())?;
    let title = ticket
        .title
        .clone()
        .or_else(|| page_title(document, ctx.selectors));

    Ok(HandlerOutput::artifact(build_artifact(
        task, ticket, title, markdown,
    )))
}

/// Forum listing: one thread task per solved thread, plus the next page
pub fn listing_forum(document: &Html, ctx: HandlerContext<'_>) -> HandlerOutput {
    let mut followups = discover_links(document, &ctx.selectors.forum_thread_links)
        .into_iter()
        .map(|DiscoveredLink { href, title }| Task::detail_forum(href, title, ctx.sequence))
        .collect::<Vec<_>>();
    let threads = followups.len();

    // Only the first pagination anchor continues the listing
    let next_page = discover_links(document, &ctx.selectors.forum_next_page)
        .into_iter()
        .next();
    if let Some(link) = &next_page {
        followups.push(Task::listing_forum(link.href.clone()));
    }

    tracing::debug!(
        "Discovered {} solved threads{}",
        threads,
        if next_page.is_some() {
            " and a next page"
        } else {
            ""
        }
    );
    HandlerOutput::followups(followups)
}

/// Forum thread: question paragraphs, then answers, in one document
pub fn detail_forum(
    task: &Task,
    ticket: &ArtifactTicket,
    document: &Html,
    ctx: HandlerContext<'_>,
) -> Result<HandlerOutput, ExtractError> {
    let question = convert_all(task, document, &ctx.selectors.forum_question)?;
    let answers = convert_all(task, document, &ctx.selectors.forum_answers)?;

    let title = ticket
        .title
        .clone()
        .or_else(|| page_title(document, ctx.selectors));
    let markdown = compose_thread_markdown(&question, &answers);

    Ok(HandlerOutput::artifact(build_artifact(
        task, ticket, title, markdown,
    )))
}

/// Joins converted fragments into the thread document layout
///
/// ```text
/// ## Question
/// <paragraphs, blank-line separated>
///
/// ## Answers
/// <answers, blank-line separated>
/// ```
pub fn compose_thread_markdown(question: &[String], answers: &[String]) -> String {
    format!(
        "## Question\n{}\n\n## Answers\n{}",
        question.join("\n\n"),
        answers.join("\n\n")
    )
}

fn convert(task: &Task, fragment: &str) -> Result<String, ExtractError> {
    fragment_to_markdown(fragment).map_err(|e| ExtractError::Markdown {
        url: task.url.clone(),
        message: e.to_string(),
    })
}

/// Converts every match of `selector`, dropping fragments that come out blank
fn convert_all(
    task: &Task,
    document: &Html,
    selector: &Selector,
) -> Result<Vec<String>, ExtractError> {
    let mut converted = Vec::new();
    for element in document.select(selector) {
        let markdown = convert(task, &element.inner_html())?;
        if !markdown.is_empty() {
            converted.push(markdown);
        }
    }
    Ok(converted)
}

fn build_artifact(
    task: &Task,
    ticket: &ArtifactTicket,
    title: Option<String>,
    markdown: String,
) -> Artifact {
    Artifact {
        markdown,
        metadata: ArtifactMetadata {
            source_url: task.url.clone(),
            source_url_title: title,
            id: ticket.sequence_id,
            task_type: task.task_type(),
        },
    }
}
