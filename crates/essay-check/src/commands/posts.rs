//! Posts command: search and category filter over a JSON list of posts.

use anyhow::Context;
use camino::Utf8PathBuf;
use clap::Args;
use owo_colors::OwoColorize;
use tracing::{debug, instrument};

use essay_check_core::blog::{self, BlogPost, CategoryFilter};

use super::read_input_file;

/// Arguments for the `posts` subcommand.
#[derive(Args, Debug)]
pub struct PostsArgs {
    /// JSON array of posts (`-` for stdin).
    pub file: Utf8PathBuf,

    /// Case-insensitive text to find in titles or excerpts.
    #[arg(short, long, default_value = "")]
    pub search: String,

    /// Category slug, or `all`.
    #[arg(long, default_value = "all")]
    pub category: String,
}

/// Print the posts that remain visible after filtering.
#[instrument(name = "cmd_posts", skip_all, fields(file = %args.file))]
pub fn cmd_posts(
    args: PostsArgs,
    global_json: bool,
    max_input_bytes: Option<usize>,
) -> anyhow::Result<()> {
    debug!(search = %args.search, category = %args.category, "executing posts command");

    let content = read_input_file(&args.file, max_input_bytes)?;
    let posts: Vec<BlogPost> = serde_json::from_str(&content)
        .with_context(|| format!("failed to parse posts from {}", args.file))?;

    let filter = CategoryFilter::parse(&args.category);
    let visible = blog::filter_posts(&posts, &args.search, &filter);
    debug!(total = posts.len(), visible = visible.len(), "filtered posts");

    if global_json {
        println!("{}", serde_json::to_string_pretty(&visible)?);
        return Ok(());
    }

    if visible.is_empty() {
        println!("{}", "No posts match.".dimmed());
        return Ok(());
    }
    for post in visible {
        println!("{} {}", post.title.bold(), format!("[{}]", post.category).dimmed());
        if !post.excerpt.is_empty() {
            println!("  {}", post.excerpt);
        }
    }
    Ok(())
}
