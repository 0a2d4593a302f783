use std::{io, path::PathBuf};

use anyhow::{bail, Context, Result};
use clap::Parser;
use shared::view::{PageSize, SortKey};
use table_core::{load_comments, load_settings, HttpCommentSource, LoadState, TableController};
use tracing_subscriber::EnvFilter;

mod render;
mod repl;

#[derive(Parser, Debug)]
#[command(
    name = "comment-table",
    about = "Fetch the comments collection and browse it as a paged table"
)]
struct Args {
    /// Collection endpoint; overrides settings file and environment.
    #[arg(long)]
    endpoint: Option<String>,
    /// Settings file to use instead of the default search path.
    #[arg(long)]
    config: Option<PathBuf>,
    #[arg(long, default_value = "")]
    search: String,
    /// Column to sort by; repeat to toggle direction.
    #[arg(long = "sort")]
    sort: Vec<SortKey>,
    #[arg(long, default_value_t = 1)]
    page: usize,
    /// Rows per page, or `all` / `-1`.
    #[arg(long, allow_hyphen_values = true)]
    page_size: Option<PageSize>,
    /// Print the derived view as JSON instead of a table.
    #[arg(long)]
    json: bool,
    /// Read table commands from stdin after loading.
    #[arg(short, long)]
    interactive: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();
    let args = Args::parse();

    let mut settings = load_settings(args.config.as_deref()).context("failed to load settings")?;
    if let Some(endpoint) = args.endpoint.clone() {
        settings.endpoint_url = endpoint;
    }
    let page_size = args.page_size.unwrap_or(settings.page_size);

    let source = HttpCommentSource::new(&settings.endpoint_url)
        .with_context(|| format!("invalid endpoint '{}'", settings.endpoint_url))?;

    let mut table = TableController::new(page_size);
    table.apply_fetch(load_comments(&source).await);
    if let LoadState::Failed(failure) = table.load_state() {
        bail!(
            "could not load comments from {}: {failure}",
            settings.endpoint_url
        );
    }

    apply_args(&mut table, &args);

    if args.interactive {
        let stdin = io::stdin();
        repl::run(&mut table, stdin.lock(), io::stdout()).context("interactive session failed")?;
    } else if args.json {
        println!("{}", render::render_json(&table)?);
    } else {
        print!("{}", render::render_table(&table));
    }

    Ok(())
}

fn apply_args(table: &mut TableController, args: &Args) {
    if !args.search.is_empty() {
        table.set_search_term(args.search.clone());
    }
    for key in &args.sort {
        table.set_sort(*key);
    }
    table.set_page(args.page);
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::domain::{Comment, CommentId, PostId};
    use shared::view::SortDirection;

    fn table() -> TableController {
        let comments = (1..=12)
            .map(|id| Comment {
                post_id: PostId(1),
                id: CommentId(id),
                name: format!("name {id}"),
                email: format!("{id}@example.test"),
                body: String::new(),
            })
            .collect();
        TableController::with_comments(comments, PageSize::Fixed(5))
    }

    #[test]
    fn parses_repeated_sort_and_sentinel_page_size() {
        let args = Args::try_parse_from([
            "comment-table",
            "--sort",
            "id",
            "--sort",
            "id",
            "--page-size",
            "-1",
        ])
        .expect("parse");
        assert_eq!(args.sort, vec![SortKey::Id, SortKey::Id]);
        assert_eq!(args.page_size, Some(PageSize::All));
    }

    #[test]
    fn repeated_sort_flag_toggles_direction() {
        let args =
            Args::try_parse_from(["comment-table", "--sort", "id", "--sort", "id", "--page", "3"])
                .expect("parse");
        let mut table = table();
        apply_args(&mut table, &args);
        assert_eq!(table.sort().map(|s| s.direction), Some(SortDirection::Desc));
        assert_eq!(table.current_page(), 3);
        let ids: Vec<i64> = table.visible().iter().map(|c| c.id.0).collect();
        assert_eq!(ids, vec![2, 1]);
    }

    #[test]
    fn rejects_unknown_sort_column() {
        assert!(Args::try_parse_from(["comment-table", "--sort", "postId"]).is_err());
    }
}
