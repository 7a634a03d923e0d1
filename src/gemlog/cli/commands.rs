use super::print::{print_messages, print_posts};
use super::setup::{Cli, Commands, join_title};
use clap::Parser;
use gemlog::api::GemlogApi;
use gemlog::config::{BlogPaths, GemlogConfig};
use gemlog::editor::{editor_command, open_in_editor};
use gemlog::error::Result;
use gemlog::store::fs::FileStore;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

struct AppContext {
    api: GemlogApi<FileStore>,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let mut ctx = init_context(&cli)?;

    match cli.command {
        Commands::New { title, draft } => handle_new(&mut ctx, &join_title(&title), draft),
        Commands::List { drafts } => handle_list(&ctx, drafts),
        Commands::Delete { title } => handle_delete(&mut ctx, &join_title(&title)),
        Commands::Edit { title } => handle_edit(&ctx, &join_title(&title)),
        Commands::PushDraft { title } => handle_push_draft(&mut ctx, &join_title(&title)),
        Commands::PopPublic { title } => handle_pop_public(&mut ctx, &join_title(&title)),
        Commands::Build => handle_build(&ctx),
        Commands::Path { title } => handle_path(&ctx, &join_title(&title)),
        Commands::Init => handle_init(&ctx),
    }
}

/// Logs go to stderr. RUST_LOG wins; otherwise warnings, or debug with --verbose.
fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .without_time()
        .try_init();
}

fn init_context(cli: &Cli) -> Result<AppContext> {
    let root = match &cli.root {
        Some(root) => root.clone(),
        None => std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
    };
    load_env_file(&root);
    let config = GemlogConfig::load(&root)?;
    let paths = BlogPaths::from_config(&root, &config);
    debug!(root = %root.display(), ?paths, "resolved blog layout");

    let store = FileStore::new(paths).with_file_ext(config.get_file_ext());
    Ok(AppContext {
        api: GemlogApi::new(store, root, config),
    })
}

/// Reads `.env` from the blog root. Variables already set in the environment win.
fn load_env_file(root: &Path) {
    let path = root.join(".env");
    match dotenvy::from_path(&path) {
        Ok(()) => debug!(path = %path.display(), "loaded environment file"),
        Err(e) if e.not_found() => {}
        Err(e) => warn!(path = %path.display(), error = %e, "ignoring unreadable environment file"),
    }
}

fn handle_new(ctx: &mut AppContext, title: &str, draft: bool) -> Result<()> {
    let result = ctx.api.create_post(title, draft)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_list(ctx: &AppContext, drafts: bool) -> Result<()> {
    let result = ctx.api.list_posts(drafts)?;
    print_posts(&result.listed_posts);
    print_messages(&result.messages);
    Ok(())
}

fn handle_delete(ctx: &mut AppContext, title: &str) -> Result<()> {
    let result = ctx.api.delete_post(title)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_edit(ctx: &AppContext, title: &str) -> Result<()> {
    let result = ctx.api.edit_post(title)?;
    let editor = editor_command(ctx.api.config().editor.as_deref());
    for path in &result.post_paths {
        open_in_editor(&editor, path)?;
    }
    print_messages(&result.messages);
    Ok(())
}

fn handle_push_draft(ctx: &mut AppContext, title: &str) -> Result<()> {
    let result = ctx.api.push_draft(title)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_pop_public(ctx: &mut AppContext, title: &str) -> Result<()> {
    let result = ctx.api.pop_public(title)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_build(ctx: &AppContext) -> Result<()> {
    let result = ctx.api.build_site()?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_path(ctx: &AppContext, title: &str) -> Result<()> {
    let result = ctx.api.edit_post(title)?;
    for path in &result.post_paths {
        println!("{}", path.display());
    }
    Ok(())
}

fn handle_init(ctx: &AppContext) -> Result<()> {
    let result = ctx.api.init()?;
    print_messages(&result.messages);
    Ok(())
}
