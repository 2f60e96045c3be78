//! Folio - markdown toolbar and preview from the command line.
//!
//! # Usage
//!
//! ```bash
//! folio actions
//! folio apply post.md --action bold --start 3 --end 8
//! folio preview post.md --out post.html --watch
//! folio records snapshot.json --table portfolio_items --view list
//! ```

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use folio::config::{
    ConfigFlags, clear_config_flags, global_config_path, load_config_flags, local_override_path,
    save_config_flags,
};
use folio::content::{CardView, MemoryStore, OrderBy, Record, RecordStore, Table, excerpt};
use folio::editor::EditorBuffer;
use folio::preview::{ComrakRenderer, LivePreview};
use folio::toolbar::{ACTIONS, Action};

/// Markdown toolbar and live preview
#[derive(Parser, Debug)]
#[command(name = "folio", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Keep soft line breaks instead of rendering them as <br>
    #[arg(long, global = true)]
    no_breaks: bool,

    /// Disable GitHub-flavored markdown extensions
    #[arg(long, global = true)]
    no_gfm: bool,

    /// Characters kept in record excerpts
    #[arg(long, global = true, value_name = "N")]
    excerpt_limit: Option<usize>,

    /// Save current command-line flags as defaults
    #[arg(long, global = true)]
    save: bool,

    /// Clear saved defaults
    #[arg(long, global = true)]
    clear: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List toolbar actions and their button labels
    Actions,

    /// Apply a toolbar action to a markdown file
    Apply {
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Action tag, e.g. bold, quote, link
        #[arg(short, long)]
        action: String,

        /// Selection start (chars)
        #[arg(long, default_value_t = 0)]
        start: usize,

        /// Selection end (chars); defaults to the start
        #[arg(long)]
        end: Option<usize>,

        /// Write the result back to FILE instead of printing it
        #[arg(long)]
        write: bool,

        /// Print the new text and selection as JSON
        #[arg(long)]
        json: bool,
    },

    /// Render a markdown file to HTML
    Preview {
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Write HTML here instead of stdout
        #[arg(short, long, value_name = "PATH")]
        out: Option<PathBuf>,

        /// Re-render whenever FILE changes
        #[arg(short, long)]
        watch: bool,
    },

    /// List records from a JSON snapshot, newest first
    Records {
        #[arg(value_name = "SNAPSHOT")]
        snapshot: PathBuf,

        #[arg(long, value_enum, default_value = "blog_posts")]
        table: Table,

        #[arg(long)]
        limit: Option<usize>,

        /// Card layout whose excerpt length to use (defaults per table)
        #[arg(long, value_enum)]
        view: Option<CardView>,
    },
}

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let global_path = global_config_path();
    let local_path = local_override_path();
    let cli_flags = ConfigFlags {
        no_breaks: cli.no_breaks,
        no_gfm: cli.no_gfm,
        watch: matches!(cli.command, Command::Preview { watch: true, .. }),
        excerpt_limit: cli.excerpt_limit,
    };

    if cli.clear {
        clear_config_flags(&global_path)?;
    }
    if cli.save {
        save_config_flags(&global_path, &cli_flags)?;
    }

    let file_flags = if cli.clear {
        ConfigFlags::default()
    } else {
        let global_flags = load_config_flags(&global_path)?;
        let local_flags = load_config_flags(&local_path)?;
        global_flags.union(&local_flags)
    };
    let effective = file_flags.union(&cli_flags);

    match cli.command {
        Command::Actions => {
            for spec in &ACTIONS {
                println!("{:<12} {}", spec.tag, spec.label);
            }
            Ok(())
        }
        Command::Apply {
            file,
            action,
            start,
            end,
            write,
            json,
        } => apply(&file, &action, start, end.unwrap_or(start), write, json),
        Command::Preview { file, out, .. } => preview(&file, out.as_deref(), &effective),
        Command::Records {
            snapshot,
            table,
            limit,
            view,
        } => {
            let view = view.unwrap_or_else(|| table.default_view());
            records(&snapshot, table, limit, effective.excerpt_limit(view))
        }
    }
}

fn apply(file: &Path, tag: &str, start: usize, end: usize, write: bool, json: bool) -> Result<()> {
    let action: Action = tag.parse()?;
    let text =
        fs::read_to_string(file).with_context(|| format!("Failed to read {}", file.display()))?;
    let mut buffer = EditorBuffer::from_text(&text);
    buffer.select(start, end);
    let result = action.apply(&mut buffer);

    if write {
        fs::write(file, &result.value)
            .with_context(|| format!("Failed to write {}", file.display()))?;
    }
    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        if !write {
            print!("{}", result.value);
        }
        eprintln!(
            "selection {}..{}",
            result.selection.start, result.selection.end
        );
    }
    Ok(())
}

fn emit(html: &str, out: Option<&Path>) -> Result<()> {
    match out {
        Some(path) => {
            fs::write(path, html).with_context(|| format!("Failed to write {}", path.display()))
        }
        None => {
            print!("{html}");
            Ok(())
        }
    }
}

fn preview(file: &Path, out: Option<&Path>, flags: &ConfigFlags) -> Result<()> {
    let renderer = ComrakRenderer::new(flags.render_options());
    let mut live = LivePreview::open(file, renderer)?;
    emit(live.html(), out)?;
    if !flags.watch {
        return Ok(());
    }

    live.watch(Duration::from_millis(200))
        .with_context(|| format!("Failed to watch {}", live.path().display()))?;
    loop {
        std::thread::sleep(Duration::from_millis(250));
        match live.poll() {
            Ok(true) => emit(live.html(), out)?,
            Ok(false) => {}
            // The file can vanish briefly during an editor's atomic save.
            Err(err) => tracing::warn!("{err:#}"),
        }
    }
}

fn records(snapshot: &Path, table: Table, limit: Option<usize>, excerpt_limit: usize) -> Result<()> {
    let json = fs::read_to_string(snapshot)
        .with_context(|| format!("Failed to read {}", snapshot.display()))?;
    let store = MemoryStore::from_snapshot_json(&json)
        .with_context(|| format!("Failed to load {}", snapshot.display()))?;
    let rows = store.list(table, &OrderBy::default(), limit)?;
    if rows.is_empty() {
        println!("データがありません");
        return Ok(());
    }
    for row in &rows {
        println!(
            "{}\t{}\t{}\t{}",
            row.id,
            row.created_date(),
            row.title(),
            excerpt(body(row), excerpt_limit)
        );
    }
    Ok(())
}

fn body(row: &Record) -> &str {
    row.field_str("content")
        .or_else(|| row.field_str("description"))
        .unwrap_or_default()
}
