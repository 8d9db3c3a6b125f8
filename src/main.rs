mod cli;

use std::io::{self, BufRead, Read, Write};

use anyhow::Context;
use tracing_subscriber::{filter::EnvFilter, fmt, prelude::*};

use clap::Parser;
use cli::{Cli, Commands, IsTerminal, SelectAction};
use glow_core::{
    format_response, load_direction, save_direction, Advisor, Catalog, Direction, FileStore,
    FilterState, Product, SelectionSet,
};
use glow_model::ChatError;

/// Fallback shown when a chat response fails the shape check.
const CHAT_FALLBACK: &str = "Unable to get response from API";
/// Fallback shown when a routine response fails the shape check.
const ROUTINE_FALLBACK: &str = "Unable to generate routine. Please try again.";
/// Guard shown when a routine is requested with nothing selected.
const EMPTY_SELECTION_GUARD: &str =
    "Please select at least one product to generate a routine.";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    // Handle subcommands that don't need full wiring first
    if let Some(Commands::Completions { shell }) = &cli.command {
        cli::print_completions(*shell);
        return Ok(());
    }

    let config = glow_config::load(cli.config.as_deref())?;
    tracing::debug!(provider = %config.model.provider, model = %config.model.name, "config loaded");

    match cli.command {
        Some(Commands::Completions { .. }) => unreachable!("handled above"),
        Some(Commands::ShowConfig) => {
            println!("{}", serde_yaml::to_string(&config).unwrap_or_default());
            Ok(())
        }
        Some(Commands::Products { category, search, json }) => {
            let catalog = Catalog::from_config(&config.catalog)?;
            let selection = SelectionSet::open(FileStore::from_config(&config.store));
            let state = FilterState { category, search };
            print_products(&catalog, &selection, &state, json)
        }
        Some(Commands::Show { id }) => {
            let catalog = Catalog::from_config(&config.catalog)?;
            let product = catalog
                .get(id)
                .with_context(|| format!("no product with id {id}"))?;
            print_product_detail(product);
            Ok(())
        }
        Some(Commands::Categories) => {
            let catalog = Catalog::from_config(&config.catalog)?;
            for c in catalog.categories() {
                println!("{c}");
            }
            Ok(())
        }
        Some(Commands::Select { action }) => {
            let catalog = Catalog::from_config(&config.catalog)?;
            let selection = SelectionSet::open(FileStore::from_config(&config.store));
            run_select(action, &catalog, selection)
        }
        Some(Commands::Routine { html }) => {
            let selection = SelectionSet::open(FileStore::from_config(&config.store));
            if selection.is_empty() {
                println!("{EMPTY_SELECTION_GUARD}");
                return Ok(());
            }
            let mut advisor = Advisor::from_config(&config)?;
            match advisor.generate_routine(selection.products()).await {
                Ok(reply) => {
                    println!("{}", render(&reply, html));
                    Ok(())
                }
                Err(e) => {
                    println!("{}", failure_message(&e, ROUTINE_FALLBACK));
                    std::process::exit(1);
                }
            }
        }
        Some(Commands::Chat { prompt, html }) => {
            let mut advisor = Advisor::from_config(&config)?;
            run_chat(&mut advisor, prompt, html).await
        }
        Some(Commands::Direction { value }) => {
            let mut store = FileStore::from_config(&config.store);
            match value {
                None => {
                    println!("{}", load_direction(&store));
                    Ok(())
                }
                Some(v) => {
                    let dir = Direction::parse(&v)
                        .with_context(|| format!("invalid direction {v:?} (expected \"ltr\" or \"rtl\")"))?;
                    save_direction(&mut store, dir)
                }
            }
        }
        // Bare prompt → one advisor turn, same as `glow chat <PROMPT>`
        None => {
            let mut advisor = Advisor::from_config(&config)?;
            run_chat(&mut advisor, cli.prompt, false).await
        }
    }
}

// ─── Catalog rendering ───────────────────────────────────────────────────────

fn print_products(
    catalog: &Catalog,
    selection: &SelectionSet<FileStore>,
    state: &FilterState,
    as_json: bool,
) -> anyhow::Result<()> {
    let visible = catalog.filter(state);

    if as_json {
        println!("{}", serde_json::to_string_pretty(&visible)?);
        return Ok(());
    }

    if visible.is_empty() {
        println!("No products match the current filter.");
        return Ok(());
    }

    // Determine column widths.
    let name_w = visible.iter().map(|p| p.name.len()).max().unwrap_or(10).max(10);
    let brand_w = visible.iter().map(|p| p.brand.len()).max().unwrap_or(8).max(8);

    println!(
        "   {:>4}  {:<name_w$}  {:<brand_w$}  CATEGORY",
        "ID", "NAME", "BRAND",
        name_w = name_w, brand_w = brand_w,
    );
    println!("{}", "-".repeat(name_w + brand_w + 25));

    for p in &visible {
        // Selected products must always read as selected wherever they are rendered
        let marker = if selection.contains(p.id) { "*" } else { " " };
        println!(
            "{marker}  {:>4}  {:<name_w$}  {:<brand_w$}  {}",
            p.id, p.name, p.brand, p.category,
            name_w = name_w, brand_w = brand_w,
        );
    }
    println!("\nTotal: {} product(s)", visible.len());
    Ok(())
}

fn print_product_detail(p: &Product) {
    println!("{}", p.name);
    println!("{}", p.brand);
    println!("category: {}", p.category);
    println!("image:    {}", p.image);
    println!("\n{}", p.description);
}

// ─── Selection commands ──────────────────────────────────────────────────────

fn run_select(
    action: SelectAction,
    catalog: &Catalog,
    mut selection: SelectionSet<FileStore>,
) -> anyhow::Result<()> {
    match action {
        SelectAction::Add { id } => {
            let product = catalog.get(id).with_context(|| format!("no product with id {id}"))?;
            if selection.contains(id) {
                println!("Already selected: {}", product.name);
            } else {
                selection.toggle(product)?;
                println!("Selected: {}", product.name);
            }
        }
        SelectAction::Remove { id } => {
            if selection.remove(id)? {
                println!("Removed product {id} from the selection.");
            } else {
                println!("Product {id} was not selected.");
            }
        }
        SelectAction::Toggle { id } => {
            let product = catalog.get(id).with_context(|| format!("no product with id {id}"))?;
            if selection.toggle(product)? {
                println!("Selected: {}", product.name);
            } else {
                println!("Deselected: {}", product.name);
            }
        }
        SelectAction::Clear => {
            selection.clear()?;
            println!("Selection cleared.");
        }
        SelectAction::Show { json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(selection.products())?);
            } else if selection.is_empty() {
                println!("No products selected yet");
            } else {
                for p in selection.products() {
                    println!("{:>4}  {}  ({})", p.id, p.name, p.brand);
                }
                println!("\nTotal: {} selected", selection.len());
            }
        }
    }
    Ok(())
}

// ─── Chat ────────────────────────────────────────────────────────────────────

async fn run_chat(advisor: &mut Advisor, prompt: Option<String>, html: bool) -> anyhow::Result<()> {
    // One-shot: explicit prompt, or piped stdin.
    if let Some(p) = prompt {
        return chat_once(advisor, &p, html).await;
    }
    if !io::stdin().is_terminal() {
        let mut buf = String::new();
        io::stdin().read_to_string(&mut buf).context("reading stdin")?;
        let buf = buf.trim();
        if buf.is_empty() {
            anyhow::bail!("empty prompt on stdin");
        }
        return chat_once(advisor, buf, html).await;
    }

    // Interactive: one request in flight at a time; each line is submitted and
    // awaited to completion before the next one is read.
    eprintln!("Chat with the advisor.  Ctrl-D or \"exit\" to quit.");
    let stdin = io::stdin();
    loop {
        eprint!("you> ");
        io::stderr().flush().ok();
        let mut line = String::new();
        if stdin.lock().read_line(&mut line).context("reading stdin")? == 0 {
            eprintln!();
            return Ok(());
        }
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if line == "exit" || line == "quit" {
            return Ok(());
        }
        match advisor.ask(line).await {
            Ok(reply) => println!("{}\n", render(&reply, html)),
            // Terminal for this turn only; the user may re-trigger
            Err(e) => println!("{}\n", failure_message(&e, CHAT_FALLBACK)),
        }
    }
}

async fn chat_once(advisor: &mut Advisor, prompt: &str, html: bool) -> anyhow::Result<()> {
    match advisor.ask(prompt).await {
        Ok(reply) => {
            println!("{}", render(&reply, html));
            Ok(())
        }
        Err(e) => {
            println!("{}", failure_message(&e, CHAT_FALLBACK));
            std::process::exit(1);
        }
    }
}

fn render(reply: &str, html: bool) -> String {
    if html {
        format_response(reply)
    } else {
        reply.to_string()
    }
}

/// Map a chat failure to its user-visible inline message: a fixed fallback
/// for shape failures, the error text for transport/API failures.  Nothing
/// is retried.
fn failure_message(err: &ChatError, fallback: &str) -> String {
    match err {
        ChatError::MalformedResponse(_) => fallback.to_string(),
        other => format!("Error: {other}"),
    }
}

fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .init();
}
