use anyhow::{Context, Result};
use blogstore::codec;
use blogstore::config::BlogConfig;
use blogstore::model::{Header, HeaderState, Item};
use blogstore::search::{SearchRequest, SortOrder, StateFilter};
use blogstore::store::fs::FileBlogStore;
use blogstore::store::BlogProvider;
use chrono::Utc;
use clap::Parser;
use colored::*;
use directories::ProjectDirs;
use std::path::{Path, PathBuf};
use tracing::debug;
use tracing_subscriber::EnvFilter;

mod args;
use args::{Cli, Commands, SortArg, StoreCommand};

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Encode { sequence } => println!("{}", codec::encode_id(sequence)),
        Commands::Decode { id } => println!("{}", codec::decode_id(&id)?),
        Commands::Store(command) => {
            let config = load_config(cli.config.as_deref(), cli.root.as_deref())?;
            let root = config.root()?;
            let store = FileBlogStore::from_config(&config)?;
            store
                .initialise()
                .with_context(|| format!("could not open blog store at {}", root.display()))?;
            run(&store, command, &root)?;
        }
    }

    Ok(())
}

fn run(store: &FileBlogStore, command: StoreCommand, root: &Path) -> Result<()> {
    match command {
        StoreCommand::Init => {
            println!("Initialized blog store at {}", root.display());
        }
        StoreCommand::List {
            tags,
            author,
            search,
            deleted,
            sort,
            page,
            per_page,
        } => {
            let mut request = SearchRequest::new().sort(sort_order(sort));
            if deleted {
                request = request.states(StateFilter::All);
            }
            for tag in tags {
                request = request.tag(tag);
            }
            if let Some(author) = author {
                request = request.author(author);
            }
            if let Some(text) = search {
                request = request.text(text);
            }
            if let (Some(page), Some(per_page)) = (page, per_page) {
                request = request.page(page, per_page);
            }

            print_headers(&store.list(&request)?);
        }
        StoreCommand::Show { id } => {
            let item = store.load(&reference(store, id)?)?;
            print_item(&item);
        }
        StoreCommand::Create {
            name,
            author,
            description,
            tags,
            content,
        } => {
            let header = Header::new(name, author)
                .with_description(description)
                .with_tags(tags);
            let saved = store.save(Item::new(header, content))?;
            println!(
                "Entry created: {} {}",
                saved.header.id.unwrap_or_default().yellow(),
                saved.header.name.green()
            );
        }
        StoreCommand::Publish { id } => {
            let mut item = store.load(&reference(store, id)?)?;
            item.header.publish(Utc::now());
            let saved = store.save(item)?;
            println!("Entry published: {}", saved.header.name.green());
        }
        StoreCommand::Delete { id } => {
            let header = reference(store, id)?;
            let name = store.load(&header)?.header.name;
            store.delete(&header)?;
            println!("Entry deleted: {}", name.red());
        }
    }
    Ok(())
}

/// Header reference for a user-supplied id, rejecting malformed ids early.
fn reference(store: &FileBlogStore, id: String) -> Result<Header> {
    store.decode_id(&id)?;
    Ok(Header::reference(id))
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Environment first, then the explicit or local config file, then the
/// user-level one.
fn load_config(explicit: Option<&Path>, root: Option<&Path>) -> Result<BlogConfig> {
    let mut files = vec![explicit
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("blogz.toml"))];
    if let Some(dirs) = ProjectDirs::from("com", "blogz", "blogz") {
        files.push(dirs.config_dir().join("blogz.toml"));
    }

    debug!(files = ?files, "loading configuration");
    let mut config = BlogConfig::load(&files)?;
    if let Some(root) = root {
        config.base_path = root.to_path_buf();
    }
    Ok(config)
}

fn sort_order(sort: SortArg) -> SortOrder {
    match sort {
        SortArg::Index => SortOrder::IndexOrder,
        SortArg::Newest => SortOrder::NewestFirst,
        SortArg::Oldest => SortOrder::OldestFirst,
        SortArg::Name => SortOrder::Name,
    }
}

fn colored_state(state: HeaderState) -> ColoredString {
    let label = format!("{:<11}", state.to_string());
    match state {
        HeaderState::Published => label.green(),
        HeaderState::Unpublished => label.yellow(),
        HeaderState::Deleted => label.red(),
    }
}

fn print_headers(headers: &[Header]) {
    if headers.is_empty() {
        println!("No entries found.");
        return;
    }
    for header in headers {
        let tags = if header.tags.is_empty() {
            String::new()
        } else {
            format!(" [{}]", header.tags.join(", "))
        };
        println!(
            "{}  {}  {}  {} ({}){}",
            header.id.as_deref().unwrap_or("-").yellow(),
            colored_state(header.state),
            header.effective_date().format("%Y-%m-%d"),
            header.name.bold(),
            header.author,
            tags.dimmed()
        );
    }
}

fn print_item(item: &Item) {
    let header = &item.header;
    println!("{} {}", header.id.as_deref().unwrap_or("-").yellow(), header.name.bold());
    println!("State:   {}", colored_state(header.state));
    println!("Author:  {}", header.author);
    if !header.description.is_empty() {
        println!("About:   {}", header.description);
    }
    if !header.tags.is_empty() {
        println!("Tags:    {}", header.tags.join(", "));
    }
    if let Some(published) = header.published_date {
        println!("Published: {}", published.to_rfc3339());
    }
    println!("Updated: {}", header.updated_date.to_rfc3339());
    for file in &item.files {
        println!("File:    {} ({})", file.file_name, file.reference);
    }
    println!("--------------------------------");
    println!("{}", item.content);
}
