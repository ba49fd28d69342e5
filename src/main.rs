use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use serde::Serialize;
use tokio::io::{AsyncBufReadExt, BufReader};

use flickr_search::api::{ClientSettings, FlickrPhotosApi, Photo, PhotoUrlBuilder, PhotosApi};
use flickr_search::cache::{ImageDataRepository, InMemoryImageStorage};
use flickr_search::config::{Config, MAX_PAGE_SIZE};
use flickr_search::logging::init_tracing;
use flickr_search::search::{
    dedupe, ids, CellModelsBuilder, FetchResult, SearchState, SearchViewModel,
    SearchedPhotosFetcher, ViewModelSettings, ViewState,
};

#[derive(Debug, Parser)]
#[command(name = "flickr-search", version, about = "Search photos from the terminal")]
struct Cli {
    /// Path to the config file (default: ~/.config/flickr-search/config.toml)
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// API key, overriding config and FLICKR_API_KEY
    #[arg(long, global = true, value_name = "KEY")]
    api_key: Option<String>,

    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Fetch one or more pages of results for a query
    Search {
        /// Search text
        query: String,

        /// Number of pages to load
        #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
        pages: u32,

        /// Photos per page (overrides config)
        #[arg(
            long,
            value_name = "N",
            value_parser = clap::value_parser!(u32).range(1..=i64::from(MAX_PAGE_SIZE))
        )]
        page_size: Option<u32>,

        /// Download every image and report its dimensions
        #[arg(long)]
        images: bool,

        /// Print results as JSON
        #[arg(long)]
        json: bool,
    },

    /// Interactive session: type a query per line, `:more` loads the next page, `:quit` exits
    Interactive,
}

#[derive(Debug, Serialize)]
struct PhotoOutput {
    id: String,
    title: String,
    url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    width: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    height: Option<u32>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(if cli.verbose { "debug" } else { "warn" });

    let mut config = match &cli.config {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    }
    .context("Failed to load configuration")?;

    if let Some(key) = cli.api_key {
        config.api.api_key = Some(key);
    }

    let settings = ClientSettings::from_config(&config.api)?;
    let api: Arc<dyn PhotosApi> = Arc::new(
        FlickrPhotosApi::new(settings).context("Failed to build HTTP client")?,
    );
    let storage = Arc::new(InMemoryImageStorage::with_max_entries(config.cache.max_entries));
    let images = Arc::new(ImageDataRepository::new(storage, Arc::clone(&api)));

    match cli.command {
        Command::Search {
            query,
            pages,
            page_size,
            images: with_images,
            json,
        } => {
            let page_size = page_size.unwrap_or(config.search.page_size);
            let photos = search_pages(api, &query, pages, page_size).await?;
            let urls = PhotoUrlBuilder::new(config.api.image_url_template.clone());
            let cells = CellModelsBuilder::new(images);

            let mut output = Vec::with_capacity(photos.len());
            for photo in &photos {
                let dimensions = if with_images {
                    cells
                        .cell_model(photo)
                        .image
                        .load()
                        .await
                        .map(|image| (image.width, image.height))
                } else {
                    None
                };
                output.push(PhotoOutput {
                    id: photo.id.clone(),
                    title: photo.title.clone(),
                    url: urls.url_string(photo),
                    width: dimensions.map(|(w, _)| w),
                    height: dimensions.map(|(_, h)| h),
                });
            }

            if json {
                println!("{}", serde_json::to_string_pretty(&output)?);
            } else if output.is_empty() {
                println!("No photos found for '{}'", query);
            } else {
                for photo in &output {
                    match (photo.width, photo.height) {
                        (Some(w), Some(h)) => {
                            println!("{}\t{}\t{}\t{}x{}", photo.id, photo.title, photo.url, w, h)
                        }
                        _ => println!("{}\t{}\t{}", photo.id, photo.title, photo.url),
                    }
                }
            }
        }
        Command::Interactive => {
            let settings = ViewModelSettings::from(&config.search);
            run_interactive(api, images, settings).await?;
        }
    }

    Ok(())
}

async fn search_pages(
    api: Arc<dyn PhotosApi>,
    query: &str,
    pages: u32,
    page_size: u32,
) -> anyhow::Result<Vec<Photo>> {
    let fetcher = SearchedPhotosFetcher::new(api, page_size);

    let mut photos = match fetcher.load_first_page(query).await {
        Some(FetchResult::Photos(page)) => dedupe::<&str>(&[], &page),
        Some(FetchResult::Empty) | None => return Ok(Vec::new()),
        Some(FetchResult::Error(err)) => bail!("Search failed: {}", err.user_message()),
    };

    for _ in 1..pages {
        match fetcher.load_next_page().await {
            Some(FetchResult::Photos(page)) => {
                let fresh = dedupe(&ids(&photos), &page);
                photos.extend(fresh);
            }
            Some(FetchResult::Empty) | None => break,
            Some(FetchResult::Error(err)) => {
                tracing::warn!(error = %err, "Stopping after failed page load");
                break;
            }
        }
    }

    Ok(photos)
}

async fn run_interactive(
    api: Arc<dyn PhotosApi>,
    images: Arc<ImageDataRepository>,
    settings: ViewModelSettings,
) -> anyhow::Result<()> {
    let view_model = SearchViewModel::spawn(api, images, settings);
    let mut updates = view_model.subscribe();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                match line.trim() {
                    ":quit" => break,
                    ":more" => {
                        view_model.set_scrolled_to_bottom(true);
                        view_model.set_scrolled_to_bottom(false);
                    }
                    text => view_model.set_search_text(text),
                }
            }
            changed = updates.changed() => {
                if changed.is_err() {
                    break;
                }
                let state = updates.borrow_and_update().clone();
                print_state(&state);
            }
        }
    }

    view_model.shutdown().await;
    Ok(())
}

fn print_state(state: &SearchState) {
    match &state.view_state {
        ViewState::Empty => println!("(type a query)"),
        ViewState::NoResult => println!("No photos found for '{}'", state.query()),
        ViewState::Error(message) => println!("Error: {}", message),
        ViewState::Loading(stage) => println!("Loading ({:?})...", stage),
        ViewState::Loaded(_) => {
            println!(
                "'{}': {} photos, page {} of {}",
                state.query(),
                state.photos.len(),
                state.page.number,
                state
                    .page
                    .total_number_of_pages
                    .map_or_else(|| "?".to_string(), |t| t.to_string())
            );
            if let Some(error) = &state.page_error {
                println!("  next page failed: {}", error);
            }
        }
    }
}
