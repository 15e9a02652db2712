//! marquee - movie catalog browser CLI.

/// Application configuration (TOML).
mod config;

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use tracing::instrument;
use tracing_subscriber::filter::EnvFilter;
#[cfg(not(feature = "otel"))]
use tracing_subscriber::fmt;
#[cfg(feature = "otel")]
use tracing_subscriber::layer::SubscriberExt;
#[cfg(feature = "otel")]
use tracing_subscriber::util::SubscriberInitExt;
use url::Url;

use crate::config::{AppConfig, CatalogConfig, resolve_config_path};
use marquee_api::catalog::{CatalogClient, ListParams, LocalCatalogApi, MovieSummary};
use marquee_api::image::{ImageSize, backdrop_url, image_url, poster_url, profile_url};
use marquee_api::locale::{SUPPORTED_LOCALES, api_language, display_name};
use marquee_browse::detail::DetailTask;
use marquee_browse::pager::Pager;
use marquee_browse::source::{ListSource, MovieCategory};

/// Number of cast members shown by `details`.
const TOP_BILLED: usize = 5;

/// CLI argument parser.
#[derive(Parser)]
#[command(about, version)]
struct Cli {
    /// Override config directory.
    #[arg(long, global = true)]
    dir: Option<PathBuf>,

    /// Two-letter locale code (e.g. "ru"). Overrides config and device language.
    #[arg(long, global = true)]
    locale: Option<String>,

    /// Subcommand to run.
    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// List a movie category.
    List(ListArgs),
    /// Search movies by title.
    Search(SearchArgs),
    /// Show details, cast and trailers of a movie.
    Details(DetailsArgs),
    /// List movies similar to a movie.
    Similar(SimilarArgs),
    /// Print the image URL for an image path.
    ImageUrl(ImageUrlArgs),
    /// List supported display languages.
    Languages(LanguagesArgs),
    /// Verify the API token.
    Check,
}

/// Arguments for the `list` subcommand.
#[derive(clap::Args)]
struct ListArgs {
    /// Category: popular, top_rated, upcoming, now_playing.
    #[arg(long, default_value = "popular")]
    category: MovieCategory,
    /// Number of pages to load.
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
    pages: u32,
}

/// Arguments for the `search` subcommand.
#[derive(clap::Args)]
struct SearchArgs {
    /// Search query (e.g. "Dune").
    #[arg(long, required = true)]
    query: String,
    /// Number of pages to load.
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
    pages: u32,
}

/// Arguments for the `details` subcommand.
#[derive(clap::Args)]
struct DetailsArgs {
    /// TMDB movie ID.
    #[arg(long, required = true)]
    id: u64,
}

/// Arguments for the `similar` subcommand.
#[derive(clap::Args)]
struct SimilarArgs {
    /// TMDB movie ID.
    #[arg(long, required = true)]
    id: u64,
    /// Result page.
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
    page: u32,
}

/// Arguments for the `image-url` subcommand.
#[derive(clap::Args)]
struct ImageUrlArgs {
    /// Image path returned by the catalog (e.g. "/abc.jpg").
    #[arg(long, required = true)]
    path: String,
    /// Size: poster-small, poster-medium, poster-large, backdrop-small, backdrop-large, profile.
    #[arg(long, default_value = "poster-medium")]
    size: ImageSize,
}

/// Arguments for the `languages` subcommand.
#[derive(clap::Args)]
struct LanguagesArgs {
    /// Save this locale code to the config file.
    #[arg(long)]
    set: Option<String>,
}

/// Resolved settings shared by the catalog subcommands.
struct Session {
    config: AppConfig,
    config_path: PathBuf,
    locale: String,
}

impl Session {
    /// Catalog language tag for the active locale.
    fn language(&self) -> &'static str {
        api_language(&self.locale)
    }
}

/// Loads the config and resolves the active locale.
///
/// # Errors
///
/// Returns an error if the config path cannot be resolved or the file is invalid.
fn load_session(dir: Option<&PathBuf>, locale: Option<&str>) -> Result<Session> {
    let config_path = resolve_config_path(dir).context("failed to resolve config path")?;
    let config = AppConfig::load(&config_path).context("failed to load config")?;
    let device_tag = std::env::var("LC_ALL")
        .ok()
        .filter(|v| !v.is_empty())
        .or_else(|| std::env::var("LANG").ok());
    let locale = config.resolve_locale(locale, device_tag.as_deref());
    tracing::debug!(locale = %locale, config = %config_path.display(), "session loaded");
    Ok(Session {
        config,
        config_path,
        locale,
    })
}

/// Builds a `CatalogClient` from the `TMDB_API_TOKEN` environment variable.
///
/// # Errors
///
/// Returns an error if `TMDB_API_TOKEN` is not set, the base URL is invalid,
/// or the client fails to build.
#[instrument(skip_all)]
fn build_catalog_client(config: &CatalogConfig) -> Result<CatalogClient> {
    let api_token = std::env::var("TMDB_API_TOKEN")
        .context("TMDB_API_TOKEN environment variable is required")?;

    let mut builder = CatalogClient::builder()
        .api_token(api_token)
        .user_agent(concat!(
            env!("CARGO_PKG_NAME"),
            "/",
            env!("CARGO_PKG_VERSION")
        ))
        .timeout(Duration::from_secs(config.timeout_secs))
        .credential_mode(config.credential);
    if let Some(base_url) = &config.base_url {
        let url = Url::parse(base_url).with_context(|| format!("invalid base_url: {base_url}"))?;
        builder = builder.base_url(url);
    }
    builder.build().context("failed to build catalog client")
}

/// Logs one table row per movie.
fn log_movies(movies: &[MovieSummary]) {
    tracing::info!("ID\tYear\tRating\tTitle");
    for movie in movies {
        tracing::info!(
            "{}\t{}\t{:.1}\t{}",
            movie.id,
            movie
                .release_year()
                .map_or_else(|| String::from("-"), |y| y.to_string()),
            movie.vote_average,
            movie.title,
        );
    }
}

/// Loads `pages` pages of `source` and prints the accumulated list.
///
/// # Errors
///
/// Returns an error if the first page could not be loaded.
#[instrument(skip_all, fields(source = %source))]
async fn run_paged(session: &Session, source: ListSource, pages: u32) -> Result<()> {
    let client = build_catalog_client(&session.config.catalog)?;
    let mut pager = Pager::new(&client).with_language(session.language());

    pager.start(source).await;
    if let Some(message) = pager.state().last_error() {
        bail!("failed to load first page: {message}");
    }
    for _ in 1..pages {
        if !pager.load_more().await || pager.state().last_error().is_some() {
            break;
        }
    }

    let state = pager.state();
    log_movies(state.items());
    tracing::info!(
        "Page {}/{} ({} movies)",
        state.current_page(),
        state.total_pages(),
        state.items().len()
    );
    if let Some(message) = state.last_error() {
        tracing::warn!("stopped early: {message}");
    }
    Ok(())
}

/// Runs the `details` subcommand.
///
/// # Errors
///
/// Returns an error if the client fails to build or the movie record could not be loaded.
#[instrument(skip_all, fields(movie_id = args.id))]
async fn run_details(session: &Session, args: &DetailsArgs) -> Result<()> {
    let client = Arc::new(build_catalog_client(&session.config.catalog)?);

    let task = DetailTask::spawn(client, args.id, session.language());
    let Some(bundle) = task.join().await else {
        bail!("detail loading for movie {} was cancelled", args.id);
    };
    let Some(details) = &bundle.details else {
        bail!("failed to load movie {}: {}", args.id, bundle.errors.join("; "));
    };

    tracing::info!("ID: {}", details.id);
    tracing::info!("Title: {}", details.title);
    tracing::info!("Original Title: {}", details.original_title);
    tracing::info!("Release Date: {}", details.release_date.as_deref().unwrap_or("-"));
    tracing::info!(
        "Runtime: {}",
        details
            .runtime
            .map_or_else(|| String::from("-"), |r| format!("{r}min"))
    );
    tracing::info!("Genres: {}", details.genre_names());
    tracing::info!("Rating: {:.1} ({} votes)", details.vote_average, details.vote_count);
    if let Some(tagline) = details.tagline.as_deref().filter(|t| !t.is_empty()) {
        tracing::info!("Tagline: {tagline}");
    }
    tracing::info!("Overview: {}", details.overview.as_deref().unwrap_or("-"));
    tracing::info!("Poster: {}", poster_url(details.poster_path.as_deref()));
    tracing::info!("Backdrop: {}", backdrop_url(details.backdrop_path.as_deref()));

    if let Some(credits) = &bundle.credits {
        for director in credits.crew_with_job("Director") {
            tracing::info!("Director: {}", director.name);
        }
        tracing::info!("Cast:");
        for member in credits.top_billed(TOP_BILLED) {
            tracing::info!(
                "  {} as {} {}",
                member.name,
                member.character.as_deref().unwrap_or("-"),
                profile_url(member.profile_path.as_deref()),
            );
        }
    }
    if let Some(trailers) = &bundle.trailers {
        tracing::info!("Trailers:");
        for trailer in trailers {
            tracing::info!("  {} {}", trailer.name, trailer.youtube_watch_url());
        }
    }
    for error in &bundle.errors {
        tracing::warn!("partial result: {error}");
    }
    Ok(())
}

/// Runs the `similar` subcommand.
///
/// # Errors
///
/// Returns an error if the client fails to build or the API request fails.
#[instrument(skip_all, fields(movie_id = args.id))]
async fn run_similar(session: &Session, args: &SimilarArgs) -> Result<()> {
    let client = build_catalog_client(&session.config.catalog)?;

    let params = ListParams::page(args.page).language(session.language());
    let page = client
        .similar(args.id, &params)
        .await
        .context("similar movies request failed")?;

    log_movies(&page.results);
    tracing::info!("Page {}/{}", page.page, page.total_pages);
    Ok(())
}

/// Runs the `image-url` subcommand.
fn run_image_url(args: &ImageUrlArgs) {
    tracing::info!("{}", image_url(Some(&args.path), args.size));
}

/// Runs the `languages` subcommand.
///
/// # Errors
///
/// Returns an error if `--set` names an unsupported code or the config cannot be saved.
fn run_languages(mut session: Session, args: &LanguagesArgs) -> Result<()> {
    if let Some(code) = &args.set {
        let code = code.to_ascii_lowercase();
        if !SUPPORTED_LOCALES.contains(&code.as_str()) {
            bail!(
                "unsupported locale: {code} (supported: {})",
                SUPPORTED_LOCALES.join(", ")
            );
        }
        session.config.locale.code = Some(code.clone());
        session
            .config
            .save(&session.config_path)
            .context("failed to save config")?;
        tracing::info!("Locale set to {code} ({})", display_name(&code));
        session.locale = code;
    }

    for code in SUPPORTED_LOCALES {
        let marker = if code == session.locale { "*" } else { " " };
        tracing::info!("{marker} {code}\t{}\t{}", api_language(code), display_name(code));
    }
    Ok(())
}

/// Runs the `check` subcommand.
///
/// # Errors
///
/// Returns an error if the client fails to build or the token is rejected.
#[instrument(skip_all)]
async fn run_check(session: &Session) -> Result<()> {
    let client = build_catalog_client(&session.config.catalog)?;
    let status = client
        .check_credentials()
        .await
        .context("credential check failed")?;
    if !status.success {
        bail!(
            "credential rejected: {}",
            status.status_message.as_deref().unwrap_or("unknown reason")
        );
    }
    tracing::info!("Credentials OK");
    Ok(())
}

/// Entry point.
///
/// # Errors
///
/// Returns an error if subcommand execution fails.
#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    #[cfg(not(feature = "otel"))]
    {
        fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
            )
            .with_target(false)
            .init();
    }

    #[cfg(feature = "otel")]
    {
        let env_filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
        let fmt_layer = tracing_subscriber::fmt::layer().with_target(false);

        let otel_layer = std::env::var("OTEL_EXPORTER_OTLP_ENDPOINT")
            .ok()
            .and_then(|_| {
                let exporter = opentelemetry_otlp::SpanExporter::builder()
                    .with_http()
                    .build()
                    .ok()?;

                let tracer_provider = opentelemetry_sdk::trace::SdkTracerProvider::builder()
                    .with_simple_exporter(exporter)
                    .build();

                let tracer = opentelemetry::trace::TracerProvider::tracer(
                    &tracer_provider,
                    env!("CARGO_PKG_NAME"),
                );
                opentelemetry::global::set_tracer_provider(tracer_provider);

                Some(tracing_opentelemetry::layer().with_tracer(tracer))
            });

        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer)
            .with(otel_layer)
            .init();
    }

    let Cli {
        dir,
        locale,
        command,
    } = Cli::parse();
    let session = || load_session(dir.as_ref(), locale.as_deref());
    match command {
        Commands::List(args) => {
            run_paged(&session()?, ListSource::Category(args.category), args.pages).await
        }
        Commands::Search(args) => {
            run_paged(&session()?, ListSource::Search(args.query), args.pages).await
        }
        Commands::Details(args) => run_details(&session()?, &args).await,
        Commands::Similar(args) => run_similar(&session()?, &args).await,
        Commands::ImageUrl(args) => {
            run_image_url(&args);
            Ok(())
        }
        Commands::Languages(args) => run_languages(session()?, &args),
        Commands::Check => run_check(&session()?).await,
    }
}
