use clap::Parser;
use color_eyre::Result;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use url::Url;
use uuid::Uuid;

use feedline::cache::{CacheStore, NoopStore, SqliteStore};
use feedline::compose::{self, CachedRemotePipeline};
use feedline::config::Config;
use feedline::feed::{FeedItem, ImageComment};
use feedline::http::ReqwestClient;
use feedline::loader::ResourceLoader;
use feedline::present::{
  AdapterState, ErrorView, FeedItemViewModel, ImageCommentViewModel, LoadResourceAdapter,
  LoadResourcePresenter, LoadingView, ResourceView,
};

#[derive(Parser, Debug)]
#[command(name = "feedline")]
#[command(about = "A feed reader client with transparent caching and offline fallback")]
#[command(version)]
struct Args {
  /// Path to config file (default: $XDG_CONFIG_HOME/feedline/config.yaml)
  #[arg(short, long)]
  config: Option<PathBuf>,

  /// API base URL (overrides the config file)
  #[arg(short, long)]
  base_url: Option<Url>,

  /// Show comments for the given image instead of the feed
  #[arg(long, value_name = "IMAGE_ID")]
  comments: Option<Uuid>,
}

#[tokio::main]
async fn main() -> Result<()> {
  color_eyre::install()?;
  tracing_subscriber::fmt()
    .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
    .with_writer(std::io::stderr)
    .init();

  let args = Args::parse();

  // CLI base URL wins; otherwise fall back to the config file
  let config = match args.base_url {
    Some(base_url) => Config::from_base_url(base_url),
    None => Config::load(args.config.as_deref())?,
  };

  if config.cache.enabled {
    let store = match &config.cache.path {
      Some(path) => SqliteStore::open_at(path)?,
      None => SqliteStore::open()?,
    };
    run(Arc::new(store), &config, args.comments).await
  } else {
    run(Arc::new(NoopStore), &config, args.comments).await
  }
}

async fn run<S: CacheStore + 'static>(
  store: Arc<S>,
  config: &Config,
  comments: Option<Uuid>,
) -> Result<()> {
  let client = Arc::new(ReqwestClient::new()?);
  let console = Arc::new(ConsoleView);
  let base_url = &config.api.base_url;

  match comments {
    Some(image_id) => {
      let pipeline = Arc::new(compose::comments_loader(
        client,
        store,
        base_url,
        image_id,
      )?);
      let presenter = comments_presenter(&console);
      drive(pipeline, presenter).await;
    }
    None => {
      let pipeline = Arc::new(compose::feed_loader(
        client,
        store,
        base_url,
        chrono::Duration::days(config.cache.max_age_days),
      )?);
      let presenter = feed_presenter(&console);
      drive(Arc::clone(&pipeline), presenter).await;

      // Housekeeping once the load has settled
      pipeline.validate_cache();
    }
  }

  Ok(())
}

/// Run one load through an adapter, polling until the terminal state.
async fn drive<T, V, S>(
  pipeline: Arc<CachedRemotePipeline<T, S>>,
  presenter: LoadResourcePresenter<T, V>,
) where
  T: Clone + serde::Serialize + serde::de::DeserializeOwned + Send + Sync + 'static,
  S: CacheStore + 'static,
{
  let mut adapter = LoadResourceAdapter::new(
    move || {
      let pipeline = Arc::clone(&pipeline);
      async move { pipeline.load().await }
    },
    presenter,
  );

  adapter.load();
  loop {
    if adapter.poll() {
      break;
    }
    // A fetch task that died without an outcome resets the adapter to
    // Idle; nothing will ever be delivered, so stop polling.
    if adapter.state() == AdapterState::Idle {
      break;
    }
    tokio::time::sleep(Duration::from_millis(10)).await;
  }
}

fn feed_presenter(
  console: &Arc<ConsoleView>,
) -> LoadResourcePresenter<Vec<FeedItem>, Vec<FeedItemViewModel>> {
  let resource: Arc<dyn ResourceView<Vec<FeedItemViewModel>>> = console.clone();
  let loading: Arc<dyn LoadingView> = console.clone();
  let error: Arc<dyn ErrorView> = console.clone();
  LoadResourcePresenter::new(
    Arc::downgrade(&resource),
    Arc::downgrade(&loading),
    Arc::downgrade(&error),
    |items: Vec<FeedItem>| Ok(items.iter().map(FeedItemViewModel::from_item).collect()),
  )
}

fn comments_presenter(
  console: &Arc<ConsoleView>,
) -> LoadResourcePresenter<Vec<ImageComment>, Vec<ImageCommentViewModel>> {
  let resource: Arc<dyn ResourceView<Vec<ImageCommentViewModel>>> = console.clone();
  let loading: Arc<dyn LoadingView> = console.clone();
  let error: Arc<dyn ErrorView> = console.clone();
  LoadResourcePresenter::new(
    Arc::downgrade(&resource),
    Arc::downgrade(&loading),
    Arc::downgrade(&error),
    |comments: Vec<ImageComment>| {
      let now = chrono::Utc::now();
      Ok(
        comments
          .iter()
          .map(|c| ImageCommentViewModel::from_comment(c, now))
          .collect(),
      )
    },
  )
}

/// Terminal-facing observer implementing all three view contracts.
struct ConsoleView;

impl LoadingView for ConsoleView {
  fn display_loading(&self, is_loading: bool) {
    if is_loading {
      eprintln!("Loading...");
    }
  }
}

impl ErrorView for ConsoleView {
  fn display_error(&self, message: Option<String>) {
    if let Some(message) = message {
      eprintln!("{}", message);
    }
  }
}

impl ResourceView<Vec<FeedItemViewModel>> for ConsoleView {
  fn display(&self, items: Vec<FeedItemViewModel>) {
    if items.is_empty() {
      println!("The feed is empty.");
      return;
    }
    for item in items {
      if let Some(location) = &item.location {
        println!("[{}]", location);
      }
      println!("{}", item.description.as_deref().unwrap_or("(no description)"));
      println!();
    }
  }
}

impl ResourceView<Vec<ImageCommentViewModel>> for ConsoleView {
  fn display(&self, comments: Vec<ImageCommentViewModel>) {
    if comments.is_empty() {
      println!("No comments yet.");
      return;
    }
    for comment in comments {
      println!("{} ({}):", comment.username, comment.date);
      println!("  {}", comment.message);
      println!();
    }
  }
}
