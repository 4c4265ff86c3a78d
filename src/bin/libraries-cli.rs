//! Terminal detail view for the libraries directory

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use libraries_server::client::{DetailView, LibrariesClient, LoadState};

#[derive(Parser)]
#[command(name = "libraries-cli", version, about = "Browse the libraries directory")]
struct Cli {
    /// Base URL of the libraries API
    #[arg(long, env = "LIBRARIES_API_URL", default_value = "http://localhost:3333")]
    api_url: String,

    /// Access token of the map tile provider
    #[arg(long, env = "MAPBOX_TOKEN", default_value = "")]
    map_token: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Show one library
    Show {
        id: i32,
        /// Photo to highlight in the gallery
        #[arg(long, default_value_t = 0)]
        image: usize,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let client = LibrariesClient::new(cli.api_url);

    match cli.command {
        Command::Show { id, image } => {
            let mut view = DetailView::new(id, cli.map_token);
            view.load(&client).await;

            if image > 0 && !view.select_image(image) {
                tracing::warn!("Library {} has no photo {}", id, image);
            }

            print!("{}", view);

            if let LoadState::Failed(message) = view.state() {
                anyhow::bail!("{}", message);
            }
        }
    }

    Ok(())
}
