use anyhow::Context;
use book_catalog::{
    store::{BookStore, FileStore},
    types::book::Book,
};
use clap::Parser;

const DEFAULT_DATASET_URL: &str =
    "https://raw.githubusercontent.com/benoitvallon/100-best-books/master/books.json";

/// Seeds the books file with a public dataset.
#[derive(Parser)]
#[command(author, about, version)]
struct SeedArgs {
    /// URL of the JSON dataset to download.
    #[clap(long, env = "BOOKS_URL", default_value = DEFAULT_DATASET_URL)]
    url: String,

    /// Path of the books file to write.
    #[clap(long, env = "BOOKS_FILE", default_value = "source/books.json")]
    books_file: String,
}

fn init_tracing() -> anyhow::Result<()> {
    tracing::subscriber::set_global_default(
        tracing_subscriber::fmt::Subscriber::builder()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .finish(),
    )
    .context("Failed to set global tracing subscriber")?;

    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    if std::env::var_os("RUST_LOG").is_none() {
        std::env::set_var("RUST_LOG", "seed=info,book_catalog=info");
    }

    init_tracing()?;

    let seed_args = SeedArgs::parse();

    tracing::info!(url = %seed_args.url, "Downloading dataset");

    let books: Vec<Book> = reqwest::get(&seed_args.url)
        .await
        .context("Failed to fetch the dataset")?
        .error_for_status()
        .context("Dataset request was not successful")?
        .json()
        .await
        .context("Failed to parse the dataset")?;

    let store = FileStore::new(&seed_args.books_file);

    store
        .write(&books)
        .await
        .context("Failed to write the books file")?;

    tracing::info!(count = books.len(), path = %seed_args.books_file, "Books file seeded");

    Ok(())
}
