use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use todo_api::daemon;
use todo_api::error::Result;
use todo_api::providers::mongodb::MongoTodoStore;

#[derive(Parser, Debug)]
#[command(name = "todo-api")]
#[command(about = "Todo REST API daemon")]
struct Cli {
    #[arg(long, default_value = "0.0.0.0")]
    host: String,

    #[arg(long, env = "PORT", default_value_t = 3000)]
    port: u16,

    #[arg(long, env = "MONGO_URI")]
    mongo_uri: String,

    #[arg(long, env = "MONGO_DB", default_value = "todos")]
    db: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,todo_api=info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
    let cli = Cli::parse();

    let store = MongoTodoStore::connect(&cli.mongo_uri, &cli.db).await?;
    tracing::info!(db = %cli.db, "connected to mongodb");

    daemon::run(&cli.host, cli.port, Arc::new(store)).await
}
