use anyhow::Result;

use mailtrace::config::init_config;
use mailtrace::runtime::{prepare_server_startup, run_server};
use mailtrace::system::init_logging;

#[actix_web::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let config = init_config();

    // Guard must outlive the server so buffered log writes are flushed.
    let _log_guard = init_logging(config);

    let ctx = prepare_server_startup().await?;
    run_server(ctx).await
}
