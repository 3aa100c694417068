use anyhow::Context;
use movio::Config;

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let worker_threads = Config::load()?.general.worker_threads;

    let mut builder = tokio::runtime::Builder::new_multi_thread();
    builder.enable_all().thread_name("movio-worker");

    if worker_threads > 0 {
        builder.worker_threads(worker_threads);
    }

    builder
        .build()
        .context("Failed to build Tokio runtime")?
        .block_on(movio::run())
}
