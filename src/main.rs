mod cli;
mod demo;

use anyhow::Result;

use crate::demo::Demo;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let demo = Demo::new()?;
    demo.run_paths().await?;
    cli::interactive(demo).await
}
