use anyhow::Context;
use clap::Parser;
use log::info;

use voxel_space::platform::RaylibSurface;
use voxel_space::{Args, RenderLoop};

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = Args::parse().into_config().context("invalid map selection")?;
    info!(
        "map {} from {}",
        config.initial_map.index(),
        config.data_dir.display()
    );

    let mut surface = RaylibSurface::new(&config).context("cannot open the window")?;
    let mut app = RenderLoop::new(&config);
    app.run(&mut surface);

    info!("exiting after {} ticks", app.ticks());
    Ok(())
}
