mod app;
mod effects;
mod input;
mod render;

use anyhow::Result;

fn main() -> Result<()> {
    let options = app::Options::from_args(std::env::args().skip(1))?;
    deck_logging::initialize(options.log_level);
    app::run(options)
}
