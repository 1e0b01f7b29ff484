//! Desktop viewer binary for the Atelier exploded-view garment renderer.

use std::path::Path;

use atelier::{options::Options, Viewer};

fn main() {
    env_logger::init();

    let options = match std::env::args().nth(1) {
        Some(path) => match Options::load(Path::new(&path)) {
            Ok(options) => {
                log::info!("loaded options from {path}");
                options
            }
            Err(e) => {
                log::error!("{e}; falling back to defaults");
                Options::default()
            }
        },
        None => Options::default(),
    };

    if let Err(e) = Viewer::builder()
        .with_title("Atelier: Leather Jacket")
        .with_options(options)
        .build()
        .run()
    {
        log::error!("{e}");
        std::process::exit(1);
    }
}
