use anyhow::Context;
use tracing::info;
use vecsketch::{init_logging, Editor, BUILD_DATE, VERSION};
use vecsketch_settings::default_config_path;

fn main() -> anyhow::Result<()> {
    // Initialize logging
    init_logging()?;
    info!(version = VERSION, built = BUILD_DATE, "Starting vecsketch");

    let config_path = default_config_path().context("cannot locate config directory")?;
    let editor = Editor::open(config_path);
    let config = editor.config();
    let canvas = editor.canvas();
    info!(
        width = config.canvas.width,
        height = config.canvas.height,
        background = %config.canvas.background,
        objects = canvas.object_count(),
        mode = %canvas.mode(),
        "Canvas ready"
    );

    Ok(())
}
