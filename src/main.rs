//! Builds stroked vector fonts from pixel-grid glyph definitions.
//!
//! Every glyph is drawn as a pen stroke through the centers of its filled
//! cells, then merged into clean outlines and written as UFO sources.

use pixelstroke::core;

fn main() {
    let cli_args = core::platform::get_cli_args();
    if let Err(error) = core::run_app(cli_args) {
        core::platform::handle_error(error);
    }
}
