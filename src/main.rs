//! Bounce Shake entry point

use bounce_shake::Settings;
use bounce_shake::app::App;

fn main() {
    env_logger::init();
    log::info!("Bounce Shake starting...");

    let settings = Settings::load();
    if let Err(err) = App::run(settings) {
        log::error!("Fatal: {:#}", err);
        std::process::exit(1);
    }

    log::info!("Bounce Shake exited cleanly");
}
