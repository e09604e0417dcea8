mod app;
mod catalog;
pub mod config;
mod effects;
mod logging;
mod oneshot;
mod ui;

use config::{Args, Command};
use logging::LogDestination;

pub fn run(args: Args) -> anyhow::Result<()> {
    let level = args.level_filter();
    match &args.command {
        None => {
            logging::initialize(LogDestination::File(args.log_file.clone()), level);
            app::run_app(&args)
        }
        Some(Command::Count { chat, model, text }) => {
            logging::initialize(LogDestination::Terminal, level);
            oneshot::count(&args, *chat, model.as_deref(), text.as_deref())
        }
        Some(Command::Models) => {
            logging::initialize(LogDestination::Terminal, level);
            oneshot::list_models(&args)
        }
    }
}
