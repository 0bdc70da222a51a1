use goodscart_core::config::LoadOptions;
use tracing::info;

use crate::commands::{apply_events, mount, CommandResult};

pub fn run(options: LoadOptions, events: &[String]) -> CommandResult {
    let mut app = match mount(options) {
        Ok(app) => app,
        Err(error) => return CommandResult::from_error("simulate", &error),
    };

    if let Err(error) = apply_events(&mut app, events) {
        return CommandResult::from_error("simulate", &error);
    }

    info!(
        event_name = "cli.simulate.completed",
        events = events.len(),
        repaints = app.view().repaints(),
        "simulation finished"
    );
    CommandResult::text(app.view().screen())
}
