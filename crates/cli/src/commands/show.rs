use goodscart_core::config::LoadOptions;

use crate::commands::{mount, CommandResult};

pub fn run(options: LoadOptions) -> CommandResult {
    match mount(options) {
        Ok(app) => CommandResult::text(app.view().screen()),
        Err(error) => CommandResult::from_error("show", &error),
    }
}
