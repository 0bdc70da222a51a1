use goodscart_core::cart::pricing::format_amount;
use goodscart_core::config::LoadOptions;
use goodscart_core::CartSummary;

use crate::commands::{apply_events, mount, CommandResult};

pub fn run(options: LoadOptions, events: &[String], json: bool) -> CommandResult {
    let mut app = match mount(options) {
        Ok(app) => app,
        Err(error) => return CommandResult::from_error("summary", &error),
    };

    if let Err(error) = apply_events(&mut app, events) {
        return CommandResult::from_error("summary", &error);
    }

    let summary = app.state().summary();
    let message = describe(&summary);

    if !json {
        return CommandResult::text(message);
    }

    match serde_json::to_value(&summary) {
        Ok(data) => CommandResult::success_with_data("summary", message, Some(data)),
        Err(error) => CommandResult::failure("summary", "serialization", error.to_string(), 1),
    }
}

fn describe(summary: &CartSummary) -> String {
    let delivery = if summary.meets_delivery_threshold {
        "free delivery threshold met".to_string()
    } else {
        format!("{} more for free delivery", summary.remaining_for_free_delivery)
    };
    format!(
        "{} item(s), total ${}, {delivery}",
        summary.total_selected_count,
        format_amount(summary.total_price)
    )
}
