pub mod config;
pub mod show;
pub mod simulate;
pub mod summary;

use goodscart_core::config::{AppConfig, LoadOptions};
use goodscart_core::dispatch::parse_token;
use goodscart_core::{ApplicationError, CartApp, CartState, CartView, Layout, TextView};
use serde::Serialize;

#[derive(Debug, Clone)]
pub struct CommandResult {
    pub exit_code: u8,
    pub output: String,
}

#[derive(Debug, Serialize)]
struct CommandOutcome {
    command: String,
    status: String,
    error_class: Option<String>,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<serde_json::Value>,
}

impl CommandResult {
    pub fn success_with_data(
        command: &str,
        message: impl Into<String>,
        data: Option<serde_json::Value>,
    ) -> Self {
        let payload = CommandOutcome {
            command: command.to_string(),
            status: "ok".to_string(),
            error_class: None,
            message: message.into(),
            data,
        };
        Self { exit_code: 0, output: serialize_payload(payload) }
    }

    pub fn failure(
        command: &str,
        error_class: &str,
        message: impl Into<String>,
        exit_code: u8,
    ) -> Self {
        let payload = CommandOutcome {
            command: command.to_string(),
            status: "error".to_string(),
            error_class: Some(error_class.to_string()),
            message: message.into(),
            data: None,
        };
        Self { exit_code, output: serialize_payload(payload) }
    }

    pub fn from_error(command: &str, error: &ApplicationError) -> Self {
        Self::failure(
            command,
            error.error_class(),
            format!("{} ({error})", error.user_message()),
            exit_code_for(error),
        )
    }

    /// Plain text output, for commands whose result is a rendered screen.
    pub fn text(output: impl Into<String>) -> Self {
        Self { exit_code: 0, output: output.into() }
    }
}

fn exit_code_for(error: &ApplicationError) -> u8 {
    match error.error_class() {
        "config_validation" => 2,
        "catalog" => 3,
        "invalid_event" => 4,
        "index_out_of_range" => 5,
        _ => 1,
    }
}

fn serialize_payload(payload: CommandOutcome) -> String {
    serde_json::to_string(&payload).unwrap_or_else(|error| {
        format!(
            "{{\"command\":\"unknown\",\"status\":\"error\",\"error_class\":\"serialization\",\"message\":\"{}\"}}",
            error.to_string().replace('\\', "\\\\").replace('"', "\\\"")
        )
    })
}

/// Loads config and catalog, then mounts the cart on a fresh terminal view.
pub(crate) fn mount(options: LoadOptions) -> Result<CartApp<TextView>, ApplicationError> {
    let config = AppConfig::load(options)?;
    let catalog = config.load_catalog()?;
    let state = CartState::new(catalog, config.delivery_policy());
    Ok(CartApp::new(state, TextView::new(), Layout::default()))
}

/// Applies every token in order. Flights land immediately and the bounce
/// finishes right after, as there is no frame clock in a terminal.
pub(crate) fn apply_events<V: CartView>(
    app: &mut CartApp<V>,
    tokens: &[String],
) -> Result<(), ApplicationError> {
    for token in tokens {
        let event = parse_token(token).map_err(ApplicationError::from)?;
        let outcome = app.dispatch(event)?;
        if let Some(flight) = outcome.flight {
            app.complete_flight(flight);
            app.bounce_finished();
        }
    }
    Ok(())
}
