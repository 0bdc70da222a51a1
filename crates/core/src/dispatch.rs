use std::fmt;

use serde::Serialize;
use thiserror::Error;
use tracing::{info, warn};

use crate::animation::{AnimationTracker, Completion, FlightHandle, FlightId, Layout};
use crate::cart::CartState;
use crate::errors::DomainError;
use crate::view::{CartView, FooterView, ItemView};

/// Class carried by the "+" control of every row.
pub const INCREASE_CONTROL_CLASS: &str = "i-jiajianzujianjiahao";
/// Class carried by the "-" control of every row.
pub const DECREASE_CONTROL_CLASS: &str = "i-jianhao";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    Increase,
    Decrease,
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Increase => f.write_str("increase"),
            Self::Decrease => f.write_str("decrease"),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct CartEvent {
    pub index: usize,
    pub intent: Intent,
}

impl CartEvent {
    pub fn increase(index: usize) -> Self {
        Self { index, intent: Intent::Increase }
    }

    pub fn decrease(index: usize) -> Self {
        Self { index, intent: Intent::Decrease }
    }
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum DispatchError {
    #[error("unrecognized cart event `{0}` (expected +N, -N, inc:N or dec:N)")]
    UnknownToken(String),
    #[error("control activation is missing its index attribute")]
    MissingIndex,
    #[error("invalid item index `{0}`")]
    InvalidIndex(String),
    #[error(transparent)]
    Domain(#[from] DomainError),
}

/// Maps a click on the goods list to an event. Clicks that did not land on a
/// quantity control yield `Ok(None)`.
pub fn event_from_activation(
    class_list: &str,
    index_attr: Option<&str>,
) -> Result<Option<CartEvent>, DispatchError> {
    let intent = if has_class(class_list, INCREASE_CONTROL_CLASS) {
        Intent::Increase
    } else if has_class(class_list, DECREASE_CONTROL_CLASS) {
        Intent::Decrease
    } else {
        return Ok(None);
    };

    let raw = index_attr.ok_or(DispatchError::MissingIndex)?;
    let index = parse_index(raw)?;
    Ok(Some(CartEvent { index, intent }))
}

fn has_class(class_list: &str, class: &str) -> bool {
    class_list.split_ascii_whitespace().any(|candidate| candidate == class)
}

/// Plain decimal digits only; `usize::from_str` alone would also take a sign.
fn parse_index(raw: &str) -> Result<usize, DispatchError> {
    let digits = raw.trim();
    if digits.is_empty() || !digits.bytes().all(|byte| byte.is_ascii_digit()) {
        return Err(DispatchError::InvalidIndex(raw.to_string()));
    }
    digits.parse::<usize>().map_err(|_| DispatchError::InvalidIndex(raw.to_string()))
}

/// Parses the terminal shorthand: `+N` / `-N`, or `inc:N` / `dec:N`.
pub fn parse_token(token: &str) -> Result<CartEvent, DispatchError> {
    let trimmed = token.trim();
    let (intent, raw_index) = if let Some(rest) = trimmed.strip_prefix('+') {
        (Intent::Increase, rest)
    } else if let Some(rest) = trimmed.strip_prefix('-') {
        (Intent::Decrease, rest)
    } else if let Some(rest) = trimmed.strip_prefix("inc:") {
        (Intent::Increase, rest)
    } else if let Some(rest) = trimmed.strip_prefix("dec:") {
        (Intent::Decrease, rest)
    } else {
        return Err(DispatchError::UnknownToken(token.to_string()));
    };

    if raw_index.trim().is_empty() {
        return Err(DispatchError::UnknownToken(token.to_string()));
    }

    Ok(CartEvent { index: parse_index(raw_index)?, intent })
}

#[derive(Debug)]
pub struct DispatchOutcome {
    pub event: CartEvent,
    pub quantity: u32,
    /// Present for increases that changed the quantity; hand it back through
    /// [`CartApp::complete_flight`]. A dropped handle keeps its flight counted in
    /// [`AnimationTracker::in_flight`] until [`CartApp::complete_flight_id`] is
    /// called with its id.
    pub flight: Option<FlightHandle>,
}

/// The running widget: cart state, the view it is projected through, and the
/// fly-to-cart animations. Constructed and owned by whoever feeds it input.
pub struct CartApp<V> {
    state: CartState,
    view: V,
    animations: AnimationTracker,
}

impl<V> CartApp<V>
where
    V: CartView,
{
    /// Renders every row and the footer once.
    pub fn new(state: CartState, view: V, layout: Layout) -> Self {
        let mut app = Self { state, view, animations: AnimationTracker::new(layout) };
        for (index, item) in app.state.items().iter().enumerate() {
            app.view.render_item(index, &ItemView::from_item(item));
        }
        app.refresh_footer();
        info!(
            event_name = "cart.app.mounted",
            items = app.state.len(),
            delivery_threshold = %app.state.delivery_threshold(),
            "cart mounted"
        );
        app
    }

    pub fn state(&self) -> &CartState {
        &self.state
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    pub fn into_view(self) -> V {
        self.view
    }

    pub fn animations(&self) -> &AnimationTracker {
        &self.animations
    }

    pub fn dispatch(&mut self, event: CartEvent) -> Result<DispatchOutcome, DomainError> {
        let applied = match event.intent {
            Intent::Increase => self.state.increase(event.index),
            Intent::Decrease => self.state.decrease(event.index),
        };
        let changed = match applied {
            Ok(changed) => changed,
            Err(error) => {
                warn!(
                    event_name = "cart.dispatch.rejected",
                    index = event.index,
                    intent = %event.intent,
                    error = %error,
                    "cart event rejected"
                );
                return Err(error);
            }
        };
        let quantity = self.state.quantity(event.index)?;

        if !changed {
            info!(
                event_name = "cart.dispatch.unchanged",
                index = event.index,
                intent = %event.intent,
                quantity,
                "cart event left quantity unchanged"
            );
            return Ok(DispatchOutcome { event, quantity, flight: None });
        }

        self.refresh_item(event.index)?;
        self.refresh_footer();

        let flight = match event.intent {
            Intent::Increase => Some(self.animations.start_flight(event.index)),
            Intent::Decrease => None,
        };

        info!(
            event_name = "cart.dispatch.applied",
            index = event.index,
            intent = %event.intent,
            quantity,
            total_price = %self.state.total_price(),
            "cart event applied"
        );

        Ok(DispatchOutcome { event, quantity, flight })
    }

    /// Click entry point: resolves the activated control, then dispatches.
    pub fn handle_activation(
        &mut self,
        class_list: &str,
        index_attr: Option<&str>,
    ) -> Result<Option<DispatchOutcome>, DispatchError> {
        match event_from_activation(class_list, index_attr)? {
            Some(event) => Ok(Some(self.dispatch(event)?)),
            None => Ok(None),
        }
    }

    pub fn complete_flight(&mut self, handle: FlightHandle) -> Completion {
        let completion = self.animations.complete(handle);
        self.after_completion(completion)
    }

    pub fn complete_flight_id(&mut self, id: FlightId) -> Completion {
        let completion = self.animations.complete_id(id);
        self.after_completion(completion)
    }

    pub fn bounce_finished(&mut self) {
        self.animations.bounce_finished();
        self.view.render_cart_bounce(false);
    }

    fn after_completion(&mut self, completion: Completion) -> Completion {
        if completion == Completion::Landed {
            self.view.render_cart_bounce(true);
        }
        completion
    }

    fn refresh_item(&mut self, index: usize) -> Result<(), DomainError> {
        let item = self.state.item(index)?;
        self.view.render_item(index, &ItemView::from_item(item));
        Ok(())
    }

    fn refresh_footer(&mut self) {
        let footer = FooterView::from_summary(&self.state.summary());
        self.view.render_footer(&footer);
    }
}
