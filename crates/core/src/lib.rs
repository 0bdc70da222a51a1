pub mod animation;
pub mod cart;
pub mod config;
pub mod dispatch;
pub mod domain;
pub mod errors;
pub mod view;

pub use animation::{AnimationTracker, Completion, FlightHandle, FlightId, Layout, Point, Rect};
pub use cart::pricing::{CartSummary, DeliveryPolicy};
pub use cart::CartState;
pub use dispatch::{CartApp, CartEvent, DispatchError, DispatchOutcome, Intent};
pub use domain::catalog::{Catalog, CatalogEntry, CatalogError};
pub use domain::item::Item;
pub use errors::{ApplicationError, DomainError};
pub use view::{CartView, FooterView, ItemView, RecordingView, RenderCall, TextView};
