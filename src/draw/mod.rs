//! Client side of the catalog: the draw carousel and its state machine.
//!
//! Nothing here renders pixels. A [`view::Surface`] paints the frames the view computes, and a
//! [`source::PickSource`] supplies the pool and the pick.

/// Spin travel and timing.
pub mod animation;
/// Card art preloading with fallbacks.
pub mod assets;
/// Carousel geometry.
pub mod carousel;
/// Client and carousel settings.
pub mod config;
pub mod easing;
/// Failures surfaced to the user.
pub mod error;
/// Draw lifecycle state machine.
pub mod phase;
/// Pool and pick providers.
pub mod source;
/// The draw view tying everything together.
pub mod view;

pub use config::{ClientConfig, DrawConfig, PickLocus};
pub use error::DrawError;
pub use phase::{AnimationState, DrawPhase};
pub use view::{DrawListener, DrawView, Surface};
