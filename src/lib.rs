//! Odots renders a short looping animation of a stylized "O" glyph whose two
//! dot accents swing and merge into a cross pattern, and writes it out as an
//! animated GIF.
//!
//! One scalar progress value in `[0, 1)` drives everything: the
//! [`animation::scale`] helpers split it into independently-eased segments,
//! a [`scene::Scene`] turns it into paint operations on a [`Surface`], and a
//! [`RenderSession`] runs the tick loop that streams frames into a
//! [`FrameSink`].
#![forbid(unsafe_code)]

pub mod animation;
pub mod config;
pub mod encode;
mod foundation;
pub mod render;
pub mod scene;
pub mod session;

pub use crate::foundation::core::{Canvas, FrameIndex, Rgba8};
pub use crate::foundation::error::{OdotsError, OdotsResult};

pub use crate::animation::animator::Animator;
pub use crate::animation::progress::{CycleEvent, Progress};
pub use crate::animation::ticker::Ticker;
pub use crate::config::{RenderConfig, Variant};
pub use crate::encode::gif::GifSink;
pub use crate::encode::sink::{FrameSink, InMemorySink, SinkConfig};
pub use crate::render::FrameRGBA;
pub use crate::render::surface::{LineCap, Surface};
pub use crate::render::text::TextMetrics;
pub use crate::scene::{Scene, glyph::DotGlyph, ring::RingDots};
pub use crate::session::{RenderSession, RenderStats};
