pub mod surface;
pub mod text;

/// A rendered frame as RGBA8 pixels.
///
/// Frames snapshotted from the drawing surface are **premultiplied alpha**;
/// the `premultiplied` flag makes this explicit at API boundaries. Sinks
/// flatten to opaque straight RGBA before encoding.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameRGBA {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// RGBA8 bytes, tightly packed, row-major.
    pub data: Vec<u8>,
    /// Whether `data` is premultiplied alpha.
    pub premultiplied: bool,
}
