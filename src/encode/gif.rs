use std::{
    fs::File,
    io::BufWriter,
    path::{Path, PathBuf},
};

use image::codecs::gif::{GifEncoder, Repeat};

use crate::{
    encode::sink::{FrameSink, SinkConfig},
    foundation::{
        core::{FrameIndex, Rgba8},
        error::{OdotsError, OdotsResult},
    },
    render::FrameRGBA,
};

pub fn ensure_parent_dir(path: &Path) -> OdotsResult<()> {
    if let Some(parent) = path.parent() {
        use anyhow::Context as _;
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create output directory '{}'", parent.display()))?;
    }
    Ok(())
}

/// Map 0–100 quality onto the GIF encoder's 1–30 speed scale (1 = best).
fn speed_from_quality(quality: u8) -> i32 {
    let q = i32::from(quality.min(100));
    (30 - (q * 29) / 100).clamp(1, 30)
}

/// Animated-GIF sink over the `image` crate's encoder.
///
/// Frames are flattened from premultiplied RGBA to opaque straight RGBA over
/// the configured background before encoding. The GIF trailer is written
/// when the inner encoder drops in [`FrameSink::end`].
pub struct GifSink {
    out_path: PathBuf,
    background: Rgba8,
    cfg: Option<SinkConfig>,
    encoder: Option<GifEncoder<BufWriter<File>>>,
    scratch: Vec<u8>,
    next_idx: u64,
}

impl GifSink {
    pub fn new(out_path: impl Into<PathBuf>, background: Rgba8) -> Self {
        Self {
            out_path: out_path.into(),
            background,
            cfg: None,
            encoder: None,
            scratch: Vec::new(),
            next_idx: 0,
        }
    }
}

impl FrameSink for GifSink {
    fn begin(&mut self, cfg: SinkConfig) -> OdotsResult<()> {
        if cfg.width == 0 || cfg.height == 0 {
            return Err(OdotsError::validation(
                "gif width/height must be non-zero",
            ));
        }
        if cfg.frame_delay_ms == 0 {
            return Err(OdotsError::validation("gif frame delay must be non-zero"));
        }

        ensure_parent_dir(&self.out_path)?;
        let file = File::create(&self.out_path).map_err(|e| {
            OdotsError::encode(format!(
                "failed to create output file '{}': {e}",
                self.out_path.display()
            ))
        })?;

        let mut encoder =
            GifEncoder::new_with_speed(BufWriter::new(file), speed_from_quality(cfg.quality));
        let repeat = match cfg.loop_count {
            0 => Repeat::Infinite,
            n => Repeat::Finite(n),
        };
        encoder
            .set_repeat(repeat)
            .map_err(|e| OdotsError::encode(format!("failed to set gif repeat: {e}")))?;

        self.scratch = vec![0u8; (cfg.width as usize) * (cfg.height as usize) * 4];
        self.encoder = Some(encoder);
        self.cfg = Some(cfg);
        self.next_idx = 0;
        Ok(())
    }

    fn push_frame(&mut self, idx: FrameIndex, frame: &FrameRGBA) -> OdotsResult<()> {
        let Some(cfg) = self.cfg.clone() else {
            return Err(OdotsError::encode("gif sink was not started"));
        };
        if frame.width != cfg.width || frame.height != cfg.height {
            return Err(OdotsError::validation(format!(
                "frame size mismatch: got {}x{}, expected {}x{}",
                frame.width, frame.height, cfg.width, cfg.height
            )));
        }
        if frame.data.len() != self.scratch.len() {
            return Err(OdotsError::validation(
                "frame.data size mismatch with width*height*4",
            ));
        }
        if idx.0 != self.next_idx {
            return Err(OdotsError::encode(format!(
                "frames must be pushed in tick order (got {}, expected {})",
                idx.0, self.next_idx
            )));
        }

        flatten_to_opaque_rgba8(
            &mut self.scratch,
            &frame.data,
            frame.premultiplied,
            self.background,
        )?;

        let Some(encoder) = self.encoder.as_mut() else {
            return Err(OdotsError::encode("gif encoder is already finalized"));
        };

        let buffer = image::RgbaImage::from_raw(cfg.width, cfg.height, self.scratch.clone())
            .ok_or_else(|| OdotsError::encode("failed to build gif frame buffer"))?;
        let delay = image::Delay::from_numer_denom_ms(cfg.frame_delay_ms, 1);
        encoder
            .encode_frame(image::Frame::from_parts(buffer, 0, 0, delay))
            .map_err(|e| OdotsError::encode(format!("failed to encode gif frame: {e}")))?;

        self.next_idx += 1;
        Ok(())
    }

    fn end(&mut self) -> OdotsResult<()> {
        let Some(encoder) = self.encoder.take() else {
            return Err(OdotsError::encode("gif encoder is already finalized"));
        };
        drop(encoder);
        tracing::debug!(path = %self.out_path.display(), frames = self.next_idx, "gif finalized");
        Ok(())
    }
}

fn flatten_to_opaque_rgba8(
    dst: &mut [u8],
    src: &[u8],
    src_is_premul: bool,
    background: Rgba8,
) -> OdotsResult<()> {
    if dst.len() != src.len() || !dst.len().is_multiple_of(4) {
        return Err(OdotsError::validation(
            "flatten_to_opaque_rgba8 expects equal-length rgba8 buffers",
        ));
    }

    let bg_r = u16::from(background.r);
    let bg_g = u16::from(background.g);
    let bg_b = u16::from(background.b);

    for (d, s) in dst.chunks_exact_mut(4).zip(src.chunks_exact(4)) {
        let a = u16::from(s[3]);
        if a == 255 {
            d.copy_from_slice(s);
            d[3] = 255;
            continue;
        }

        let inv = 255u16 - a;

        let (r, g, b) = if src_is_premul {
            (
                u16::from(s[0]) + mul_div255(bg_r, inv),
                u16::from(s[1]) + mul_div255(bg_g, inv),
                u16::from(s[2]) + mul_div255(bg_b, inv),
            )
        } else {
            (
                mul_div255(u16::from(s[0]), a) + mul_div255(bg_r, inv),
                mul_div255(u16::from(s[1]), a) + mul_div255(bg_g, inv),
                mul_div255(u16::from(s[2]), a) + mul_div255(bg_b, inv),
            )
        };

        d[0] = r.min(255) as u8;
        d[1] = g.min(255) as u8;
        d[2] = b.min(255) as u8;
        d[3] = 255;
    }

    Ok(())
}

fn mul_div255(x: u16, y: u16) -> u16 {
    (((u32::from(x) * u32::from(y)) + 127) / 255) as u16
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn speed_mapping_covers_quality_range() {
        assert_eq!(speed_from_quality(100), 1);
        assert_eq!(speed_from_quality(0), 30);
        for q in 0..=100u8 {
            let s = speed_from_quality(q);
            assert!((1..=30).contains(&s));
        }
    }

    #[test]
    fn flatten_premul_over_black_produces_expected_rgb() {
        // Premultiplied red @ 50% alpha => rgb is 128,0,0 when premul.
        let src = vec![128u8, 0, 0, 128];
        let mut dst = vec![0u8; 4];
        flatten_to_opaque_rgba8(&mut dst, &src, true, Rgba8::BLACK).unwrap();
        assert_eq!(dst, vec![128u8, 0, 0, 255]);
    }

    #[test]
    fn flatten_straight_over_black_produces_expected_rgb() {
        // Straight red @ 50% alpha => rgb becomes 128,0,0 over black.
        let src = vec![255u8, 0, 0, 128];
        let mut dst = vec![0u8; 4];
        flatten_to_opaque_rgba8(&mut dst, &src, false, Rgba8::BLACK).unwrap();
        assert_eq!(dst, vec![128u8, 0, 0, 255]);
    }

    #[test]
    fn flatten_opaque_pixels_pass_through() {
        let src = vec![1u8, 2, 3, 255];
        let mut dst = vec![0u8; 4];
        flatten_to_opaque_rgba8(&mut dst, &src, true, Rgba8::BLACK).unwrap();
        assert_eq!(dst, src);
    }

    #[test]
    fn push_before_begin_is_an_error() {
        let mut sink = GifSink::new(std::env::temp_dir().join("odots_never.gif"), Rgba8::BLACK);
        let frame = FrameRGBA {
            width: 1,
            height: 1,
            data: vec![0; 4],
            premultiplied: true,
        };
        assert!(sink.push_frame(FrameIndex(0), &frame).is_err());
    }

    #[test]
    fn out_of_order_frames_are_rejected() {
        let path = std::env::temp_dir().join(format!("odots_order_{}.gif", std::process::id()));
        let mut sink = GifSink::new(&path, Rgba8::BLACK);
        sink.begin(SinkConfig {
            width: 4,
            height: 4,
            frame_delay_ms: 20,
            quality: 100,
            loop_count: 0,
        })
        .unwrap();

        let frame = FrameRGBA {
            width: 4,
            height: 4,
            data: vec![0; 64],
            premultiplied: true,
        };
        sink.push_frame(FrameIndex(0), &frame).unwrap();
        assert!(sink.push_frame(FrameIndex(2), &frame).is_err());

        sink.end().unwrap();
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn end_twice_is_an_error() {
        let path = std::env::temp_dir().join(format!("odots_end_{}.gif", std::process::id()));
        let mut sink = GifSink::new(&path, Rgba8::BLACK);
        sink.begin(SinkConfig {
            width: 4,
            height: 4,
            frame_delay_ms: 20,
            quality: 100,
            loop_count: 0,
        })
        .unwrap();
        sink.end().unwrap();
        assert!(sink.end().is_err());
        let _ = std::fs::remove_file(&path);
    }
}
