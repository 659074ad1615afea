use std::io::BufReader;

use image::AnimationDecoder as _;
use odots::{GifSink, InMemorySink, RenderSession, RingDots, Variant};

fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

fn temp_gif(tag: &str) -> std::path::PathBuf {
    std::env::temp_dir().join(format!("odots_{tag}_{}.gif", std::process::id()))
}

#[test]
fn ring_cycle_writes_a_decodable_gif() {
    init_tracing();

    // Small canvas keeps the palette quantization cheap; the cycle length
    // and pacing are independent of canvas size.
    let mut config = Variant::Ring.config();
    config.canvas.width = 100;
    config.canvas.height = 100;
    let mut session = RenderSession::new(config, Box::new(RingDots)).unwrap();

    let path = temp_gif("ring");
    let mut sink = GifSink::new(&path, config.background);
    let stats = session.render(&mut sink).unwrap();
    assert_eq!(stats.frames_encoded, 50);
    assert_eq!(stats.cycles_completed, 1);

    let bytes = std::fs::read(&path).unwrap();
    assert!(bytes.starts_with(b"GIF89a"), "expected a GIF89a header");

    let decoder =
        image::codecs::gif::GifDecoder::new(BufReader::new(std::fs::File::open(&path).unwrap()))
            .unwrap();
    let frames = decoder.into_frames().collect_frames().unwrap();
    assert_eq!(frames.len(), 50);
    for frame in &frames {
        let (num, den) = frame.delay().numer_denom_ms();
        assert_eq!(num, 20 * den, "expected a 20ms inter-frame delay");
    }

    let _ = std::fs::remove_file(&path);
}

#[test]
fn glyph_cycle_streams_150_frames_and_finalizes_once() {
    init_tracing();

    let mut session = RenderSession::for_variant(Variant::Glyph).unwrap();
    let mut sink = InMemorySink::new();
    let stats = session.render(&mut sink).unwrap();

    assert_eq!(stats.ticks, 150);
    assert_eq!(stats.frames_encoded, 150);
    assert_eq!(stats.cycles_completed, 1);
    assert!(sink.is_ended());
    assert_eq!(sink.frames().len(), 150);

    // Strictly increasing tick order all the way through.
    for (i, (idx, frame)) in sink.frames().iter().enumerate() {
        assert_eq!(idx.0, i as u64);
        assert_eq!(frame.width, 500);
        assert_eq!(frame.height, 500);
    }
}

#[test]
fn encoded_frames_reflect_pre_advance_progress() {
    init_tracing();

    let mut config = Variant::Ring.config();
    config.canvas.width = 80;
    config.canvas.height = 80;
    let mut session = RenderSession::new(config, Box::new(RingDots)).unwrap();
    let mut sink = InMemorySink::new();
    session.render(&mut sink).unwrap();

    let mut fresh = RenderSession::new(config, Box::new(RingDots)).unwrap();
    for tick in [0u64, 7, 25, 49] {
        let expected = fresh.frame_at(tick).unwrap();
        assert_eq!(
            sink.frames()[tick as usize].1,
            expected,
            "frame at tick {tick} must match a standalone render at the same progress"
        );
    }
}
