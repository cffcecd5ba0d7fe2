//! Example: build a small synthetic survey, open it, and pull slices.
//!
//! Run with: cargo run --example volume_tour

use byteorder::{BigEndian, ByteOrder};
use segyview::{
    DrillFeed, DrillUpdate, SliceAxis, VolumeAccessor, BINARY_HEADER_LEN, TEXT_HEADER_LEN,
    TRACE_HEADER_LEN,
};
use std::io::Write;

const INLINES: std::ops::Range<i32> = 1000..1032;
const CROSSLINES: std::ops::Range<i32> = 2000..2048;
const SAMPLES: usize = 250;

/// Write a synthetic IEEE-float survey with a faint dipping reflector.
fn write_survey(path: &std::path::Path) -> anyhow::Result<()> {
    let mut bytes = vec![b' '; TEXT_HEADER_LEN];
    bytes[..36].copy_from_slice(b"C01 SYNTHETIC SURVEY FOR VOLUME TOUR");

    let mut binary = vec![0u8; BINARY_HEADER_LEN];
    BigEndian::write_u16(&mut binary[16..], 4000); // 4 ms
    BigEndian::write_u16(&mut binary[20..], SAMPLES as u16);
    BigEndian::write_u16(&mut binary[24..], 5); // IEEE float
    bytes.extend_from_slice(&binary);

    for il in INLINES {
        for xl in CROSSLINES {
            let mut header = vec![0u8; TRACE_HEADER_LEN];
            BigEndian::write_i32(&mut header[188..], il);
            BigEndian::write_i32(&mut header[192..], xl);
            bytes.extend_from_slice(&header);

            let reflector = 80 + ((il - 1000) + (xl - 2000) / 2) as usize;
            for s in 0..SAMPLES {
                let background = ((s as f32) * 0.31).sin() * 0.05;
                let event = if s.abs_diff(reflector) < 3 { 1.0 } else { 0.0 };
                let value = background + event;
                bytes.extend_from_slice(&value.to_be_bytes());
            }
        }
    }

    let mut file = std::fs::File::create(path)?;
    file.write_all(&bytes)?;
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let env = env_logger::Env::default().filter_or("RUST_LOG", "info");
    env_logger::init_from_env(env);

    println!("SegyView Example: Volume Tour");
    println!("=============================\n");

    let dir = tempfile::tempdir()?;
    let survey_path = dir.path().join("latest.sgy");
    write_survey(&survey_path)?;
    println!("Synthetic survey written to {}", survey_path.display());

    let accessor = VolumeAccessor::new();
    accessor.open(&survey_path)?;

    let summary = accessor.metadata()?;
    println!("\nVolume metadata:");
    println!("  Traces:      {}", summary.num_traces);
    println!(
        "  Inlines:     {} ({} - {})",
        summary.num_inlines,
        summary.inlines.first().unwrap(),
        summary.inlines.last().unwrap()
    );
    println!(
        "  Crosslines:  {} ({} - {})",
        summary.num_crosslines,
        summary.crosslines.first().unwrap(),
        summary.crosslines.last().unwrap()
    );
    println!("  Samples:     {} per trace", summary.samples_per_trace);
    println!(
        "  Sample rate: {:?} us, format {}",
        summary.sample_rate_us, summary.sample_format
    );
    println!("  Text header: {}", summary.text_header[0].trim_end());

    let inline = summary.inlines[summary.num_inlines / 2];
    let slice = accessor.slice(SliceAxis::Inline, inline)?;
    println!(
        "\nInline {} slice: {} samples x {} crosslines, amplitudes in [{:.3}, {:.3}]",
        inline,
        slice.nrows(),
        slice.ncols(),
        slice.iter().cloned().fold(f32::INFINITY, f32::min),
        slice.iter().cloned().fold(f32::NEG_INFINITY, f32::max),
    );

    let crossline = summary.crosslines[summary.num_crosslines / 2];
    let slice = accessor.slice(SliceAxis::Crossline, crossline)?;
    println!(
        "Crossline {} slice: {} samples x {} inlines",
        crossline,
        slice.nrows(),
        slice.ncols(),
    );

    // Drill telemetry feed: one subscriber watching bit updates
    let feed = DrillFeed::new();
    let (id, mut rx) = feed.subscribe();
    for step in 0..3 {
        feed.publish(DrillUpdate {
            bit: Some([5.05, 52.35, -1000.0 - 50.0 * step as f64]),
            md: Some(1500.0 + 50.0 * step as f64),
            path: None,
        });
    }

    println!("\nDrill feed delivered:");
    while let Ok(state) = rx.try_recv() {
        println!("  md {:>7.1}  bit {:?}", state.md, state.bit);
    }
    feed.unsubscribe(id);

    println!("\nDone.");
    Ok(())
}
