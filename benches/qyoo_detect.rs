use criterion::{Criterion, black_box, criterion_group, criterion_main};
use qyoo_detect::decoder::{decode_payload, encode_payload};
use qyoo_detect::detector::contour::trace_contours;
use qyoo_detect::detector::rectify::RectifiedPatch;
use qyoo_detect::{DetectionPipeline, DetectorConfig, RasterBuffer, detect_from_grayscale};

fn marker_frame(size: usize) -> Vec<u8> {
    let config = DetectorConfig::default();
    let total = config.total_cells();
    let cells = encode_payload(&[0x51, 0x79, 0x6F, 0x6F, 0x21, 0x07, 0xC3], &config);

    let mut frame = vec![255u8; size * size];
    let cell_px = 8;
    let origin = size / 4;
    for cy in 0..total {
        for cx in 0..total {
            let value = if cells[cy * total + cx] { 0 } else { 255 };
            for py in 0..cell_px {
                for px in 0..cell_px {
                    let x = origin + cx * cell_px + px;
                    let y = origin + cy * cell_px + py;
                    frame[y * size + x] = value;
                }
            }
        }
    }
    frame
}

fn bench_detect_blank(c: &mut Criterion) {
    let frame = vec![200u8; 640 * 480];
    c.bench_function("detect_blank_640x480", |b| {
        b.iter(|| detect_from_grayscale(black_box(&frame), black_box(640), black_box(480)))
    });
}

fn bench_detect_marker(c: &mut Criterion) {
    let frame = marker_frame(480);
    c.bench_function("detect_marker_480x480", |b| {
        b.iter(|| detect_from_grayscale(black_box(&frame), black_box(480), black_box(480)))
    });
}

fn bench_pipeline_reuse(c: &mut Criterion) {
    let frame = marker_frame(480);
    let mut pipeline = DetectionPipeline::new();
    c.bench_function("pipeline_marker_480x480", |b| {
        b.iter(|| {
            let buffer = RasterBuffer::from_gray(frame.clone(), 480, 480).unwrap();
            pipeline.detect(black_box(buffer))
        })
    });
}

fn bench_trace_contours(c: &mut Criterion) {
    let frame = marker_frame(480);
    let buffer = RasterBuffer::from_gray(frame, 480, 480).unwrap();
    let config = DetectorConfig::default();
    c.bench_function("trace_contours_480x480", |b| {
        b.iter(|| trace_contours(black_box(&buffer), black_box(&config)))
    });
}

fn bench_decode_payload(c: &mut Criterion) {
    let config = DetectorConfig::default();
    let cells = encode_payload(&[1, 2, 3, 4, 5, 6, 7], &config);
    let patch = RectifiedPatch::from_cells(&cells, &config);
    c.bench_function("decode_payload_80x80", |b| {
        b.iter(|| decode_payload(black_box(&patch), black_box(&config)))
    });
}

criterion_group!(
    benches,
    bench_detect_blank,
    bench_detect_marker,
    bench_pipeline_reuse,
    bench_trace_contours,
    bench_decode_payload
);
criterion_main!(benches);
