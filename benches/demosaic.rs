use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use epuck_capture::image_pipeline::debayer::{self, BayerPattern, DebayerBackend};
use epuck_capture::image_pipeline::protocol::parse_frame;
use epuck_capture::image_pipeline::sink::{FileImageSink, OutputFormat, PixelGrid};

fn generate_mock_mosaic(width: usize, height: usize) -> Vec<u8> {
    let mut data = Vec::with_capacity(width * height);
    for y in 0..height {
        for x in 0..width {
            data.push(((x * 7 + y * 13) % 256) as u8);
        }
    }
    data
}

fn benchmark_backends(c: &mut Criterion) {
    let mut group = c.benchmark_group("demosaic_backends");

    let sizes = vec![
        (160, 120, "160x120"),
        (640, 480, "640x480"),
        (1280, 960, "1280x960"),
    ];

    for (width, height, label) in sizes {
        let mosaic = generate_mock_mosaic(width, height);

        for backend in [DebayerBackend::Bilinear, DebayerBackend::BayerCrate] {
            group.bench_with_input(
                BenchmarkId::new(backend.to_string(), label),
                &mosaic,
                |b, data| {
                    b.iter(|| {
                        let _ = debayer::run(
                            backend,
                            black_box(data),
                            width,
                            height,
                            BayerPattern::Grbg,
                        );
                    });
                },
            );
        }
    }

    group.finish();
}

fn benchmark_patterns(c: &mut Criterion) {
    let mut group = c.benchmark_group("demosaic_patterns");
    let mosaic = generate_mock_mosaic(160, 120);

    for pattern in BayerPattern::ALL {
        group.bench_function(pattern.name(), |b| {
            b.iter(|| debayer::demosaic(black_box(&mosaic), 160, 120, pattern));
        });
    }

    group.finish();
}

fn benchmark_frame_to_jpeg(c: &mut Criterion) {
    let mut group = c.benchmark_group("frame_to_jpeg");

    let mut response = vec![0, 160, 120];
    response.extend(generate_mock_mosaic(160, 120));

    for quality in [30u8, 70, 95] {
        group.bench_with_input(BenchmarkId::from_parameter(quality), &response, |b, data| {
            b.iter(|| {
                let Ok(frame) = parse_frame(black_box(data)) else {
                    return;
                };
                let Ok(image) = debayer::demosaic(
                    frame.payload(),
                    frame.width(),
                    frame.height(),
                    BayerPattern::Grbg,
                ) else {
                    return;
                };
                let mut output = Vec::new();
                let _ = FileImageSink.encode(
                    PixelGrid::Rgb(&image),
                    OutputFormat::Jpeg,
                    quality,
                    &mut output,
                );
            });
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    benchmark_backends,
    benchmark_patterns,
    benchmark_frame_to_jpeg
);
criterion_main!(benches);
