use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use std::hint::black_box;
use vtcore::{rgb, sixel_decode, SixelParser};

/// A `width` x `bands*6` raster drawn with one repeat run per band; the
/// rectangle-fill path does almost all of the work.
fn run_filled_stream(width: usize, bands: usize) -> Vec<u8> {
    let mut data = Vec::from(&b"\x1bPq#1;2;20;40;80"[..]);
    for _ in 0..bands {
        data.extend_from_slice(format!("!{width}~-").as_bytes());
    }
    data.extend_from_slice(b"\x1b\\");
    data
}

/// The same raster with every column spelled out as its own sixel byte.
fn column_filled_stream(width: usize, bands: usize) -> Vec<u8> {
    let mut data = Vec::from(&b"\x1bPq#1;2;20;40;80"[..]);
    for _ in 0..bands {
        data.resize(data.len() + width, b'~');
        data.push(b'-');
    }
    data.extend_from_slice(b"\x1b\\");
    data
}

fn bench_fill_paths(c: &mut Criterion) {
    let mut group = c.benchmark_group("fill_paths");

    let repeated = run_filled_stream(200, 20);
    let spelled = column_filled_stream(200, 20);

    group.bench_with_input(
        BenchmarkId::new("repeat_runs", "200x120"),
        &repeated,
        |b, data| b.iter(|| sixel_decode(black_box(data))),
    );
    group.bench_with_input(
        BenchmarkId::new("single_columns", "200x120"),
        &spelled,
        |b, data| b.iter(|| sixel_decode(black_box(data))),
    );

    group.finish();
}

fn bench_canvas_sizing(c: &mut Criterion) {
    let mut group = c.benchmark_group("canvas_sizing");

    for size in [64usize, 256, 1024] {
        let bands = size / 6;

        // Nothing declared: the 1x1 grid doubles its way up under the
        // painting, recopying on every step.
        let mut grown = Vec::from(&b"\x1bPq#1;2;80;13;13"[..]);
        for _ in 0..bands {
            grown.extend_from_slice(format!("!{size}~-").as_bytes());
        }
        grown.extend_from_slice(b"\x1b\\");

        // Raster attributes size the canvas once up front.
        let mut declared = Vec::from(&b"\x1bPq"[..]);
        declared.extend_from_slice(format!("\"1;1;{size};{size}").as_bytes());
        declared.extend_from_slice(b"#1;2;80;13;13");
        for _ in 0..bands {
            declared.extend_from_slice(format!("!{size}~-").as_bytes());
        }
        declared.extend_from_slice(b"\x1b\\");

        group.bench_with_input(BenchmarkId::new("grown", size), &grown, |b, data| {
            b.iter(|| sixel_decode(black_box(data)))
        });
        group.bench_with_input(BenchmarkId::new("declared", size), &declared, |b, data| {
            b.iter(|| sixel_decode(black_box(data)))
        });
    }

    group.finish();
}

fn bench_color_definitions(c: &mut Criterion) {
    let mut group = c.benchmark_group("color_definitions");

    // Redefine a register before every column. The HLS variant pays for the
    // hexcone conversion on each definition; the RGB variant only scales
    // percentages.
    let mut rgb_stream = Vec::from(&b"\x1bPq"[..]);
    for i in 0..128usize {
        let (r, g, b) = (i * 100 / 127, (i * 37) % 101, (i * 59) % 101);
        rgb_stream.extend_from_slice(format!("#{i};2;{r};{g};{b}#{i}~").as_bytes());
    }
    rgb_stream.extend_from_slice(b"\x1b\\");

    let mut hls_stream = Vec::from(&b"\x1bPq"[..]);
    for i in 0..128usize {
        let (h, l, s) = ((i * 17) % 361, 25 + (i * 13) % 50, 50 + (i * 7) % 51);
        hls_stream.extend_from_slice(format!("#{i};1;{h};{l};{s}#{i}~").as_bytes());
    }
    hls_stream.extend_from_slice(b"\x1b\\");

    group.bench_with_input(
        BenchmarkId::new("rgb_percent", 128),
        &rgb_stream,
        |b, data| b.iter(|| sixel_decode(black_box(data))),
    );
    group.bench_with_input(BenchmarkId::new("hls", 128), &hls_stream, |b, data| {
        b.iter(|| sixel_decode(black_box(data)))
    });

    group.finish();
}

fn bench_feed_granularity(c: &mut Criterion) {
    let mut group = c.benchmark_group("feed_granularity");

    // A PTY rarely hands the emulator a whole image at once; measure what
    // resumable per-chunk feeding costs over a single pass.
    let data = run_filled_stream(200, 24);

    group.bench_with_input(BenchmarkId::new("whole_buffer", data.len()), &data, |b, data| {
        b.iter(|| sixel_decode(black_box(data)))
    });

    for chunk in [1usize, 64] {
        group.bench_with_input(
            BenchmarkId::new(format!("chunks_of_{chunk}"), data.len()),
            &data,
            |b, data| {
                b.iter(|| {
                    let mut parser = SixelParser::new(rgb(255, 255, 255), rgb(0, 0, 0), true);
                    for piece in data.chunks(chunk) {
                        parser.advance(black_box(piece));
                    }
                    parser.finish()
                })
            },
        );
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_fill_paths,
    bench_canvas_sizing,
    bench_color_definitions,
    bench_feed_granularity
);

criterion_main!(benches);
