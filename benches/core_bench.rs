use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use glam::DVec2;
use rhombus_plotter::{encode, import_svg, solve, ArmConfig, Path, Slicer, SvgImportOptions};
use std::hint::black_box;

fn plotter() -> ArmConfig {
    ArmConfig::new(200.0, 100.0, 360.0, 2900, 200.0)
}

fn bench_svg_import(c: &mut Criterion) {
    let svg_content = include_str!("../tests/fixtures/sample.svg");
    let options = SvgImportOptions::default();

    c.bench_function("svg_import_sample", |b| {
        b.iter(|| {
            let path = import_svg(black_box(svg_content), &options).expect("SVG import failed");
            black_box(path.len())
        })
    });
}

fn build_query_points(count: usize) -> Vec<DVec2> {
    (0..count)
        .map(|i| {
            let x = ((i * 37) % 800) as f64 - 400.0 + 0.37;
            let y = ((i * 7) % 400) as f64 + 0.63;
            DVec2::new(x, y)
        })
        .collect()
}

fn build_synthetic_path(sample_count: usize) -> Path {
    let mut path = Path::new();
    for index in 0..sample_count {
        let t = index as f64 / sample_count as f64;
        let radius = 120.0 + 220.0 * t;
        let angle = (t * 40.0).sin() * 60.0;
        let (sin, cos) = angle.to_radians().sin_cos();
        path.push_sample(DVec2::new(radius * sin, radius * cos));
        if index % 500 == 499 {
            path.push_pen_lift();
        }
    }
    path
}

fn bench_kinematics(c: &mut Criterion) {
    let config = plotter();
    let query_points = build_query_points(1024);

    c.bench_function("solve_batch_1024", |b| {
        b.iter(|| {
            let mut producible = 0usize;
            for point in &query_points {
                if solve(black_box(*point), &config).is_producible() {
                    producible += 1;
                }
            }
            black_box(producible)
        })
    });
}

fn bench_slice_and_encode(c: &mut Criterion) {
    let mut group = c.benchmark_group("slice_and_encode");

    for &sample_count in &[10_000usize, 100_000usize] {
        let path = build_synthetic_path(sample_count);
        let slicer = Slicer::new(plotter());

        group.bench_with_input(BenchmarkId::new("slice", sample_count), &path, |b, path| {
            b.iter(|| {
                let outcome = slicer.slice(black_box(path)).expect("slice failed");
                black_box(outcome.commands.len())
            })
        });

        let commands = slicer.slice(&path).expect("slice failed").commands;
        group.bench_with_input(
            BenchmarkId::new("encode", sample_count),
            &commands,
            |b, commands| {
                b.iter(|| {
                    let table = encode(black_box(commands)).expect("encode failed");
                    black_box(table.len())
                })
            },
        );
    }

    group.finish();
}

criterion_group!(
    core_benches,
    bench_svg_import,
    bench_kinematics,
    bench_slice_and_encode
);
criterion_main!(core_benches);
