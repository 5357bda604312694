use criterion::{black_box, criterion_group, criterion_main, Criterion};
use gdal::raster::Buffer;
use ndvi_relief::colour::{ColourRamp, Palette};
use ndvi_relief::processing::NdviCalculator;

/// Benchmark the core NDVI block calculation in isolation
fn benchmark_ndvi_calculation(c: &mut Criterion) {
    let size = (1024, 1024);
    let red_data = (0..size.0 * size.1).map(|i| 2500.0 + (i % 50) as f32).collect();
    let nir_data = (0..size.0 * size.1).map(|i| 5000.0 + (i % 100) as f32).collect();

    let red = Buffer::new(size, red_data);
    let nir = Buffer::new(size, nir_data);
    let calculator = NdviCalculator::new(None, None);

    c.bench_function("ndvi_block_calculation", |b| {
        b.iter(|| calculator.calculate(black_box(&red), black_box(&nir)))
    });
}

fn benchmark_colour_map(c: &mut Criterion) {
    c.bench_function("colour_map_formatting", |b| {
        b.iter(|| {
            ColourRamp::from_range(black_box(-0.35), black_box(0.92), Palette::RedGreen)
                .map(|ramp| ramp.to_colour_map())
        })
    });
}

criterion_group!(benches, benchmark_ndvi_calculation, benchmark_colour_map);
criterion_main!(benches);
