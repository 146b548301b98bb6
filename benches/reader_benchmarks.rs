use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use spacecraft::{
    scene::tube::fill_level, AstroPiDataReader, AstroPiDataWriter, BlockPos, InMemoryWorld,
    JoystickState, SceneComposer, SceneConfig, SensorReading,
};

fn synthetic_log(rows: u32) -> Vec<u8> {
    let mut writer = AstroPiDataWriter::from_writer(Vec::new()).expect("Should create writer");
    for step in 0..rows {
        writer
            .write(&SensorReading::simulated(step))
            .expect("Should write row");
    }
    writer.into_inner().expect("Should finish log")
}

/// Benchmark parsing logs of different lengths
fn bench_log_parsing(c: &mut Criterion) {
    for rows in [10u32, 100, 1000].iter() {
        let log = synthetic_log(*rows);
        c.bench_with_input(BenchmarkId::new("parse_log", rows), &log, |b, log| {
            b.iter(|| AstroPiDataReader::from_reader(log.as_slice()).expect("Should parse log"))
        });
    }
}

/// Benchmark writing a log
fn bench_log_writing(c: &mut Criterion) {
    let readings: Vec<SensorReading> = (0..100).map(SensorReading::simulated).collect();

    c.bench_function("write_100_rows", |b| {
        b.iter(|| {
            let mut writer = AstroPiDataWriter::from_writer(Vec::new()).expect("Should create writer");
            for reading in &readings {
                writer.write(reading).expect("Should write row");
            }
            writer.into_inner().expect("Should finish log")
        })
    });
}

/// Benchmark the per-reading arithmetic
fn bench_value_mapping(c: &mut Criterion) {
    c.bench_function("fill_level", |b| {
        b.iter(|| fill_level(black_box(1003.5), black_box(950.0), black_box(1050.0), 20))
    });

    c.bench_function("round_degrees", |b| {
        b.iter(|| spacecraft::round_degrees(black_box(97.3), black_box(15.0)))
    });
}

/// Benchmark applying readings to an in-memory scene
fn bench_scene_update(c: &mut Criterion) {
    let readings: Vec<SensorReading> = (0..50).map(SensorReading::simulated).collect();

    c.bench_function("scene_update_50_readings", |b| {
        b.iter(|| {
            let mut scene =
                SceneComposer::new(InMemoryWorld::new(), BlockPos::default(), SceneConfig::default())
                    .expect("Should build scene");
            for reading in &readings {
                scene
                    .update(reading, JoystickState::IDLE)
                    .expect("Should update scene");
            }
            scene.world().writes()
        })
    });
}

criterion_group!(
    benches,
    bench_log_parsing,
    bench_log_writing,
    bench_value_mapping,
    bench_scene_update
);
criterion_main!(benches);
