use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};
use fieldpose::core::sim::{SensorFrame, SimulatedSensor};
use fieldpose::core::RawTargetValues;
use fieldpose::{CalibrationConstants, GeometryEngine, MarkerAnchors, TargetRole, VisionTracker};
use nalgebra::Point2;

fn engine() -> GeometryEngine {
    GeometryEngine::new(
        CalibrationConstants::new(20.0, 20.0, 90.0).expect("calibration"),
        MarkerAnchors::new(
            Point2::new(0.0, 0.0),
            Point2::new(0.0, 323.0),
            Point2::new(629.0, 323.0),
            Point2::new(629.0, 0.0),
        ),
    )
}

fn bench_tick(c: &mut Criterion) {
    let marker = SensorFrame::empty().with(
        TargetRole::CornerMarker4.pipeline(),
        RawTargetValues {
            tx: 2.0,
            ty: 28.0,
            ts: -6.0,
            tv: 1.0,
        },
    );

    let mut found = VisionTracker::new(SimulatedSensor::new(marker), engine());
    c.bench_function("tick_corner_marker", |b| {
        b.iter(|| {
            found.sensor_mut().clear_selects();
            black_box(found.tick())
        })
    });

    let mut lost = VisionTracker::new(SimulatedSensor::new(SensorFrame::empty()), engine());
    c.bench_function("tick_full_scan", |b| {
        b.iter(|| {
            lost.sensor_mut().clear_selects();
            black_box(lost.tick())
        })
    });
}

criterion_group!(benches, bench_tick);
criterion_main!(benches);
