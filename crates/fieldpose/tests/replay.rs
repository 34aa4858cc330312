use std::path::{Path, PathBuf};

use approx::assert_relative_eq;
use fieldpose::core::sim::{SensorFrame, SimulatedSensor};
use fieldpose::core::RawTargetValues;
use fieldpose::{FieldPoseConfig, PipelineId, ReplayInput, ReplayReport, TargetRole};

fn testdata_path(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("testdata")
        .join(name)
}

fn load_config() -> FieldPoseConfig {
    FieldPoseConfig::load_json(testdata_path("config.json")).expect("config")
}

#[test]
fn replays_recorded_frames() {
    let cfg = load_config();
    let input = ReplayInput::load_json(testdata_path("frames.json")).expect("frames");
    let ticks = input.replay(&cfg).expect("replay");
    assert_eq!(ticks.len(), 5);

    // Shooter target in view.
    let shooter = &ticks[0];
    assert_eq!(shooter.role, Some(TargetRole::ShooterTarget));
    assert_eq!(shooter.selects, 1);
    assert_eq!(shooter.aim_offset, Some(-3.0));
    assert_relative_eq!(
        shooter.estimate.distance_to_shooter.unwrap(),
        192.32,
        epsilon = 0.01
    );
    assert_eq!(shooter.estimate.field_position(), None);

    // Nothing in view: every pipeline tried, nothing reported.
    let lost = &ticks[1];
    assert_eq!(lost.pipeline, PipelineId::LAST);
    assert_eq!(lost.selects, 11);
    assert!(!lost.target_found);
    assert!(lost.estimate.is_empty());

    // Markers 1 and 3 both visible; the lower pipeline wins.
    let marker1 = &ticks[2];
    assert_eq!(marker1.role, Some(TargetRole::CornerMarker1));
    assert_relative_eq!(marker1.estimate.field_x.unwrap(), 3.513, epsilon = 1e-3);
    assert_relative_eq!(marker1.estimate.field_y.unwrap(), -0.307, epsilon = 1e-3);
    assert_eq!(marker1.estimate.heading_deg, Some(260.0));

    // Marker 4 sits at (629, 0) and faces the other way.
    let marker4 = &ticks[3];
    assert_eq!(marker4.role, Some(TargetRole::CornerMarker4));
    let radius = 20.0 * 8.0_f64.to_radians().tan();
    let bearing = 82.0_f64.to_radians();
    assert_relative_eq!(
        marker4.estimate.field_x.unwrap(),
        629.0 + radius * bearing.cos(),
        epsilon = 1e-9
    );
    assert_relative_eq!(
        marker4.estimate.field_y.unwrap(),
        radius * bearing.sin(),
        epsilon = 1e-9
    );
    assert_eq!(marker4.estimate.heading_deg, Some(96.0));

    // A reserved pipeline can hold a target but maps to no formulas.
    let reserved = &ticks[4];
    assert_eq!(reserved.pipeline, PipelineId::new(7).unwrap());
    assert_eq!(reserved.role, None);
    assert!(reserved.target_found);
    assert_eq!(reserved.aim_offset, Some(1.0));
    assert!(reserved.estimate.is_empty());
}

#[test]
fn report_round_trips_through_disk() {
    let cfg = load_config();
    let input = ReplayInput::load_json(testdata_path("frames.json")).expect("frames");
    let ticks = input.replay(&cfg).expect("replay");

    let dir = tempfile::tempdir().expect("tempdir");
    let out = dir.path().join("report.json");
    let report = ReplayReport::new(
        &testdata_path("config.json"),
        &testdata_path("frames.json"),
        ticks.clone(),
    );
    report.write_json(&out).expect("write");

    let loaded = ReplayReport::load_json(&out).expect("load");
    assert!(loaded.config_path.ends_with("config.json"));
    assert_eq!(loaded.ticks.len(), ticks.len());
    for (back, orig) in loaded.ticks.iter().zip(&ticks) {
        assert_eq!(back.pipeline, orig.pipeline);
        assert_eq!(back.role, orig.role);
        assert_eq!(back.reading.valid, orig.reading.valid);
        assert_eq!(back.estimate.field_x.is_some(), orig.estimate.field_x.is_some());
        if let (Some(a), Some(b)) = (back.estimate.field_x, orig.estimate.field_x) {
            assert_relative_eq!(a, b, epsilon = 1e-9);
        }
    }
}

#[test]
fn infinite_distance_round_trips_through_report() {
    let cfg = load_config();
    let horizon = SensorFrame::empty().with(
        TargetRole::ShooterTarget.pipeline(),
        RawTargetValues {
            tx: 0.0,
            ty: -20.0,
            ts: 0.0,
            tv: 1.0,
        },
    );
    let input = ReplayInput {
        switch_latency_ticks: 0,
        frames: vec![horizon, SensorFrame::empty()],
    };
    let ticks = input.replay(&cfg).expect("replay");
    assert!(ticks[0].non_finite);

    let dir = tempfile::tempdir().expect("tempdir");
    let out = dir.path().join("report.json");
    ReplayReport::new(
        &testdata_path("config.json"),
        &testdata_path("frames.json"),
        ticks,
    )
    .write_json(&out)
    .expect("write");

    let loaded = ReplayReport::load_json(&out).expect("load");
    let horizon = &loaded.ticks[0];
    assert_eq!(horizon.estimate.distance_to_shooter, Some(f64::INFINITY));
    assert!(!horizon.estimate.is_empty());
    assert!(horizon.non_finite);
    let lost = &loaded.ticks[1];
    assert!(!lost.target_found);
    assert!(lost.estimate.is_empty());
}

#[test]
fn tracker_never_reports_stale_pose_after_target_is_lost() {
    let cfg = load_config();
    let marker = SensorFrame::empty().with(
        TargetRole::CornerMarker2.pipeline(),
        RawTargetValues {
            tx: 4.0,
            ty: 35.0,
            ts: 12.0,
            tv: 1.0,
        },
    );
    let mut tracker = cfg
        .build_tracker(SimulatedSensor::new(marker.clone()))
        .expect("tracker");

    let seen = tracker.tick();
    assert!(seen.estimate.field_position().is_some());

    // Target drops out; pipeline 3 keeps reporting its last angles.
    let stale = SensorFrame::empty().with(
        TargetRole::CornerMarker2.pipeline(),
        RawTargetValues {
            tv: 0.0,
            ..marker.values(TargetRole::CornerMarker2.pipeline())
        },
    );
    tracker.sensor_mut().set_frame(stale);
    let lost = tracker.tick();
    assert!(!lost.target_found);
    assert!(lost.estimate.is_empty());
    assert_eq!(lost.aim_offset, None);
}

#[test]
fn switching_latency_is_visible_in_replay() {
    let cfg = load_config();
    let frame = SensorFrame::from_validity(&[false, false, true]);
    let input = ReplayInput {
        switch_latency_ticks: 1,
        frames: vec![frame.clone(), frame],
    };

    let ticks = input.replay(&cfg).expect("replay");
    // Tick 0 reads pipeline 0 throughout; the selects land afterwards and
    // leave pipeline 10 active, which still sees nothing on tick 1.
    assert!(!ticks[0].target_found);
    assert!(!ticks[1].target_found);
    assert!(ticks.iter().all(|t| t.selects == PipelineId::COUNT));
}
