use ktracker_core::perception::filters::{CircularBuffer, FilterError, SensorFilter};
use ktracker_core::perception::sensors::{Sensor, SyntheticImu};
use ktracker_core::perception::PerceptionStack;
use ktracker_core::TrackerCore;
use nalgebra::Vector3;

fn exact_sum(values: &[f64]) -> f64 {
    values.iter().sum()
}

#[test]
fn fresh_filter_is_empty_for_any_capacity() {
    for capacity in [1, 2, 3, 16, 100] {
        let filter = SensorFilter::<f64>::new(capacity).unwrap();
        assert_eq!(filter.size(), 0);
        assert_eq!(filter.capacity(), capacity);
        assert_eq!(filter.total(), 0.0);
        assert_eq!(filter.mean(), 0.0);
        assert_eq!(filter.peek_back(), 0.0);
    }
}

#[test]
fn zero_capacity_is_rejected() {
    assert!(matches!(
        SensorFilter::<f64>::new(0),
        Err(FilterError::ZeroCapacity)
    ));
    assert!(CircularBuffer::<Vector3<f32>>::new(0).is_err());
}

#[test]
fn history_is_addressed_by_age() {
    let capacity = 6;
    let mut filter = SensorFilter::<f64>::new(capacity).unwrap();
    let values = [3.5, -1.0, 8.25, 0.0];
    for &v in &values {
        filter.push(v);
    }

    let k = values.len();
    assert_eq!(filter.size(), k);
    assert_eq!(filter.peek_back(), values[k - 1]);
    for age in 0..k {
        assert_eq!(filter.get_prev(age), values[k - 1 - age]);
    }
    for age in k..capacity + 3 {
        assert_eq!(filter.get_prev(age), 0.0);
    }
}

#[test]
fn only_most_recent_samples_are_retained() {
    let capacity = 5;
    let mut filter = SensorFilter::<f64>::new(capacity).unwrap();
    let values: Vec<f64> = (0..13).map(|i| i as f64 * 1.25 - 4.0).collect();
    for &v in &values {
        filter.push(v);
    }

    let retained = &values[values.len() - capacity..];
    assert_eq!(filter.size(), capacity);
    assert!(filter.is_full());
    assert!((filter.total() - exact_sum(retained)).abs() < 1e-9);
    for (age, &v) in retained.iter().rev().enumerate() {
        assert_eq!(filter.get_prev(age), v);
    }
}

#[test]
fn drift_stays_bounded_over_many_laps() {
    for capacity in [3, 7, 64] {
        let mut filter = SensorFilter::<f64>::new(capacity).unwrap();
        let values: Vec<f64> = (0..10 * capacity)
            .map(|i| (i as f64 * 0.37).sin() * 1000.0 + 0.1)
            .collect();
        for &v in &values {
            filter.push(v);
        }

        let expected = exact_sum(&values[values.len() - capacity..]);
        assert!(
            (filter.total() - expected).abs() < 1e-6,
            "capacity {capacity}: total {} vs {expected}",
            filter.total()
        );
    }
}

#[test]
fn long_stream_matches_exact_window_sum() {
    let capacity = 7;
    let mut filter = SensorFilter::<f64>::new(capacity).unwrap();
    let mut window = Vec::new();
    for i in 0..200_000u64 {
        let v = if i % 1000 == 0 { 1.0e9 } else { 0.001 * (i % 17) as f64 };
        filter.push(v);
        window.push(v);
        if window.len() > capacity {
            window.remove(0);
        }
    }
    assert!((filter.total() - exact_sum(&window)).abs() < 1e-5);
}

#[test]
fn mean_is_total_over_size() {
    let mut filter = SensorFilter::<f64>::new(4).unwrap();
    for v in [2.0, 4.0, 9.0, 1.0, 7.0, 3.5] {
        filter.push(v);
        assert!((filter.mean() - filter.total() / filter.size() as f64).abs() < 1e-12);
    }
}

#[test]
fn clear_behaves_like_fresh_filter() {
    let capacity = 3;
    let mut used = SensorFilter::<f64>::new(capacity).unwrap();
    for v in [1.0, 2.0, 3.0, 4.0, 5.0] {
        used.push(v);
    }
    used.clear();
    assert_eq!(used.size(), 0);
    assert_eq!(used.total(), 0.0);
    assert_eq!(used.capacity(), capacity);

    let mut fresh = SensorFilter::<f64>::new(capacity).unwrap();
    for v in [10.0, 20.0, 30.0, 40.0] {
        used.push(v);
        fresh.push(v);
        assert_eq!(used.total(), fresh.total());
        assert_eq!(used.mean(), fresh.mean());
        for age in 0..=capacity {
            assert_eq!(used.get_prev(age), fresh.get_prev(age));
        }
    }
}

#[test]
fn capacity_three_walkthrough() {
    let mut filter = SensorFilter::<f64>::new(3).unwrap();
    filter.push(1.0);
    filter.push(2.0);
    filter.push(3.0);
    assert_eq!(filter.size(), 3);
    assert_eq!(filter.total(), 6.0);
    assert_eq!(filter.peek_back(), 3.0);
    assert_eq!(filter.get_prev(1), 2.0);
    assert_eq!(filter.get_prev(2), 1.0);

    filter.push(4.0);
    assert_eq!(filter.total(), 9.0);
    assert_eq!(filter.peek_back(), 4.0);
    assert_eq!(filter.get_prev(2), 2.0);

    filter.clear();
    assert_eq!(filter.size(), 0);
    assert_eq!(filter.total(), 0.0);
    assert_eq!(filter.get_prev(0), 0.0);
}

#[test]
fn core_drives_perception_stack_from_synthetic_imu() {
    let mut core = TrackerCore::new();
    core.register(PerceptionStack::new().unwrap());
    core.init().unwrap();

    let mut imu = SyntheticImu::new(50.0, 0.2).with_tremor(0.1).with_limit(40);
    let stack = core.perception_stack_mut().unwrap();
    while let Some(sample) = imu.poll().unwrap() {
        assert!(stack.push_imu(sample));
    }

    // An even-sized window cancels the alternating tremor
    assert_eq!(stack.sample_count(), 20);
    assert!((stack.smoothed_gyro().z - 0.2).abs() < 1e-9);
    assert!((stack.smoothed_accel().z - 9.81).abs() < 1e-9);

    core.shutdown().unwrap();
    assert_eq!(core.perception_stack_mut().unwrap().sample_count(), 0);
}
