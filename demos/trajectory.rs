use env_logger::Builder;
use log::{error, info};
use paramsched::{
    error::ScheduleError, BoxedSchedule, Interpolator, Periodic, PeriodicSchedule, Schedule, ScheduleExt,
    ScheduleTracker, Sequence,
};

use std::env;

fn main() {
    // Initialize the logger with a default level of "info"
    if env::var("RUST_LOG").is_err() {
        Builder::from_default_env().filter_level(log::LevelFilter::Info).init();
    } else {
        env_logger::init();
    }

    let iterations = env::args().nth(1).and_then(|arg| arg.parse().ok()).unwrap_or(40);

    if let Err(err) = run(iterations) {
        error!("Schedule evaluation failed: {}", err);
        std::process::exit(1);
    }
}

fn run(iterations: usize) -> Result<(), ScheduleError> {
    // Linear warm-up from 0.0001 (t=1) to 0.01 (t=5), then cosine annealing with warm restarts.
    // A period-8 triangle peaks halfway, at t=5.
    let ramp = Periodic::<f64>::triangle().lambda0(0.0).lambda1(1.0).period(8).build()?;
    let warmup: BoxedSchedule<f64> = Interpolator::new(ramp, 1e-4, 1e-2).boxed();
    let annealing: BoxedSchedule<f64> = PeriodicSchedule::cos_anneal_decay2(1e-4, 1e-2, 10)?.boxed();
    let schedule = Sequence::new(vec![(warmup, 5), (annealing, 30)])?;

    info!("Trajectory of {} iterations:", iterations);
    for (i, value) in schedule.iter().take(iterations).enumerate() {
        info!("t:{:>4}  lr:{:.6}", i + 1, value?);
    }

    // Two parameter groups advancing independently
    let mut tracker = ScheduleTracker::new(&schedule);
    for _ in 0..3 {
        tracker.next("encoder")?;
    }
    let encoder = tracker.next("encoder")?;
    let decoder = tracker.next("decoder")?;
    info!(
        "encoder at t:{} lr:{:.6}, decoder at t:{} lr:{:.6}",
        tracker.iteration(&"encoder"),
        encoder,
        tracker.iteration(&"decoder"),
        decoder
    );
    Ok(())
}
