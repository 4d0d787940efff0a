//! End-to-end checks against the reference 22.8 mm ACSR case.

use ampline_ieee738::{
    ConductorParameters, CurrentWaveform, MeltOutcome, ReclosureScheme, ScenarioFile, Simulation,
    estimate_time_constant, integrate, solve_equilibrium,
};
use approx::assert_relative_eq;

fn params() -> ConductorParameters {
    ScenarioFile::default().parameters().unwrap()
}

/// Temperature at which losses balance solar gain with no current flowing.
const ZERO_CURRENT_EQUILIBRIUM: f64 = 42.024_53;

#[test]
fn balancing_current_never_decreases() {
    let params = params();
    let ambient = params.ambient();
    let ceiling = ambient * 1000.0;

    let currents: Vec<f64> = (0..=5000)
        .map(|i| ambient + 1e-6 + (ceiling - ambient) * f64::from(i) / 5000.0)
        .map(|t| params.balancing_current(t).unwrap())
        .collect();

    assert!(currents.windows(2).all(|w| w[1] >= w[0]));
}

#[test]
fn equilibrium_round_trips() {
    let params = params();

    for target in [100.0, 500.0, 20_000.0] {
        let eq = solve_equilibrium(&params, target, 0.01).unwrap();
        let current = params.balancing_current(eq.temperature).unwrap();

        assert!(
            (current - target).abs() <= 0.01,
            "{target} A gave {current} A at {} °C",
            eq.temperature
        );
    }
}

#[test]
fn zero_current_settles_where_losses_meet_solar_gain() {
    let params = params();
    let waveform = CurrentWaveform::constant(0.0, 20_000).unwrap();

    let trajectory = integrate(150.0, &waveform, &params, 0.5, 660.0).unwrap();

    assert!(trajectory.temperatures.windows(2).all(|w| w[1] <= w[0]));
    let (_, last) = trajectory.last().unwrap();
    assert_relative_eq!(last, ZERO_CURRENT_EQUILIBRIUM, epsilon = 1e-4);

    let terms = params.heat_terms(last).unwrap();
    assert_relative_eq!(terms.convection + terms.radiation, terms.solar, epsilon = 1e-3);
}

#[test]
fn two_shot_reclosure_stays_below_melting() {
    let run = Simulation::from_file(&ScenarioFile::default())
        .unwrap()
        .run()
        .unwrap();

    assert_relative_eq!(run.equilibrium.temperature, 65.210_77, epsilon = 1e-4);
    assert_eq!(run.trajectory.melt, MeltOutcome::NotReached);

    let (peak_time, peak) = run.report.peak;
    assert!(peak < 660.0);
    assert_relative_eq!(peak, 84.584, epsilon = 1e-2);
    // Peak is at the end of the last reclose.
    assert_relative_eq!(peak_time, 1.68, epsilon = 1e-9);

    let (last_time, last) = run.report.last;
    assert_relative_eq!(last_time, 7200.0, epsilon = 1e-6);
    assert_relative_eq!(last, 42.025_18, epsilon = 1e-3);

    let tau = run.report.time_constant.unwrap();
    assert_relative_eq!(tau, -0.399_05, epsilon = 1e-3);
}

#[test]
fn trajectory_has_one_more_sample_than_the_waveform() {
    let params = params();
    let waveform = CurrentWaveform::new(vec![500.0, 20_000.0, 20_000.0, 0.0, 0.0]).unwrap();
    let dt = 0.02;

    let trajectory = integrate(65.0, &waveform, &params, dt, 660.0).unwrap();

    assert_eq!(trajectory.len(), waveform.len() + 1);
    assert_relative_eq!(trajectory.times[0], 0.0);
    for (k, pair) in trajectory.times.windows(2).enumerate() {
        assert_relative_eq!(pair[1] - pair[0], dt, epsilon = 1e-12);
        assert_relative_eq!(pair[1], (k + 1) as f64 * dt, epsilon = 1e-12);
    }
}

#[test]
fn identical_inputs_give_identical_outputs() {
    let params = params();
    let scheme = ReclosureScheme {
        total_time: 3.0,
        ..ReclosureScheme::two_shot(500.0, 20_000.0)
    };
    let waveform = scheme.waveform().unwrap();

    let run = || {
        let eq = solve_equilibrium(&params, 500.0, 0.01).unwrap();
        integrate(eq.temperature, &waveform, &params, scheme.time_step(), 660.0).unwrap()
    };

    assert_eq!(run(), run());
}

#[test]
fn long_fault_melts_the_conductor() {
    let params = params();
    let eq = solve_equilibrium(&params, 500.0, 0.01).unwrap();

    // Twenty seconds of uninterrupted fault at about 60 °C/s and rising.
    let waveform = CurrentWaveform::constant(20_000.0, 1000).unwrap();
    let trajectory = integrate(eq.temperature, &waveform, &params, 0.02, 660.0).unwrap();

    let MeltOutcome::Reached { time, step } = trajectory.melt else {
        panic!("expected the conductor to melt");
    };
    assert!(trajectory.temperatures[step] >= 660.0);
    assert!(trajectory.temperatures[step - 1] < 660.0);
    assert_relative_eq!(time, trajectory.times[step]);
    assert!(time > 1.0 && time < 20.0);
    // The run still covers the whole waveform.
    assert_eq!(trajectory.len(), 1001);

    let tau = estimate_time_constant(&trajectory, &params, 500.0, 20_000.0).unwrap();
    assert!(tau > 0.0);
}
