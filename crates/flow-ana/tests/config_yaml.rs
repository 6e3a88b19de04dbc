use std::fs;

use flow_ana::{load_config, AnalysisConfig, ChannelFlags, FlowTask, Multiplicity, QVectorBounds};
use flow_core::{CorrelatorSpec, FlowError, KinematicChannel, MAX_HARMONIC};
use tempfile::tempdir;

const FULL: &str = r#"
correlators:
  - [2, -2]
  - [2, 2, -2, -2]
  - [3, -1, -2]
weights:
  phi: { use: true, reset: true }
  pt: { use: true }
monte_carlo:
  events: 50
  multiplicity: { min: 40, max: 60 }
  flow_harmonics: [0.0, 0.06, 0.02]
  acceptance:
    phi:
      bins: [1.0, 0.8, 1.0, 0.6]
      weights: [1.0, 1.25, 1.0, 1.6667]
seed_policy: { master_seed: 42 }
threads: 3
"#;

#[test]
fn full_document_parses() {
    let config = AnalysisConfig::from_yaml_str(FULL).unwrap();
    assert_eq!(config.correlators.len(), 3);
    assert_eq!(config.correlators[2].label(), "<<3>>_{3,-1,-2}");
    assert_eq!(config.weights[&KinematicChannel::Phi], ChannelFlags::enabled(true));
    assert_eq!(config.weights[&KinematicChannel::Pt], ChannelFlags::enabled(false));
    assert_eq!(config.seed_policy.master_seed, 42);
    assert_eq!(config.threads, 3);
    let mc = config.monte_carlo.as_ref().unwrap();
    assert_eq!(mc.multiplicity, Multiplicity::Range { min: 40, max: 60 });
    assert_eq!(mc.acceptance[&KinematicChannel::Phi].bins.len(), 4);
    assert_eq!(
        config.resolved_bounds(),
        QVectorBounds {
            max_harmonic: 4,
            max_power: 4
        }
    );
    let aggregator = config.weight_aggregator();
    assert!(aggregator.uses_weights());
    assert!(aggregator.resets_weights());
}

#[test]
fn yaml_round_trip_preserves_config() {
    let config = AnalysisConfig::from_yaml_str(FULL).unwrap();
    let yaml = config.to_yaml_string().unwrap();
    let reparsed = AnalysisConfig::from_yaml_str(&yaml).unwrap();
    assert_eq!(config, reparsed);
}

#[test]
fn defaults_apply_to_minimal_document() {
    let config = AnalysisConfig::from_yaml_str("correlators: [[2, -2]]\n").unwrap();
    assert_eq!(config.threads, 1);
    assert!(config.bounds.is_none());
    assert!(config.monte_carlo.is_none());
    assert!(!config.weight_aggregator().uses_weights());
    assert!(FlowTask::from_config(&config).is_ok());

    let fixed = AnalysisConfig::from_yaml_str(
        "correlators: [[2, -2]]\nmonte_carlo: { events: 3, multiplicity: { fixed: 10 }, flow_harmonics: [0.1] }\n",
    )
    .unwrap();
    assert_eq!(
        fixed.monte_carlo.unwrap().multiplicity,
        Multiplicity::Fixed { fixed: 10 }
    );
}

fn rejected(yaml: &str) -> FlowError {
    AnalysisConfig::from_yaml_str(yaml).unwrap_err()
}

#[test]
fn validation_failures_name_the_problem() {
    assert_eq!(rejected("correlators: []\n").info().code, "no-correlators");
    assert!(matches!(rejected("correlators: [[]]\n"), FlowError::Serde(_)));

    let err = rejected("correlators: [[1,1,1,1,1,1,1,-1,-1,-1,-1,-1,-1]]\n");
    assert_eq!(err.info().code, "order-unsupported");
    assert_eq!(err.info().context["order"], "13");

    let err = rejected("correlators: [[2, 2, -2, -2]]\nbounds: { max_harmonic: 3, max_power: 4 }\n");
    assert!(matches!(err, FlowError::Bounds(_)));
    assert_eq!(err.info().context["correlator"], "<<4>>_{2,2,-2,-2}");

    let err = rejected("correlators: [[2, -2]]\nthreads: 0\n");
    assert_eq!(err.info().code, "threads");

    let mc = |body: &str| format!("correlators: [[2, -2]]\nmonte_carlo: {{ events: 5, {body} }}\n");
    assert_eq!(
        rejected(&mc("multiplicity: { fixed: 3 }, flow_harmonics: []")).info().code,
        "flow-harmonics"
    );
    assert_eq!(
        rejected(&mc("multiplicity: { min: 9, max: 3 }, flow_harmonics: [0.1]")).info().code,
        "multiplicity-range"
    );
    assert_eq!(
        rejected(&mc(
            "multiplicity: { fixed: 3 }, flow_harmonics: [0.1], acceptance: { phi: { bins: [0.5, 1.2] } }"
        ))
        .info()
        .code,
        "acceptance-map"
    );
    assert_eq!(
        rejected(&mc(
            "multiplicity: { fixed: 3 }, flow_harmonics: [0.1], acceptance: { phi: { bins: [0.5], weights: [1.0, 2.0] } }"
        ))
        .info()
        .code,
        "acceptance-map"
    );
    assert_eq!(
        rejected(&mc(
            "multiplicity: { fixed: 3 }, flow_harmonics: [0.1], acceptance: { eta: { bins: [0.5] } }"
        ))
        .info()
        .code,
        "acceptance-map"
    );
}

#[test]
fn oversized_harmonics_fail_as_configuration_errors() {
    let err = rejected("correlators: [[2147483647, 2147483647]]\n");
    assert!(matches!(err, FlowError::Serde(_)));

    let err = CorrelatorSpec::new(vec![i32::MAX, i32::MAX]).unwrap_err();
    assert!(matches!(err, FlowError::Config(_)));
    assert_eq!(err.info().code, "harmonic-unsupported");
    assert_eq!(err.info().context["harmonic"], i32::MAX.to_string());

    let err = CorrelatorSpec::new(vec![-(MAX_HARMONIC as i32) - 1, 1]).unwrap_err();
    assert_eq!(err.info().context["harmonic"], "-65");

    let widest = MAX_HARMONIC as i32;
    let config = AnalysisConfig::new(vec![CorrelatorSpec::new(vec![widest; 12]).unwrap()]);
    config.validate().unwrap();
    assert!(FlowTask::from_config(&config).is_ok());

    let err = rejected("correlators: [[2, -2]]\nbounds: { max_harmonic: 1000000000000, max_power: 2 }\n");
    assert_eq!(err.info().code, "bounds-too-large");
    let err = rejected("correlators: [[2, -2]]\nbounds: { max_harmonic: 4, max_power: 100 }\n");
    assert_eq!(err.info().code, "bounds-too-large");
}

#[test]
fn load_config_reads_from_disk() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("flow.yaml");
    fs::write(&path, FULL).unwrap();
    let config = load_config(&path).unwrap();
    assert_eq!(config.correlators.len(), 3);

    let err = load_config(dir.path().join("missing.yaml")).unwrap_err();
    assert_eq!(err.info().code, "config-read");
}
