//! YAML configuration driving whole pipeline runs

mod common;

use checkprune_ir::adapters::UniformCost;
use checkprune_ir::config::{ConfigError, PhaseToggles, ReportFormat};
use checkprune_ir::features::redundancy::Phase;
use checkprune_ir::{PrecisionLevel, PruneConfig, PruneError, PrunePipeline};
use common::*;
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use std::path::Path;
use tempfile::tempdir;

fn write_config(dir: &Path, body: &str) -> PruneConfig {
    let path = dir.join("prune.yaml");
    std::fs::write(&path, body).unwrap();
    PruneConfig::from_yaml(&path).unwrap()
}

#[test]
fn test_yaml_configures_traces_and_report() {
    let dir = tempdir().unwrap();
    let mut s = guarded_value("yaml_unit");
    write_traces(dir.path(), &s, &[(2, 7)], &[(7, 2)]);

    let yaml = format!(
        "version: 1\nlevel: l2\ntraces:\n  directory: {dir}\nreport:\n  path: {dir}/prune.log\n  format: text\n",
        dir = dir.path().display()
    );
    let config = write_config(dir.path(), &yaml);
    assert_eq!(config.level, PrecisionLevel::L2);

    let outcomes = PrunePipeline::new(config)
        .unwrap()
        .run_units(std::iter::once(&mut s.unit), &s.classifier, &UniformCost)
        .unwrap();
    let report = outcomes[0].report().unwrap();
    let e = assert_eliminated(report, 1, 100, Phase::UserSubsumption);
    assert_eq!(e.count, 9);

    let log = std::fs::read_to_string(dir.path().join("prune.log")).unwrap();
    assert_eq!(log.trim_end(), "yaml_unit 1 0 0 9 0 0 27 0");
}

#[test]
fn test_yaml_custom_extensions() {
    let dir = tempdir().unwrap();
    let mut s = repeated_check("ext");
    write_trace(
        dir.path(),
        "ext",
        "sancov",
        &records_for(&s.sanitizer, &[(1, 1), (1, 1)]),
    );

    let yaml = format!(
        "version: 1\nphases:\n  dominance_subsumption: false\ntraces:\n  directory: {}\n  sanitizer_extension: sancov\n  user_extension: usrcov\n",
        dir.path().display()
    );
    let config = write_config(dir.path(), &yaml);
    let report = PrunePipeline::new(config)
        .unwrap()
        .run_unit(&mut s.unit, &s.classifier, &UniformCost)
        .unwrap();

    assert_eliminated(&report, 2, 1, Phase::CoverageSubsumption);
    assert_live(&report, 1);
}

#[test]
fn test_yaml_disabling_every_phase_keeps_all_checks() {
    let dir = tempdir().unwrap();
    let mut s = repeated_check("off");
    write_sanitizer_trace(dir.path(), &s, &[(3, 3), (3, 3)]);

    let yaml = format!(
        "version: 1\nphases:\n  user_subsumption: false\n  coverage_subsumption: false\n  dominance_subsumption: false\ntraces:\n  directory: {}\n",
        dir.path().display()
    );
    let config = write_config(dir.path(), &yaml);
    assert!(config.is_static_only());

    let report = PrunePipeline::new(config)
        .unwrap()
        .run_unit(&mut s.unit, &s.classifier, &UniformCost)
        .unwrap();
    assert!(report.eliminated.is_empty());
    assert_eq!(report.weight, 12);
    assert_eq!(report.weight_after_phase3, 12);
}

#[test]
fn test_invalid_config_is_rejected_by_pipeline() {
    let mut config = PruneConfig::default();
    config.traces.user_extension = config.traces.sanitizer_extension.clone();

    match PrunePipeline::new(config) {
        Err(PruneError::Config(ConfigError::Conflict { issue, .. })) => {
            assert!(issue.contains("scov"));
        }
        Err(other) => panic!("unexpected error {}", other),
        Ok(_) => panic!("conflicting extensions accepted"),
    }
}

#[test]
fn test_unknown_level_is_rejected() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("bad.yaml");
    std::fs::write(&path, "version: 1\nlevel: l9\n").unwrap();

    let err = PruneConfig::from_yaml(&path).unwrap_err();
    assert!(matches!(err, ConfigError::UnknownLevel(ref name) if name == "l9"));
}

fn level() -> impl Strategy<Value = PrecisionLevel> {
    prop_oneof![
        Just(PrecisionLevel::L0),
        Just(PrecisionLevel::L1),
        Just(PrecisionLevel::L2),
        Just(PrecisionLevel::L3),
    ]
}

proptest! {
    #[test]
    fn prop_yaml_roundtrip(
        level in level(),
        user in any::<bool>(),
        coverage in any::<bool>(),
        dominance in any::<bool>(),
        depth in 1usize..=256,
        json in any::<bool>(),
    ) {
        let mut config = PruneConfig::with_level(level);
        config.phases = PhaseToggles {
            user_subsumption: user,
            coverage_subsumption: coverage,
            dominance_subsumption: dominance,
        };
        config.limits.max_match_depth = depth;
        config.report.format = if json { ReportFormat::JsonLines } else { ReportFormat::Text };

        let yaml = config.to_yaml().unwrap();
        let loaded = PruneConfig::from_yaml_str(&yaml).unwrap();
        prop_assert_eq!(loaded, config);
    }

    #[test]
    fn prop_depth_outside_range_fails(depth in 257usize..10_000) {
        let yaml = format!("version: 1\nlimits:\n  max_match_depth: {}\n", depth);
        let result = PruneConfig::from_yaml_str(&yaml);
        prop_assert!(
            matches!(result, Err(ConfigError::Range { .. })),
            "expected a range error for depth {}", depth
        );
    }
}
