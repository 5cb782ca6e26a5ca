//! # Configuration Tests
//!
//! Defaults, JSON deserialization, strategy parsing and validation.

use pfsim_core::common::ConfigError;
use pfsim_core::config::*;
use pretty_assertions::assert_eq;
use rstest::rstest;

#[test]
fn test_config_default() {
    let config = Config::default();
    assert_eq!(config.prefetcher, PrefetcherKind::Ghb);
    assert_eq!(
        config.ghb,
        GhbConfig {
            history_length: 512,
            max_lookback: 256,
            degree: 4,
        }
    );
    assert_eq!(config.rpt.table_size, 16);
    assert_eq!(config.stride.table_size, 512);
    assert_eq!(config.rpt.degree, 1);
    assert_eq!(config.stride.degree, 1);
    assert!(config.stride.tagged);
    assert_eq!(config.vector, VectorConfig { confirmations: 3, degree: 1 });
    assert_eq!(config.host.max_phys_addr, 256 * 1024 * 1024 - 1);
    assert_eq!(config.host.block_size, 64);
    assert_eq!(config.host.fetch_latency, 16);
    assert!(config.validate().is_ok());
}

#[test]
fn test_empty_json_is_default() {
    let config = Config::from_json("{}").unwrap();
    assert_eq!(config.prefetcher, PrefetcherKind::Ghb);
    assert_eq!(config.ghb, GhbConfig::default());
    assert_eq!(config.host, HostConfig::default());
}

#[test]
fn test_partial_section_keeps_other_defaults() {
    let config = Config::from_json(r#"{ "ghb": { "degree": 8 }, "prefetcher": "stride" }"#).unwrap();
    assert_eq!(config.prefetcher, PrefetcherKind::Stride);
    assert_eq!(config.ghb.degree, 8);
    assert_eq!(config.ghb.history_length, 512);
    assert_eq!(config.ghb.max_lookback, 256);
}

#[rstest]
#[case("none", PrefetcherKind::None)]
#[case("GHB", PrefetcherKind::Ghb)]
#[case("Rpt", PrefetcherKind::Rpt)]
#[case("stride", PrefetcherKind::Stride)]
#[case("Vector", PrefetcherKind::Vector)]
fn test_prefetcher_kind_from_str(#[case] text: &str, #[case] kind: PrefetcherKind) {
    assert_eq!(text.parse::<PrefetcherKind>(), Ok(kind));
}

#[test]
fn test_unknown_prefetcher_kind_rejected() {
    let err = "markov".parse::<PrefetcherKind>().unwrap_err();
    assert!(err.contains("markov"));
    assert!(matches!(
        Config::from_json(r#"{ "prefetcher": "Markov" }"#),
        Err(ConfigError::Json(_))
    ));
}

/// Any latency is accepted; the replay host saturates the landing time.
#[test]
fn test_max_fetch_latency_is_valid() {
    let json = format!(r#"{{ "host": {{ "fetch_latency": {} }} }}"#, u64::MAX);
    let config = Config::from_json(&json).unwrap();
    assert_eq!(config.host.fetch_latency, u64::MAX);
}

#[test]
fn test_malformed_json_rejected() {
    assert!(matches!(Config::from_json("{ ghb: "), Err(ConfigError::Json(_))));
}

#[rstest]
#[case::zero_history(r#"{ "ghb": { "history_length": 0 } }"#)]
#[case::zero_lookback(r#"{ "ghb": { "max_lookback": 0 } }"#)]
#[case::zero_ghb_degree(r#"{ "ghb": { "degree": 0 } }"#)]
#[case::rpt_size(r#"{ "rpt": { "table_size": 12 } }"#)]
#[case::stride_size(r#"{ "stride": { "table_size": 0 } }"#)]
#[case::stride_degree(r#"{ "stride": { "degree": 0 } }"#)]
#[case::vector_confirmations(r#"{ "vector": { "confirmations": 0 } }"#)]
#[case::vector_degree(r#"{ "vector": { "degree": 0 } }"#)]
#[case::block_size(r#"{ "host": { "block_size": 48 } }"#)]
fn test_validation_rejects(#[case] json: &str) {
    assert!(Config::from_json(json).is_err());
}

#[test]
fn test_validation_error_names_field() {
    match Config::from_json(r#"{ "rpt": { "table_size": 12 } }"#) {
        Err(ConfigError::BadTableSize { table, size }) => {
            assert_eq!(table, "rpt");
            assert_eq!(size, 12);
        }
        other => panic!("expected BadTableSize, got {other:?}"),
    }
    let err = Config::from_json(r#"{ "ghb": { "history_length": 0 } }"#).unwrap_err();
    assert_eq!(err.to_string(), "ghb.history_length must be at least 1");
    assert!(matches!(
        Config::from_json(r#"{ "vector": { "confirmations": 0 } }"#),
        Err(ConfigError::ZeroConfirmations)
    ));
}
