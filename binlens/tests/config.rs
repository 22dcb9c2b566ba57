use binlens::{BinId, Lens, LensBuilder, ScanConfig, StopReason, WindowQuery};

#[test]
fn partial_config_keeps_defaults() {
    let config: ScanConfig = serde_json::from_str(r#"{ "iteration_ceiling": 64 }"#).unwrap();
    assert_eq!(config.iteration_ceiling, 64);
    assert_eq!(config.initial_capacity, ScanConfig::DEFAULT_INITIAL_CAPACITY);
    assert_eq!(config.growth_cap, ScanConfig::DEFAULT_GROWTH_CAP);

    let lens = LensBuilder::from_config(config).build();
    assert_eq!(lens.config(), &config);
    assert_ne!(lens, Lens::new());
}

#[test]
fn default_tunables() {
    let lens = Lens::new();
    assert_eq!(lens.config().initial_capacity, 1000);
    assert_eq!(lens.config().growth_cap, 5000);
    assert_eq!(lens.config().iteration_ceiling, 50_000);
}

#[test]
fn ids_deserialize_only_in_domain() {
    let id: BinId = serde_json::from_str("8388608").unwrap();
    assert_eq!(id.get(), 1 << 23);
    assert!(serde_json::from_str::<BinId>("16777216").is_err());
}

#[test]
fn queries_and_reasons_serialize() {
    let query: WindowQuery =
        serde_json::from_str(r#"{ "reference": null, "length_left": 3, "length_right": 4 }"#).unwrap();
    assert_eq!(query.reference, None);
    assert_eq!(query.length_right, 4);
    assert_eq!(
        serde_json::to_string(&StopReason::CeilingReached).unwrap(),
        r#""ceiling_reached""#
    );
    assert_eq!(StopReason::IndexExhausted.to_string(), "index_exhausted");
}
