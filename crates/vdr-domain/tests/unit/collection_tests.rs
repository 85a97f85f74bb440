//! Unit tests for collection specs

use vdr_domain::Error;
use vdr_domain::value_objects::{
    CollectionPolicy, CollectionSpec, Distance, MultiVectorComparator, ScalarQuantization,
};

#[test]
fn test_default_policy() {
    let spec = CollectionSpec::new("pages", 128, 100);

    assert_eq!(spec.policy.distance, Distance::Cosine);
    assert_eq!(spec.policy.multivector, Some(MultiVectorComparator::MaxSim));
    let quantization = spec.policy.quantization.expect("quantization enabled by default");
    assert!((quantization.quantile - 0.99).abs() < f32::EPSILON);
    assert!(quantization.always_ram);
    assert!(spec.policy.on_disk_payload);
    assert!(spec.validate().is_ok());
}

#[test]
fn test_rejects_zero_vector_size() {
    let spec = CollectionSpec::new("pages", 0, 100);
    assert!(matches!(spec.validate(), Err(Error::InvalidArgument { .. })));
}

#[test]
fn test_rejects_blank_name() {
    let spec = CollectionSpec::new("  ", 128, 100);
    assert!(matches!(spec.validate(), Err(Error::InvalidArgument { .. })));
}

#[test]
fn test_rejects_out_of_range_quantile() {
    let policy = CollectionPolicy {
        quantization: Some(ScalarQuantization {
            quantile: 0.2,
            always_ram: false,
        }),
        ..CollectionPolicy::default()
    };
    let spec = CollectionSpec::new("pages", 128, 100).with_policy(policy);
    assert!(matches!(spec.validate(), Err(Error::InvalidArgument { .. })));
}

#[test]
fn test_policy_serializes_store_names() {
    let json = serde_json::to_value(CollectionPolicy::default()).unwrap();
    assert_eq!(json["distance"], "cosine");
    assert_eq!(json["multivector"], "max_sim");
}
