//! Mapping of feed records to asteroid entities.

use glam::Vec3;
use neowatch_config::SceneConfig;
use neowatch_feed::AsteroidRecord;

use crate::classify::{HazardClass, SizeClass, display_diameter_feet, render_radius, size_ratio};
use crate::entity::AsteroidEntity;
use crate::placement::ShellPlacer;

/// Build one entity per record, in record order.
///
/// Classification depends only on the record and `policy`; `placer` only
/// affects positions.
pub fn populate(
    records: &[AsteroidRecord],
    policy: &SceneConfig,
    placer: &mut ShellPlacer,
) -> Vec<AsteroidEntity> {
    records
        .iter()
        .map(|record| derive_entity(record, policy, placer.next_position()))
        .collect()
}

fn derive_entity(record: &AsteroidRecord, policy: &SceneConfig, position: Vec3) -> AsteroidEntity {
    let d = size_ratio(record);
    AsteroidEntity {
        name: record.name.clone(),
        hazard: HazardClass::from_flag(record.is_potentially_hazardous_asteroid),
        size_class: SizeClass::from_ratio(d),
        radius: render_radius(policy.radius_policy, d),
        position,
        rotation: Vec3::ZERO,
        diameter_feet: display_diameter_feet(policy.diameter_policy, record),
        velocity_mph: record.close_approach.velocity_mph.trunc() as i64,
        distance_miles: record.close_approach.miss_distance_miles.trunc() as i64,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::record;
    use neowatch_config::{DiameterPolicy, RadiusPolicy};

    #[test]
    fn test_reference_record() {
        let records = [record("Test-1", true, 300.0, 700.0, 25000.0, 1_000_000.0)];
        let mut placer = ShellPlacer::new(1, 14.0);
        let entities = populate(&records, &SceneConfig::default(), &mut placer);

        let entity = &entities[0];
        assert_eq!(entity.name, "Test-1");
        assert!(entity.hazardous());
        assert_eq!(entity.diameter_feet, 500);
        assert_eq!(entity.velocity_mph, 25000);
        assert_eq!(entity.distance_miles, 1_000_000);
        // 300 / 2000 = 0.15
        assert_eq!(entity.size_class, SizeClass::Large);
        assert_eq!(entity.radius, 0.4);
    }

    #[test]
    fn test_count_order_and_hazard_passthrough() {
        let records: Vec<_> = (0..25)
            .map(|i| record(&format!("A-{i}"), i % 3 == 0, 10.0 * i as f64, 20.0, 1.0, 1.0))
            .collect();
        let mut placer = ShellPlacer::new(3, 14.0);
        let entities = populate(&records, &SceneConfig::default(), &mut placer);

        assert_eq!(entities.len(), records.len());
        for (entity, record) in entities.iter().zip(&records) {
            assert_eq!(entity.name, record.name);
            assert_eq!(entity.hazardous(), record.is_potentially_hazardous_asteroid);
            assert!((entity.position.length() - 14.0).abs() < 1e-4);
        }
    }

    #[test]
    fn test_classification_independent_of_seed() {
        let records: Vec<_> = [1.0, 25.0, 250.0, 5000.0]
            .iter()
            .map(|&min| record("X", false, min, min * 2.0, 1.0, 1.0))
            .collect();
        let config = SceneConfig::default();

        let first = populate(&records, &config, &mut ShellPlacer::new(10, 14.0));
        let again = populate(&records, &config, &mut ShellPlacer::new(10, 14.0));
        let other = populate(&records, &config, &mut ShellPlacer::new(11, 14.0));

        assert_eq!(first, again);
        for (a, b) in first.iter().zip(&other) {
            assert_eq!(a.size_class, b.size_class);
            assert_eq!(a.hazard, b.hazard);
            assert_eq!(a.radius, b.radius);
        }
        let classes: Vec<_> = first.iter().map(|e| e.size_class).collect();
        assert_eq!(
            classes,
            [SizeClass::Small, SizeClass::Medium, SizeClass::Large, SizeClass::Large]
        );
    }

    #[test]
    fn test_alternative_policies() {
        let records = [record("Test-1", true, 300.0, 700.0, 25000.9, 1_000_000.7)];
        let config = SceneConfig {
            radius_policy: RadiusPolicy::Continuous,
            diameter_policy: DiameterPolicy::DuplicatedMax,
            ..SceneConfig::default()
        };
        let entities = populate(&records, &config, &mut ShellPlacer::new(1, 14.0));

        assert_eq!(entities[0].diameter_feet, 700);
        assert_eq!(entities[0].radius, 0.3);
        assert_eq!(entities[0].velocity_mph, 25000);
        assert_eq!(entities[0].distance_miles, 1_000_000);
    }

    #[test]
    fn test_empty_records() {
        let entities = populate(&[], &SceneConfig::default(), &mut ShellPlacer::new(1, 14.0));
        assert!(entities.is_empty());
    }
}
