#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use glam::{Quat, Vec3};

    use crate::commands::SimCommand;
    use crate::config::{ConfigError, SimConfig};
    use crate::enums::*;
    use crate::events::SimEvent;
    use crate::state::{FlightStats, SimSnapshot};
    use crate::types::{Planet, SimTime, Transform};

    fn temp_config_path(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("skyways-core-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join(name);
        let _ = std::fs::remove_file(&path);
        path
    }

    #[test]
    fn test_flight_phase_serde() {
        let variants = vec![
            FlightPhase::Climbing,
            FlightPhase::Cruising,
            FlightPhase::Descending,
        ];
        for v in variants {
            let json = serde_json::to_string(&v).unwrap();
            let back: FlightPhase = serde_json::from_str(&json).unwrap();
            assert_eq!(v, back);
        }
    }

    #[test]
    fn test_execution_mode_snake_case() {
        assert_eq!(
            serde_json::to_string(&ExecutionMode::Sequential).unwrap(),
            "\"sequential\""
        );
        let back: ExecutionMode = serde_json::from_str("\"parallel\"").unwrap();
        assert_eq!(back, ExecutionMode::Parallel);
        let back: ExecutionMode = serde_json::from_str("\"deferred\"").unwrap();
        assert_eq!(back, ExecutionMode::Deferred);
    }

    #[test]
    fn test_command_serde() {
        let commands = vec![
            SimCommand::Pause,
            SimCommand::Resume,
            SimCommand::SetTimeScale { scale: 2.0 },
            SimCommand::SetExecutionMode {
                mode: ExecutionMode::Deferred,
            },
        ];
        for cmd in commands {
            let json = serde_json::to_string(&cmd).unwrap();
            let back: SimCommand = serde_json::from_str(&json).unwrap();
            assert_eq!(format!("{:?}", cmd), format!("{:?}", back));
        }
    }

    #[test]
    fn test_event_tagged_serde() {
        let event = SimEvent::MidAirCollision {
            plane_a: 3,
            plane_b: 9,
            contact: Vec3::new(1.0, 2.0, 3.0),
        };
        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains("\"type\":\"MidAirCollision\""), "{json}");
        let back: SimEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(event, back);
    }

    #[test]
    fn test_snapshot_default_serializes() {
        let snap = SimSnapshot::default();
        let json = serde_json::to_string(&snap).unwrap();
        let back: SimSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(back.stats, FlightStats::default());
        assert_eq!(back.planet.radius, snap.planet.radius);
        assert!(back.guides.is_empty());
    }

    #[test]
    fn test_sim_time_advance() {
        let mut t = SimTime::default();
        for _ in 0..60 {
            t.advance(1.0 / 60.0);
        }
        assert_eq!(t.tick, 60);
        assert!((t.elapsed_secs - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_transform_axes() {
        let t = Transform::default();
        assert!((t.forward() - Vec3::Z).length() < 1e-6);
        assert!((t.up() - Vec3::Y).length() < 1e-6);

        let turned = Transform::new(Vec3::ZERO, Quat::from_rotation_y(std::f32::consts::FRAC_PI_2));
        assert!(
            (turned.forward() - Vec3::X).length() < 1e-5,
            "quarter turn about +Y should face +X, got {:?}",
            turned.forward()
        );
    }

    #[test]
    fn test_planet_helpers() {
        let planet = Planet::new(Vec3::new(10.0, 0.0, 0.0), 5.0);
        let p = Vec3::new(10.0, 7.0, 0.0);
        assert!((planet.altitude_of(p) - 2.0).abs() < 1e-6);
        assert!((planet.up_at(p) - Vec3::Y).length() < 1e-6);
        assert!((planet.surface_point(Vec3::X) - Vec3::new(15.0, 0.0, 0.0)).length() < 1e-6);
        assert_eq!(planet.world(planet.local(p)), p);
    }

    #[test]
    fn test_config_defaults_valid() {
        let config = SimConfig::default();
        assert!(config.validate().is_ok());
        assert!((config.dt() - 1.0 / 60.0).abs() < 1e-12);
        assert_eq!(config.max_plane_count, 500);
        assert!((config.flight.max_turn_degrees - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_config_partial_file_uses_defaults() {
        let config: SimConfig =
            serde_json::from_str(r#"{ "max_plane_count": 12, "flight": { "speed": 9.0 } }"#)
                .unwrap();
        assert_eq!(config.max_plane_count, 12);
        assert!((config.flight.speed - 9.0).abs() < 1e-6);
        assert_eq!(config.airport_count, SimConfig::default().airport_count);
        assert_eq!(
            config.flight.landing_tolerance,
            SimConfig::default().flight.landing_tolerance,
            "unnamed nested fields keep their defaults"
        );
    }

    #[test]
    fn test_config_validate_rejects_bad_values() {
        let mut config = SimConfig::default();
        config.planet_radius = 0.0;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

        let mut config = SimConfig::default();
        config.spawn_interval_min = 7.0;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

        let mut config = SimConfig::default();
        config.partition_size = 0;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_config_save_load_round_trip() {
        let path = temp_config_path("round_trip.json");
        let mut config = SimConfig::default();
        config.seed = 1234;
        config.execution_mode = ExecutionMode::Sequential;
        config.enable_explosions = false;
        config.save(&path).unwrap();

        let back = SimConfig::load(&path).unwrap();
        assert_eq!(back, config);
    }

    #[test]
    fn test_load_or_create_writes_missing_file() {
        let path = temp_config_path("missing.json");
        assert!(!path.exists());

        let config = SimConfig::load_or_create(&path);
        assert_eq!(config, SimConfig::default());
        assert!(path.exists(), "default config should be persisted");
        assert_eq!(SimConfig::load(&path).unwrap(), SimConfig::default());
    }

    #[test]
    fn test_load_or_create_falls_back_on_garbage() {
        let path = temp_config_path("garbage.json");
        std::fs::write(&path, "{ not json").unwrap();
        assert!(matches!(
            SimConfig::load(&path),
            Err(ConfigError::Parse { .. })
        ));

        let config = SimConfig::load_or_create(&path);
        assert_eq!(config, SimConfig::default());
        assert!(
            SimConfig::load(&path).is_ok(),
            "broken file should be replaced with defaults"
        );
    }

    #[test]
    fn test_load_or_create_falls_back_on_invalid_values() {
        let path = temp_config_path("invalid.json");
        std::fs::write(&path, r#"{ "planet_radius": -4.0 }"#).unwrap();

        let config = SimConfig::load_or_create(&path);
        assert_eq!(config.planet_radius, SimConfig::default().planet_radius);
    }
}
