//! Moving players between levels

use crate::config::TeleportConfig;
use crate::error::{DimensionError, DimensionResult};
use crate::player::ServerPlayer;
use crate::world::core::BlockPos;
use crate::world::level::ServerLevel;
use glam::DVec3;

/// Move `player` into `level` at `target`, keeping their rotation.
///
/// The destination chunk is loaded before the player is touched, so a
/// failed transfer leaves the player where they were. After a successful
/// transfer the player idles for `config.settle_ticks` ticks.
pub fn send_player_to_dimension(
    player: &mut ServerPlayer,
    level: &ServerLevel,
    target: DVec3,
    config: &TeleportConfig,
) -> DimensionResult<()> {
    if !level.is_published() {
        return Err(DimensionError::NotPublished {
            key: level.key().to_string(),
        });
    }

    level.get_chunk_at(BlockPos::containing(target))?;

    let from = player.level().clone();
    let (yaw, pitch) = (player.yaw(), player.pitch());
    player.relocate(level.key().clone(), target, yaw, pitch, config.settle_ticks);

    log::debug!(
        "[send_player_to_dimension] {} moved from {} to {} at ({:.1}, {:.1}, {:.1})",
        player.name(),
        from,
        level.key(),
        target.x,
        target.y,
        target.z
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RegistryConfig;
    use crate::host::ServerAccess;
    use crate::registry::DimensionRegistry;
    use crate::server::testing::create_test_server;
    use crate::server::default_overworld_stem;
    use crate::world::core::{ChunkPos, WorldKey};
    use crate::world::level::{DerivedLevelData, LevelData, LevelInit};
    use std::sync::Arc;

    fn test_player() -> ServerPlayer {
        let mut player = ServerPlayer::new(7, "alex", WorldKey::overworld(), DVec3::new(0.5, 64.0, 0.5));
        player.set_rotation(180.0, -15.0);
        player
    }

    #[test]
    fn test_transfer_into_created_level() {
        let server = create_test_server();
        let access: Arc<dyn ServerAccess> = server.clone();
        let registry = DimensionRegistry::new(access, RegistryConfig::default());
        let level = registry
            .get_or_create_by_name("test:arena", |_, _| Ok(default_overworld_stem()))
            .expect("level created");

        let mut player = test_player();
        let target = DVec3::new(-20.5, 80.0, 33.0);
        send_player_to_dimension(&mut player, &level, target, &TeleportConfig::default())
            .expect("transfer succeeds");

        assert_eq!(player.level(), level.key());
        assert_eq!(player.position(), target);
        assert_eq!(player.yaw(), 180.0);
        assert_eq!(player.pitch(), -15.0);
        assert_eq!(player.settle_ticks(), 1);
        assert!(level.chunk_source().is_loaded(ChunkPos::new(-2, 2)));
    }

    #[test]
    fn test_unpublished_level_rejected() {
        let server = create_test_server();
        let level = ServerLevel::new(LevelInit {
            key: "test:pending".parse().expect("valid key"),
            stem: default_overworld_stem(),
            level_data: LevelData::Derived(DerivedLevelData::new(
                server.world_data().overworld_data(),
            )),
            progress: server.progress_listener_factory().create(1),
            storage_dir: "pending".into(),
            is_debug: false,
            seed: 0,
            tick_time: false,
        })
        .expect("valid level");

        let mut player = test_player();
        let result = send_player_to_dimension(
            &mut player,
            &level,
            DVec3::new(0.0, 64.0, 0.0),
            &TeleportConfig::default(),
        );

        assert!(matches!(result, Err(DimensionError::NotPublished { .. })));
        assert!(player.level().is_overworld());
        assert_eq!(level.chunk_source().loaded_count(), 0);
    }

    #[test]
    fn test_chunk_outside_world_leaves_player() {
        let server = create_test_server();
        let overworld = server.overworld().expect("overworld");

        let mut player = test_player();
        let result = send_player_to_dimension(
            &mut player,
            &overworld,
            DVec3::new(40_000_000.0, 64.0, 0.0),
            &TeleportConfig::default(),
        );

        assert!(matches!(result, Err(DimensionError::ChunkLoad { .. })));
        assert_eq!(player.position(), DVec3::new(0.5, 64.0, 0.5));
        assert!(player.can_act());
    }

    #[test]
    fn test_configured_settle_delay() {
        let server = create_test_server();
        let overworld = server.overworld().expect("overworld");
        let config = TeleportConfig { settle_ticks: 5 };

        let mut player = test_player();
        send_player_to_dimension(&mut player, &overworld, DVec3::new(8.0, 70.0, 8.0), &config)
            .expect("transfer succeeds");

        assert_eq!(player.settle_ticks(), 5);
    }
}
