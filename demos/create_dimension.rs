//! Create a dimension at runtime and send a player into it
//!
//! Starts a server with an overworld, registers `demo:arena` through the
//! dimension registry, ticks the server and teleports a player across.

use hearth_dimensions::{
    init_logging, send_player_to_dimension, ChunkGenerator, DVec3, DimensionRegistry,
    DimensionType, DimensionsConfig, GameServer, GameServerConfig, LevelEvent, LevelEventHandler,
    LevelStem, ResourceLocation, ServerAccess, ServerPlayer, WorldKey,
};
use std::path::Path;
use std::sync::Arc;

struct AnnounceLoads;

impl LevelEventHandler for AnnounceLoads {
    fn handle_event(&self, event: &LevelEvent) {
        println!("[EVENT] {:?} {}", event.kind(), event.level().key());
    }
}

fn main() -> anyhow::Result<()> {
    let dimensions = match std::env::args().nth(1) {
        Some(path) => DimensionsConfig::load(Path::new(&path))?,
        None => DimensionsConfig::default(),
    };
    init_logging(&dimensions.logging);

    let storage = tempfile::tempdir()?;
    let server = GameServer::with_overworld(GameServerConfig {
        dimensions: dimensions.clone(),
        storage_root: storage.path().to_path_buf(),
        ..Default::default()
    })?;
    println!("[OK] Server started with overworld");

    let announcer = Arc::new(AnnounceLoads);
    server.event_bus().subscribe(&announcer);

    let access: Arc<dyn ServerAccess> = server.clone();
    let registry = DimensionRegistry::new(access, dimensions.registry.clone());

    let arena = registry.get_or_create_by_name("demo:arena", |_, key| {
        let mut dimension_type = DimensionType::overworld();
        dimension_type.fixed_time = Some(18_000);
        dimension_type.has_skylight = false;
        println!("[FACTORY] Building stem for {}", key);
        Ok(LevelStem::new(
            dimension_type,
            ChunkGenerator::void(ResourceLocation::new("demo", "arena_biomes")?),
        ))
    })?;
    println!("[OK] Created {} at {}", arena.key(), arena.storage_dir().display());

    // second call finds the published level
    let again = registry.get_or_create(arena.key(), |_, _| anyhow::bail!("not called"))?;
    assert!(Arc::ptr_eq(&arena, &again));

    for _ in 0..20 {
        server.tick();
    }
    println!(
        "[OK] {} ticked {} times, game time {}",
        arena.key(),
        arena.tick_count(),
        arena.game_time()
    );

    let mut player = ServerPlayer::new(1, "demo", WorldKey::overworld(), DVec3::new(0.5, 64.0, 0.5));
    send_player_to_dimension(
        &mut player,
        &arena,
        DVec3::new(8.5, 100.0, 8.5),
        &dimensions.teleport,
    )?;
    println!(
        "[OK] {} is in {} at {:?}, settling for {} ticks",
        player.name(),
        player.level(),
        player.position(),
        player.settle_ticks()
    );

    println!("Registry stats: {:?}", registry.stats());
    println!("Levels: {:?}", registry.level_keys());
    Ok(())
}
