//! Dimension Registry Operations - Pure DOP Functions
//!
//! No methods, no self, just transformations over `DimensionRegistryData`.
//!
//! Creation is serialized per key: callers racing for one missing key queue
//! on that key's lock, exactly one of them builds the level and the rest
//! find it published when they get the lock. Creation of different keys and
//! lookups of published levels never wait on each other.

use super::registry_data::{DimensionRegistryData, RegistryStats};
use super::side_effects::SideEffectChain;
use crate::config::RegistryConfig;
use crate::error::{DimensionError, DimensionResult, ErrorContext, OptionExt};
use crate::host::ServerAccess;
use crate::thread_pool::run_blocking;
use crate::world::core::{StemKey, WorldKey};
use crate::world::level::{DerivedLevelData, LevelData, LevelInit, LevelStem, ServerLevel};
use dashmap::DashMap;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Create registry data bound to a host
pub fn create_registry_data(
    server: Arc<dyn ServerAccess>,
    config: RegistryConfig,
) -> DimensionRegistryData {
    DimensionRegistryData {
        server,
        config,
        creation_locks: DashMap::new(),
        levels_created: AtomicU64::new(0),
        cache_hits: AtomicU64::new(0),
        failed_creations: AtomicU64::new(0),
        factory_invocations: AtomicU64::new(0),
    }
}

/// Return the published level for `key`, creating it from `factory` if absent.
///
/// The factory runs on the host's background pool and only runs when the
/// key is missing. On any error the host is left exactly as it was; a
/// panicking side effect is reverted and reported as `SideEffect`.
pub fn get_or_create_level<F>(
    data: &DimensionRegistryData,
    key: &WorldKey,
    factory: F,
) -> DimensionResult<Arc<ServerLevel>>
where
    F: FnOnce(&dyn ServerAccess, &StemKey) -> anyhow::Result<LevelStem> + Send + 'static,
{
    if let Some(level) = get_level(data, key) {
        data.cache_hits.fetch_add(1, Ordering::Relaxed);
        return Ok(level);
    }

    let lock = creation_lock(data, key);
    let _guard = lock.lock();

    // another caller may have finished while we queued
    if let Some(level) = data.server.levels().get(key) {
        if !level.is_published() {
            panic!(
                "{}",
                DimensionError::ConcurrentCreationConflict {
                    key: key.to_string()
                }
            );
        }
        data.cache_hits.fetch_add(1, Ordering::Relaxed);
        return Ok(level);
    }

    match create_level(data, key, factory) {
        Ok(level) => {
            data.levels_created.fetch_add(1, Ordering::Relaxed);
            data.creation_locks.remove(key);
            log::debug!("[DimensionRegistry::get_or_create] Level {} created", key);
            Ok(level)
        }
        Err(e) => {
            data.failed_creations.fetch_add(1, Ordering::Relaxed);
            Err(e)
        }
    }
}

/// Published level for `key`
pub fn get_level(data: &DimensionRegistryData, key: &WorldKey) -> Option<Arc<ServerLevel>> {
    data.server
        .levels()
        .get(key)
        .filter(|level| level.is_published())
}

pub fn contains_level(data: &DimensionRegistryData, key: &WorldKey) -> bool {
    get_level(data, key).is_some()
}

/// Keys of every published level, sorted
pub fn level_keys(data: &DimensionRegistryData) -> Vec<WorldKey> {
    data.server
        .levels()
        .levels()
        .into_iter()
        .filter(|level| level.is_published())
        .map(|level| level.key().clone())
        .collect()
}

pub fn overworld(data: &DimensionRegistryData) -> Option<Arc<ServerLevel>> {
    get_level(data, &WorldKey::overworld())
}

pub fn registry_stats(data: &DimensionRegistryData) -> RegistryStats {
    RegistryStats {
        levels_created: data.levels_created.load(Ordering::Relaxed),
        cache_hits: data.cache_hits.load(Ordering::Relaxed),
        failed_creations: data.failed_creations.load(Ordering::Relaxed),
        factory_invocations: data.factory_invocations.load(Ordering::Relaxed),
    }
}

fn creation_lock(data: &DimensionRegistryData, key: &WorldKey) -> Arc<Mutex<()>> {
    // clone out so no shard lock is held while waiting on the key lock
    Arc::clone(
        data.creation_locks
            .entry(key.clone())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .value(),
    )
}

/// Build and publish a level. Caller holds the key's creation lock.
fn create_level<F>(
    data: &DimensionRegistryData,
    key: &WorldKey,
    factory: F,
) -> DimensionResult<Arc<ServerLevel>>
where
    F: FnOnce(&dyn ServerAccess, &StemKey) -> anyhow::Result<LevelStem> + Send + 'static,
{
    let server = data.server.as_ref();
    let overworld_key = WorldKey::overworld();
    let overworld = get_level(data, &overworld_key).ok_or_dimension(|| {
        DimensionError::DependencyUnavailable {
            dependency: overworld_key.to_string(),
        }
    })?;

    let stem_key = key.stem_key();
    let stem = run_factory(data, key, &stem_key, factory)?;

    server
        .world_data()
        .register_stem(stem_key.clone(), stem.clone(), data.config.stem_lifecycle)?;
    log::trace!(
        "[DimensionRegistry::create_level] Stem {} registered as {:?}",
        stem_key,
        data.config.stem_lifecycle
    );

    let level = match construct_level(data, key, stem) {
        Ok(level) => Arc::new(level),
        Err(e) => {
            server.world_data().unregister_stem(&stem_key);
            return Err(e);
        }
    };

    match SideEffectChain::new(server, &overworld, &level).run() {
        Ok(report) => {
            log::trace!(
                "[DimensionRegistry::create_level] Side effects for {}: {:?}",
                key,
                report.completed
            );
            Ok(level)
        }
        Err(failure) => {
            server.world_data().unregister_stem(&stem_key);
            if let DimensionError::ConcurrentCreationConflict { .. } = failure.error {
                panic!("{} (at step {})", failure.error, failure.step);
            }
            Err(failure.error)
        }
    }
}

fn run_factory<F>(
    data: &DimensionRegistryData,
    key: &WorldKey,
    stem_key: &StemKey,
    factory: F,
) -> DimensionResult<LevelStem>
where
    F: FnOnce(&dyn ServerAccess, &StemKey) -> anyhow::Result<LevelStem> + Send + 'static,
{
    let server = Arc::clone(&data.server);
    let job_key = stem_key.clone();
    data.factory_invocations.fetch_add(1, Ordering::Relaxed);

    let outcome = run_blocking(
        data.server.background_executor(),
        move || factory(server.as_ref(), &job_key),
        data.config.factory_timeout(),
    );

    let key = key.to_string();
    outcome.factory_context(&key)?.factory_context(&key)
}

fn construct_level(
    data: &DimensionRegistryData,
    key: &WorldKey,
    stem: LevelStem,
) -> DimensionResult<ServerLevel> {
    let server = data.server.as_ref();
    let world_data = server.world_data();

    ServerLevel::new(LevelInit {
        key: key.clone(),
        stem,
        level_data: LevelData::Derived(DerivedLevelData::new(world_data.overworld_data())),
        progress: server
            .progress_listener_factory()
            .create(data.config.progress_listener_radius),
        storage_dir: server.storage_source().dimension_path(key),
        is_debug: world_data.is_debug(),
        seed: world_data.seed(),
        tick_time: false,
    })
}
