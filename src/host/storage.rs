use crate::world::core::WorldKey;
use std::path::{Path, PathBuf};

/// Access to the save directory of the running world.
/// Only paths are resolved here; the on-disk format belongs to the server.
#[derive(Debug, Clone)]
pub struct LevelStorageSource {
    root: PathBuf,
}

impl LevelStorageSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// The overworld saves into the root; every other level under
    /// `dimensions/<namespace>/<path>`
    pub fn dimension_path(&self, key: &WorldKey) -> PathBuf {
        if key.is_overworld() {
            return self.root.clone();
        }
        let location = key.location();
        let mut path = self.root.join("dimensions").join(location.namespace());
        for segment in location.path().split('/') {
            path.push(segment);
        }
        path
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dimension_paths() {
        let storage = LevelStorageSource::new("saves/world");

        assert_eq!(
            storage.dimension_path(&WorldKey::overworld()),
            PathBuf::from("saves/world")
        );
        let key: WorldKey = "warden:vaults/east".parse().expect("valid key");
        assert_eq!(
            storage.dimension_path(&key),
            PathBuf::from("saves/world/dimensions/warden/vaults/east")
        );
    }
}
