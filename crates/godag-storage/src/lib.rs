//! Snapshot persistence for godag.
//!
//! The whole ontology is serialized as one self-describing binary blob
//! (bincode over the store's serde model) and replaced wholesale on load.
//! There is no incremental or append persistence: `save` writes to a
//! sibling temp file and renames it into place, so a reader never observes
//! a partially written snapshot.
//!
//! The format carries no compatibility promise with the legacy pickle dumps
//! the original tooling produced.

use anyhow::{anyhow, Context, Result};
use godag_core::Ontology;
use std::path::Path;

/// Conventional snapshot file extension.
pub const SNAPSHOT_EXT: &str = "dagon";

/// Serialize the full store to bytes.
pub fn to_bytes(onto: &Ontology) -> Result<Vec<u8>> {
    bincode::serialize(onto).context("failed to encode ontology snapshot")
}

/// Deserialize a complete replacement store from bytes.
pub fn from_bytes(bytes: &[u8]) -> Result<Ontology> {
    bincode::deserialize(bytes).context("failed to decode ontology snapshot")
}

/// Write the current ontology to `path`, atomically replacing any previous
/// snapshot there.
pub fn save(onto: &Ontology, path: &Path) -> Result<()> {
    let bytes = to_bytes(onto)?;

    let file_name = path
        .file_name()
        .ok_or_else(|| anyhow!("snapshot path has no file name: {}", path.display()))?;
    let mut tmp_name = file_name.to_os_string();
    tmp_name.push(".tmp");
    let tmp_path = path.with_file_name(tmp_name);

    std::fs::write(&tmp_path, &bytes)
        .with_context(|| format!("failed to write {}", tmp_path.display()))?;
    if let Err(err) = std::fs::rename(&tmp_path, path) {
        let _ = std::fs::remove_file(&tmp_path);
        return Err(err).with_context(|| format!("failed to move snapshot into {}", path.display()));
    }

    tracing::info!(
        path = %path.display(),
        terms = onto.term_count(),
        relations = onto.relation_count(),
        bytes = bytes.len(),
        "saved ontology snapshot"
    );
    Ok(())
}

/// Load a snapshot from `path`. The returned store fully replaces whatever
/// the caller held before.
pub fn load(path: &Path) -> Result<Ontology> {
    let bytes = std::fs::read(path)
        .with_context(|| format!("failed to read snapshot {}", path.display()))?;
    let onto = from_bytes(&bytes)?;

    tracing::info!(
        path = %path.display(),
        terms = onto.term_count(),
        relations = onto.relation_count(),
        "loaded ontology snapshot"
    );
    Ok(onto)
}

#[cfg(test)]
mod tests {
    use super::*;
    use godag_core::{Aspect, RelationKind, Term, TermId};
    use tempfile::tempdir;

    fn sample_ontology() -> Ontology {
        let mut onto = Ontology::with_roots();
        onto.add_term(Term::new(
            "GO:0003824",
            "catalytic activity",
            Aspect::MolecularFunction,
            "Catalysis of a biochemical reaction.",
        ));
        onto.add_relation(
            &TermId::from("GO:0003824"),
            &TermId::from(godag_core::ROOT_MF),
            RelationKind::IsA,
        )
        .unwrap();
        onto
    }

    #[test]
    fn round_trip_preserves_terms_and_edges() {
        let onto = sample_ontology();
        let restored = from_bytes(&to_bytes(&onto).unwrap()).unwrap();
        assert_eq!(restored, onto);
    }

    #[test]
    fn save_then_load_from_disk() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(format!("go.{SNAPSHOT_EXT}"));

        let onto = sample_ontology();
        save(&onto, &path).unwrap();
        assert!(path.exists());

        let restored = load(&path).unwrap();
        assert_eq!(restored, onto);
        assert_eq!(restored.relation_count(), 1);
    }

    #[test]
    fn save_replaces_existing_snapshot() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("go.dagon");

        save(&Ontology::new(), &path).unwrap();
        let onto = sample_ontology();
        save(&onto, &path).unwrap();

        let restored = load(&path).unwrap();
        assert_eq!(restored.term_count(), 4);
    }

    #[test]
    fn failed_replace_leaves_no_temp_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("go.dagon");
        // A directory at the target path makes the rename fail.
        std::fs::create_dir(&path).unwrap();

        assert!(save(&sample_ontology(), &path).is_err());
        assert!(!dir.path().join("go.dagon.tmp").exists());
    }

    #[test]
    fn load_of_garbage_fails_cleanly() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("broken.dagon");
        std::fs::write(&path, b"not a snapshot").unwrap();
        assert!(load(&path).is_err());
    }
}
