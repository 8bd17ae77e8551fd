use crate::core::Snapshot;
use anyhow::Context;
use serde::Deserialize;
use std::io::Read;
use std::path::Path;

#[derive(Deserialize)]
#[serde(untagged)]
enum SnapshotInput {
    Many(Vec<Snapshot>),
    One(Snapshot),
}

/// Parse one snapshot object or an array of them.
pub fn parse_snapshots(contents: &str) -> anyhow::Result<Vec<Snapshot>> {
    let input: SnapshotInput =
        serde_json::from_str(contents).context("input is not a snapshot or an array of snapshots")?;
    Ok(match input {
        SnapshotInput::Many(snapshots) => snapshots,
        SnapshotInput::One(snapshot) => vec![snapshot],
    })
}

/// Read snapshots from `path`, or from stdin when `path` is `-`.
pub fn read_snapshots(path: &Path) -> anyhow::Result<Vec<Snapshot>> {
    let contents = if path == Path::new("-") {
        let mut buffer = String::new();
        std::io::stdin()
            .read_to_string(&mut buffer)
            .context("failed to read snapshots from stdin")?;
        buffer
    } else {
        std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?
    };

    let snapshots = parse_snapshots(&contents)
        .with_context(|| format!("failed to parse {}", path.display()))?;
    log::debug!("Read {} snapshots from {}", snapshots.len(), path.display());
    Ok(snapshots)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::LandmarkId;
    use indoc::indoc;

    #[test]
    fn test_single_object() {
        let snapshots = parse_snapshots(indoc! {r#"
            {
              "frame_id": 3,
              "timestamp_ms": 100,
              "landmarks": [
                {"id": "left_hip", "x": 0.4, "y": 0.55, "z": 0.0, "visibility": 0.9}
              ]
            }
        "#})
        .unwrap();
        assert_eq!(snapshots.len(), 1);
        assert_eq!(snapshots[0].frame_id(), 3);
        assert!(snapshots[0].get(LandmarkId::LeftHip).is_some());
    }

    #[test]
    fn test_array() {
        let snapshots = parse_snapshots(r#"[{"frame_id": 1}, {"frame_id": 2}]"#).unwrap();
        assert_eq!(snapshots.len(), 2);
        assert!(snapshots[1].is_empty());
    }

    #[test]
    fn test_garbage_is_an_error() {
        assert!(parse_snapshots("42").is_err());
    }
}
