use anyhow::Result;
use mp3tagger::{tag_tree, DryRunStore, LoftyStore, WalkReport};
use std::path::Path;
use tracing::{info, warn};

/// Tag every file under `music_dir`, or only log the values with `dry_run`.
pub fn tag_music_folder(music_dir: &Path, dry_run: bool) -> Result<WalkReport> {
    info!("STARTING: main directory [{}]", music_dir.display());
    if dry_run {
        info!("Dry run, no file will be modified");
    }

    let report = if dry_run {
        tag_tree(music_dir, &DryRunStore)
    } else {
        tag_tree(music_dir, &LoftyStore)
    };

    info!("FINISHED: main directory [{}]", music_dir.display());
    info!(
        "✅ Tagged {} files, {} failed",
        report.tagged(),
        report.failed()
    );
    for outcome in report.failures() {
        if let Err(e) = &outcome.result {
            warn!("  {}: {}", outcome.path.display(), e);
        }
    }

    Ok(report)
}
