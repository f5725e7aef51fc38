use std::fs;
use std::path::{Path, PathBuf};

fn collect_rs_files(root: &Path) -> Vec<PathBuf> {
    let mut files = Vec::new();
    let mut stack = vec![root.to_path_buf()];
    while let Some(dir) = stack.pop() {
        if let Ok(read_dir) = fs::read_dir(&dir) {
            for entry in read_dir.flatten() {
                let path = entry.path();
                if path.is_dir() {
                    stack.push(path);
                } else if path.extension().map(|e| e == "rs").unwrap_or(false) {
                    files.push(path);
                }
            }
        }
    }
    files
}

fn offenders(root: &Path, needles: &[&str]) -> Vec<String> {
    collect_rs_files(root)
        .into_iter()
        .filter(|file| {
            fs::read_to_string(file)
                .map(|c| needles.iter().any(|needle| c.contains(needle)))
                .unwrap_or(false)
        })
        .map(|file| file.to_string_lossy().to_string())
        .collect()
}

#[test]
fn ranking_library_performs_no_io() {
    let ranking_src = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .expect("feed-service has a parent dir")
        .join("libs/feed-ranking/src");
    assert!(ranking_src.is_dir(), "missing {}", ranking_src.display());

    let found = offenders(
        &ranking_src,
        &["sqlx::", "tokio::", "std::fs", "std::net", "async fn"],
    );

    if !found.is_empty() {
        panic!(
            "Feed ranking must stay a pure function over an in-memory snapshot. Offenders: {:?}",
            found
        );
    }
}

#[test]
fn feed_service_does_not_reimplement_scoring() {
    let src_root = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("src");

    let found = offenders(&src_root, &["age_hours", "EngagementWeights"]);

    if !found.is_empty() {
        panic!(
            "Engagement scoring belongs to feed-ranking only. Offenders: {:?}",
            found
        );
    }
}

#[test]
fn sources_fit_rustfmt_width() {
    let manifest = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    let ranking = manifest
        .parent()
        .expect("feed-service has a parent dir")
        .join("libs/feed-ranking");

    let mut too_wide = Vec::new();
    for root in [
        manifest.join("src"),
        manifest.join("tests"),
        ranking.join("src"),
        ranking.join("tests"),
    ] {
        for file in collect_rs_files(&root) {
            let Ok(contents) = fs::read_to_string(&file) else {
                continue;
            };
            for (idx, line) in contents.lines().enumerate() {
                if line.chars().count() > 100 {
                    too_wide.push(format!("{}:{}", file.display(), idx + 1));
                }
            }
        }
    }

    assert!(too_wide.is_empty(), "Lines over 100 columns: {:?}", too_wide);
}
