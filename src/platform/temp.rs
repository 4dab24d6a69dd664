//! Temporary sibling names for atomic saves.
//! Pattern: `.<file_name>.<pid>.<seq>.tmp`, placed next to the target so the final
//! rename never crosses a filesystem boundary.
use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

static COUNTER: AtomicU64 = AtomicU64::new(0);

/// Longest file name (in bytes) accepted by common filesystems.
const NAME_MAX: usize = 255;

/// Room left for the target's name once the dot prefix and the suffix are added.
fn name_budget(suffix: &str) -> usize {
    NAME_MAX - 1 - suffix.len()
}

/// Longest prefix of `name` within `budget` bytes, cut on a char boundary.
fn truncate_name(name: &str, budget: usize) -> &str {
    if name.len() <= budget {
        return name;
    }
    let mut end = budget;
    while !name.is_char_boundary(end) {
        end -= 1;
    }
    &name[..end]
}

/// Hidden sibling temp path for `target`. Unique within this process; two
/// processes saving the same target at once is the caller's problem.
///
/// The temp name never exceeds 255 bytes: a target name too long to fit beside
/// the `.<pid>.<seq>.tmp` suffix is shortened (lossily, for non UTF-8 names) in
/// the temp name only.
pub fn tmp_save_sibling(target: &Path) -> PathBuf {
    let pid = std::process::id();
    let seq = COUNTER.fetch_add(1, Ordering::Relaxed);
    let suffix = format!(".{pid}.{seq}.tmp");

    let file_name = target.file_name().unwrap_or_else(|| OsStr::new("fsguard"));
    let mut name = OsString::from(".");
    if file_name.len() <= name_budget(&suffix) {
        name.push(file_name);
    } else {
        let lossy = file_name.to_string_lossy();
        name.push(truncate_name(&lossy, name_budget(&suffix)));
    }
    name.push(suffix);

    let dir = match target.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    dir.join(name)
}

/// True if `candidate` looks like a temp sibling produced for a file called `target_name`.
pub fn is_tmp_save_name(target_name: &str, candidate: &str) -> bool {
    let Some(rest) = candidate.strip_prefix('.') else {
        return false;
    };
    // Suffix starts at the pid dot: the second-to-last dot before ".tmp".
    let Some(suffix_start) = rest
        .strip_suffix(".tmp")
        .and_then(|r| r.rfind('.'))
        .and_then(|seq_dot| rest[..seq_dot].rfind('.'))
    else {
        return false;
    };
    let (stem, suffix) = rest.split_at(suffix_start);
    !stem.is_empty() && stem == truncate_name(target_name, name_budget(suffix))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::thread;

    #[test]
    fn uniqueness_concurrent() {
        let target = Path::new("dir/settings.json");
        let mut handles = Vec::new();
        for _ in 0..32 {
            let t = target.to_path_buf();
            handles.push(thread::spawn(move || tmp_save_sibling(&t)));
        }
        let mut set = HashSet::new();
        for h in handles {
            let p = h.join().unwrap();
            assert!(set.insert(p));
        }
        assert_eq!(set.len(), 32);
    }

    #[test]
    fn sibling_lives_in_target_dir_and_is_hidden() {
        let tmp = tmp_save_sibling(Path::new("/a/b/settings.json"));
        assert_eq!(tmp.parent(), Some(Path::new("/a/b")));
        let name = tmp.file_name().unwrap().to_string_lossy().into_owned();
        assert!(is_tmp_save_name("settings.json", &name), "unexpected name {name}");
    }

    #[test]
    fn bare_file_name_uses_current_dir() {
        let tmp = tmp_save_sibling(Path::new("notes.txt"));
        assert_eq!(tmp.parent(), Some(Path::new(".")));
    }

    #[test]
    fn tmp_name_matching_is_strict() {
        assert!(!is_tmp_save_name("a.txt", "a.txt"));
        assert!(!is_tmp_save_name("a.txt", ".a.txt"));
        assert!(!is_tmp_save_name("a.txt", ".b.txt.1.0.tmp"));
        assert!(is_tmp_save_name("a.txt", ".a.txt.1.0.tmp"));
    }

    #[test]
    fn long_target_names_still_fit_the_name_limit() {
        let long = format!("{}.json", "é".repeat(124));
        assert_eq!(long.len(), 253);
        let tmp = tmp_save_sibling(&Path::new("/data").join(&long));
        let name = tmp.file_name().unwrap().to_string_lossy().into_owned();
        assert!(name.len() <= NAME_MAX, "{} bytes", name.len());
        assert!(is_tmp_save_name(&long, &name), "unexpected name {name}");
        assert!(!is_tmp_save_name("other.json", &name));
    }
}
