use crate::error::Error;
use crate::fsops::FileOps;
use crate::plan::RenamePlan;
use serde::{Deserialize, Serialize};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// A single rename committed during resolution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenameEvent {
    pub from: PathBuf,
    pub to: PathBuf,
    /// Completed by the retry loop after at least one deferral.
    pub retried: bool,
}

/// A pair that was still colliding when the retry loop stopped making
/// progress. Reported per-item; never aborts the batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Conflict {
    pub from: PathBuf,
    pub to: PathBuf,
}

/// Outcome of resolving one set of renames.
///
/// `failure` holds the I/O error that aborted the resolution, if any.
/// Renames committed before the failure are kept in `events` so the caller
/// can still record them for undo.
#[derive(Debug)]
pub struct Resolution {
    pub events: Vec<RenameEvent>,
    pub conflicts: Vec<Conflict>,
    pub failure: Option<Error>,
}

impl Resolution {
    /// `(new_path, original_path)` pairs in commit order, ready for the
    /// history stack: new name first so undo can map new -> original.
    pub fn reversal_pairs(&self) -> Vec<(PathBuf, PathBuf)> {
        self.events
            .iter()
            .map(|e| (e.to.clone(), e.from.clone()))
            .collect()
    }
}

#[derive(Debug)]
struct PendingRename {
    /// Where the file started; what the history entry must point back to.
    original: PathBuf,
    /// Where the file currently lives (diverges from `original` after a
    /// cycle-breaking detour).
    current: PathBuf,
    target: PathBuf,
    deferred: bool,
    parked: bool,
}

fn rename_failure(from: &Path, to: &Path, source: std::io::Error) -> Error {
    Error::io(
        format!("failed to rename {} to {}", from.display(), to.display()),
        source,
    )
}

/// Pick an unoccupied sibling name to park a cycle member at.
fn detour_path<F: FileOps>(target: &Path, ops: &F) -> PathBuf {
    let name = target
        .file_name()
        .map_or_else(|| target.to_string_lossy().into_owned(), |n| n.to_string_lossy().into_owned());
    let mut attempt = 0u32;
    loop {
        let candidate = target.with_file_name(format!("{name}.swap{attempt}"));
        if !ops.exists(&candidate) {
            return candidate;
        }
        attempt += 1;
    }
}

/// Run rename pairs `(from, to)` to a fixpoint.
///
/// Every pair starts pending. Each pass attempts all pending pairs against
/// the current filesystem state, deferring any whose target is occupied;
/// passes repeat until one completes nothing. A stall where a pending pair's
/// target is held by another pending pair's source is a collision cycle, and
/// is broken by parking one member at a temporary sibling name. Anything
/// still pending after that is a genuine conflict with a file outside the
/// managed set; a parked file whose chain turns out not to drain is returned
/// to its original name before the conflict is reported.
pub fn resolve_renames<F: FileOps>(pairs: Vec<(PathBuf, PathBuf)>, ops: &F) -> Resolution {
    let mut pending: Vec<PendingRename> = pairs
        .into_iter()
        .map(|(from, to)| PendingRename {
            original: from.clone(),
            current: from,
            target: to,
            deferred: false,
            parked: false,
        })
        .collect();

    let mut events = Vec::new();
    let mut failure = None;

    'resolution: while !pending.is_empty() {
        // Fixpoint passes: stop once a full pass completes zero pairs.
        loop {
            let mut still_pending = Vec::new();
            let mut progressed = false;

            for mut item in std::mem::take(&mut pending) {
                if failure.is_some() {
                    still_pending.push(item);
                    continue;
                }
                if ops.exists(&item.target) {
                    item.deferred = true;
                    still_pending.push(item);
                    continue;
                }
                match ops.rename(&item.current, &item.target) {
                    Ok(()) => {
                        events.push(RenameEvent {
                            from: item.original,
                            to: item.target,
                            retried: item.deferred,
                        });
                        progressed = true;
                    },
                    // Lost the check-then-act race against another rename in
                    // this batch; treat it like the pre-check deferral.
                    Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                        item.deferred = true;
                        still_pending.push(item);
                    },
                    Err(e) => {
                        failure = Some(rename_failure(&item.current, &item.target, e));
                        still_pending.push(item);
                    },
                }
            }

            pending = still_pending;
            if failure.is_some() {
                break 'resolution;
            }
            if pending.is_empty() || !progressed {
                break;
            }
        }

        if pending.is_empty() {
            break;
        }

        // Stalled. Look for a collision cycle: a pending target occupied by
        // another pending source. Each pair gets at most one detour so an
        // unresolvable neighbour cannot spin this loop forever.
        let Some(idx) = pending.iter().position(|item| {
            !item.parked
                && pending
                    .iter()
                    .any(|other| !std::ptr::eq(other, item) && other.current == item.target)
        }) else {
            break;
        };

        let detour = detour_path(&pending[idx].target, ops);
        match ops.rename(&pending[idx].current, &detour) {
            Ok(()) => {
                pending[idx].current = detour;
                pending[idx].deferred = true;
                pending[idx].parked = true;
            },
            Err(e) => {
                failure = Some(rename_failure(&pending[idx].current, &detour, e));
                break;
            },
        }
    }

    let mut conflicts = Vec::new();
    for item in pending {
        let mut current = item.current;
        if current != item.original {
            // Parked at a detour name when resolution stopped. The detour
            // vacated the original name, so bring the file home unless
            // another pair has since claimed that name.
            if !ops.exists(&item.original) && ops.rename(&current, &item.original).is_ok() {
                current = item.original;
            } else {
                // Still stuck at the detour; record the move so undo can
                // bring the file back.
                events.push(RenameEvent {
                    from: item.original,
                    to: current.clone(),
                    retried: true,
                });
            }
        }
        conflicts.push(Conflict {
            from: current,
            to: item.target,
        });
    }

    Resolution {
        events,
        conflicts,
        failure,
    }
}

/// Apply a plan's renames inside its directory. Unchanged pairs are skipped.
pub fn apply_plan<F: FileOps>(plan: &RenamePlan, ops: &F) -> Resolution {
    let pairs = plan
        .renames
        .iter()
        .filter(|r| !r.unchanged)
        .map(|r| {
            (
                plan.directory.join(&r.original_name),
                plan.directory.join(&r.target_name),
            )
        })
        .collect();
    resolve_renames(pairs, ops)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::collections::BTreeSet;
    use std::io;

    /// In-memory stand-in for the filesystem: a set of occupied paths.
    struct MemOps {
        files: RefCell<BTreeSet<PathBuf>>,
        deny: Option<PathBuf>,
    }

    impl MemOps {
        fn new(names: &[&str]) -> Self {
            Self {
                files: RefCell::new(names.iter().map(PathBuf::from).collect()),
                deny: None,
            }
        }

        fn denying(names: &[&str], deny: &str) -> Self {
            let mut ops = Self::new(names);
            ops.deny = Some(PathBuf::from(deny));
            ops
        }

        fn names(&self) -> Vec<String> {
            self.files
                .borrow()
                .iter()
                .map(|p| p.to_string_lossy().into_owned())
                .collect()
        }
    }

    impl FileOps for MemOps {
        fn exists(&self, path: &Path) -> bool {
            self.files.borrow().contains(path)
        }

        fn rename(&self, from: &Path, to: &Path) -> io::Result<()> {
            if self.deny.as_deref() == Some(from) {
                return Err(io::Error::new(io::ErrorKind::PermissionDenied, "denied"));
            }
            let mut files = self.files.borrow_mut();
            if files.contains(to) {
                return Err(io::Error::new(io::ErrorKind::AlreadyExists, "occupied"));
            }
            if !files.remove(from) {
                return Err(io::Error::new(io::ErrorKind::NotFound, "missing"));
            }
            files.insert(to.to_path_buf());
            Ok(())
        }
    }

    fn pairs(list: &[(&str, &str)]) -> Vec<(PathBuf, PathBuf)> {
        list.iter()
            .map(|(from, to)| (PathBuf::from(from), PathBuf::from(to)))
            .collect()
    }

    #[test]
    fn test_free_targets_complete_in_first_pass() {
        let ops = MemOps::new(&["a", "b"]);
        let resolution = resolve_renames(pairs(&[("a", "x"), ("b", "y")]), &ops);
        assert_eq!(resolution.events.len(), 2);
        assert!(resolution.conflicts.is_empty());
        assert!(resolution.failure.is_none());
        assert!(resolution.events.iter().all(|e| !e.retried));
        assert_eq!(ops.names(), vec!["x", "y"]);
    }

    #[test]
    fn test_shift_chain_drains_through_retries() {
        // e1 -> e2 -> e3 -> e4: only the tail is free at first.
        let ops = MemOps::new(&["e1", "e2", "e3"]);
        let resolution =
            resolve_renames(pairs(&[("e1", "e2"), ("e2", "e3"), ("e3", "e4")]), &ops);
        assert_eq!(resolution.events.len(), 3);
        assert!(resolution.conflicts.is_empty());
        assert_eq!(ops.names(), vec!["e2", "e3", "e4"]);

        let retried: Vec<bool> = resolution.events.iter().map(|e| e.retried).collect();
        // Tail moved immediately, the two blocked pairs needed the loop.
        assert_eq!(retried, vec![false, true, true]);
    }

    #[test]
    fn test_rotation_cycle_resolves_without_conflicts() {
        let ops = MemOps::new(&["a", "b", "c"]);
        let resolution = resolve_renames(pairs(&[("a", "b"), ("b", "c"), ("c", "a")]), &ops);
        assert!(resolution.failure.is_none());
        assert!(resolution.conflicts.is_empty(), "{:?}", resolution.conflicts);
        assert_eq!(resolution.events.len(), 3);
        assert_eq!(ops.names(), vec!["a", "b", "c"]);

        // Every file ends at its planned target, not at a detour name.
        for (from, to) in [("a", "b"), ("b", "c"), ("c", "a")] {
            assert!(resolution
                .events
                .iter()
                .any(|e| e.from == Path::new(from) && e.to == Path::new(to)));
        }
    }

    #[test]
    fn test_two_cycle_swap() {
        let ops = MemOps::new(&["e3", "e5"]);
        let resolution = resolve_renames(pairs(&[("e3", "e5"), ("e5", "e3")]), &ops);
        assert!(resolution.conflicts.is_empty());
        assert_eq!(resolution.events.len(), 2);
        assert_eq!(ops.names(), vec!["e3", "e5"]);
    }

    #[test]
    fn test_external_occupier_is_reported_not_fatal() {
        // "taken" is not part of the batch and never moves.
        let ops = MemOps::new(&["a", "b", "taken"]);
        let resolution = resolve_renames(pairs(&[("a", "taken"), ("b", "x")]), &ops);
        assert!(resolution.failure.is_none());
        assert_eq!(resolution.events.len(), 1);
        assert_eq!(resolution.conflicts.len(), 1);
        assert_eq!(resolution.conflicts[0].from, Path::new("a"));
        assert_eq!(resolution.conflicts[0].to, Path::new("taken"));
        assert!(ops.names().contains(&"x".to_string()));
    }

    #[test]
    fn test_chain_blocked_by_external_occupier_keeps_names() {
        // b's target is held by a, but a's own target is held by a file
        // outside the batch, so the chain can never drain. The detour taken
        // while probing for a cycle must not strand b at a swap name.
        let ops = MemOps::new(&["a", "b", "taken"]);
        let resolution = resolve_renames(pairs(&[("a", "taken"), ("b", "a")]), &ops);

        assert!(resolution.failure.is_none());
        assert!(resolution.events.is_empty(), "{:?}", resolution.events);
        assert_eq!(ops.names(), vec!["a", "b", "taken"]);

        // Conflicts name the files the user can see, not detour paths.
        let froms: Vec<&Path> = resolution.conflicts.iter().map(|c| c.from.as_path()).collect();
        assert_eq!(froms, vec![Path::new("a"), Path::new("b")]);
    }

    #[test]
    fn test_io_failure_aborts_but_keeps_committed_renames() {
        let ops = MemOps::denying(&["a", "b"], "b");
        let resolution = resolve_renames(pairs(&[("a", "x"), ("b", "y")]), &ops);
        assert!(matches!(resolution.failure, Some(Error::Io { .. })));
        assert_eq!(resolution.events.len(), 1);
        assert_eq!(resolution.events[0].to, Path::new("x"));
        assert_eq!(resolution.conflicts.len(), 1);
    }

    #[test]
    fn test_reversal_pairs_are_new_name_first() {
        let ops = MemOps::new(&["a"]);
        let resolution = resolve_renames(pairs(&[("a", "b")]), &ops);
        assert_eq!(
            resolution.reversal_pairs(),
            vec![(PathBuf::from("b"), PathBuf::from("a"))]
        );
    }

    #[test]
    fn test_self_pair_reports_conflict() {
        // A pair renaming a file onto itself can never free its target.
        let ops = MemOps::new(&["a"]);
        let resolution = resolve_renames(pairs(&[("a", "a")]), &ops);
        assert!(resolution.events.is_empty());
        assert_eq!(resolution.conflicts.len(), 1);
        assert_eq!(ops.names(), vec!["a"]);
    }
}
