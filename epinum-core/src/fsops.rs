use std::fs;
use std::io;
use std::path::Path;

/// Filesystem capability used by the resolution engine.
///
/// The engine only ever needs an existence check and a rename, so the
/// collision-resolution loop can be driven by an in-memory implementation in
/// tests without touching the disk.
pub trait FileOps {
    fn exists(&self, path: &Path) -> bool;
    fn rename(&self, from: &Path, to: &Path) -> io::Result<()>;
}

/// The real filesystem.
#[derive(Debug, Default, Clone, Copy)]
pub struct DiskOps;

impl FileOps for DiskOps {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn rename(&self, from: &Path, to: &Path) -> io::Result<()> {
        fs::rename(from, to)
    }
}
