//! Data repository layout
//!
//! Built once at process start and passed explicitly to whatever reads or
//! writes files; nothing in the library consults ambient paths.

use std::{
    io,
    path::{Path, PathBuf},
};

/// Input/output folder layout rooted at a project directory
#[derive(Debug, Clone)]
pub struct DataRepo {
    root: PathBuf,
}
impl DataRepo {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }
    pub fn root(&self) -> &Path {
        &self.root
    }
    /// Where the demand profile exports are read from
    pub fn input(&self) -> PathBuf {
        self.root.join("input")
    }
    /// Where charts and indicator tables are written to
    pub fn output(&self) -> PathBuf {
        self.root.join("output")
    }
    /// Creates the input and output folders when absent
    pub fn ensure(&self) -> io::Result<()> {
        std::fs::create_dir_all(self.input())?;
        std::fs::create_dir_all(self.output())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ensure_creates_the_folder_layout() {
        let root =
            std::env::temp_dir().join(format!("demand-profiles-{}-repo", std::process::id()));
        let repo = DataRepo::new(&root);
        repo.ensure().unwrap();
        assert!(repo.input().is_dir());
        assert!(repo.output().is_dir());
        // a second call on an existing layout is a no-op
        repo.ensure().unwrap();
    }
}
