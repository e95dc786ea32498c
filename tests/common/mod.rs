#![allow(dead_code)]

use assert_cmd::Command;
use std::path::Path;

pub fn notepub_cmd() -> Command {
    let mut cmd = Command::cargo_bin("notepub").unwrap();
    cmd.env_remove("NOTEPUB_ROOT");
    cmd.env_remove("NOTEPUB_LOG");
    cmd
}

/// Initialize a store in `root` and create the given notes
pub fn init_store_with_notes(root: &Path, ids: &[&str]) {
    notepub_cmd().arg("init").arg(root).assert().success();

    for id in ids {
        notepub_cmd()
            .current_dir(root)
            .args(["new", id, "--content", &format!("Note {}\nbody", id)])
            .assert()
            .success();
    }
}
