//! `save_templates` writes into the working directory, so it gets its own
//! test binary.

use landscape_gen::{Catalog, TEMPLATES_FILE, save_templates};
use tempfile::tempdir;

#[test]
fn test_save_templates_in_working_directory() {
    let dir = tempdir().expect("Failed to create temp dir");
    std::env::set_current_dir(dir.path()).expect("Failed to enter temp dir");

    save_templates().expect("Failed to save templates");

    let path = dir.path().join(TEMPLATES_FILE);
    let loaded = Catalog::load(&path).expect("Failed to load dump");
    assert_eq!(
        loaded.landscapes().keys().collect::<Vec<_>>(),
        Catalog::builtin().landscapes().keys().collect::<Vec<_>>()
    );
}
