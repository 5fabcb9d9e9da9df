//! Generate a lookup of every glyph fixture in test_data/glyphs

use std::{
    fs,
    path::{Path, PathBuf},
    str::FromStr,
};

fn main() {
    println!("cargo:rerun-if-changed=test_data/glyphs");

    let out_dir = PathBuf::from_str(&std::env::var("OUT_DIR").unwrap()).unwrap();
    let out_file = out_dir.join("fixtures.rs");

    // Cargo ensures working directory is set so relative paths should be safe
    // <https://doc.rust-lang.org/cargo/reference/environment-variables.html#environment-variables-cargo-sets-for-build-scripts>
    let glyph_dir = Path::new("test_data/glyphs");
    assert!(glyph_dir.is_dir(), "{glyph_dir:?} should be a directory");

    let mut names = fs::read_dir(glyph_dir)
        .unwrap()
        .map(|entry| entry.unwrap().path())
        .filter(|path| path.extension().is_some_and(|ext| ext == "txt"))
        .collect::<Vec<_>>();
    // keep the generated file stable across platforms
    names.sort();

    let mut content = String::new();
    content.push_str("/// Every glyph fixture, as `(file name, contents)` pairs.\n");
    content.push_str("pub static ALL: &[(&str, &str)] = &[\n");
    for path in names {
        let basename = path.file_name().unwrap().to_str().unwrap();
        let absolute = fs::canonicalize(&path).unwrap();
        content.push_str(&format!(
            "    ({basename:?}, include_str!({:?})),\n",
            absolute.display().to_string()
        ));
    }
    content.push_str("];\n");

    fs::write(out_file, content).unwrap();
}
