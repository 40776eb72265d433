use std::{env, fs, path::PathBuf};

// Ship settings.json next to the binary so the server can be run straight
// from the target directory.
fn main() {
    println!("cargo:rerun-if-changed=settings.json");

    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());
    let target_dir = out_dir
        .ancestors()
        .nth(3)
        .unwrap();

    fs::copy("settings.json", target_dir.join("settings.json"))
        .expect("Failed to copy settings.json");
}
