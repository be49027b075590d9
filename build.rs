use std::env;
use std::fs::File;
use std::io::Write;
use std::path::PathBuf;

fn main() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());

    let target = env::var("TARGET").unwrap();
    if target.starts_with("thumb") {
        // Put memory.x where the cortex-m-rt link script can find it
        File::create(out_dir.join("memory.x"))
            .unwrap()
            .write_all(include_bytes!("memory.x"))
            .unwrap();
        println!("cargo:rustc-link-search={}", out_dir.display());
    } else {
        // Host builds only compile the library for unit tests
        println!("cargo:warning=Non-thumb target {target}: firmware binaries will not link");
    }

    println!("cargo:rerun-if-changed=memory.x");
}
