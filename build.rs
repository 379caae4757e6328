fn main() {
    // Exposed as avoidkit::BUILD_DATE and logged by the demo at startup.
    let build_date = chrono::Utc::now().format("%Y-%m-%d").to_string();
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rustc-env=BUILD_DATE={}", build_date);
}
