use std::path::PathBuf;

use avoidkit::{demo, init_logging, RouterSettings, BUILD_DATE, VERSION};

fn main() -> anyhow::Result<()> {
    init_logging()?;
    tracing::info!(version = VERSION, build_date = BUILD_DATE, "AvoidKit demo");

    // An explicit path must load; the default location is optional.
    let settings = match std::env::args().nth(1).map(PathBuf::from) {
        Some(path) => RouterSettings::load_from_file(&path)?,
        None => {
            let path = RouterSettings::default_path();
            if path.exists() {
                RouterSettings::load_from_file(&path)?
            } else {
                RouterSettings::default()
            }
        }
    };

    let report = demo::run(settings)?;
    for (i, p) in report.final_route.iter().enumerate() {
        tracing::info!(index = i, point = %p, "Final route point");
    }
    Ok(())
}
