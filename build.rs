use std::process::Command;

fn main() {
    println!("cargo:rerun-if-env-changed=KALMANOP_VERSION");

    let version = match std::env::var("KALMANOP_VERSION") {
        Ok(v) => v,
        Err(_) => match Command::new("git").args(["describe", "--tags"]).output() {
            Ok(o) if o.status.success() => String::from_utf8_lossy(&o.stdout).trim().to_string(),
            _ => env!("CARGO_PKG_VERSION").to_string(),
        },
    };

    let version = version.strip_prefix('v').unwrap_or(&version);
    println!("cargo:rustc-env=KALMANOP_VERSION={version}");
}
