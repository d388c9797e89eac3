use std::env;
use std::error::Error;
use std::process::Command;

use simple_error::bail;
use vergen::{BuildBuilder, CargoBuilder, Emitter, RustcBuilder};

fn uncommitted_count() -> usize {
    let output = match _exec_git(&["status", "-s"]) {
        Ok(output) => output,
        Err(_) => return 0,
    };
    let lines = output.trim().split('\n');
    lines.filter(|line| !line.trim().is_empty()).count()
}

fn exec_git(args: &[&str]) -> Option<String> {
    _exec_git(args).ok()
}

fn _exec_git(args: &[&str]) -> Result<String, Box<dyn Error>> {
    let mut cmd = Command::new("git");
    let output = cmd.args(args).output()?;
    if !output.status.success() {
        let cmd = format!("git {}", args.join(" "));
        bail!("Execute git command {} failed", cmd);
    }
    let output = String::from_utf8(output.stdout)?;
    Ok(output.trim().to_string())
}

fn main() -> Result<(), Box<dyn Error>> {
    let build = BuildBuilder::all_build()?;
    let cargo = CargoBuilder::all_cargo()?;
    let rustc = RustcBuilder::all_rustc()?;

    Emitter::default()
        .add_instructions(&build)?
        .add_instructions(&cargo)?
        .add_instructions(&rustc)?
        .emit()?;

    // Fall back to the package version outside of a git checkout.
    let mut version = match exec_git(&["describe", "--tags"]) {
        Some(version) if !version.is_empty() => version,
        _ => env::var("CARGO_PKG_VERSION")?,
    };
    if uncommitted_count() > 0 {
        version = format!("{}-dirty", version);
    }

    println!("cargo:rustc-env=ENCORE_VERSION={version}");
    println!("cargo:rustc-env=ENCORE_TARGET={}", env::var("TARGET")?);

    Ok(())
}
