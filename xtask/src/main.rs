// Lendon - Build Task Runner
// Unified build system using cargo xtask pattern

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use xshell::{cmd, Shell};

const BIN_NAME: &str = "lendon";

fn main() -> Result<()> {
    let sh = Shell::new()?;
    let args: Vec<_> = std::env::args().skip(1).collect();

    match args.first().map(|s| s.as_str()) {
        Some("build") => {
            let release = args.iter().any(|a| a == "--release");
            build(&sh, release)
        }
        Some("test") => test(&sh),
        Some("format") => {
            let check = args.iter().any(|a| a == "--check");
            format(&sh, check)
        }
        Some("clippy") => clippy(&sh),
        Some("run") => run(&sh, &args[1..]),
        Some("clean") => clean(&sh),
        Some("ci") => ci(&sh),
        Some("dist") => dist(&sh),
        Some("install") => match args.get(1) {
            Some(dest) => install(&sh, dest),
            None => anyhow::bail!("Usage: cargo xtask install <destination>"),
        },
        _ => {
            print_help();
            Ok(())
        }
    }
}

fn print_help() {
    println!("Lendon - Build Commands:");
    println!();
    println!("Usage: cargo xtask <COMMAND> [OPTIONS]");
    println!();
    println!("Commands:");
    println!("  build [--release]   Build the backend (release also lays out build/dist)");
    println!("  test                Run all tests");
    println!("  format [--check]    Format code (check mode doesn't modify)");
    println!("  clippy              Run clippy checks");
    println!("  run [ARGS...]       Run the server, extra args go to the binary");
    println!("  clean               Clean build artifacts");
    println!("  ci                  Run all CI checks (format + clippy + build + test)");
    println!("  dist                Create distribution package (tar.gz)");
    println!("  install <path>      Build release binary and copy it to <path>");
    println!();
    println!("Examples:");
    println!("  cargo xtask build --release");
    println!("  cargo xtask run -- --config conf/config.toml");
    println!("  API_KEY=... cargo xtask run");
}

fn build(sh: &Shell, release: bool) -> Result<()> {
    let _dir = sh.push_dir(project_root());

    if release {
        println!("🔨 Building {} (release)...", BIN_NAME);
        cmd!(sh, "cargo build --release -p {BIN_NAME}")
            .run()
            .context("Failed to build backend in release mode")?;
        create_distribution(sh)?;
        println!("✅ Build complete, layout in build/dist/");
    } else {
        println!("🔨 Building {}...", BIN_NAME);
        cmd!(sh, "cargo build -p {BIN_NAME}")
            .run()
            .context("Failed to build backend")?;
        println!("✅ Build complete");
    }

    Ok(())
}

/// bin/ conf/ data/ logs/ under build/dist
fn create_distribution(sh: &Shell) -> Result<()> {
    let project = project_root();
    let dist_dir = project.join("build/dist");

    for sub in ["bin", "conf", "data", "logs"] {
        sh.create_dir(dist_dir.join(sub))?;
    }

    let binary_src = project.join("target/release").join(BIN_NAME);
    sh.copy_file(&binary_src, dist_dir.join("bin"))
        .with_context(|| format!("Failed to copy {}", binary_src.display()))?;

    let config_src = project.join("conf/config.toml");
    if config_src.exists() {
        sh.copy_file(&config_src, dist_dir.join("conf"))?;
    } else {
        println!("⚠️  conf/config.toml not found, the server will use built-in defaults");
    }

    Ok(())
}

fn test(sh: &Shell) -> Result<()> {
    println!("🧪 Running tests...");
    let _dir = sh.push_dir(project_root());

    cmd!(sh, "cargo test --workspace").run().context("Tests failed")?;

    println!("✅ All tests passed!");
    Ok(())
}

fn format(sh: &Shell, check: bool) -> Result<()> {
    let _dir = sh.push_dir(project_root());

    if check {
        cmd!(sh, "cargo fmt --all -- --check")
            .run()
            .context("Rust code is not formatted")?;
        println!("✅ Rust code is properly formatted");
    } else {
        cmd!(sh, "cargo fmt --all")
            .run()
            .context("Failed to format Rust code")?;
        println!("✅ Rust code formatted");
    }

    Ok(())
}

fn clippy(sh: &Shell) -> Result<()> {
    let _dir = sh.push_dir(project_root());

    cmd!(sh, "cargo clippy --workspace --all-targets -- --deny warnings --allow clippy::uninlined-format-args")
        .run()
        .context("Clippy checks failed")?;

    Ok(())
}

fn run(sh: &Shell, args: &[String]) -> Result<()> {
    println!("🚀 Starting {}...", BIN_NAME);
    let _dir = sh.push_dir(project_root());

    let args = args.iter().skip_while(|a| *a == "--");
    cmd!(sh, "cargo run -p {BIN_NAME} -- {args...}")
        .run()
        .context("Failed to run application")?;

    Ok(())
}

fn clean(sh: &Shell) -> Result<()> {
    println!("🧹 Cleaning build artifacts...");
    let project = project_root();
    let _dir = sh.push_dir(&project);

    cmd!(sh, "cargo clean").run()?;

    let build_dir = project.join("build");
    if build_dir.exists() {
        sh.remove_path(&build_dir)?;
    }

    println!("✅ Clean complete!");
    Ok(())
}

fn ci(sh: &Shell) -> Result<()> {
    println!("🔄 Running CI pipeline...");

    println!("📝 [1/4] Checking code format...");
    format(sh, true)?;

    println!("🔍 [2/4] Running clippy checks...");
    clippy(sh)?;

    println!("🔨 [3/4] Building project...");
    build(sh, true)?;

    println!("🧪 [4/4] Running tests...");
    test(sh)?;

    println!("🎉 CI pipeline completed successfully!");
    Ok(())
}

fn dist(sh: &Shell) -> Result<()> {
    build(sh, true)?;

    let dist_dir = project_root().join("build/dist");
    let timestamp = chrono::Local::now().format("%Y%m%d_%H%M%S");
    let package_name = format!("{}-{}.tar.gz", BIN_NAME, timestamp);
    let package_path = dist_dir.join(&package_name);

    println!("📋 Creating tarball: {}...", package_name);
    let _dir = sh.push_dir(&dist_dir);
    cmd!(sh, "tar czf {package_name} bin conf data logs")
        .run()
        .context("Failed to create tarball")?;

    println!("✅ Distribution package created!");
    println!("   Location: {}", package_path.display());
    println!("   Size: {} KB", std::fs::metadata(&package_path)?.len() / 1024);

    Ok(())
}

fn install(sh: &Shell, destination: &str) -> Result<()> {
    build(sh, true)?;

    let binary_src = project_root().join("target/release").join(BIN_NAME);
    let dest = Path::new(destination);
    if let Some(parent) = dest.parent() {
        std::fs::create_dir_all(parent).context("Failed to create destination directory")?;
    }
    std::fs::copy(&binary_src, dest).context("Failed to copy binary")?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        std::fs::set_permissions(dest, std::fs::Permissions::from_mode(0o755))?;
    }

    println!("✅ Installed {} to {}", BIN_NAME, destination);
    Ok(())
}

fn project_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."))
}
