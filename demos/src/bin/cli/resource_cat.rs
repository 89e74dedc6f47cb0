//! Resource cat
//!
//! Prints resources named by untrusted targets from a sandbox directory.
//! Targets are treated the way a file server would treat URL paths: `..`
//! cannot climb out, `/x` means `x` inside the sandbox, and symlinks leading
//! outside are reported as not found.
//!
//! Usage:
//!   resource_cat --root ./site readme.txt ../../etc/passwd
//!   resource_cat --root ./site --ext .md --ext .txt readme
//!
//! Without `--root` an offline demo sandbox is created and removed again.

use anyhow::{Context, Result};
use clap::Parser;
use resource_root::{
    identity, ExtensionMap, ExtensionOverlayRoot, FilesystemRoot, ResourceRoot, ResourceRootError,
};
use std::fs;

const DEMO_DIR: &str = "./resource_cat_demo";

#[derive(Parser, Debug)]
#[command(about = "Read untrusted targets from a sandboxed directory")]
struct Args {
    /// Sandbox directory (must exist).
    #[arg(long)]
    root: Option<FilesystemRoot>,

    /// Append these extensions to each target and read the first that exists.
    #[arg(long = "ext")]
    extensions: Vec<String>,

    /// Print raw bytes as hex instead of text.
    #[arg(long)]
    bytes: bool,

    /// Targets to read.
    targets: Vec<String>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    match args.root.clone() {
        Some(root) => run(&args, root),
        None => {
            println!("No --root given; running offline demo in {DEMO_DIR}\n");
            let result = create_demo_sandbox().and_then(|root| run(&args, root));
            fs::remove_dir_all(DEMO_DIR).ok();
            result
        }
    }
}

fn create_demo_sandbox() -> Result<FilesystemRoot> {
    fs::create_dir_all(format!("{DEMO_DIR}/docs")).context("creating demo sandbox")?;
    fs::write(format!("{DEMO_DIR}/readme.txt"), "hello from the sandbox\n")?;
    fs::write(format!("{DEMO_DIR}/docs/guide.md"), "# Guide\n")?;
    Ok(FilesystemRoot::try_new(DEMO_DIR)?)
}

fn run(args: &Args, root: FilesystemRoot) -> Result<()> {
    let targets: Vec<String> = if args.targets.is_empty() {
        ["readme.txt", "/docs/guide.md", "../../etc/passwd", "docs"]
            .map(String::from)
            .to_vec()
    } else {
        args.targets.clone()
    };

    let reader: Box<dyn ResourceRoot> = if args.extensions.is_empty() {
        Box::new(root)
    } else {
        let map: ExtensionMap = args
            .extensions
            .iter()
            .map(|extension| (extension.as_str(), identity))
            .collect();
        Box::new(ExtensionOverlayRoot::from_root(root, map))
    };

    for target in &targets {
        if args.bytes {
            match reader.read(target.into()) {
                Ok(bytes) => println!("{target}: {}", hex(&bytes)),
                Err(err) => report(target, &err),
            }
        } else {
            match reader.text(target.into()) {
                Ok(text) => println!("{target}:\n{text}"),
                Err(err) => report(target, &err),
            }
        }
    }
    Ok(())
}

fn report(target: &str, err: &ResourceRootError) {
    match err {
        ResourceRootError::NotFound { .. } => println!("{target}: not found"),
        other => println!("{target}: {other}"),
    }
}

fn hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}
