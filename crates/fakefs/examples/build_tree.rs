//! Example: Build a small tree, exercise every node kind and print it.
//!
//! Usage:
//!   cargo run -p rusty-fakefs --example build_tree
//!
//! Set `RUST_LOG=rusty_fakefs=trace` to see cursor hits and misses.

use std::io::Write;
use std::process::ExitCode;
use std::rc::Rc;

use rusty_fakefs::{create_root, Directory, File, FsError, Link, Node, NodeRef};
use tracing::{error, info};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn init_logging() {
    let filter: EnvFilter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
        .init();
}

fn run() -> Result<(), FsError> {
    let root: Rc<Directory> = create_root();

    let file1: Rc<File> = Rc::new(File::new("file1"));
    root.add(file1)?;
    let file2: Rc<File> = Rc::new(File::new("file2"));
    root.add(file2.clone())?;
    let dir3: Rc<Directory> = Rc::new(Directory::new("dir3"));
    root.add(dir3.clone())?;

    dir3.add(Rc::new(File::new("file31")))?;
    let file32: Rc<File> = Rc::new(File::new("file32"));
    dir3.add(file32.clone())?;
    dir3.add(Rc::new(Directory::new("dir33")))?;

    match dir3.add(file2.clone()) {
        Err(FsError::AlreadyAttached { name }) => info!("double add of '{}' rejected", name),
        other => other?,
    }

    root.add(Rc::new(File::new("file4")))?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    root.print_subtree(&mut out)?;

    let link5: Link = Link::new("link5", &dir3);
    let link6: Link = Link::new("link6", &file32);
    for link in [&link5, &link6] {
        match link.get_pointer() {
            Some(target) => writeln!(out, "{} -> {}", link, target)?,
            None => writeln!(out, "{} -> (gone)", link)?,
        }
    }

    file2.append(b"hello \0there.");
    file2.append(b"how are you?");
    info!(size = file2.size(), "appended to {}", file2);
    writeln!(out, "{:?}", String::from_utf8_lossy(&file2.read(22, 13)))?;

    let mut item: Option<NodeRef> = dir3.first();
    while let Some(node) = item {
        writeln!(out, "{}: {:?}", node, node.node_type())?;
        item = dir3.next(&node);
    }

    Ok(())
}

fn main() -> ExitCode {
    init_logging();

    match run() {
        Ok(()) => {
            info!("successfully completed");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("build_tree failed: {}", e);
            ExitCode::FAILURE
        }
    }
}
