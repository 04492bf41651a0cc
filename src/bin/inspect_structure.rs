//! Print a summary of a structure file, optionally resizing and re-saving it.
//!
//! Usage:
//!   cargo run --bin inspect_structure -- --file robot.json
//!   cargo run --bin inspect_structure -- --file robot.json --resize 12x8 --out robot_big.json

use std::path::PathBuf;

use voxforge::core::logging;
use voxforge::grid::CellKind;
use voxforge::Editor;

fn parse_size(s: &str) -> Option<(usize, usize)> {
    let (w, h) = s.split_once('x')?;
    Some((w.trim().parse().ok()?, h.trim().parse().ok()?))
}

fn print_summary(editor: &Editor) {
    let grid = editor.grid();
    println!("Grid: {}x{} ({} occupied cells)", grid.width(), grid.height(), grid.occupied_count());

    let mut kind_counts = [0usize; CellKind::ALL.len()];
    for node in grid.nodes() {
        kind_counts[node.kind().code() as usize] += 1;
    }
    for kind in CellKind::ALL.iter().skip(1) {
        let count = kind_counts[kind.code() as usize];
        if count > 0 {
            println!("  {:?}: {}", kind, count);
        }
    }

    println!("Objects: {}", editor.objects().len());
    for (_, object) in editor.objects().iter() {
        let links: usize = object
            .nodes
            .iter()
            .filter_map(|&id| grid.get(id))
            .map(|n| n.neighbors().len())
            .sum();
        println!("  {:<24} cells={:<5} links={}", object.name, object.nodes.len(), links / 2);
    }

    let duplicates = editor.objects().duplicate_names();
    if !duplicates.is_empty() {
        println!("Duplicate names: {}", duplicates.join(", "));
    }
    println!("Next default name suffix: {}", editor.counter().peek());
}

fn main() {
    logging::init();

    let args: Vec<String> = std::env::args().collect();

    let file = args.iter()
        .position(|a| a == "--file")
        .and_then(|i| args.get(i + 1))
        .map(PathBuf::from)
        .expect("Usage: inspect_structure --file <path> [--resize WxH --out <path>]");

    let resize = args.iter()
        .position(|a| a == "--resize")
        .and_then(|i| args.get(i + 1))
        .and_then(|s| parse_size(s));

    let out = args.iter()
        .position(|a| a == "--out")
        .and_then(|i| args.get(i + 1))
        .map(PathBuf::from);

    let mut editor = Editor::default();
    if !editor.load(&file) {
        eprintln!("Could not load {}", file.display());
        std::process::exit(1);
    }

    println!("=== {} ===", file.display());
    print_summary(&editor);

    if let Some((width, height)) = resize {
        if let Err(e) = editor.resize(width, height) {
            eprintln!("Resize failed: {}", e);
            std::process::exit(1);
        }
        println!();
        println!("=== after resize to {}x{} ===", width, height);
        print_summary(&editor);

        let out = out.unwrap_or(file);
        if let Err(e) = editor.save(&out) {
            eprintln!("Save failed: {}", e);
            std::process::exit(1);
        }
        println!("Saved to {}", out.display());
    }
}
