//! `glyphstack` CLI — render SDF glyph ranges and inspect fonts.

use std::env;
use std::fs;
use std::path::Path;
use std::process;

use glyphstack_fonts::{load_faces, FaceInfo};
use glyphstack_render::range;

/// Codepoints per output file for the `build` subcommand.
const WINDOW: u32 = 256;

/// Highest encodable codepoint.
const MAX_CODEPOINT: u32 = 65535;

fn main() {
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        print_usage();
        process::exit(1);
    }

    match args[1].as_str() {
        "range" => cmd_range(&args[2..]),
        "build" => cmd_build(&args[2..]),
        "inspect" => cmd_inspect(&args[2..]),
        "--help" | "-h" => {
            print_usage();
        }
        other => {
            eprintln!("Unknown command: {other}");
            print_usage();
            process::exit(1);
        }
    }
}

fn print_usage() {
    println!("glyphstack — SDF glyph range builder");
    println!();
    println!("Usage:");
    println!("  glyphstack range <font> [--start N] [--end N] [--output FILE]");
    println!("      Render one codepoint range (default 0-255) to a .pbf file");
    println!("      (default name: {{start}}-{{end}}.pbf)");
    println!("  glyphstack build <font> <dir>");
    println!("      Render the full 0-65535 range as 256 .pbf files into <dir>");
    println!("  glyphstack inspect <font>");
    println!("      Print face metadata and codepoint coverage as JSON");
}

// ---------------------------------------------------------------------------
// range
// ---------------------------------------------------------------------------

struct RangeConfig {
    font_path: Option<String>,
    start: u32,
    end: u32,
    output: Option<String>,
}

fn cmd_range(args: &[String]) {
    let config = parse_range_args(args);

    let Some(ref font_path) = config.font_path else {
        eprintln!("Error: no font file specified");
        process::exit(1);
    };
    if config.end > MAX_CODEPOINT {
        eprintln!("Error: `end` must be a number from 0-65535");
        process::exit(1);
    }
    if config.start > config.end {
        eprintln!("Error: `start` must be less than or equal to `end`");
        process::exit(1);
    }

    let font = read_font(font_path);
    let bytes = match range(&font, config.start, config.end) {
        Ok(bytes) => bytes,
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(1);
        }
    };

    let output = config
        .output
        .unwrap_or_else(|| format!("{}-{}.pbf", config.start, config.end));
    if let Err(e) = fs::write(&output, bytes) {
        eprintln!("Error writing {output}: {e}");
        process::exit(1);
    }
    eprintln!("Wrote {output}");
}

fn parse_range_args(args: &[String]) -> RangeConfig {
    let mut config = RangeConfig {
        font_path: None,
        start: 0,
        end: 255,
        output: None,
    };

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--start" => {
                i += 1;
                config.start = parse_codepoint(args.get(i), "start");
            }
            "--end" => {
                i += 1;
                config.end = parse_codepoint(args.get(i), "end");
            }
            "--output" | "-o" => {
                i += 1;
                if let Some(value) = args.get(i) {
                    config.output = Some(value.clone());
                }
            }
            other => {
                config.font_path = Some(other.to_owned());
            }
        }
        i += 1;
    }

    config
}

fn parse_codepoint(value: Option<&String>, flag: &str) -> u32 {
    let parsed = value.and_then(|v| v.parse::<u32>().ok());
    match parsed {
        Some(n) if n <= MAX_CODEPOINT => n,
        _ => {
            eprintln!("Error: option `{flag}` must be a number from 0-65535");
            process::exit(1);
        }
    }
}

// ---------------------------------------------------------------------------
// build
// ---------------------------------------------------------------------------

fn cmd_build(args: &[String]) {
    let (Some(font_path), Some(dir)) = (args.first(), args.get(1)) else {
        eprintln!("Usage: glyphstack build <font> <dir>");
        process::exit(1);
    };

    let font = read_font(font_path);
    let dir = Path::new(dir);
    if !dir.is_dir() {
        eprintln!("Error: {} is not a directory", dir.display());
        process::exit(1);
    }

    for start in (0..=MAX_CODEPOINT).step_by(WINDOW as usize) {
        let end = start + WINDOW - 1;
        let bytes = match range(&font, start, end) {
            Ok(bytes) => bytes,
            Err(e) => {
                eprintln!("Error: {e}");
                process::exit(1);
            }
        };

        let path = dir.join(format!("{start}-{end}.pbf"));
        if let Err(e) = fs::write(&path, bytes) {
            eprintln!("Error writing {}: {e}", path.display());
            process::exit(1);
        }
    }
}

// ---------------------------------------------------------------------------
// inspect
// ---------------------------------------------------------------------------

fn cmd_inspect(args: &[String]) {
    let Some(font_path) = args.first() else {
        eprintln!("Usage: glyphstack inspect <font>");
        process::exit(1);
    };

    let font = read_font(font_path);
    match load_faces(&font) {
        Ok(faces) => println!("{}", faces_to_json(&faces)),
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(1);
        }
    }
}

fn faces_to_json(faces: &[FaceInfo]) -> String {
    let entries: Vec<String> = faces.iter().map(face_to_json).collect();
    format!("[{}]", entries.join(","))
}

fn face_to_json(face: &FaceInfo) -> String {
    let mut fields = vec![format!(
        "\"family_name\":\"{}\"",
        escape_json(&face.family_name)
    )];
    if let Some(ref style) = face.style_name {
        fields.push(format!("\"style_name\":\"{}\"", escape_json(style)));
    }
    let points: Vec<String> = face.points.iter().map(u32::to_string).collect();
    fields.push(format!("\"points\":[{}]", points.join(",")));
    format!("{{{}}}", fields.join(","))
}

fn escape_json(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            c if (c as u32) < 0x20 => {
                out.push_str(&format!("\\u{:04x}", c as u32));
            }
            c => out.push(c),
        }
    }
    out
}

// ---------------------------------------------------------------------------

fn read_font(path: &str) -> Vec<u8> {
    match fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) => {
            eprintln!("Error reading {path}: {e}");
            process::exit(1);
        }
    }
}
