//! Preset book commands - save, list, show, and delete pendulum presets.
//!
//! The book is a YAML file holding [`harmonograph::PresetBook`]; entries
//! keep their auto-incrementing ids across save/load.

use std::fs;
use std::path::Path;

use harmonograph::{PresetBook, TabPreset};

use super::common::parse_pendulum;

const DEFAULT_BOOK: &str = "presets.yaml";

/// Error type for preset book I/O.
#[derive(Debug)]
pub enum PresetError {
    Io(String),
    Format(String),
}

impl std::fmt::Display for PresetError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PresetError::Io(msg) => write!(f, "preset book I/O error: {}", msg),
            PresetError::Format(msg) => write!(f, "preset book format error: {}", msg),
        }
    }
}

impl std::error::Error for PresetError {}

/// Load a book, treating a missing file as an empty book.
pub fn load_book(path: &str) -> Result<PresetBook, PresetError> {
    if !Path::new(path).exists() {
        return Ok(PresetBook::new());
    }
    let content = fs::read_to_string(path).map_err(|e| PresetError::Io(e.to_string()))?;
    serde_yaml::from_str(&content).map_err(|e| PresetError::Format(e.to_string()))
}

pub fn save_book(path: &str, book: &PresetBook) -> Result<(), PresetError> {
    let content = serde_yaml::to_string(book).map_err(|e| PresetError::Format(e.to_string()))?;
    fs::write(path, content).map_err(|e| PresetError::Io(e.to_string()))
}

/// Execute the presets command.
pub fn cmd_presets(args: &[String]) {
    let mut book_path = DEFAULT_BOOK.to_string();
    let mut action: Option<&str> = None;
    let mut positional: Vec<&String> = Vec::new();
    let mut x_spec: Option<&String> = None;
    let mut y_spec: Option<&String> = None;

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "-b" | "--book" => {
                i += 1;
                if i < args.len() {
                    book_path = args[i].clone();
                }
            }
            "-x" => {
                i += 1;
                if i < args.len() {
                    x_spec = Some(&args[i]);
                }
            }
            "-y" => {
                i += 1;
                if i < args.len() {
                    y_spec = Some(&args[i]);
                }
            }
            "-h" | "--help" => {
                print_usage();
                return;
            }
            other if action.is_none() && !other.starts_with('-') => {
                action = Some(args[i].as_str());
            }
            _ if action.is_some() => {
                positional.push(&args[i]);
            }
            other => {
                eprintln!("Unknown option: {}", other);
                print_usage();
                std::process::exit(1);
            }
        }
        i += 1;
    }

    let result = match action.unwrap_or("list") {
        "list" => cmd_list(&book_path),
        "save" => cmd_save(&book_path, &positional, x_spec, y_spec),
        "show" => cmd_show(&book_path, &positional),
        "delete" => cmd_delete(&book_path, &positional),
        other => {
            eprintln!("Unknown presets action: {}", other);
            print_usage();
            std::process::exit(1);
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn cmd_list(book_path: &str) -> Result<(), PresetError> {
    let book = load_book(book_path)?;
    if book.is_empty() {
        println!("No presets in {}", book_path);
        return Ok(());
    }
    println!("Presets in {}:", book_path);
    for (id, preset) in book.iter() {
        println!(
            "  [{}] {}  x: A={} f={} p={:.3} d={}  y: A={} f={} p={:.3} d={}",
            id, preset.name,
            preset.x.amplitude, preset.x.frequency, preset.x.phase, preset.x.damping,
            preset.y.amplitude, preset.y.frequency, preset.y.phase, preset.y.damping,
        );
    }
    Ok(())
}

fn cmd_save(
    book_path: &str,
    positional: &[&String],
    x_spec: Option<&String>,
    y_spec: Option<&String>,
) -> Result<(), PresetError> {
    let name = positional.first().unwrap_or_else(|| {
        eprintln!("Usage: harmonograph presets save <name> -x <A,f,p,d> -y <A,f,p,d>");
        std::process::exit(1);
    });
    let (Some(x_spec), Some(y_spec)) = (x_spec, y_spec) else {
        eprintln!("Both -x and -y term specs are required");
        std::process::exit(1);
    };
    let x = parse_pendulum(x_spec).unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    });
    let y = parse_pendulum(y_spec).unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    });

    let mut book = load_book(book_path)?;
    let id = book.save(TabPreset::new(name.as_str(), x, y));
    save_book(book_path, &book)?;
    println!("Saved preset [{}] {}", id, name);
    Ok(())
}

fn cmd_show(book_path: &str, positional: &[&String]) -> Result<(), PresetError> {
    let id = parse_id(positional);
    let book = load_book(book_path)?;
    match book.get(id) {
        Some(preset) => {
            println!("[{}] {}", id, preset.name);
            println!("  x: amplitude={} frequency={} phase={} damping={}",
                preset.x.amplitude, preset.x.frequency, preset.x.phase, preset.x.damping);
            println!("  y: amplitude={} frequency={} phase={} damping={}",
                preset.y.amplitude, preset.y.frequency, preset.y.phase, preset.y.damping);
            Ok(())
        }
        None => {
            eprintln!("No preset with id {}", id);
            std::process::exit(1);
        }
    }
}

fn cmd_delete(book_path: &str, positional: &[&String]) -> Result<(), PresetError> {
    let id = parse_id(positional);
    let mut book = load_book(book_path)?;
    match book.remove(id) {
        Some(preset) => {
            save_book(book_path, &book)?;
            println!("Deleted preset [{}] {}", id, preset.name);
            Ok(())
        }
        None => {
            eprintln!("No preset with id {}", id);
            std::process::exit(1);
        }
    }
}

fn parse_id(positional: &[&String]) -> u32 {
    positional
        .first()
        .and_then(|s| s.parse().ok())
        .unwrap_or_else(|| {
            eprintln!("A numeric preset id is required");
            std::process::exit(1);
        })
}

fn print_usage() {
    eprintln!("Usage: harmonograph presets [action] [options]");
    eprintln!();
    eprintln!("Actions:");
    eprintln!("  list                          List presets (default)");
    eprintln!("  save <name> -x <spec> -y <spec>  Save a new preset");
    eprintln!("  show <id>                     Show one preset");
    eprintln!("  delete <id>                   Delete a preset");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  -b, --book <file>   Preset book file (default: {})", DEFAULT_BOOK);
    eprintln!();
    eprintln!("Term specs are comma lists: amplitude,frequency,phase,damping");
}

#[cfg(test)]
mod tests {
    use super::*;
    use harmonograph::Pendulum;

    #[test]
    fn missing_book_is_empty() {
        let book = load_book("/nonexistent/presets.yaml").unwrap();
        assert!(book.is_empty());
    }

    #[test]
    fn book_round_trips_through_yaml() {
        let mut book = PresetBook::new();
        let id = book.save(TabPreset::new(
            "circle",
            Pendulum::new(1.0, 4.0, 1.5707963, 0.0),
            Pendulum::new(1.0, 4.0, 0.0, 0.0),
        ));

        let dir = std::env::temp_dir().join("harmonograph-preset-test");
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("book.yaml");
        let path = path.to_str().unwrap();

        save_book(path, &book).unwrap();
        let restored = load_book(path).unwrap();
        assert_eq!(restored.get(id), book.get(id));

        // Ids keep counting after a reload.
        let mut restored = restored;
        let next = restored.save(TabPreset::new(
            "next",
            Pendulum::default_x(),
            Pendulum::default_y(),
        ));
        assert_eq!(next, id + 1);

        fs::remove_file(path).ok();
    }

    #[test]
    fn garbage_book_is_a_format_error() {
        let dir = std::env::temp_dir().join("harmonograph-preset-test");
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("garbage.yaml");
        fs::write(&path, ":: not yaml [").unwrap();

        let err = load_book(path.to_str().unwrap()).unwrap_err();
        assert!(matches!(err, PresetError::Format(_)));

        fs::remove_file(&path).ok();
    }
}
