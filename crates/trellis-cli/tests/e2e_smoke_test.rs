use std::{fs, path::PathBuf};

use tempfile::tempdir;

use trellis_cli::{Args, OutputFormat, run};

/// Collects all .trl files from a directory
fn collect_trl_files(dir: PathBuf) -> Vec<PathBuf> {
    let mut files = if let Ok(entries) = fs::read_dir(&dir) {
        entries
            .flatten()
            .map(|entry| entry.path())
            .filter(|path| {
                path.is_file() && path.extension().and_then(|s| s.to_str()) == Some("trl")
            })
            .collect()
    } else {
        Vec::new()
    };

    // Sort for consistent test output
    files.sort();
    files
}

/// Demos live at the workspace root, not inside the crate.
fn demos_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .unwrap()
        .parent()
        .unwrap()
        .join("demos")
}

fn args_for(input: &PathBuf, output: PathBuf, format: OutputFormat) -> Args {
    Args {
        input: input.to_string_lossy().to_string(),
        output: output.to_string_lossy().to_string(),
        config: None,
        log_level: "off".to_string(),
        format,
    }
}

#[test]
fn e2e_smoke_test_valid_demos() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let demos = collect_trl_files(demos_path());

    assert!(!demos.is_empty(), "No demos found in demos/");

    let mut failed_demos = Vec::new();

    for demo_path in &demos {
        let stem = demo_path.file_stem().unwrap().to_string_lossy().to_string();

        let svg_path = temp_dir.path().join(format!("{stem}.svg"));
        match run(&args_for(demo_path, svg_path.clone(), OutputFormat::Svg)) {
            Ok(()) => {
                let svg = fs::read_to_string(&svg_path).unwrap();
                assert!(svg.contains("<svg"), "{stem}: output is not SVG");
            }
            Err(e) => failed_demos.push((demo_path.clone(), e)),
        }

        let text_path = temp_dir.path().join(format!("{stem}.txt"));
        if let Err(e) = run(&args_for(demo_path, text_path, OutputFormat::Text)) {
            failed_demos.push((demo_path.clone(), e));
        }
    }

    if !failed_demos.is_empty() {
        eprintln!("\nValid demos that failed:");
        for (path, err) in &failed_demos {
            eprintln!("  - {}: {}", path.display(), err);
        }
        panic!("{} valid demo run(s) failed unexpectedly", failed_demos.len());
    }

    println!("✅ All {} valid demos passed", demos.len());
}

#[test]
fn e2e_smoke_test_error_demos() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let error_demos = collect_trl_files(demos_path().join("errors"));

    assert!(
        !error_demos.is_empty(),
        "No error demos found in demos/errors/"
    );

    let mut unexpectedly_succeeded = Vec::new();

    for demo_path in &error_demos {
        let output_path = temp_dir.path().join(format!(
            "error_{}.svg",
            demo_path.file_stem().unwrap().to_string_lossy()
        ));

        if run(&args_for(demo_path, output_path, OutputFormat::Svg)).is_ok() {
            unexpectedly_succeeded.push(demo_path.clone());
        }
    }

    if !unexpectedly_succeeded.is_empty() {
        eprintln!("\nError demos that unexpectedly succeeded:");
        for path in &unexpectedly_succeeded {
            eprintln!("  - {}", path.display());
        }
        panic!(
            "{} error demo(s) succeeded unexpectedly",
            unexpectedly_succeeded.len()
        );
    }

    println!(
        "✅ All {} error demos failed as expected",
        error_demos.len()
    );
}

#[test]
fn e2e_text_listing_of_toolbar() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let input = demos_path().join("toolbar.trl");
    let output = temp_dir.path().join("toolbar.txt");

    run(&args_for(&input, output.clone(), OutputFormat::Text)).expect("toolbar should lay out");

    let listing = fs::read_to_string(output).unwrap();
    let lines: Vec<&str> = listing.lines().collect();
    assert_eq!(lines.len(), 4);
    // close is 36x36, 12 in from the right edge and centered vertically.
    assert_eq!(lines[3], "  close  x=592 y=6 w=36 h=36  abs=(592, 6)");
    assert_eq!(lines[2], "  share  x=548 y=6 w=36 h=36  abs=(548, 6)");
    assert_eq!(lines[1], "  save  x=504 y=6 w=36 h=36  abs=(504, 6)");
}
