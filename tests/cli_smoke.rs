use std::path::PathBuf;

#[test]
fn cli_writes_artifacts_and_exits_zero() {
    let dir = PathBuf::from("target").join("cli_smoke");
    std::fs::create_dir_all(&dir).unwrap();
    let _ = std::fs::remove_file(dir.join("og-image.svg"));
    let _ = std::fs::remove_file(dir.join("og-image.png"));

    let exe = std::env::var_os("CARGO_BIN_EXE_ogcard")
        .map(PathBuf::from)
        .unwrap_or_else(|| {
            let mut p = PathBuf::from("target").join("debug");
            p.push(if cfg!(windows) { "ogcard.exe" } else { "ogcard" });
            p
        });

    let out_arg = dir.to_string_lossy().to_string();
    let status = std::process::Command::new(exe)
        .args(["--out-dir", out_arg.as_str()])
        .status()
        .unwrap();

    // Raster availability is host-dependent; the vector artifact and a
    // zero exit are unconditional.
    assert!(status.success());
    assert!(dir.join("og-image.svg").exists());
}

#[test]
fn cli_honors_a_content_override() {
    let dir = PathBuf::from("target").join("cli_content_override");
    std::fs::create_dir_all(&dir).unwrap();

    let content_path = dir.join("content.json");
    let mut content = ogcard::CardContent::default();
    content.title = "Override Title".to_string();
    let f = std::fs::File::create(&content_path).unwrap();
    serde_json::to_writer_pretty(f, &content).unwrap();

    let exe = std::env::var_os("CARGO_BIN_EXE_ogcard")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("target").join("debug").join("ogcard"));

    let status = std::process::Command::new(exe)
        .args([
            "--out-dir",
            dir.to_string_lossy().as_ref(),
            "--content",
            content_path.to_string_lossy().as_ref(),
        ])
        .status()
        .unwrap();

    assert!(status.success());
    let svg = std::fs::read_to_string(dir.join("og-image.svg")).unwrap();
    assert!(svg.contains("Override Title"));
}
