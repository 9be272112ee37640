use std::path::PathBuf;
use std::process::Command;

fn smoke_dir() -> PathBuf {
    let dir = PathBuf::from("target").join("cli_smoke");
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

#[test]
fn frame_command_writes_png() {
    let out = smoke_dir().join("frame.png");
    let _ = std::fs::remove_file(&out);

    let status = Command::new(env!("CARGO_BIN_EXE_neonveil"))
        .args([
            "frame", "--width", "320", "--height", "200", "--pointer", "160,100", "--steps", "30",
            "--out",
        ])
        .arg(&out)
        .status()
        .unwrap();
    assert!(status.success());

    assert_eq!(image::image_dimensions(&out).unwrap(), (320, 200));
}

#[test]
fn frame_command_accepts_palette_json() {
    let dir = smoke_dir();
    let palette_path = dir.join("palette.json");
    std::fs::write(
        &palette_path,
        r##"{"primary":"#ff6b00","secondary":"#ffd93d","tertiary":"#ff3d3d"}"##,
    )
    .unwrap();

    let out = dir.join("frame_palette.png");
    let _ = std::fs::remove_file(&out);

    let status = Command::new(env!("CARGO_BIN_EXE_neonveil"))
        .args(["frame", "--width", "128", "--height", "96", "--pointer", "64,48"])
        .arg("--palette")
        .arg(&palette_path)
        .arg("--out")
        .arg(&out)
        .status()
        .unwrap();
    assert!(status.success());
    assert!(out.exists());
}

#[test]
fn frame_command_rejects_malformed_pointer() {
    let out = smoke_dir().join("never.png");
    let status = Command::new(env!("CARGO_BIN_EXE_neonveil"))
        .args(["frame", "--pointer", "not-a-point", "--out"])
        .arg(&out)
        .status()
        .unwrap();
    assert!(!status.success());
}
