use assert_cmd::Command;
use predicates::prelude::*;
use std::path::Path;
use tempfile::TempDir;

const RECTANGLE_SCRIPT: &str = "\
// filled red rectangle
tool rectangle
color red
fill on
down 10 10
move 60 40
up
export
";

fn paintbox_cmd(home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("paintbox").expect("binary exists");
    cmd.env("XDG_CONFIG_HOME", home.join("config"))
        .env("XDG_DATA_HOME", home.join("data"))
        .env("HOME", home);
    cmd
}

fn write_script(dir: &Path, body: &str) -> std::path::PathBuf {
    let path = dir.join("strokes.paint");
    std::fs::write(&path, body).unwrap();
    path
}

fn png_dimensions(bytes: &[u8]) -> (u32, u32) {
    let width = u32::from_be_bytes(bytes[16..20].try_into().unwrap());
    let height = u32::from_be_bytes(bytes[20..24].try_into().unwrap());
    (width, height)
}

#[test]
fn paintbox_help_prints_usage() {
    let temp = TempDir::new().unwrap();
    paintbox_cmd(temp.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Raster drawing surface driven by stroke scripts",
        ));
}

#[test]
fn draw_exports_image_png() {
    let temp = TempDir::new().unwrap();
    let script = write_script(temp.path(), RECTANGLE_SCRIPT);
    let out = temp.path().join("out");

    paintbox_cmd(temp.path())
        .arg("draw")
        .arg(&script)
        .arg("--export-dir")
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("Exported image to"))
        .stdout(predicate::str::contains("1 strokes, 1 exports"));

    let bytes = std::fs::read(out.join("image.png")).unwrap();
    assert_eq!(&bytes[0..8], &[137, 80, 78, 71, 13, 10, 26, 10]);
    assert_eq!(png_dimensions(&bytes), (700, 400));
}

#[test]
fn canvas_size_comes_from_config_home() {
    let temp = TempDir::new().unwrap();
    let config_dir = temp.path().join("config/paintbox");
    std::fs::create_dir_all(&config_dir).unwrap();
    std::fs::write(
        config_dir.join("config.toml"),
        "[canvas]\nwidth = 80\nheight = 50\nbackground = \"white\"\n",
    )
    .unwrap();
    let script = write_script(temp.path(), RECTANGLE_SCRIPT);
    let out = temp.path().join("out");

    paintbox_cmd(temp.path())
        .arg("draw")
        .arg(&script)
        .arg("--export-dir")
        .arg(&out)
        .assert()
        .success();

    let bytes = std::fs::read(out.join("image.png")).unwrap();
    assert_eq!(png_dimensions(&bytes), (80, 50));
}

#[test]
fn save_then_list_gallery() {
    let temp = TempDir::new().unwrap();
    let script = write_script(temp.path(), "tool star\ndown 50 50\nmove 80 50\nup\nsave\n");
    let gallery = temp.path().join("gallery");

    paintbox_cmd(temp.path())
        .arg("draw")
        .arg(&script)
        .args(["--owner", "ada@example.com", "--gallery-dir"])
        .arg(&gallery)
        .assert()
        .success()
        .stdout(predicate::str::contains("Painting saved"))
        .stdout(predicate::str::contains("1 saved, 0 failed saves"));

    paintbox_cmd(temp.path())
        .args(["gallery", "--owner", "ada@example.com", "--gallery-dir"])
        .arg(&gallery)
        .assert()
        .success()
        .stdout(predicate::str::contains("ada@example.com"))
        .stdout(predicate::str::contains(".png"));

    paintbox_cmd(temp.path())
        .args(["gallery", "--owner", "grace@example.com", "--gallery-dir"])
        .arg(&gallery)
        .assert()
        .success()
        .stdout(predicate::str::contains("No paintings found"));
}

#[test]
fn save_without_owner_shows_error_toast() {
    let temp = TempDir::new().unwrap();
    let script = write_script(temp.path(), "save\n");

    paintbox_cmd(temp.path())
        .arg("draw")
        .arg(&script)
        .assert()
        .success()
        .stderr(predicate::str::contains("Could not save painting"))
        .stderr(predicate::str::contains("No owner given"))
        .stdout(predicate::str::contains("0 saved, 1 failed saves"));
}

#[test]
fn bad_script_reports_line_number() {
    let temp = TempDir::new().unwrap();
    let script = write_script(temp.path(), "down 1 1\nwiggle 2 2\n");

    paintbox_cmd(temp.path())
        .arg("draw")
        .arg(&script)
        .assert()
        .failure()
        .stderr(predicate::str::contains("line 2: unknown command 'wiggle'"));
}

#[test]
fn draw_requires_script_argument() {
    let temp = TempDir::new().unwrap();
    paintbox_cmd(temp.path())
        .arg("draw")
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "required arguments were not provided",
        ));
}

#[test]
fn init_config_writes_defaults_once() {
    let temp = TempDir::new().unwrap();
    let config_path = temp.path().join("config/paintbox/config.toml");

    paintbox_cmd(temp.path())
        .arg("init-config")
        .assert()
        .success()
        .stdout(predicate::str::contains("Wrote default config"));

    let written = std::fs::read_to_string(&config_path).unwrap();
    assert!(written.contains("[canvas]"));
    assert!(written.contains("width = 700"));

    paintbox_cmd(temp.path())
        .arg("init-config")
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));

    paintbox_cmd(temp.path())
        .args(["init-config", "--force"])
        .assert()
        .success();

    let script = write_script(temp.path(), RECTANGLE_SCRIPT);
    let out = temp.path().join("out");
    paintbox_cmd(temp.path())
        .arg("draw")
        .arg(&script)
        .arg("--export-dir")
        .arg(&out)
        .assert()
        .success();
    let bytes = std::fs::read(out.join("image.png")).unwrap();
    assert_eq!(png_dimensions(&bytes), (700, 400));
}

#[test]
fn draw_rejects_oversized_canvas() {
    let temp = TempDir::new().unwrap();
    let script = write_script(temp.path(), RECTANGLE_SCRIPT);

    paintbox_cmd(temp.path())
        .arg("draw")
        .arg(&script)
        .args(["--width", "30000"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--width"))
        .stderr(predicate::str::contains("8192"));

    paintbox_cmd(temp.path())
        .arg("draw")
        .arg(&script)
        .args(["--height", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--height"));
}
