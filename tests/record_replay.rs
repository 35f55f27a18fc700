//! Cassette replay integration tests with zero network I/O.
//!
//! Each test writes a cassette to a temp directory and points
//! `DALLE_FORM_REPLAY` at it, so the binary never contacts a live endpoint.

use std::path::{Path, PathBuf};

use assert_cmd::Command;
use base64::Engine;
use predicates::prelude::*;

const PNG_MAGIC: [u8; 8] = [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];

fn cmd(cassette: &Path) -> Command {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("dalle-form");
    cmd.env("DALLE_FORM_REPLAY", cassette.to_str().unwrap())
        .env("DALLE_FORM_CONFIG", "/nonexistent/dalle-form/config.toml")
        .env_remove("DALLE_FORM_REC")
        .env_remove("OPENAI_API_KEY");
    cmd
}

/// Fresh, empty temp directory for one test.
fn work_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("dalle_form_it_{name}"));
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

/// A real JPEG, so the download exercises PNG re-encoding.
fn jpeg_b64(width: u32, height: u32) -> String {
    let img = image::DynamicImage::new_rgb8(width, height);
    let mut buf = std::io::Cursor::new(Vec::<u8>::new());
    img.write_to(&mut buf, image::ImageFormat::Jpeg).unwrap();
    base64::engine::general_purpose::STANDARD.encode(buf.into_inner())
}

fn success_cassette(dir: &Path) -> PathBuf {
    let b64 = jpeg_b64(16, 9);
    let content = format!(
        "name: fox\nrecorded_at: \"2026-10-01T00:00:00Z\"\ncommit: test\ninteractions:\n  - seq: 0\n    port: image_generator\n    method: generate\n    input: {{}}\n    output:\n      Ok:\n        urls: [\"https://images.example/fox.jpg\"]\n  - seq: 1\n    port: image_fetcher\n    method: fetch\n    input:\n      url: https://images.example/fox.jpg\n    output:\n      Ok:\n        data: {b64}\n        content_type: image/jpeg\n"
    );
    let path = dir.join("success.cassette.yaml");
    std::fs::write(&path, content).unwrap();
    path
}

fn provider_error_cassette(dir: &Path) -> PathBuf {
    let content = "name: broken\nrecorded_at: \"2026-10-01T00:00:00Z\"\ncommit: test\ninteractions:\n  - seq: 0\n    port: image_generator\n    method: generate\n    input: {}\n    output:\n      Err: \"Network error: simulated network error\"\n";
    let path = dir.join("error.cassette.yaml");
    std::fs::write(&path, content).unwrap();
    path
}

#[test]
fn one_shot_generates_renders_and_downloads_png() {
    let dir = work_dir("one_shot");
    let cassette = success_cassette(&dir);

    cmd(&cassette)
        .args(["-k", "sk-test", "-o", dir.to_str().unwrap(), "a red fox in snow"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Generated image: a red fox in snow"))
        .stdout(predicate::str::contains("[16x9 image]"))
        .stdout(predicate::str::contains("Image generated."))
        .stdout(predicate::str::contains("(image/png)"));

    let out = dir.join("generated_image_a red fox in snow.png");
    let data = std::fs::read(&out).expect("download should have been written");
    assert_eq!(&data[..8], &PNG_MAGIC, "Download should be a PNG file");

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn download_name_uses_first_twenty_characters() {
    let dir = work_dir("long_prompt");
    let cassette = success_cassette(&dir);
    let prompt = "a very long prompt that keeps going well past twenty characters";

    cmd(&cassette).args(["-k", "sk-test", "-o", dir.to_str().unwrap(), prompt]).assert().success();

    assert!(dir.join("generated_image_a very long prompt t.png").exists());

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn no_download_flag_skips_file() {
    let dir = work_dir("no_download");
    let cassette = success_cassette(&dir);

    cmd(&cassette)
        .args(["-k", "sk-test", "-o", dir.to_str().unwrap(), "--no-download", "a cat"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Generated image: a cat"));

    assert!(!dir.join("generated_image_a cat.png").exists());

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn provider_error_shows_single_collapsed_message() {
    let dir = work_dir("provider_error");
    let cassette = provider_error_cassette(&dir);

    let output = cmd(&cassette)
        .args(["-k", "sk-test", "-o", dir.to_str().unwrap(), "a red fox in snow"])
        .assert()
        .failure()
        .get_output()
        .stdout
        .clone();
    let stdout = String::from_utf8(output).unwrap();

    assert_eq!(stdout.matches("Error: ").count(), 1, "stdout was: {stdout}");
    assert!(stdout.contains(
        "Error: Error during image generation: Network error: simulated network error"
    ));
    assert!(!stdout.contains("Generated image:"));
    assert_eq!(std::fs::read_dir(&dir).unwrap().count(), 1, "only the cassette should exist");

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn korean_locale_caption() {
    let dir = work_dir("korean");
    let cassette = success_cassette(&dir);

    cmd(&cassette)
        .args(["-k", "sk-test", "-l", "ko", "-a", "가로", "--no-download", "고양이"])
        .assert()
        .success()
        .stdout(predicate::str::contains("생성된 이미지: 고양이"))
        .stdout(predicate::str::contains("이미지가 생성되었습니다."));

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn interactive_session_generate_download_delete() {
    let dir = work_dir("interactive");
    let cassette = success_cassette(&dir);
    let script = "key sk-test\naspect tall\nsize 576x1024\nprompt a red fox in snow\ngenerate\ndownload\ndelete\ndownload\nquit\n";

    let output = cmd(&cassette)
        .args(["-o", dir.to_str().unwrap()])
        .write_stdin(script)
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let stdout = String::from_utf8(output).unwrap();

    assert!(stdout.contains("Size: 1024x1792 [1024x1792, 576x1024]"));
    assert_eq!(stdout.matches("Image generated.").count(), 1);
    assert_eq!(stdout.matches("Image deleted.").count(), 1);
    assert!(stdout.contains("No image in this session."));
    assert!(dir.join("generated_image_a red fox in snow.png").exists());

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn exhausted_cassette_is_reported_not_panicked() {
    let dir = work_dir("exhausted");
    let cassette = dir.join("empty.cassette.yaml");
    std::fs::write(
        &cassette,
        "name: empty\nrecorded_at: \"2026-10-01T00:00:00Z\"\ncommit: test\ninteractions: []\n",
    )
    .unwrap();

    cmd(&cassette)
        .args(["-k", "sk-test", "--no-download", "a cat"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("Error during image generation: Replay error"))
        .stdout(predicate::str::contains("no interactions recorded"));

    let _ = std::fs::remove_dir_all(&dir);
}
