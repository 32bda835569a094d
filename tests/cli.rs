//! Command-line interface tests.

mod common;

use assert_cmd::Command;
use common::{sample_grid, write_grid, Fixture};
use predicates::prelude::*;
use std::fs;

fn floodviz() -> Command {
    Command::cargo_bin("floodviz").unwrap()
}

#[test]
fn show_writes_html() {
    let fx = Fixture::new();
    let grid = fx.path("res-0000.wd");
    write_grid(&grid, &sample_grid(0.0));
    let out = fx.path("map.html");

    floodviz()
        .arg("show")
        .arg(&grid)
        .args(["--name", "depth", "--undef", "-9999"])
        .arg("--cache")
        .arg(&fx.cache)
        .arg("--output")
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("3 missing cells"));

    let html = fs::read_to_string(&out).unwrap();
    assert!(html.contains("<title>depth</title>"));
}

#[test]
fn show_honours_header_lines() {
    let fx = Fixture::new();
    let grid = fx.path("bare.wd");
    write_grid(&grid, &sample_grid(0.0));
    let text = fs::read_to_string(&grid).unwrap();
    let data: Vec<&str> = text.lines().skip(6).collect();
    fs::write(&grid, data.join("\n")).unwrap();
    let out = fx.path("bare.html");

    floodviz()
        .arg("show")
        .arg(&grid)
        .args(["--name", "depth", "--header-lines", "0"])
        .arg("--cache")
        .arg(&fx.cache)
        .arg("--output")
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("3 missing cells"));
}

#[test]
fn animate_writes_html() {
    let fx = Fixture::new();
    fx.write_frames(0..3);
    let out = fx.path("anim.html");
    let template = format!("{}/res-%04d.wd", fx.dir.path().display());

    floodviz()
        .args(["animate", template.as_str(), "--name", "depth"])
        .arg("--cache")
        .arg(&fx.cache)
        .arg("--output")
        .arg(&out)
        .args(["--start-index", "0", "--end-index", "3"])
        .args(["--start-date", "2019-01-01", "--freq", "6H"])
        .args(["--cmap", "Blues_r", "--alpha", "0.7", "--no-decimate"])
        .assert()
        .success()
        .stdout(predicate::str::contains("3 frames"));

    let html = fs::read_to_string(&out).unwrap();
    assert!(html.contains("2019-01-01 12:00:00"));
}

#[test]
fn style_file_is_applied() {
    let fx = Fixture::new();
    let grid = fx.path("res-0000.wd");
    write_grid(&grid, &sample_grid(0.0));
    let style = fx.path("style.json");
    fs::write(&style, r#"{"colormap": "no_such_map"}"#).unwrap();

    floodviz()
        .arg("show")
        .arg(&grid)
        .args(["--name", "depth"])
        .arg("--cache")
        .arg(&fx.cache)
        .arg("--output")
        .arg(fx.path("map.html"))
        .arg("--style")
        .arg(&style)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown colormap"));
}

#[test]
fn missing_grid_fails() {
    let fx = Fixture::new();
    let out = fx.path("map.html");

    floodviz()
        .arg("show")
        .arg(fx.path("absent.wd"))
        .args(["--name", "depth"])
        .arg("--cache")
        .arg(&fx.cache)
        .arg("--output")
        .arg(&out)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to open file"));

    assert!(!out.exists());
}

#[test]
fn bad_frequency_is_rejected() {
    let fx = Fixture::new();

    floodviz()
        .args(["animate", "res-%04d.wd", "--name", "depth", "--output", "x.html"])
        .arg("--cache")
        .arg(&fx.cache)
        .args(["--start-index", "0", "--end-index", "1", "--start-date", "2019-01-01"])
        .args(["--freq", "fortnightly"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid frequency"));
}

#[test]
fn log_file_is_written() {
    let fx = Fixture::new();
    let grid = fx.path("res-0000.wd");
    write_grid(&grid, &sample_grid(0.0));
    let log = fx.path("floodviz.log");

    floodviz()
        .arg("--log")
        .arg(&log)
        .arg("show")
        .arg(&grid)
        .args(["--name", "depth"])
        .arg("--cache")
        .arg(&fx.cache)
        .arg("--output")
        .arg(fx.path("map.html"))
        .assert()
        .success();

    let text = fs::read_to_string(&log).unwrap();
    assert!(text.contains("Starting floodviz"));
    assert!(text.contains("Read grid file"));
}
