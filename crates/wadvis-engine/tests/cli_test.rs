//! Integration tests for the `wadvis` command-line front end

#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use wadvis_formats::{WadKind, WadReader, WadWriter};

fn write_archive(path: &Path, kind: WadKind, lumps: &[(&str, &[u8])]) {
    let mut writer = WadWriter::open(kind).unwrap();
    for (name, data) in lumps {
        writer.add_lump(name, data).unwrap();
    }
    writer.close().unwrap();
    fs::write(path, writer.as_bytes()).unwrap();
}

fn wadvis() -> Command {
    let mut cmd = Command::cargo_bin("wadvis").unwrap();
    for var in ["WADVIS_WAD", "WADVIS_GWA", "WADVIS_OUTPUT", "WADVIS_KIND", "WADVIS_MAX_LUMPS", "WADVIS_LOG"] {
        cmd.env_remove(var);
    }
    cmd
}

#[test]
fn test_help() {
    wadvis()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("vis"))
        .stdout(predicate::str::contains("list"))
        .stdout(predicate::str::contains("extract"));
}

#[test]
fn test_vis_overwrites_gwa_derived_from_wad() {
    let dir = tempfile::tempdir().unwrap();
    let wad = dir.path().join("doom2.wad");
    let gwa = dir.path().join("doom2.gwa");
    write_archive(&wad, WadKind::Internal, &[("MAP01", &[]), ("THINGS", &[0; 10])]);
    write_archive(
        &gwa,
        WadKind::Patch,
        &[("GL_MAP01", &[]), ("GL_VERT", &[1; 8]), ("GL_NODES", &[2; 28])],
    );

    wadvis()
        .args(["vis", "--wad"])
        .arg(&wad)
        .assert()
        .success();

    let data = fs::read(&gwa).unwrap();
    let reader = WadReader::open(&data).unwrap();
    assert_eq!(reader.kind(), WadKind::Patch);
    assert_eq!(reader.lump_count(), 4);
    assert_eq!(reader.lump_name(3).to_string(), "GL_PVS");
    assert_eq!(reader.lump_size(3), 0);
    assert_eq!(reader.get_lump_by_name("GL_VERT").unwrap(), vec![1; 8]);
}

#[test]
fn test_vis_writes_separate_output() {
    let dir = tempfile::tempdir().unwrap();
    let gwa = dir.path().join("e1.gwa");
    let out = dir.path().join("e1-vis.gwa");
    write_archive(&gwa, WadKind::Patch, &[("GL_E1M1", &[]), ("GL_SEGS", &[3; 4])]);
    let before = fs::read(&gwa).unwrap();

    wadvis()
        .args(["vis", "--kind", "iwad", "--gwa"])
        .arg(&gwa)
        .arg("--output")
        .arg(&out)
        .assert()
        .success();

    assert_eq!(fs::read(&gwa).unwrap(), before);
    let data = fs::read(&out).unwrap();
    let reader = WadReader::open(&data).unwrap();
    assert_eq!(reader.kind(), WadKind::Internal);
    assert!(reader.contains("gl_pvs"));
}

#[test]
fn test_vis_reports_engine_failure() {
    let dir = tempfile::tempdir().unwrap();
    let gwa = dir.path().join("empty.gwa");
    write_archive(&gwa, WadKind::Patch, &[("PLAYPAL", &[0; 16])]);

    wadvis()
        .args(["vis", "--gwa"])
        .arg(&gwa)
        .assert()
        .failure()
        .stderr(predicate::str::contains("No levels found"));
}

#[test]
fn test_vis_rejects_missing_input() {
    let dir = tempfile::tempdir().unwrap();

    wadvis()
        .args(["vis", "--wad"])
        .arg(dir.path().join("missing.wad"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("missing.gwa"));

    wadvis()
        .arg("vis")
        .assert()
        .failure()
        .stderr(predicate::str::contains("--wad or --gwa"));
}

#[test]
fn test_vis_rejects_corrupt_archive() {
    let dir = tempfile::tempdir().unwrap();
    let gwa = dir.path().join("bad.gwa");
    fs::write(&gwa, b"ZWAD\x00\x00\x00\x00\x0c\x00\x00\x00").unwrap();

    wadvis()
        .args(["vis", "--gwa"])
        .arg(&gwa)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid input archive"));
}

#[test]
fn test_list() {
    let dir = tempfile::tempdir().unwrap();
    let wad = dir.path().join("list.wad");
    write_archive(&wad, WadKind::Patch, &[("FLOOR", &[1, 2, 3]), ("floor", &[0xAA])]);

    wadvis()
        .arg("list")
        .arg(&wad)
        .assert()
        .success()
        .stdout(predicate::str::contains("PWAD 2 lumps"))
        .stdout(predicate::str::is_match(r"0\s+FLOOR\s+12\s+3").unwrap())
        .stdout(predicate::str::is_match(r"1\s+FLOOR\s+15\s+1").unwrap());
}

#[test]
fn test_extract_uses_last_lump() {
    let dir = tempfile::tempdir().unwrap();
    let wad = dir.path().join("patch.wad");
    let out = dir.path().join("floor.lmp");
    write_archive(&wad, WadKind::Patch, &[("FLOOR", &[1, 2, 3]), ("FLOOR", &[0xAA])]);

    wadvis()
        .args(["extract"])
        .arg(&wad)
        .arg("floor")
        .arg("--output")
        .arg(&out)
        .assert()
        .success();

    assert_eq!(fs::read(&out).unwrap(), vec![0xAA]);
}

#[test]
fn test_extract_through_patches() {
    let dir = tempfile::tempdir().unwrap();
    let base = dir.path().join("doom2.wad");
    let patch1 = dir.path().join("textures.wad");
    let patch2 = dir.path().join("sky.wad");
    let floor = dir.path().join("floor.lmp");
    let playpal = dir.path().join("playpal.lmp");
    write_archive(&base, WadKind::Internal, &[("PLAYPAL", &[7]), ("FLOOR", &[1])]);
    write_archive(&patch1, WadKind::Patch, &[("FLOOR", &[2])]);
    write_archive(&patch2, WadKind::Patch, &[("SKY1", &[3])]);

    wadvis()
        .arg("extract")
        .arg(&base)
        .arg("floor")
        .arg("--patch")
        .arg(&patch1)
        .arg("--patch")
        .arg(&patch2)
        .arg("-o")
        .arg(&floor)
        .assert()
        .success();
    assert_eq!(fs::read(&floor).unwrap(), vec![2]);

    wadvis()
        .arg("extract")
        .arg(&base)
        .arg("PLAYPAL")
        .arg("--patch")
        .arg(&patch1)
        .arg("-o")
        .arg(&playpal)
        .assert()
        .success();
    assert_eq!(fs::read(&playpal).unwrap(), vec![7]);
}

#[test]
fn test_extract_missing_lump() {
    let dir = tempfile::tempdir().unwrap();
    let wad = dir.path().join("patch.wad");
    write_archive(&wad, WadKind::Patch, &[("FLOOR", &[1])]);

    wadvis()
        .arg("extract")
        .arg(&wad)
        .arg("CEILING")
        .arg("-o")
        .arg(dir.path().join("x.lmp"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Lump not found"));
}
