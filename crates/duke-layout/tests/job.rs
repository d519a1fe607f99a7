//! End-to-end job tests

use std::fs;
use std::path::{Path, PathBuf};

use duke_layout::{
    run_job, ConvertOptions, Error, ErrorKind, InputError, JobStatus, JsonStatusFile,
    OutputFormat, RenderError, StatusError,
};
use pretty_assertions::assert_eq;
use tempfile::TempDir;

const SHEET: &str = r#"{
    "title": "NYY",
    "cells": [
        { "ref": "A1", "value": "NYY Power Cable 0.6/1kV", "bold": true },
        { "ref": "A3", "value": "DIMENSIONS", "bold": true },
        { "ref": "A4", "value": "Size", "bold": true, "border": true },
        { "ref": "B4", "value": "Weight", "bold": true, "border": true },
        { "ref": "A5", "value": 16, "border": true },
        { "ref": "B5", "value": 320, "border": true },
        { "ref": "A6", "value": 25, "border": true },
        { "ref": "B6", "value": 450, "border": true }
    ],
    "merges": ["A1:B1", "A3:B3"],
    "images": [{ "row": 1, "col": 3, "asset": "job_9_images/logo.png" }]
}"#;

fn input(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path
}

/// Records every report
#[derive(Default)]
struct Recorder {
    completed: Vec<(u64, PathBuf)>,
    failed: Vec<(u64, ErrorKind, String)>,
}

impl JobStatus for Recorder {
    fn completed(&mut self, job_id: u64, output: &Path) -> Result<(), StatusError> {
        self.completed.push((job_id, output.to_path_buf()));
        Ok(())
    }

    fn failed(&mut self, job_id: u64, kind: ErrorKind, message: &str) -> Result<(), StatusError> {
        self.failed.push((job_id, kind, message.to_string()));
        Ok(())
    }
}

/// Always fails to report
struct Broken;

fn offline() -> StatusError {
    StatusError::Io(std::io::Error::new(
        std::io::ErrorKind::Other,
        "status store offline",
    ))
}

impl JobStatus for Broken {
    fn completed(&mut self, _: u64, _: &Path) -> Result<(), StatusError> {
        Err(offline())
    }

    fn failed(&mut self, _: u64, _: ErrorKind, _: &str) -> Result<(), StatusError> {
        Err(offline())
    }
}

#[test]
fn test_html_job_writes_output_and_status() {
    let dir = tempfile::tempdir().unwrap();
    let source = input(&dir, "sheet.json", SHEET);
    let output = dir.path().join("out/9.html");
    let mut status = JsonStatusFile::new(dir.path().join("status.json"));

    run_job(&source, &output, &ConvertOptions::new().with_job_id(9), &mut status).unwrap();

    let html = fs::read_to_string(&output).unwrap();
    assert!(html.contains("<title>NYY</title>"));
    let title = html.find("cable-title").unwrap();
    let logo = html.find("/storage/job_9_images/logo.png").unwrap();
    let section = html.find("<h2 class=\"section-header\">DIMENSIONS</h2>").unwrap();
    assert!(title < logo && logo < section);
    assert!(html.contains("<th>Size</th>"));
    assert!(html.contains("<th scope=\"row\">16</th>"));

    let record = status.read().unwrap();
    assert_eq!(record.job_id, 9);
    assert_eq!(record.status, "completed");
    assert_eq!(record.output_path, Some(output.display().to_string()));
}

#[test]
fn test_sql_job() {
    let dir = tempfile::tempdir().unwrap();
    let source = input(&dir, "sheet.json", SHEET);
    let output = dir.path().join("9.sql");
    let options = ConvertOptions::new()
        .with_format(OutputFormat::Sql)
        .with_job_id(9);
    let mut status = Recorder::default();

    run_job(&source, &output, &options, &mut status).unwrap();

    let sql = fs::read_to_string(&output).unwrap();
    assert!(sql.starts_with("CREATE TABLE IF NOT EXISTS `excel_import_job_9_dimensions`"));
    assert!(sql.contains("INSERT INTO `excel_import_job_9_dimensions` (`size`, `weight`, `source_row_index`) VALUES ('16', '320', 5),\n('25', '450', 6);"));
    assert_eq!(status.completed, vec![(9, output)]);
    assert!(status.failed.is_empty());
}

#[test]
fn test_missing_input_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("out.html");
    let mut status = Recorder::default();

    let err = run_job(
        dir.path().join("nope.json"),
        &output,
        &ConvertOptions::new().with_job_id(4),
        &mut status,
    )
    .unwrap_err();

    assert!(matches!(err, Error::Input(InputError::NotFound(_))));
    assert_eq!(status.failed.len(), 1);
    let (job_id, kind, message) = &status.failed[0];
    assert_eq!((*job_id, *kind), (4, ErrorKind::Input));
    assert!(message.contains("nope.json"));
    assert!(!output.exists());
}

#[test]
fn test_missing_section_is_render_error() {
    let dir = tempfile::tempdir().unwrap();
    let source = input(&dir, "sheet.json", SHEET);
    let output = dir.path().join("out.sql");
    let options = ConvertOptions::new()
        .with_format(OutputFormat::Sql)
        .with_section("CURRENT CARRYING");
    let mut status = Recorder::default();

    let err = run_job(&source, &output, &options, &mut status).unwrap_err();

    assert!(matches!(err, Error::Render(RenderError::SectionNotFound(_))));
    assert_eq!(status.failed[0].1, ErrorKind::Render);
    assert!(!output.exists());
}

#[test]
fn test_overlapping_merges_are_structure_errors() {
    let dir = tempfile::tempdir().unwrap();
    let source = input(
        &dir,
        "sheet.json",
        r#"{"cells": [{"ref": "A1", "value": "x"}], "merges": ["A1:B2", "B1:C1"]}"#,
    );
    let mut status = Recorder::default();

    let err = run_job(&source, dir.path().join("out.html"), &ConvertOptions::new(), &mut status)
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Structure);
    assert_eq!(status.failed[0].1, ErrorKind::Structure);
}

#[test]
fn test_unwritable_output_is_output_error() {
    let dir = tempfile::tempdir().unwrap();
    let source = input(&dir, "sheet.json", SHEET);
    let blocker = input(&dir, "blocker", "not a directory");
    let output = blocker.join("out.html");
    let mut status = Recorder::default();

    let err = run_job(&source, &output, &ConvertOptions::new(), &mut status).unwrap_err();

    assert!(matches!(err, Error::Output { .. }));
    assert_eq!(status.failed[0].1, ErrorKind::Output);
    assert!(status.completed.is_empty());
}

#[test]
fn test_status_failure_does_not_mask_result() {
    let dir = tempfile::tempdir().unwrap();
    let source = input(&dir, "sheet.json", SHEET);
    let output = dir.path().join("out.html");

    run_job(&source, &output, &ConvertOptions::new(), &mut Broken).unwrap();
    assert!(output.exists());

    let err = run_job(dir.path().join("nope.csv"), &output, &ConvertOptions::new(), &mut Broken)
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Input);
}
