#![allow(dead_code)]

use serde_json::json;
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};
use std::process::{Child, ChildStdin, ChildStdout, Command, Stdio};
use std::time::{SystemTime, UNIX_EPOCH};

pub const SAMPLE_CSV: &str = "\
Respondents,Age,sex,Ethnic,academic_performance,academic_description,IQ,type_school,socio_economic_status,Study_Habit,NAT_Results
R-001,15,Male,Cebuano,88,Very Satisfactory,Average,Private,Above poverty line,Good,90
R-002,16,Female,Maranao,75,Satisfactory,Low,Public,Below poverty line,Poor,70
R-003,15,Male,Cebuano,81,Very Satisfactory,Above Average,Private,Above poverty line,Excellent,80
R-004,17,Female,Iliganon,70,Fairly Satisfactory,Average,Public,On poverty line,Good,N/A
";

pub fn temp_dir(prefix: &str) -> PathBuf {
    let p = std::env::temp_dir().join(format!(
        "{}-{}",
        prefix,
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("clock")
            .as_nanos()
    ));
    std::fs::create_dir_all(&p).expect("create temp dir");
    p
}

pub fn write_file(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let p = dir.join(name);
    std::fs::write(&p, contents).expect("write fixture");
    p
}

pub struct Sidecar {
    pub child: Child,
    pub stdin: ChildStdin,
    pub reader: BufReader<ChildStdout>,
    next_id: u64,
}

impl Drop for Sidecar {
    fn drop(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}

pub fn spawn_sidecar() -> Sidecar {
    let exe = env!("CARGO_BIN_EXE_natinsightd");
    let mut child = Command::new(exe)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .spawn()
        .expect("spawn natinsightd");
    let stdin = child.stdin.take().expect("child stdin");
    let stdout = child.stdout.take().expect("child stdout");
    Sidecar {
        child,
        stdin,
        reader: BufReader::new(stdout),
        next_id: 0,
    }
}

impl Sidecar {
    pub fn request(&mut self, method: &str, params: serde_json::Value) -> serde_json::Value {
        self.next_id += 1;
        let id = self.next_id.to_string();
        let payload = json!({
            "id": id,
            "method": method,
            "params": params,
        });
        writeln!(self.stdin, "{}", payload).expect("write request");
        self.stdin.flush().expect("flush request");

        let mut line = String::new();
        self.reader.read_line(&mut line).expect("read response line");
        assert!(!line.trim().is_empty(), "empty response for {}", method);
        let value: serde_json::Value =
            serde_json::from_str(line.trim()).expect("parse response json");
        assert_eq!(value.get("id").and_then(|v| v.as_str()), Some(id.as_str()));
        value
    }

    pub fn request_ok(&mut self, method: &str, params: serde_json::Value) -> serde_json::Value {
        let value = self.request(method, params);
        assert_eq!(
            value.get("ok").and_then(|v| v.as_bool()),
            Some(true),
            "{} failed: {}",
            method,
            value
        );
        value.get("result").cloned().expect("result")
    }

    /// Returns the error object and asserts its code.
    pub fn request_err(
        &mut self,
        method: &str,
        params: serde_json::Value,
        code: &str,
    ) -> serde_json::Value {
        let value = self.request(method, params);
        assert_eq!(
            value.get("ok").and_then(|v| v.as_bool()),
            Some(false),
            "{} unexpectedly succeeded: {}",
            method,
            value
        );
        let error = value.get("error").cloned().expect("error");
        assert_eq!(
            error.get("code").and_then(|v| v.as_str()),
            Some(code),
            "{}: {}",
            method,
            error
        );
        error
    }
}

/// Fresh workspace with `SAMPLE_CSV` imported.
pub fn seeded_workspace(prefix: &str) -> (Sidecar, PathBuf) {
    let workspace = temp_dir(prefix);
    let csv = write_file(&workspace, "nat.csv", SAMPLE_CSV);
    let mut sidecar = spawn_sidecar();
    sidecar.request_ok(
        "workspace.select",
        json!({ "path": workspace.to_string_lossy() }),
    );
    let imported = sidecar.request_ok(
        "records.importCsv",
        json!({ "path": csv.to_string_lossy() }),
    );
    assert_eq!(imported.get("imported").and_then(|v| v.as_u64()), Some(4));
    (sidecar, workspace)
}
