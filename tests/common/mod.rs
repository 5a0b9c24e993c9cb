//! Shared fixtures for integration tests.
//!
//! `FakeRunner` stands in for the vendored .NET tools and produces the files
//! they would produce, so the pipeline can run without mono or Windows.

#![allow(dead_code)]

use kodegen_bundler_squirrel::bundler::{
    CommandOutput, CommandRunner, Error, InstallerBuilder, InstallerRequest, Invocation, Logger,
    NoopLogger, Overrides, Result, Toolset,
};
use serde_json::json;
use std::{
    ffi::OsString,
    path::{Path, PathBuf},
    sync::{Arc, Mutex},
    time::Duration,
};
use tempfile::TempDir;

pub const FOOTEST_PACKAGE: &str = r#"{
  "name": "footest",
  "productName": "Foo",
  "description": "Just a test.",
  "version": "0.0.1",
  "author": "Jane Doe <jane@example.com> (https://example.com/jane)"
}"#;

pub const BARTEST_PACKAGE: &str = r#"{
  "name": "bartest",
  "description": "Just a test.",
  "version": "0.0.1",
  "author": {"name": "John Roe", "url": "https://example.com/john"}
}"#;

/// Packs root-level files into asar bytes.
pub fn pack_asar(files: &[(&str, &[u8])]) -> Vec<u8> {
    let mut index = serde_json::Map::new();
    let mut offset = 0usize;
    for (name, data) in files {
        index.insert(
            name.to_string(),
            json!({"size": data.len(), "offset": offset.to_string()}),
        );
        offset += data.len();
    }
    let json = serde_json::to_vec(&json!({ "files": index })).expect("json");
    let padded = json.len().div_ceil(4) * 4;
    let payload_size = 4 + padded;
    let header_size = 4 + payload_size;

    let mut out = Vec::new();
    out.extend_from_slice(&4u32.to_le_bytes());
    out.extend_from_slice(&(header_size as u32).to_le_bytes());
    out.extend_from_slice(&(payload_size as u32).to_le_bytes());
    out.extend_from_slice(&(json.len() as u32).to_le_bytes());
    out.extend_from_slice(&json);
    out.resize(8 + header_size, 0);
    for (_, data) in files {
        out.extend_from_slice(data);
    }
    out
}

/// Temporary workspace holding an app, a vendor dir, a staging base and outputs.
pub struct Workspace {
    pub tmp: TempDir,
}

impl Workspace {
    pub fn new() -> Self {
        let ws = Self {
            tmp: TempDir::new().expect("tempdir"),
        };
        let vendor = ws.vendor_dir();
        std::fs::create_dir_all(vendor.join("squirrel")).expect("mkdir");
        std::fs::create_dir_all(vendor.join("nuget")).expect("mkdir");
        std::fs::create_dir_all(vendor.join("resources")).expect("mkdir");
        std::fs::write(vendor.join("squirrel/Squirrel.exe"), b"update").expect("write");
        std::fs::write(vendor.join("resources/icon.ico"), b"ico").expect("write");
        std::fs::write(vendor.join("resources/animation.gif"), b"gif").expect("write");
        std::fs::create_dir_all(ws.staging_base()).expect("mkdir");
        ws
    }

    pub fn path(&self) -> &Path {
        self.tmp.path()
    }

    pub fn vendor_dir(&self) -> PathBuf {
        self.path().join("vendor")
    }

    pub fn staging_base(&self) -> PathBuf {
        self.path().join("staging")
    }

    /// Electron app whose `package.json` lives in `resources/app.asar`.
    pub fn app_with_asar(&self, package_json: &str) -> PathBuf {
        let app = self.path().join("app-with-asar");
        std::fs::create_dir_all(app.join("resources")).expect("mkdir");
        std::fs::write(
            app.join("resources/app.asar"),
            pack_asar(&[
                ("package.json", package_json.as_bytes()),
                ("main.js", b"require('electron')"),
            ]),
        )
        .expect("write");
        write_binaries(&app);
        app
    }

    /// Electron app with a loose `resources/app/package.json`.
    pub fn app_without_asar(&self, package_json: &str) -> PathBuf {
        let app = self.path().join("app-without-asar");
        std::fs::create_dir_all(app.join("resources/app")).expect("mkdir");
        std::fs::write(app.join("resources/app/package.json"), package_json).expect("write");
        write_binaries(&app);
        app
    }

    /// Directory with no metadata at all.
    pub fn app_without_metadata(&self) -> PathBuf {
        let app = self.path().join("app-without-metadata");
        std::fs::create_dir_all(app.join("resources")).expect("mkdir");
        write_binaries(&app);
        app
    }

    /// Local directory acting as a remote release feed.
    pub fn feed(&self, name: &str, releases: &[&str]) -> PathBuf {
        let feed = self.path().join("feeds").join(name);
        std::fs::create_dir_all(&feed).expect("mkdir");
        let mut manifest = String::new();
        for release in releases {
            std::fs::write(feed.join(release), release.as_bytes()).expect("write");
            manifest.push_str(&format!("0000 {} 1\n", release));
        }
        std::fs::write(feed.join("RELEASES"), manifest).expect("write");
        feed
    }

    pub fn request(&self, src: &Path, dest: &Path, options: Overrides) -> InstallerRequest {
        InstallerBuilder::new()
            .src(src)
            .dest(dest)
            .options(options)
            .toolset(Toolset::new(self.vendor_dir()))
            .staging_base(self.staging_base())
            .logger(NoopLogger)
            .build()
            .expect("request")
    }

    /// Number of staging roots currently on disk.
    pub fn staging_roots(&self) -> usize {
        std::fs::read_dir(self.staging_base())
            .map(|entries| entries.count())
            .unwrap_or(0)
    }
}

fn write_binaries(app: &Path) {
    std::fs::write(app.join("footest.exe"), b"MZ").expect("write");
    std::fs::write(app.join("bartest.exe"), b"MZ").expect("write");
    std::fs::write(app.join("ffmpeg.dll"), b"dll").expect("write");
    std::fs::write(app.join("LICENSE"), b"MIT").expect("write");
}

/// Logger collecting every message.
#[derive(Clone, Default)]
pub struct MemoryLogger {
    pub lines: Arc<Mutex<Vec<String>>>,
}

impl Logger for MemoryLogger {
    fn log(&self, message: &str) {
        self.lines.lock().expect("lock").push(message.to_string());
    }
}

/// Emulates NuGet, SyncReleases and Squirrel on the filesystem.
#[derive(Clone, Default)]
pub struct FakeRunner {
    /// Every invocation, in order.
    pub calls: Arc<Mutex<Vec<Invocation>>>,
    /// Feed URL to local directory.
    pub feeds: Arc<Mutex<Vec<(String, PathBuf)>>>,
    /// Program name that should fail.
    pub fail: Option<&'static str>,
}

impl FakeRunner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing(program: &'static str) -> Self {
        Self {
            fail: Some(program),
            ..Self::default()
        }
    }

    pub fn with_feed(self, url: &str, dir: PathBuf) -> Self {
        self.feeds.lock().expect("lock").push((url.to_string(), dir));
        self
    }

    pub fn programs(&self) -> Vec<String> {
        self.calls
            .lock()
            .expect("lock")
            .iter()
            .map(Invocation::program_name)
            .collect()
    }

    pub fn call(&self, program: &str) -> Option<Invocation> {
        self.calls
            .lock()
            .expect("lock")
            .iter()
            .find(|i| i.program_name() == program)
            .cloned()
    }

    fn emulate(&self, invocation: &Invocation) -> std::io::Result<()> {
        let args = &invocation.args;
        match invocation.program_name().as_str() {
            "NuGet.exe" => {
                let spec = std::fs::read_to_string(&args[1])?;
                let id = element(&spec, "id");
                let version = element(&spec, "version");
                let out = PathBuf::from(value_after(args, "-OutputDirectory").expect("output"));
                std::fs::write(out.join(format!("{}.{}.nupkg", id, version)), spec)?;
            }
            "SyncReleases.exe" => {
                let url = value_after(args, "--url").expect("url");
                let release_dir = PathBuf::from(value_after(args, "--releaseDir").expect("dir"));
                let feeds = self.feeds.lock().expect("lock");
                let (_, feed) = feeds
                    .iter()
                    .find(|(u, _)| *u == url.to_string_lossy())
                    .ok_or_else(|| std::io::Error::other("feed unreachable"))?;
                for entry in std::fs::read_dir(feed)? {
                    let entry = entry?;
                    std::fs::copy(entry.path(), release_dir.join(entry.file_name()))?;
                }
            }
            "Squirrel.com" | "Squirrel-Mono.exe" => {
                let package = PathBuf::from(value_after(args, "--releasify").expect("package"));
                let release_dir = PathBuf::from(value_after(args, "--releaseDir").expect("dir"));
                let stem = package
                    .file_stem()
                    .map(|s| s.to_string_lossy().into_owned())
                    .unwrap_or_default();
                let split = stem
                    .char_indices()
                    .find(|(i, c)| *c == '.' && stem[i + 1..].starts_with(|d: char| d.is_ascii_digit()))
                    .map(|(i, _)| i)
                    .expect("versioned package name");
                let (id, version) = (&stem[..split], &stem[split + 1..]);
                let full = format!("{}-{}-full.nupkg", id, version);

                let prior: Vec<String> = std::fs::read_dir(&release_dir)?
                    .filter_map(|e| e.ok())
                    .map(|e| e.file_name().to_string_lossy().into_owned())
                    .filter(|n| n.starts_with(&format!("{}-", id)) && n.ends_with("-full.nupkg"))
                    .collect();
                if prior.iter().any(|n| *n != full) {
                    std::fs::write(
                        release_dir.join(format!("{}-{}-delta.nupkg", id, version)),
                        b"delta",
                    )?;
                }

                std::fs::copy(&package, release_dir.join(&full))?;
                std::fs::write(release_dir.join("RELEASES"), format!("0000 {} 1\n", full))?;
                std::fs::write(release_dir.join("Setup.exe"), b"setup")?;
                if !args.iter().any(|a| a == "--no-msi") {
                    std::fs::write(release_dir.join("Setup.msi"), b"msi")?;
                }
            }
            other => return Err(std::io::Error::other(format!("unexpected program {}", other))),
        }
        Ok(())
    }
}

impl CommandRunner for FakeRunner {
    async fn run(&self, invocation: &Invocation, logger: &dyn Logger) -> Result<CommandOutput> {
        logger.log(&format!("Executing file {}", invocation.command_line()));
        self.calls.lock().expect("lock").push(invocation.clone());

        if self.fail == Some(invocation.program_name().as_str()) || self.fail == Some("*") {
            return Err(Error::Execution {
                reason: "exit code 1".into(),
                command: invocation.command_line(),
                stderr: "simulated failure".into(),
            });
        }

        self.emulate(invocation).map_err(|e| Error::Execution {
            reason: e.to_string(),
            command: invocation.command_line(),
            stderr: String::new(),
        })?;
        Ok(CommandOutput::default())
    }
}

fn value_after<'a>(args: &'a [OsString], flag: &str) -> Option<&'a OsString> {
    args.iter()
        .position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
}

fn element(xml: &str, tag: &str) -> String {
    let open = format!("<{}>", tag);
    let close = format!("</{}>", tag);
    let start = xml.find(&open).expect("open tag") + open.len();
    let end = xml[start..].find(&close).expect("close tag") + start;
    xml[start..end].to_string()
}

/// Polls for a file to appear, for collaborators that materialize files late.
pub async fn wait_for_file(path: &Path) -> bool {
    for _ in 0..20 {
        if tokio::fs::try_exists(path).await.unwrap_or(false) {
            return true;
        }
        tokio::time::sleep(Duration::from_millis(50)).await;
    }
    false
}
