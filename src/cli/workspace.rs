//! Workspace definition and helper
use std::{
    fs::{create_dir_all, File},
    io::Write,
    path::{Path, PathBuf},
    process::Command,
};

use crate::cli::Cli;

/// Workspace, where output products are generated
pub struct Workspace {
    /// Root Fullpath for this session
    pub root: PathBuf,
}

impl Workspace {
    /// Builds a new workspace either
    ///  1. from $OBSPLAN_WORKSPACE environment variable
    ///  2. from -w workspace CLI argument
    ///  3. or defaults to ./WORKSPACE
    pub fn new(cli: &Cli) -> Self {
        let root = match std::env::var("OBSPLAN_WORKSPACE") {
            Ok(path) => Path::new(&path).to_path_buf(),
            _ => match cli.matches.get_one::<PathBuf>("workspace") {
                Some(path) => path.to_path_buf(),
                None => Path::new("WORKSPACE").to_path_buf(),
            },
        };
        // make sure workspace does exists, otherwise create it
        create_dir_all(&root).unwrap_or_else(|e| {
            panic!(
                "failed to create session workspace \"{}\": {}",
                root.display(),
                e
            )
        });
        info!("session workspace is \"{}\"", root.to_string_lossy());
        Self { root }
    }

    /// Renders one HTML product within this session.
    /// Will panic on write permission issues.
    pub fn render_html(&self, filename: &str, html: String) {
        let fullpath = self.root.join(filename);
        let mut fd = File::create(&fullpath)
            .unwrap_or_else(|e| panic!("failed to create new file {}: {}", filename, e));
        fd.write_all(html.as_bytes())
            .unwrap_or_else(|e| panic!("failed to render HTML content: {}", e));
        info!("{} has been generated", fullpath.display());
    }

    /// Opens generated product with prefered web browser
    #[cfg(target_os = "linux")]
    pub fn open_with_web_browser(&self, filename: &str) {
        let fullpath = self.root.join(filename).to_string_lossy().to_string();
        let web_browsers = vec!["firefox", "chromium"];
        for browser in web_browsers {
            let child = Command::new(browser).arg(fullpath.clone()).spawn();
            if child.is_ok() {
                return;
            }
        }
    }

    /// Opens generated product with prefered web browser
    #[cfg(target_os = "macos")]
    pub fn open_with_web_browser(&self, filename: &str) {
        let fullpath = self.root.join(filename).to_string_lossy().to_string();
        Command::new("open")
            .args(&[fullpath])
            .output()
            .expect("open() failed, can't open HTML content automatically");
    }

    /// Opens generated product with prefered web browser
    #[cfg(target_os = "windows")]
    pub fn open_with_web_browser(&self, filename: &str) {
        let fullpath = self.root.join(filename).to_string_lossy().to_string();
        Command::new("cmd")
            .arg("/C")
            .arg(format!(r#"start {}"#, fullpath))
            .output()
            .expect("failed to open generated HTML content");
    }
}
