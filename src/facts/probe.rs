use std::env;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::process::Command;

// ipmitool and smartctl are usually in sbin, which may be missing from
// the PATH of a non-login shell.
const SBIN_FALLBACKS: [&str; 3] = ["/usr/sbin", "/sbin", "/usr/local/sbin"];

/// Captured result of a finished probe process. A non-zero exit is not
/// an error at this layer; the collector decides what to do with it.
#[derive(Debug, Clone)]
pub struct ProbeOutput {
    pub status: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

/// Execution context handed to every collector: resolves probe binaries
/// and runs them. "Tool not found" and "could not spawn" are normal
/// results, not errors, so collectors can degrade to empty facts.
pub trait ProbeContext {
    fn find_binary(&self, name: &str) -> Option<PathBuf>;
    fn run_probe(&self, program: &Path, args: &[&str]) -> Option<ProbeOutput>;
}

/// Production context backed by PATH lookup and std::process.
pub struct SystemProbe;

impl ProbeContext for SystemProbe {
    fn find_binary(&self, name: &str) -> Option<PathBuf> {
        let path_dirs = env::var_os("PATH")
            .map(|paths| env::split_paths(&paths).collect::<Vec<_>>())
            .unwrap_or_default();

        path_dirs
            .into_iter()
            .chain(SBIN_FALLBACKS.iter().map(PathBuf::from))
            .map(|dir| dir.join(name))
            .find(|candidate| is_executable(candidate))
    }

    fn run_probe(&self, program: &Path, args: &[&str]) -> Option<ProbeOutput> {
        let output = Command::new(program).args(args).output().ok()?;

        Some(ProbeOutput {
            status: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}

fn is_executable(path: &Path) -> bool {
    match std::fs::metadata(path) {
        Ok(meta) => meta.is_file() && meta.permissions().mode() & 0o111 != 0,
        Err(_) => false,
    }
}
