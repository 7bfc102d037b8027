//! Load → mutate → save, with the console messages users see on stdout.
//!
//! `Start → Loaded → Mutated → Saved → Done`; a usage, load or save failure
//! ends the run immediately. Nothing is retried.

use crate::conf;
use crate::record::{Abc, ABC_REGION};
use anyhow::{Context, Result};
use std::ffi::OsString;
use std::io::Write;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{error, info};

pub const DEFAULT_READ_PATH: &str = "./complex_config.conf";
pub const DEFAULT_WRITE_PATH: &str = "./complex_config_write.conf";

/// Where the record is read from and written to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Paths {
    pub read: PathBuf,
    pub write: PathBuf,
}

impl Default for Paths {
    fn default() -> Self {
        Self {
            read: PathBuf::from(DEFAULT_READ_PATH),
            write: PathBuf::from(DEFAULT_WRITE_PATH),
        }
    }
}

impl Paths {
    /// Resolves paths from the full argument vector (program name first).
    pub fn from_args(args: &[OsString]) -> Result<Self, RunError> {
        match args {
            [] | [_] => Ok(Self::default()),
            [_, read, write] => Ok(Self {
                read: PathBuf::from(read),
                write: PathBuf::from(write),
            }),
            [program, ..] => Err(RunError::Usage {
                program: program.to_string_lossy().into_owned(),
            }),
        }
    }
}

/// Terminal failures of a run. `Display` is the line printed to the user.
#[derive(Debug, Error)]
pub enum RunError {
    #[error("usage: {program} [read conf] [write conf]")]
    Usage { program: String },

    #[error("Read {} FAILED", path.display())]
    Load { path: PathBuf, cause: anyhow::Error },

    #[error("Write {} FAILED", path.display())]
    Save { path: PathBuf, cause: anyhow::Error },

    #[error("console output failed: {0}")]
    Console(#[from] std::io::Error),
}

/// Loader/saver the driver works against.
#[cfg_attr(test, mockall::automock)]
pub trait ConfStore {
    fn load(&self, path: &Path) -> Result<Abc>;
    fn save(&self, path: &Path, abc: &Abc) -> Result<()>;
}

/// `ConfStore` backed by `.conf` files on disk.
#[derive(Debug, Default, Clone, Copy)]
pub struct FileStore;

impl ConfStore for FileStore {
    fn load(&self, path: &Path) -> Result<Abc> {
        conf::load(path, ABC_REGION)
            .with_context(|| format!("Failed to load config from {}", path.display()))
    }

    fn save(&self, path: &Path, abc: &Abc) -> Result<()> {
        conf::save(path, ABC_REGION, abc)
            .with_context(|| format!("Failed to save config to {}", path.display()))
    }
}

fn execute<S, W>(args: &[OsString], store: &S, out: &mut W) -> Result<(), RunError>
where
    S: ConfStore + ?Sized,
    W: Write,
{
    let paths = Paths::from_args(args)?;
    info!(
        "Using read path {} and write path {}",
        paths.read.display(),
        paths.write.display()
    );

    // 1) Load
    let mut abc = store.load(&paths.read).map_err(|cause| RunError::Load {
        path: paths.read.clone(),
        cause,
    })?;
    writeln!(out, "Read {} OK", paths.read.display())?;

    // 2) Mutate
    abc.apply_literals();

    // 3) Save
    writeln!(
        out,
        "Change value of abc and write to new file: {}",
        paths.write.display()
    )?;
    store
        .save(&paths.write, &abc)
        .map_err(|cause| RunError::Save {
            path: paths.write.clone(),
            cause,
        })?;
    writeln!(out, "Write {} OK", paths.write.display())?;

    Ok(())
}

/// Runs one load → mutate → save pass, printing progress to `out`.
///
/// On failure the error's message has already been written to `out`.
pub fn run<S, W>(args: &[OsString], store: &S, out: &mut W) -> Result<(), RunError>
where
    S: ConfStore + ?Sized,
    W: Write,
{
    let result = execute(args, store, out);
    if let Err(err) = &result {
        match err {
            RunError::Load { cause, .. } | RunError::Save { cause, .. } => {
                error!("{}: {:#}", err, cause)
            }
            RunError::Usage { .. } => {}
            RunError::Console(e) => error!("Could not write to console: {}", e),
        }
        if !matches!(err, RunError::Console(_)) {
            let _ = writeln!(out, "{err}");
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;

    fn args(list: &[&str]) -> Vec<OsString> {
        list.iter().map(|s| OsString::from(*s)).collect()
    }

    fn expected_abc() -> Abc {
        let mut abc = Abc::default();
        abc.apply_literals();
        abc
    }

    fn output(buf: Vec<u8>) -> String {
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn resolves_default_and_explicit_paths() {
        assert_eq!(Paths::from_args(&args(&["prog"])).unwrap(), Paths::default());
        assert_eq!(Paths::from_args(&[]).unwrap(), Paths::default());

        let paths = Paths::from_args(&args(&["prog", "in.conf", "out.conf"])).unwrap();
        assert_eq!(paths.read, PathBuf::from("in.conf"));
        assert_eq!(paths.write, PathBuf::from("out.conf"));
    }

    #[test]
    fn wrong_argument_count_is_a_usage_error() {
        for bad in [
            &["prog", "one"][..],
            &["prog", "a", "b", "c"][..],
            &["prog", "a", "b", "c", "d"][..],
        ] {
            let err = Paths::from_args(&args(bad)).unwrap_err();
            assert_eq!(err.to_string(), "usage: prog [read conf] [write conf]");
        }
    }

    #[test]
    fn usage_error_touches_no_store() {
        let mut store = MockConfStore::new();
        store.expect_load().never();
        store.expect_save().never();

        let mut out = Vec::new();
        let err = run(&args(&["./prog", "only-one"]), &store, &mut out).unwrap_err();

        assert!(matches!(err, RunError::Usage { .. }));
        assert_eq!(output(out), "usage: ./prog [read conf] [write conf]\n");
    }

    #[test]
    fn successful_run_saves_literal_values() {
        let mut store = MockConfStore::new();
        store
            .expect_load()
            .withf(|path| path == Path::new("in.conf"))
            .times(1)
            .returning(|_| {
                Ok(Abc {
                    a: -1,
                    b: 3.5,
                    ..Abc::default()
                })
            });
        store
            .expect_save()
            .withf(|path, abc| path == Path::new("out.conf") && *abc == expected_abc())
            .times(1)
            .returning(|_, _| Ok(()));

        let mut out = Vec::new();
        run(&args(&["prog", "in.conf", "out.conf"]), &store, &mut out).unwrap();

        assert_eq!(
            output(out),
            "Read in.conf OK\n\
             Change value of abc and write to new file: out.conf\n\
             Write out.conf OK\n"
        );
    }

    #[test]
    fn load_failure_never_saves() {
        let mut store = MockConfStore::new();
        store
            .expect_load()
            .times(1)
            .returning(|_| Err(anyhow!("no such file")));
        store.expect_save().never();

        let mut out = Vec::new();
        let err = run(&args(&["prog"]), &store, &mut out).unwrap_err();

        assert!(matches!(err, RunError::Load { ref path, .. } if path == Path::new(DEFAULT_READ_PATH)));
        assert_eq!(output(out), "Read ./complex_config.conf FAILED\n");
    }

    #[test]
    fn save_failure_is_reported_after_mutation() {
        let mut store = MockConfStore::new();
        store
            .expect_load()
            .times(1)
            .returning(|_| Ok(Abc::default()));
        store
            .expect_save()
            .withf(|_, abc| *abc == expected_abc())
            .times(1)
            .returning(|_, _| Err(anyhow!("permission denied")));

        let mut out = Vec::new();
        let err = run(&args(&["prog"]), &store, &mut out).unwrap_err();

        assert!(matches!(err, RunError::Save { .. }));
        assert_eq!(
            output(out),
            "Read ./complex_config.conf OK\n\
             Change value of abc and write to new file: ./complex_config_write.conf\n\
             Write ./complex_config_write.conf FAILED\n"
        );
    }
}
