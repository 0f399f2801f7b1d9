//! Test fixtures and artifact locations shared across the workspace.
//!
//! Rendered frames from tests go to `<workspace root>/test_output/` so they
//! can be inspected after a run. [`SAMPLE_CATALOG_CSV`] is a small catalog
//! payload in the same shape the Open Supernova Catalog returns.

use once_cell::sync::Lazy;
use std::env;
use std::path::{Path, PathBuf};

#[derive(thiserror::Error, Debug)]
pub enum TestHelperError {
    #[error("Failed to find project root: {0}")]
    ProjectRootNotFound(String),
}

/// Catalog payload covering the interesting cleaning and classification cases.
///
/// | name          | fate                                              |
/// |---------------|---------------------------------------------------|
/// | SN1885A       | kept, type I, two coordinate listings             |
/// | SN1895B       | kept, type IIP                                    |
/// | SN1987A       | kept through the `SN1` name, no claimed type      |
/// | SN1999xx      | dropped, unparseable date                         |
/// | SN2003nodec   | dropped, no declination                           |
/// | AT2005lbv     | dropped, not a supernova                          |
/// | SNLS-05D1     | kept, SNLS                                        |
/// | PS1-10abc     | kept, PS1                                         |
/// | SCP06C1       | kept, SCP wins over the PS1 mention               |
/// | SN2016old     | kept, but year 2021 is outside the frame window   |
/// | SN2001long    | seven fields, skipped at parse time               |
/// | SN1990short   | kept through the `SN1` name, short row            |
pub const SAMPLE_CATALOG_CSV: &str = "\
name,ra,dec,discoverdate,discoverer,claimedtype
SN1885A,\"00:42:43.1,00:42:43.0\",\"+41:16:04,+41:16:05\",1885/08/20,\"Hartwig, Dorpat\",I
SN1895B,13:09:20,-34:13:00,1895/12/13,Fleming,IIP
SN1987A,05:35:28.0,-69:16:11,1987/02/24,\"Shelton, Duhalde\",
SN1999xx,10:00:00,+10:00:00,not a date,LOSS,Ia
SN2003nodec,11:00:00,,2003/04/01,LOSS,Ia
AT2005lbv,12:00:00,+12:00:00,2005/05/05,LOSS,LBV
SNLS-05D1,02:26:00,-04:30:00,2005/09,Supernova Legacy Survey,Ia
PS1-10abc,16:11:09,+55:34:01,2010-06-01,\"Pan-STARRS1, Hawaii\",Ia
SCP06C1,14:30:00,+33:00:00,2006,\"SCP, PS1\",Ia
SN2016old,03:00:00,+03:00:00,2021/01/01,DES,Ia
SN2001long,01:00:00,+01:00:00,2001/01/01,LOSS,Ia,extra
SN1990short,08:00:00,-08:00:00,1990/03/03
";

/// Walk up from the current directory to the Cargo workspace root
pub fn find_project_root() -> Result<PathBuf, TestHelperError> {
    let mut current_dir = env::current_dir().map_err(|e| {
        TestHelperError::ProjectRootNotFound(format!("Failed to get current directory: {}", e))
    })?;

    loop {
        let cargo_toml = current_dir.join("Cargo.toml");
        if cargo_toml.exists() {
            let content = std::fs::read_to_string(&cargo_toml).map_err(|e| {
                TestHelperError::ProjectRootNotFound(format!("Failed to read Cargo.toml: {}", e))
            })?;

            if content.contains("[workspace]") {
                return Ok(current_dir);
            }
        }

        if !current_dir.pop() {
            break;
        }
    }

    Err(TestHelperError::ProjectRootNotFound(
        "Workspace root not found".to_string(),
    ))
}

static PROJECT_ROOT: Lazy<PathBuf> =
    Lazy::new(|| find_project_root().expect("Failed to find project root directory"));

/// `<workspace root>/test_output/`, created on first use
pub fn get_output_dir() -> PathBuf {
    let output_dir = PROJECT_ROOT.join("test_output");
    std::fs::create_dir_all(&output_dir).expect("Failed to create output directory");
    output_dir
}

/// Path inside the test output directory
pub fn output_path<P: AsRef<Path>>(path: P) -> PathBuf {
    get_output_dir().join(path)
}

/// Fresh, empty frame directory under the test output directory
pub fn frame_output_dir(name: &str) -> PathBuf {
    let dir = output_path(Path::new("frames").join(name));
    if dir.exists() {
        std::fs::remove_dir_all(&dir).expect("Failed to clear frame directory");
    }
    std::fs::create_dir_all(&dir).expect("Failed to create frame directory");
    dir
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_project_root_is_workspace() {
        let root = find_project_root().expect("Failed to find project root");
        assert!(root.join("Cargo.toml").exists());
        assert!(root.join("supernova").exists());
    }

    #[test]
    fn test_output_path() {
        let path = output_path("SN_1885.png");
        assert_eq!(path, get_output_dir().join("SN_1885.png"));
    }

    #[test]
    fn test_frame_output_dir_starts_empty() {
        let dir = frame_output_dir("helpers_self_test");
        std::fs::write(dir.join("stale.png"), b"x").unwrap();

        let dir = frame_output_dir("helpers_self_test");
        assert_eq!(std::fs::read_dir(&dir).unwrap().count(), 0);
    }

    #[test]
    fn test_sample_catalog_header() {
        let header = SAMPLE_CATALOG_CSV.lines().next().unwrap();
        assert_eq!(header, "name,ra,dec,discoverdate,discoverer,claimedtype");
    }
}
