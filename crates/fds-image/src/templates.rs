//! Player disk templates

// SPDX-FileCopyrightText: © 2024 Marcus Rowe <undisbeliever@gmail.com>
//
// SPDX-License-Identifier: MIT

use crate::errors::TemplateError;
use crate::project::TempoMode;

use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};

pub trait TemplateStore {
    fn load_template(&self, mode: TempoMode) -> Result<Vec<u8>, TemplateError>;
}

pub fn template_file_name(mode: TempoMode) -> &'static str {
    match mode {
        TempoMode::FamiStudio => "fds_famistudio.fds",
        TempoMode::FamiTracker => "fds_famitracker.fds",
    }
}

/// A directory containing the player disk templates.
pub struct TemplateDirectory(PathBuf);

impl TemplateDirectory {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self(path.into())
    }

    pub fn path(&self) -> &Path {
        &self.0
    }

    pub fn template_path(&self, mode: TempoMode) -> PathBuf {
        self.0.join(template_file_name(mode))
    }
}

impl TemplateStore for TemplateDirectory {
    fn load_template(&self, mode: TempoMode) -> Result<Vec<u8>, TemplateError> {
        let path = self.template_path(mode);

        match std::fs::read(&path) {
            Ok(data) => Ok(data),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Err(TemplateError::NotFound(mode)),
            Err(e) => Err(TemplateError::IoError(path, e)),
        }
    }
}

impl TemplateStore for HashMap<TempoMode, Vec<u8>> {
    fn load_template(&self, mode: TempoMode) -> Result<Vec<u8>, TemplateError> {
        match self.get(&mode) {
            Some(t) => Ok(t.clone()),
            None => Err(TemplateError::NotFound(mode)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_template_directory() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("fds_famitracker.fds"), [1, 2, 3]).unwrap();

        let templates = TemplateDirectory::new(dir.path());

        assert_eq!(
            templates.load_template(TempoMode::FamiTracker).unwrap(),
            [1, 2, 3]
        );
        assert!(matches!(
            templates.load_template(TempoMode::FamiStudio),
            Err(TemplateError::NotFound(TempoMode::FamiStudio))
        ));
    }

    #[test]
    fn test_template_map() {
        let templates = HashMap::from([(TempoMode::FamiStudio, vec![4, 5])]);

        assert_eq!(templates.load_template(TempoMode::FamiStudio).unwrap(), [4, 5]);
        assert!(matches!(
            templates.load_template(TempoMode::FamiTracker),
            Err(TemplateError::NotFound(TempoMode::FamiTracker))
        ));
    }
}
