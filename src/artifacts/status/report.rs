//! Status report rendering
//!
//! Renders the five status sections in their fixed order, each as a
//! `=== Header ===` line followed by one entry per line and a blank
//! line. All entries are already sorted by the time they land here.

use derive_new::new;
use std::io::Write;

/// Assembled status sections, ready for display
#[derive(Debug, Clone, Eq, PartialEq, new)]
pub struct StatusReport {
    /// Branch names, current branch prefixed with `*`
    pub branches: Vec<String>,
    /// Filenames staged for addition
    pub staged: Vec<String>,
    /// Filenames staged for removal
    pub removed: Vec<String>,
    /// `<filename> (modified)` / `<filename> (deleted)` entries
    pub modifications: Vec<String>,
    /// Untracked filenames
    pub untracked: Vec<String>,
}

impl StatusReport {
    pub fn write_to(&self, writer: &mut impl Write) -> anyhow::Result<()> {
        Self::write_section(writer, "Branches", &self.branches)?;
        Self::write_section(writer, "Staged Files", &self.staged)?;
        Self::write_section(writer, "Removed Files", &self.removed)?;
        Self::write_section(writer, "Modifications Not Staged For Commit", &self.modifications)?;
        Self::write_section(writer, "Untracked Files", &self.untracked)?;

        Ok(())
    }

    fn write_section(writer: &mut impl Write, header: &str, entries: &[String]) -> anyhow::Result<()> {
        writeln!(writer, "=== {header} ===")?;
        for entry in entries {
            writeln!(writer, "{entry}")?;
        }
        writeln!(writer)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn renders_all_sections_with_blank_separators() {
        let report = StatusReport::new(
            vec!["*master".to_string(), "other".to_string()],
            vec!["staged.txt".to_string()],
            vec![],
            vec![],
            vec!["stray.txt".to_string()],
        );

        let mut out = Vec::new();
        report.write_to(&mut out).unwrap();

        let expected = "\
=== Branches ===
*master
other

=== Staged Files ===
staged.txt

=== Removed Files ===

=== Modifications Not Staged For Commit ===

=== Untracked Files ===
stray.txt

";
        assert_eq!(String::from_utf8(out).unwrap(), expected);
    }
}
