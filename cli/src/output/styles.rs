//! Terminal palette for devpod progress lines and the build summary.

use owo_colors::Style;

/// One `Style` per kind of line devpod prints. Plain text unless built with
/// [`Styles::colored`].
#[derive(Default, Clone)]
pub struct Styles {
    /// `✓` marker after a finished step
    pub success: Style,
    /// `⚠` marker for a missing Dockerfile or skipped post-create hook
    pub warning: Style,
    /// `ℹ` marker
    pub info: Style,
    /// `→` marker before a runtime invocation
    pub step: Style,
    /// Summary keys and `--debug` echo
    pub dim: Style,
    /// "Workspace '...' is up" title
    pub header: Style,
    /// Published `http://localhost:<port>` addresses
    pub url: Style,
}

impl Styles {
    /// The ANSI palette used on a color-capable terminal.
    #[must_use]
    pub fn colored() -> Self {
        Self {
            success: Style::new().green(),
            warning: Style::new().yellow(),
            info: Style::new().blue(),
            step: Style::new().cyan(),
            dim: Style::new().dimmed(),
            header: Style::new().bold().cyan(),
            url: Style::new().underline().bright_blue(),
        }
    }
}
